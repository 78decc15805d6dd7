//! Omnisig: wallet-side analysis for nested multisig and proxy accounts
//!
//! This crate provides the core reasoning of a multi-signature wallet
//! client featuring:
//! - Signing path resolution over arbitrarily nested multisig/proxy graphs
//! - Branch pruning against the approval state of an in-flight transaction
//! - Deposit (reserve/unreserve) and execution-delay previews for nested
//!   multisig, proxy, announcement, and batch calls
//! - Deterministic multisig address derivation and SS58 address handling
//! - A snapshot-backed chain adapter for offline analysis and testing
//!
//! # Example
//!
//! ```rust
//! use omnisig::account::Account;
//! use omnisig::crypto::AccountId;
//! use omnisig::path::compute_filter_paths;
//! use omnisig::signer::SignerSet;
//!
//! // A 2-of-2 multisig with one locally held member
//! let member = AccountId([1; 32]);
//! let other = AccountId([2; 32]);
//! let multisig = Account::multisig(
//!     AccountId([3; 32]),
//!     2,
//!     vec![Account::plain(member), Account::plain(other)],
//! );
//!
//! let signers: SignerSet = [member].into_iter().collect();
//! let paths = compute_filter_paths(&signers, &multisig, None).unwrap();
//!
//! // One actionable path: sign as `member` on behalf of the multisig
//! assert_eq!(paths.len(), 1);
//! assert_eq!(paths[0].len(), 2);
//! ```

pub mod account;
pub mod call;
pub mod chain;
pub mod cli;
pub mod crypto;
pub mod path;
pub mod reserve;
pub mod signer;
pub mod transaction;

// Re-export commonly used types
pub use account::{Account, AccountType, CallFilter, Delegatee, Proposer, ProxyType};
pub use call::{Call, CallBytes, Timepoint};
pub use chain::{Balance, ChainError, ChainQuery, SnapshotChain};
pub use crypto::{multi_account_id, AccountId, CallHash, GenesisHash};
pub use path::{compute_filter_paths, path_id, FilterPath, PathError};
pub use reserve::{extrinsic_reserve, resolve_reserve, ReserveOutcome};
pub use signer::{LocalSigners, SignerSet};
pub use transaction::{Transaction, TransactionKind, TransactionStatus};
