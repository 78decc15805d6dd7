//! Account graph: nested multisig/proxy structures
//!
//! The self-similar authority structure both core algorithms traverse: an
//! account may be a multisig whose members are themselves multisigs or
//! proxied accounts, to arbitrary depth.

pub mod account;
pub mod proxy;

pub use account::{Account, AccountError, AccountType, Delegatee, Proposer};
pub use proxy::{CallFilter, ProxyType};
