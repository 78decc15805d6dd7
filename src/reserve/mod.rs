//! Deposit and delay analysis
//!
//! Previews the reserve, unreserve, and timing effects of submitting a
//! nested call before it goes on chain.

pub mod analyzer;
pub mod outcome;

pub use analyzer::{extrinsic_reserve, resolve_reserve};
pub use outcome::{BalanceChanges, DelayMap, ReserveOutcome};
