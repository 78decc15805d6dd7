//! In-flight transaction state
//!
//! Records of actions still collecting approvals, as observed by the
//! external transaction store.

pub mod transaction;

pub use transaction::{Transaction, TransactionKind, TransactionStatus};
