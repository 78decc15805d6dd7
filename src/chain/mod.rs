//! Chain state access
//!
//! The query capability consumed by the analyzers, plus the snapshot
//! adapter that serves it from a JSON file.

pub mod query;
pub mod snapshot;

pub use query::{
    Announcement, Balance, ChainError, ChainQuery, MultisigConstants, MultisigEntry,
    ProxyConstants, ProxyDef,
};
pub use snapshot::SnapshotChain;
