//! Signing path resolution
//!
//! Turns an account's delegation graph, optionally correlated with an
//! in-flight transaction, into the set of concrete signing paths the local
//! wallet can act on.

pub mod filter;
pub mod resolver;

pub use filter::{dedup_paths, path_id, path_permits, FilterPath};
pub use resolver::{compute_filter_paths, PathError};
