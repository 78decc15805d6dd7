//! Local signing capability

pub mod registry;

pub use registry::{LocalSigners, SignerSet};
