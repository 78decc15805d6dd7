//! Call decoding model

pub mod call;

pub use call::{Call, CallBytes, MultisigCall, ProxyCall, Timepoint, UtilityCall};
