//! Cryptographic utilities for the wallet core
//!
//! This module provides:
//! - Blake2b hashing (call hashes, checksums)
//! - SS58 address encoding/decoding
//! - Deterministic multisig account derivation

pub mod address;
pub mod hash;

pub use address::{
    decode_ss58, encode_ss58, multi_account_id, AccountId, AddressError, DEFAULT_SS58_PREFIX,
};
pub use hash::{blake2_256, blake2_256_hex, blake2_512, CallHash, GenesisHash, HashError};
