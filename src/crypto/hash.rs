//! Blake2 hashing utilities
//!
//! Provides the Blake2b-based hashing used for call hashes, multisig
//! account derivation, and SS58 checksums.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Blake2b512, Digest};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

type Blake2b256 = Blake2b<U32>;

/// Errors from parsing hash values
#[derive(Error, Debug)]
pub enum HashError {
    #[error("invalid hash length: {0} bytes, expected 32")]
    InvalidLength(usize),
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// Computes Blake2b-256 hash of the input data
pub fn blake2_256(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Blake2b256::digest(data));
    out
}

/// Computes Blake2b-512 hash of the input data
pub fn blake2_512(data: &[u8]) -> [u8; 64] {
    let mut out = [0u8; 64];
    out.copy_from_slice(&Blake2b512::digest(data));
    out
}

/// Computes Blake2b-256 hash and returns it as a hex string
pub fn blake2_256_hex(data: &[u8]) -> String {
    hex::encode(blake2_256(data))
}

/// Hash identifying a call, as used by the multisig and proxy pallets
/// (Blake2b-256 over the SCALE-encoded call).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallHash(pub [u8; 32]);

impl CallHash {
    /// Hash raw encoded call bytes
    pub fn of(call_bytes: &[u8]) -> Self {
        Self(blake2_256(call_bytes))
    }

    /// Raw bytes of the hash
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for CallHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for CallHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CallHash({})", self)
    }
}

impl From<[u8; 32]> for CallHash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl FromStr for CallHash {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex_part = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(hex_part)?;
        if bytes.len() != 32 {
            return Err(HashError::InvalidLength(bytes.len()));
        }
        let mut out = [0u8; 32];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }
}

impl Serialize for CallHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CallHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Genesis hash identifying a chain (and thereby the network a proxy
/// delegation lives on).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GenesisHash(pub [u8; 32]);

impl GenesisHash {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Bare lowercase hex, without the `0x` prefix
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for GenesisHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for GenesisHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GenesisHash({})", self)
    }
}

impl From<[u8; 32]> for GenesisHash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl FromStr for GenesisHash {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hash: CallHash = s.parse()?;
        Ok(Self(hash.0))
    }
}

impl Serialize for GenesisHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for GenesisHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
