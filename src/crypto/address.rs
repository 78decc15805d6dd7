//! Account identifiers and SS58 address handling
//!
//! Provides the 32-byte account id used across the wallet, SS58
//! encoding/decoding with checksum verification, and the deterministic
//! derivation of multisig account ids from a signatory set.

use crate::crypto::hash::{blake2_256, blake2_512};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default SS58 network prefix (generic Substrate, addresses start with '5')
pub const DEFAULT_SS58_PREFIX: u16 = 42;

/// Preamble mixed into the SS58 checksum hash
const SS58_PREAMBLE: &[u8] = b"SS58PRE";

/// Module prefix mixed into multisig account derivation
const MULTISIG_ENTROPY_PREFIX: &[u8; 16] = b"modlpy/utilisuba";

/// Errors related to address parsing and encoding
#[derive(Error, Debug)]
pub enum AddressError {
    #[error("invalid base58: {0}")]
    Base58(#[from] bs58::decode::Error),
    #[error("invalid address length: {0} bytes")]
    InvalidLength(usize),
    #[error("bad ss58 checksum")]
    BadChecksum,
    #[error("unsupported ss58 prefix: {0}")]
    UnsupportedPrefix(u16),
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// A 32-byte account identifier
///
/// Displayed and serialized as an SS58 address under the default prefix;
/// parsing accepts any supported SS58 prefix or bare `0x` hex. Ordering is
/// byte-wise, which is what signatory-set sorting requires.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId(pub [u8; 32]);

impl AccountId {
    /// Raw bytes of the account id
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase, unprefixed hex of the id (the normalized form used in
    /// path step ids)
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Render under a specific SS58 network prefix
    pub fn to_ss58(&self, prefix: u16) -> Result<String, AddressError> {
        encode_ss58(self, prefix)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Default prefix is always in the supported range
        match encode_ss58(self, DEFAULT_SS58_PREFIX) {
            Ok(s) => f.write_str(&s),
            Err(_) => write!(f, "0x{}", self.to_hex()),
        }
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", self)
    }
}

impl From<[u8; 32]> for AccountId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl FromStr for AccountId {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(hex_part) = s.strip_prefix("0x") {
            let bytes = hex::decode(hex_part)?;
            if bytes.len() != 32 {
                return Err(AddressError::InvalidLength(bytes.len()));
            }
            let mut out = [0u8; 32];
            out.copy_from_slice(&bytes);
            return Ok(Self(out));
        }
        let (_, id) = decode_ss58(s)?;
        Ok(id)
    }
}

impl Serialize for AccountId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Encode an account id as an SS58 address
///
/// Address = Base58(prefix || id || checksum) where checksum is the first
/// two bytes of Blake2b-512("SS58PRE" || prefix || id). Only single-byte
/// prefixes (0..=63) are supported, which covers every network this wallet
/// targets.
pub fn encode_ss58(id: &AccountId, prefix: u16) -> Result<String, AddressError> {
    if prefix > 63 {
        return Err(AddressError::UnsupportedPrefix(prefix));
    }

    let mut data = Vec::with_capacity(35);
    data.push(prefix as u8);
    data.extend_from_slice(&id.0);

    let mut preimage = Vec::with_capacity(SS58_PREAMBLE.len() + data.len());
    preimage.extend_from_slice(SS58_PREAMBLE);
    preimage.extend_from_slice(&data);
    let checksum = blake2_512(&preimage);
    data.extend_from_slice(&checksum[..2]);

    Ok(bs58::encode(data).into_string())
}

/// Decode an SS58 address into its network prefix and account id
pub fn decode_ss58(address: &str) -> Result<(u16, AccountId), AddressError> {
    let raw = bs58::decode(address).into_vec()?;
    // prefix byte + 32-byte id + 2-byte checksum
    if raw.len() != 35 {
        return Err(AddressError::InvalidLength(raw.len()));
    }
    let prefix = raw[0] as u16;
    if prefix > 63 {
        return Err(AddressError::UnsupportedPrefix(prefix));
    }

    let mut preimage = Vec::with_capacity(SS58_PREAMBLE.len() + 33);
    preimage.extend_from_slice(SS58_PREAMBLE);
    preimage.extend_from_slice(&raw[..33]);
    let checksum = blake2_512(&preimage);
    if checksum[..2] != raw[33..] {
        return Err(AddressError::BadChecksum);
    }

    let mut id = [0u8; 32];
    id.copy_from_slice(&raw[1..33]);
    Ok((prefix, AccountId(id)))
}

/// Derive the deterministic account id of a multisig from its full
/// signatory set and threshold
///
/// Entropy = Blake2b-256("modlpy/utilisuba" || compact(len) || sorted ids
/// || threshold as u16 LE), matching the chain's own derivation, so the
/// result agrees with the address the chain assigns to the same group.
/// Signatory order does not matter; the set is sorted byte-wise first.
pub fn multi_account_id(who: &[AccountId], threshold: u16) -> AccountId {
    let mut sorted: Vec<AccountId> = who.to_vec();
    sorted.sort();

    let mut entropy =
        Vec::with_capacity(MULTISIG_ENTROPY_PREFIX.len() + 5 + sorted.len() * 32 + 2);
    entropy.extend_from_slice(MULTISIG_ENTROPY_PREFIX);
    entropy.extend_from_slice(&compact_len(sorted.len() as u32));
    for id in &sorted {
        entropy.extend_from_slice(&id.0);
    }
    entropy.extend_from_slice(&threshold.to_le_bytes());

    AccountId(blake2_256(&entropy))
}

/// SCALE compact encoding of a collection length
fn compact_len(n: u32) -> Vec<u8> {
    if n < 0b0100_0000 {
        vec![(n as u8) << 2]
    } else if n < 0b0100_0000_0000_0000 {
        (((n as u16) << 2) | 0b01).to_le_bytes().to_vec()
    } else {
        // Lengths beyond 2^30 never occur for signatory sets
        ((n << 2) | 0b10).to_le_bytes().to_vec()
    }
}
