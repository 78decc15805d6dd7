//! Decoded call representation
//!
//! Calls arrive SCALE-encoded and are decoded one level at a time: the
//! variants below carry any wrapped inner call as opaque [`CallBytes`]
//! rather than eagerly decoding the whole tree. Callers that need to look
//! inside a wrapper ask the chain to decode the embedded bytes, so a call
//! that cannot be decoded surfaces an error exactly at the level where it
//! is first inspected.

use crate::account::{CallFilter, ProxyType};
use crate::crypto::{blake2_256, AccountId, CallHash};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An undecoded SCALE-encoded call
#[derive(Clone, PartialEq, Eq)]
pub struct CallBytes(pub Vec<u8>);

impl CallBytes {
    /// Blake2-256 hash of the encoded call, as stored by the multisig pallet
    pub fn hash(&self) -> CallHash {
        CallHash(blake2_256(&self.0))
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.0))
    }
}

impl From<Vec<u8>> for CallBytes {
    fn from(bytes: Vec<u8>) -> Self {
        CallBytes(bytes)
    }
}

impl fmt::Display for CallBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for CallBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CallBytes({})", self.to_hex())
    }
}

impl FromStr for CallBytes {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        Ok(CallBytes(hex::decode(stripped)?))
    }
}

impl Serialize for CallBytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for CallBytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// The block and extrinsic index at which a multisig operation was opened
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timepoint {
    pub height: u32,
    pub index: u32,
}

impl Timepoint {
    pub fn new(height: u32, index: u32) -> Self {
        Self { height, index }
    }
}

/// Multisig pallet calls
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MultisigCall {
    AsMulti {
        threshold: u16,
        other_signatories: Vec<AccountId>,
        maybe_timepoint: Option<Timepoint>,
        call: CallBytes,
    },
    ApproveAsMulti {
        threshold: u16,
        other_signatories: Vec<AccountId>,
        maybe_timepoint: Option<Timepoint>,
        call_hash: CallHash,
    },
    AsMultiThreshold1 {
        other_signatories: Vec<AccountId>,
        call: CallBytes,
    },
    CancelAsMulti {
        threshold: u16,
        other_signatories: Vec<AccountId>,
        timepoint: Timepoint,
        call_hash: CallHash,
    },
}

/// Proxy pallet calls
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProxyCall {
    Proxy {
        real: AccountId,
        force_proxy_type: Option<ProxyType>,
        call: CallBytes,
    },
    Announce {
        real: AccountId,
        call_hash: CallHash,
    },
    RemoveAnnouncement {
        real: AccountId,
        call_hash: CallHash,
    },
    RejectAnnouncement {
        delegate: AccountId,
        call_hash: CallHash,
    },
    ProxyAnnounced {
        delegate: AccountId,
        real: AccountId,
        force_proxy_type: Option<ProxyType>,
        call: CallBytes,
    },
    AddProxy {
        delegate: AccountId,
        proxy_type: ProxyType,
        delay: u32,
    },
    RemoveProxy {
        delegate: AccountId,
        proxy_type: ProxyType,
        delay: u32,
    },
    RemoveProxies,
    CreatePure {
        proxy_type: ProxyType,
        delay: u32,
        index: u16,
    },
    KillPure {
        spawner: AccountId,
        proxy_type: ProxyType,
        index: u16,
        height: u32,
        ext_index: u32,
    },
}

/// Utility pallet calls
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UtilityCall {
    Batch { calls: Vec<CallBytes> },
    BatchAll { calls: Vec<CallBytes> },
    ForceBatch { calls: Vec<CallBytes> },
}

/// A call decoded one level deep
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Call {
    Multisig(MultisigCall),
    Proxy(ProxyCall),
    Utility(UtilityCall),
    /// Any call outside the pallets interpreted here
    Other { pallet: String, method: String },
}

impl Call {
    pub fn as_multi(
        threshold: u16,
        other_signatories: Vec<AccountId>,
        maybe_timepoint: Option<Timepoint>,
        call: CallBytes,
    ) -> Self {
        Call::Multisig(MultisigCall::AsMulti {
            threshold,
            other_signatories,
            maybe_timepoint,
            call,
        })
    }

    pub fn approve_as_multi(
        threshold: u16,
        other_signatories: Vec<AccountId>,
        maybe_timepoint: Option<Timepoint>,
        call_hash: CallHash,
    ) -> Self {
        Call::Multisig(MultisigCall::ApproveAsMulti {
            threshold,
            other_signatories,
            maybe_timepoint,
            call_hash,
        })
    }

    pub fn as_multi_threshold_1(other_signatories: Vec<AccountId>, call: CallBytes) -> Self {
        Call::Multisig(MultisigCall::AsMultiThreshold1 {
            other_signatories,
            call,
        })
    }

    pub fn cancel_as_multi(
        threshold: u16,
        other_signatories: Vec<AccountId>,
        timepoint: Timepoint,
        call_hash: CallHash,
    ) -> Self {
        Call::Multisig(MultisigCall::CancelAsMulti {
            threshold,
            other_signatories,
            timepoint,
            call_hash,
        })
    }

    pub fn proxy(real: AccountId, force_proxy_type: Option<ProxyType>, call: CallBytes) -> Self {
        Call::Proxy(ProxyCall::Proxy {
            real,
            force_proxy_type,
            call,
        })
    }

    pub fn announce(real: AccountId, call_hash: CallHash) -> Self {
        Call::Proxy(ProxyCall::Announce { real, call_hash })
    }

    pub fn remove_announcement(real: AccountId, call_hash: CallHash) -> Self {
        Call::Proxy(ProxyCall::RemoveAnnouncement { real, call_hash })
    }

    pub fn reject_announcement(delegate: AccountId, call_hash: CallHash) -> Self {
        Call::Proxy(ProxyCall::RejectAnnouncement {
            delegate,
            call_hash,
        })
    }

    pub fn proxy_announced(
        delegate: AccountId,
        real: AccountId,
        force_proxy_type: Option<ProxyType>,
        call: CallBytes,
    ) -> Self {
        Call::Proxy(ProxyCall::ProxyAnnounced {
            delegate,
            real,
            force_proxy_type,
            call,
        })
    }

    pub fn add_proxy(delegate: AccountId, proxy_type: ProxyType, delay: u32) -> Self {
        Call::Proxy(ProxyCall::AddProxy {
            delegate,
            proxy_type,
            delay,
        })
    }

    pub fn remove_proxy(delegate: AccountId, proxy_type: ProxyType, delay: u32) -> Self {
        Call::Proxy(ProxyCall::RemoveProxy {
            delegate,
            proxy_type,
            delay,
        })
    }

    pub fn remove_proxies() -> Self {
        Call::Proxy(ProxyCall::RemoveProxies)
    }

    pub fn create_pure(proxy_type: ProxyType, delay: u32, index: u16) -> Self {
        Call::Proxy(ProxyCall::CreatePure {
            proxy_type,
            delay,
            index,
        })
    }

    pub fn kill_pure(
        spawner: AccountId,
        proxy_type: ProxyType,
        index: u16,
        height: u32,
        ext_index: u32,
    ) -> Self {
        Call::Proxy(ProxyCall::KillPure {
            spawner,
            proxy_type,
            index,
            height,
            ext_index,
        })
    }

    pub fn batch(calls: Vec<CallBytes>) -> Self {
        Call::Utility(UtilityCall::Batch { calls })
    }

    pub fn batch_all(calls: Vec<CallBytes>) -> Self {
        Call::Utility(UtilityCall::BatchAll { calls })
    }

    pub fn force_batch(calls: Vec<CallBytes>) -> Self {
        Call::Utility(UtilityCall::ForceBatch { calls })
    }

    pub fn other(pallet: &str, method: &str) -> Self {
        Call::Other {
            pallet: pallet.to_string(),
            method: method.to_string(),
        }
    }

    /// Pallet name as it appears in runtime metadata
    pub fn pallet(&self) -> &str {
        match self {
            Call::Multisig(_) => "multisig",
            Call::Proxy(_) => "proxy",
            Call::Utility(_) => "utility",
            Call::Other { pallet, .. } => pallet,
        }
    }

    /// Method name as it appears in runtime metadata
    pub fn method(&self) -> &str {
        match self {
            Call::Multisig(call) => match call {
                MultisigCall::AsMulti { .. } => "as_multi",
                MultisigCall::ApproveAsMulti { .. } => "approve_as_multi",
                MultisigCall::AsMultiThreshold1 { .. } => "as_multi_threshold_1",
                MultisigCall::CancelAsMulti { .. } => "cancel_as_multi",
            },
            Call::Proxy(call) => match call {
                ProxyCall::Proxy { .. } => "proxy",
                ProxyCall::Announce { .. } => "announce",
                ProxyCall::RemoveAnnouncement { .. } => "remove_announcement",
                ProxyCall::RejectAnnouncement { .. } => "reject_announcement",
                ProxyCall::ProxyAnnounced { .. } => "proxy_announced",
                ProxyCall::AddProxy { .. } => "add_proxy",
                ProxyCall::RemoveProxy { .. } => "remove_proxy",
                ProxyCall::RemoveProxies => "remove_proxies",
                ProxyCall::CreatePure { .. } => "create_pure",
                ProxyCall::KillPure { .. } => "kill_pure",
            },
            Call::Utility(call) => match call {
                UtilityCall::Batch { .. } => "batch",
                UtilityCall::BatchAll { .. } => "batch_all",
                UtilityCall::ForceBatch { .. } => "force_batch",
            },
            Call::Other { method, .. } => method,
        }
    }

    /// Classify the call for proxy permission checks
    pub fn filter(&self) -> CallFilter {
        match self {
            Call::Multisig(_) => CallFilter::MULTISIG,
            Call::Proxy(call) => match call {
                ProxyCall::Announce { .. }
                | ProxyCall::RemoveAnnouncement { .. }
                | ProxyCall::RejectAnnouncement { .. } => CallFilter::ANNOUNCEMENT,
                _ => CallFilter::PROXY,
            },
            Call::Utility(_) => CallFilter::BATCH,
            Call::Other { pallet, .. } => match pallet.as_str() {
                "balances" | "assets" | "vesting" => CallFilter::TRANSFER,
                "staking" | "fastUnstake" => CallFilter::STAKING,
                "nominationPools" => CallFilter::POOLS,
                "democracy" | "referenda" | "convictionVoting" | "treasury" | "bounties" => {
                    CallFilter::GOVERNANCE
                }
                "identity" => CallFilter::IDENTITY,
                "auctions" | "crowdloan" => CallFilter::AUCTION,
                _ => CallFilter::UNKNOWN,
            },
        }
    }
}
