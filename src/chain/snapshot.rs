//! Snapshot-backed chain state
//!
//! [`SnapshotChain`] serves chain queries from a JSON snapshot instead of a
//! live node: multisig bookkeeping, proxy and announcement pools, pallet
//! constants, and a call table mapping encoded bytes to their decoded form.
//! The CLI loads snapshots taken ahead of time so deposit previews work
//! offline, and tests build them in memory.

use crate::call::{Call, CallBytes};
use crate::chain::query::{
    Announcement, Balance, ChainError, ChainQuery, MultisigConstants, MultisigEntry,
    ProxyConstants, ProxyDef,
};
use crate::crypto::{AccountId, CallHash};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// One multisig operation in a snapshot, keyed inline for readability
#[derive(Clone, Debug, Serialize, Deserialize)]
struct MultisigRecord {
    multisig: AccountId,
    call_hash: CallHash,
    #[serde(flatten)]
    entry: MultisigEntry,
}

/// Announcements of one account together with its reserved deposit
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct AnnouncementPool {
    #[serde(default)]
    announcements: Vec<Announcement>,
    #[serde(default)]
    deposit: Balance,
}

/// Delegations of one account together with its reserved deposit
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct ProxyPool {
    #[serde(default)]
    proxies: Vec<ProxyDef>,
    #[serde(default)]
    deposit: Balance,
}

/// A point-in-time copy of the chain state the wallet core reads
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SnapshotChain {
    #[serde(default)]
    multisigs: Vec<MultisigRecord>,
    #[serde(default)]
    announcements: HashMap<AccountId, AnnouncementPool>,
    #[serde(default)]
    proxies: HashMap<AccountId, ProxyPool>,
    /// Decoded form of every call the snapshot knows, keyed by hex bytes
    #[serde(default)]
    calls: HashMap<String, Call>,
    #[serde(default)]
    multisig_constants: MultisigConstants,
    #[serde(default)]
    proxy_constants: ProxyConstants,
}

impl SnapshotChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a snapshot from a JSON file
    pub fn load(path: &Path) -> Result<Self, ChainError> {
        let data = std::fs::read_to_string(path)?;
        let snapshot: SnapshotChain = serde_json::from_str(&data)?;
        log::info!(
            "loaded chain snapshot from {}: {} multisig entries, {} proxy pools, {} known calls",
            path.display(),
            snapshot.multisigs.len(),
            snapshot.proxies.len(),
            snapshot.calls.len()
        );
        Ok(snapshot)
    }

    pub fn with_multisig_constants(mut self, constants: MultisigConstants) -> Self {
        self.multisig_constants = constants;
        self
    }

    pub fn with_proxy_constants(mut self, constants: ProxyConstants) -> Self {
        self.proxy_constants = constants;
        self
    }

    /// Record an open multisig operation
    pub fn insert_multisig_entry(
        &mut self,
        multisig: AccountId,
        call_hash: CallHash,
        entry: MultisigEntry,
    ) {
        self.multisigs.push(MultisigRecord {
            multisig,
            call_hash,
            entry,
        });
    }

    /// Record the announcement pool of an account
    pub fn insert_announcements(
        &mut self,
        who: AccountId,
        announcements: Vec<Announcement>,
        deposit: Balance,
    ) {
        self.announcements.insert(
            who,
            AnnouncementPool {
                announcements,
                deposit,
            },
        );
    }

    /// Record the proxy pool of an account
    pub fn insert_proxies(&mut self, who: AccountId, proxies: Vec<ProxyDef>, deposit: Balance) {
        self.proxies.insert(who, ProxyPool { proxies, deposit });
    }

    /// Teach the snapshot to decode one call
    pub fn insert_call(&mut self, bytes: CallBytes, call: Call) {
        self.calls.insert(bytes.to_hex(), call);
    }
}

#[async_trait]
impl ChainQuery for SnapshotChain {
    async fn multisig_entry(
        &self,
        multisig: &AccountId,
        call_hash: &CallHash,
    ) -> Result<Option<MultisigEntry>, ChainError> {
        Ok(self
            .multisigs
            .iter()
            .find(|r| r.multisig == *multisig && r.call_hash == *call_hash)
            .map(|r| r.entry.clone()))
    }

    async fn announcements(
        &self,
        who: &AccountId,
    ) -> Result<(Vec<Announcement>, Balance), ChainError> {
        Ok(self
            .announcements
            .get(who)
            .map(|pool| (pool.announcements.clone(), pool.deposit))
            .unwrap_or_default())
    }

    async fn proxies(&self, who: &AccountId) -> Result<(Vec<ProxyDef>, Balance), ChainError> {
        Ok(self
            .proxies
            .get(who)
            .map(|pool| (pool.proxies.clone(), pool.deposit))
            .unwrap_or_default())
    }

    async fn decode_call(&self, bytes: &CallBytes) -> Result<Call, ChainError> {
        let key = bytes.to_hex();
        match self.calls.get(&key) {
            Some(call) => {
                log::debug!("decoded {} as {}.{}", key, call.pallet(), call.method());
                Ok(call.clone())
            }
            None => Err(ChainError::UndecodableCall(key)),
        }
    }

    async fn multisig_constants(&self) -> Result<MultisigConstants, ChainError> {
        Ok(self.multisig_constants)
    }

    async fn proxy_constants(&self) -> Result<ProxyConstants, ChainError> {
        Ok(self.proxy_constants)
    }
}
