//! Signing path steps
//!
//! A candidate authorization chain is a list of [`FilterPath`] steps from a
//! top-level account down to an address the local wallet can sign with.
//! Every step carries a deterministic `id`; downstream list rendering uses
//! it as the dedup and memoization key, so its composition must stay stable
//! across releases.

use crate::account::{CallFilter, ProxyType};
use crate::crypto::{AccountId, GenesisHash};
use serde::Serialize;
use std::collections::HashSet;

/// One step in a candidate authorization chain
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FilterPath {
    /// The account the action ultimately executes as
    Origin { address: AccountId },
    /// Signing as one member of a multisig
    Multisig {
        multisig: AccountId,
        threshold: u16,
        other_signatures: Vec<AccountId>,
        address: AccountId,
    },
    /// Acting through a proxy delegation
    Proxy {
        real: AccountId,
        proxy_type: ProxyType,
        delay: u32,
        address: AccountId,
        genesis_hash: GenesisHash,
    },
    /// Drafting a proposal for the account's authority holders
    Proposer { address: AccountId },
}

impl FilterPath {
    /// The address this step signs or acts as
    pub fn address(&self) -> AccountId {
        match self {
            FilterPath::Origin { address }
            | FilterPath::Multisig { address, .. }
            | FilterPath::Proxy { address, .. }
            | FilterPath::Proposer { address } => *address,
        }
    }

    /// Stable identity of the step
    ///
    /// Composed from the type tag, the bare lowercase hex form of every
    /// address and hash, and the numeric parameters. Collision-free for
    /// distinct logical steps: the multisig address already commits to the
    /// member set, so other signatures are not repeated here.
    pub fn id(&self) -> String {
        match self {
            FilterPath::Origin { address } => format!("origin-{}", address.to_hex()),
            FilterPath::Multisig {
                multisig,
                threshold,
                address,
                ..
            } => format!(
                "multisig-{}-{}-{}",
                multisig.to_hex(),
                threshold,
                address.to_hex()
            ),
            FilterPath::Proxy {
                real,
                proxy_type,
                delay,
                address,
                genesis_hash,
            } => format!(
                "proxy-{}-{}-{}-{}-{}",
                real.to_hex(),
                address.to_hex(),
                proxy_type.index(),
                delay,
                genesis_hash.to_hex()
            ),
            FilterPath::Proposer { address } => format!("proposer-{}", address.to_hex()),
        }
    }
}

/// Identity of a whole candidate path
pub fn path_id(path: &[FilterPath]) -> String {
    path.iter()
        .map(|step| step.id())
        .collect::<Vec<_>>()
        .join("/")
}

/// Drop duplicate candidate paths, preserving first-seen order
pub fn dedup_paths(paths: Vec<Vec<FilterPath>>) -> Vec<Vec<FilterPath>> {
    let mut seen = HashSet::new();
    paths
        .into_iter()
        .filter(|path| seen.insert(path_id(path)))
        .collect()
}

/// Effective permission scope of a path
///
/// The intersection of every proxy step's allowance; multisig and origin
/// steps do not restrict what the path may submit.
pub fn path_permits(path: &[FilterPath]) -> CallFilter {
    path.iter().fold(CallFilter::all(), |scope, step| match step {
        FilterPath::Proxy { proxy_type, .. } => scope & proxy_type.allowed(),
        _ => scope,
    })
}
