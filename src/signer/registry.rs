//! Local signer lookup
//!
//! The path resolver only needs to know whether the wallet can sign as a
//! given address. Key management itself lives outside the core; this module
//! carries the lookup capability and a plain set-backed implementation.

use crate::crypto::AccountId;
use std::collections::HashSet;

/// Answers whether the local wallet holds a key for an address
pub trait LocalSigners {
    fn has_local_signer(&self, address: &AccountId) -> bool;
}

/// Set of addresses the local wallet can sign for
#[derive(Clone, Debug, Default)]
pub struct SignerSet {
    addresses: HashSet<AccountId>,
}

impl SignerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, address: AccountId) {
        self.addresses.insert(address);
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

impl FromIterator<AccountId> for SignerSet {
    fn from_iter<I: IntoIterator<Item = AccountId>>(iter: I) -> Self {
        Self {
            addresses: iter.into_iter().collect(),
        }
    }
}

impl LocalSigners for SignerSet {
    fn has_local_signer(&self, address: &AccountId) -> bool {
        self.addresses.contains(address)
    }
}
