//! Chain query capability
//!
//! The wallet core never talks to a node directly. Everything it needs
//! from chain state is expressed through the [`ChainQuery`] trait: multisig
//! approval bookkeeping, proxy delegations and announcements, the deposit
//! constants of the two pallets, and one-level call decoding. Adapters
//! implement the trait over whatever transport they have; the interpreter
//! awaits each read before moving on, so adapters see strictly sequential
//! requests.

use crate::account::ProxyType;
use crate::call::{Call, CallBytes, Timepoint};
use crate::crypto::{multi_account_id, AccountId, CallHash};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Chain balance unit (plancks)
pub type Balance = u128;

/// Errors surfaced by chain query adapters
#[derive(Error, Debug)]
pub enum ChainError {
    #[error("unable to decode call bytes {0}")]
    UndecodableCall(String),
    #[error("chain query failed: {0}")]
    Query(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Approval bookkeeping the multisig pallet keeps per (account, call hash)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultisigEntry {
    /// Block and extrinsic index of the opening approval
    pub when: Timepoint,
    /// Deposit reserved from the opening approver
    pub deposit: Balance,
    /// The member who opened the operation and paid the deposit
    pub depositor: AccountId,
    /// Members that have approved so far
    pub approvals: Vec<AccountId>,
}

/// A pending delayed proxy action declared by a delegatee
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    /// The account the action will execute as
    pub real: AccountId,
    pub call_hash: CallHash,
    /// Block height at which the announcement was made
    pub height: u32,
}

/// One delegation granted by a real account
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyDef {
    pub delegate: AccountId,
    pub proxy_type: ProxyType,
    /// Blocks the delegate must wait between announcing and executing
    pub delay: u32,
}

/// Deposit constants of the multisig pallet
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultisigConstants {
    pub deposit_base: Balance,
    pub deposit_factor: Balance,
}

impl MultisigConstants {
    /// Deposit reserved from the opener of a threshold-`t` operation
    pub fn deposit(&self, threshold: u16) -> Balance {
        self.deposit_base + self.deposit_factor * threshold as Balance
    }
}

/// Deposit constants of the proxy pallet
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyConstants {
    pub proxy_deposit_base: Balance,
    pub proxy_deposit_factor: Balance,
    pub announcement_deposit_base: Balance,
    pub announcement_deposit_factor: Balance,
}

/// Read access to the chain state the wallet core interprets
#[async_trait]
pub trait ChainQuery: Send + Sync {
    /// Approval bookkeeping for a multisig operation, `None` when the
    /// operation has not been opened yet
    async fn multisig_entry(
        &self,
        multisig: &AccountId,
        call_hash: &CallHash,
    ) -> Result<Option<MultisigEntry>, ChainError>;

    /// Pending announcements made by `who`, with the total deposit the
    /// chain holds for them
    async fn announcements(
        &self,
        who: &AccountId,
    ) -> Result<(Vec<Announcement>, Balance), ChainError>;

    /// Delegations granted by `who`, with the total deposit the chain
    /// holds for them
    async fn proxies(&self, who: &AccountId) -> Result<(Vec<ProxyDef>, Balance), ChainError>;

    /// Decode call bytes one level deep
    async fn decode_call(&self, bytes: &CallBytes) -> Result<Call, ChainError>;

    async fn multisig_constants(&self) -> Result<MultisigConstants, ChainError>;

    async fn proxy_constants(&self) -> Result<ProxyConstants, ChainError>;

    /// Deterministic account id of a multisig from its full signatory set
    fn derive_multisig_address(&self, who: &[AccountId], threshold: u16) -> AccountId {
        multi_account_id(who, threshold)
    }

    /// Hash call bytes the way the multisig pallet keys its bookkeeping
    fn hash_call(&self, bytes: &CallBytes) -> CallHash {
        bytes.hash()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multisig_deposit_scales_with_threshold() {
        let constants = MultisigConstants {
            deposit_base: 100,
            deposit_factor: 10,
        };
        assert_eq!(constants.deposit(1), 110);
        assert_eq!(constants.deposit(3), 130);
    }

    #[test]
    fn test_multisig_entry_serde() {
        let entry = MultisigEntry {
            when: Timepoint::new(12, 2),
            deposit: 150,
            depositor: AccountId([1; 32]),
            approvals: vec![AccountId([1; 32]), AccountId([2; 32])],
        };
        let json = serde_json::to_string(&entry).unwrap();
        let back: MultisigEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
