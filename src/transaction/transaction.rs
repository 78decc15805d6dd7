//! In-flight transaction records
//!
//! A `Transaction` mirrors, level by level, the nested call structure the
//! chain has already recorded for an action that is still collecting
//! approvals: the top-level record for the target account, with children
//! for each multisig approval or proxy execution observed so far. Records
//! are supplied by the external transaction store and never mutated here.

use crate::crypto::AccountId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which chain primitive a record corresponds to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    /// A multisig approval (as_multi / approve_as_multi / threshold-1)
    Multisig,
    /// A direct proxy execution (proxy.proxy and remote variants)
    Proxy,
    /// A delayed proxy announcement (proxy.announce / proxy_announced)
    Announce,
    /// A drafted proposal not yet submitted by an authority holder
    Propose,
}

/// Lifecycle state of a record
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    Pending,
    Success,
    Failed,
    Cancelled,
}

/// One level of an in-flight nested action
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Transaction {
    /// The account this level acts as
    pub address: AccountId,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub status: TransactionStatus,
    /// For proxy-flavored records, the delegatee performing the action
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delegate: Option<AccountId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Transaction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Transaction {
    pub fn new(address: AccountId, kind: TransactionKind, status: TransactionStatus) -> Self {
        Self {
            address,
            kind,
            status,
            delegate: None,
            children: Vec::new(),
            created_at: None,
        }
    }

    /// Set the delegatee this record was executed through
    pub fn with_delegate(mut self, delegate: AccountId) -> Self {
        self.delegate = Some(delegate);
        self
    }

    /// Append a child record
    pub fn with_child(mut self, child: Transaction) -> Self {
        self.children.push(child);
        self
    }

    pub fn is_pending(&self) -> bool {
        self.status == TransactionStatus::Pending
    }

    /// Child record correlated with a delegatee of the acting account
    ///
    /// Only proxy-flavored children (Announce or Proxy) correlate here,
    /// matched by their `delegate` field.
    pub fn proxy_child_for(&self, delegatee: &AccountId) -> Option<&Transaction> {
        self.children.iter().find(|c| {
            matches!(c.kind, TransactionKind::Announce | TransactionKind::Proxy)
                && c.delegate.as_ref() == Some(delegatee)
        })
    }

    /// Child record correlated with a multisig member
    ///
    /// Multisig approval children are matched by the member address they
    /// were signed as. A member with no child simply has not acted yet.
    pub fn multisig_child_for(&self, member: &AccountId) -> Option<&Transaction> {
        self.children
            .iter()
            .find(|c| c.kind == TransactionKind::Multisig && c.address == *member)
    }

    /// Depth of the record tree (a childless record has depth 1)
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(Transaction::depth)
            .max()
            .unwrap_or(0)
    }
}
