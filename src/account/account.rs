//! Account graph model
//!
//! The nested account structure the wallet operates over: plain keys,
//! multisigs whose members may themselves be multisigs or proxied
//! accounts, and keyless "pure" proxy accounts. The tree is owned and
//! supplied by an external account-graph service; this core only reads it.

use crate::account::proxy::ProxyType;
use crate::crypto::{AccountId, GenesisHash};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from validating an account tree
#[derive(Error, Debug)]
pub enum AccountError {
    #[error("members present on non-multisig account {0}")]
    UnexpectedMembers(AccountId),
    #[error("multisig {0} has no threshold")]
    MissingThreshold(AccountId),
    #[error("invalid threshold {threshold} for {members} members on {address}")]
    InvalidThreshold {
        address: AccountId,
        threshold: u16,
        members: usize,
    },
    #[error("duplicate member {0}")]
    DuplicateMember(AccountId),
}

/// What kind of account a node in the graph is
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// A key-controlled account
    Plain,
    /// A threshold-of-members account
    Multisig,
    /// A keyless account controlled only through its proxies
    Pure,
}

/// One node in the account graph
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Account {
    pub address: AccountId,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    /// Signatures required; present only for multisigs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u16>,
    /// Member accounts; populated only for multisigs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<Account>,
    /// Accounts this account has delegated proxy rights to
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub delegatees: Vec<Delegatee>,
    /// Accounts allowed to draft proposals for this account
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub proposers: Vec<Proposer>,
}

/// A delegatee: an account plus the properties of the proxy relationship
/// granting it authority over the parent
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Delegatee {
    #[serde(flatten)]
    pub account: Account,
    pub proxy_type: ProxyType,
    /// Blocks an announced action must wait before execution
    #[serde(default)]
    pub proxy_delay: u32,
    /// Chain the delegation lives on
    pub proxy_network: GenesisHash,
}

/// An account entitled to draft proposals
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Proposer {
    pub proposer: AccountId,
}

impl Account {
    /// A plain key-controlled account with no structure
    pub fn plain(address: AccountId) -> Self {
        Self {
            address,
            account_type: AccountType::Plain,
            threshold: None,
            members: Vec::new(),
            delegatees: Vec::new(),
            proposers: Vec::new(),
        }
    }

    /// A pure proxy account (keyless, controlled through delegatees)
    pub fn pure(address: AccountId) -> Self {
        Self {
            account_type: AccountType::Pure,
            ..Self::plain(address)
        }
    }

    /// A multisig account over the given members
    pub fn multisig(address: AccountId, threshold: u16, members: Vec<Account>) -> Self {
        Self {
            address,
            account_type: AccountType::Multisig,
            threshold: Some(threshold),
            members,
            delegatees: Vec::new(),
            proposers: Vec::new(),
        }
    }

    pub fn is_multisig(&self) -> bool {
        self.account_type == AccountType::Multisig
    }

    /// Threshold for a multisig, 0 otherwise
    pub fn threshold(&self) -> u16 {
        self.threshold.unwrap_or(0)
    }

    /// Addresses of all members except the given one, in member order
    ///
    /// These are the remaining signatories a member must name when it
    /// approves on the multisig's behalf.
    pub fn other_members(&self, except: &AccountId) -> Vec<AccountId> {
        self.members
            .iter()
            .map(|m| m.address)
            .filter(|a| a != except)
            .collect()
    }

    /// Check the structural invariants of the whole tree
    ///
    /// The resolver tolerates arbitrary trees; this is for callers that
    /// want to reject malformed graphs at the boundary.
    pub fn validate(&self) -> Result<(), AccountError> {
        if self.is_multisig() {
            let threshold = self
                .threshold
                .ok_or(AccountError::MissingThreshold(self.address))?;
            if threshold == 0 || threshold as usize > self.members.len() {
                return Err(AccountError::InvalidThreshold {
                    address: self.address,
                    threshold,
                    members: self.members.len(),
                });
            }
            let mut addresses: Vec<AccountId> =
                self.members.iter().map(|m| m.address).collect();
            addresses.sort();
            for pair in addresses.windows(2) {
                if pair[0] == pair[1] {
                    return Err(AccountError::DuplicateMember(pair[0]));
                }
            }
        } else if !self.members.is_empty() {
            return Err(AccountError::UnexpectedMembers(self.address));
        }

        for member in &self.members {
            member.validate()?;
        }
        for delegatee in &self.delegatees {
            delegatee.account.validate()?;
        }
        Ok(())
    }
}

impl Delegatee {
    /// Address of the delegated account
    pub fn address(&self) -> AccountId {
        self.account.address
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(byte: u8) -> AccountId {
        AccountId([byte; 32])
    }

    #[test]
    fn test_plain_account_validates() {
        assert!(Account::plain(account(1)).validate().is_ok());
    }

    #[test]
    fn test_multisig_validation() {
        let good = Account::multisig(
            account(10),
            2,
            vec![Account::plain(account(1)), Account::plain(account(2))],
        );
        assert!(good.validate().is_ok());

        // Threshold exceeding member count
        let bad = Account::multisig(account(10), 3, vec![Account::plain(account(1))]);
        assert!(matches!(
            bad.validate(),
            Err(AccountError::InvalidThreshold { threshold: 3, .. })
        ));

        // Zero threshold
        let zero = Account::multisig(account(10), 0, vec![Account::plain(account(1))]);
        assert!(zero.validate().is_err());
    }

    #[test]
    fn test_duplicate_members_rejected() {
        let dup = Account::multisig(
            account(10),
            2,
            vec![Account::plain(account(1)), Account::plain(account(1))],
        );
        assert!(matches!(
            dup.validate(),
            Err(AccountError::DuplicateMember(_))
        ));
    }

    #[test]
    fn test_members_on_plain_rejected() {
        let mut plain = Account::plain(account(1));
        plain.members.push(Account::plain(account(2)));
        assert!(matches!(
            plain.validate(),
            Err(AccountError::UnexpectedMembers(_))
        ));
    }

    #[test]
    fn test_nested_validation_descends() {
        let inner_bad = Account::multisig(account(20), 5, vec![Account::plain(account(3))]);
        let outer = Account::multisig(account(10), 1, vec![inner_bad]);
        assert!(outer.validate().is_err());
    }

    #[test]
    fn test_other_members() {
        let multisig = Account::multisig(
            account(10),
            2,
            vec![
                Account::plain(account(1)),
                Account::plain(account(2)),
                Account::plain(account(3)),
            ],
        );
        let others = multisig.other_members(&account(2));
        assert_eq!(others, vec![account(1), account(3)]);
    }

    #[test]
    fn test_account_serde_roundtrip() {
        let tree = Account::multisig(
            account(10),
            2,
            vec![Account::plain(account(1)), Account::pure(account(2))],
        );
        let json = serde_json::to_string(&tree).unwrap();
        let back: Account = serde_json::from_str(&json).unwrap();
        assert_eq!(back.address, tree.address);
        assert_eq!(back.threshold, Some(2));
        assert_eq!(back.members.len(), 2);
        assert_eq!(back.members[1].account_type, AccountType::Pure);
    }
}
