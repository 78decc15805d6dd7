//! Proxy permission scopes
//!
//! A proxy delegation carries a `ProxyType` limiting what the delegatee may
//! dispatch on the real account's behalf. The wallet only needs a coarse,
//! client-side view of those limits: enough to drop signing paths that the
//! chain would reject outright, not a faithful copy of runtime call filters.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Permission scope attached to a proxy delegation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProxyType {
    /// No restriction
    Any,
    /// Everything except balance transfers
    NonTransfer,
    /// Governance votes and treasury actions
    Governance,
    /// Staking, session and pool management
    Staking,
    /// Identity judgement provision only
    IdentityJudgement,
    /// Rejecting proxy announcements only
    CancelProxy,
    /// Parachain auctions and crowdloans
    Auction,
    /// Nomination pool membership actions
    NominationPools,
}

bitflags! {
    /// Coarse classification of what a call touches
    ///
    /// A call maps to exactly one class at the wallet's shallow decode
    /// level; batches are classified as BATCH without looking inside.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct CallFilter: u16 {
        const TRANSFER     = 1 << 0;
        const MULTISIG     = 1 << 1;
        const PROXY        = 1 << 2;
        const ANNOUNCEMENT = 1 << 3;
        const BATCH        = 1 << 4;
        const GOVERNANCE   = 1 << 5;
        const STAKING      = 1 << 6;
        const IDENTITY     = 1 << 7;
        const AUCTION      = 1 << 8;
        const POOLS        = 1 << 9;
        const UNKNOWN      = 1 << 10;
    }
}

impl ProxyType {
    /// All scopes, in canonical order
    pub const ALL: [ProxyType; 8] = [
        ProxyType::Any,
        ProxyType::NonTransfer,
        ProxyType::Governance,
        ProxyType::Staking,
        ProxyType::IdentityJudgement,
        ProxyType::CancelProxy,
        ProxyType::Auction,
        ProxyType::NominationPools,
    ];

    /// Canonical numeric index, used in path step ids
    pub fn index(&self) -> u8 {
        match self {
            ProxyType::Any => 0,
            ProxyType::NonTransfer => 1,
            ProxyType::Governance => 2,
            ProxyType::Staking => 3,
            ProxyType::IdentityJudgement => 4,
            ProxyType::CancelProxy => 5,
            ProxyType::Auction => 6,
            ProxyType::NominationPools => 7,
        }
    }

    /// Classes of calls this scope may dispatch
    ///
    /// Wrapping layers (multisig, batch) are allowed by every restricted
    /// scope because the chain re-checks the unwrapped call anyway.
    pub fn allowed(&self) -> CallFilter {
        match self {
            ProxyType::Any => CallFilter::all(),
            ProxyType::NonTransfer => CallFilter::all() - CallFilter::TRANSFER,
            ProxyType::Governance => {
                CallFilter::GOVERNANCE | CallFilter::MULTISIG | CallFilter::BATCH
            }
            ProxyType::Staking => {
                CallFilter::STAKING
                    | CallFilter::POOLS
                    | CallFilter::MULTISIG
                    | CallFilter::BATCH
            }
            ProxyType::IdentityJudgement => {
                CallFilter::IDENTITY | CallFilter::MULTISIG | CallFilter::BATCH
            }
            ProxyType::CancelProxy => {
                CallFilter::ANNOUNCEMENT | CallFilter::MULTISIG | CallFilter::BATCH
            }
            ProxyType::Auction => {
                CallFilter::AUCTION | CallFilter::MULTISIG | CallFilter::BATCH
            }
            ProxyType::NominationPools => {
                CallFilter::POOLS | CallFilter::MULTISIG | CallFilter::BATCH
            }
        }
    }

    /// Whether this scope may dispatch a call of the given class
    pub fn allows(&self, filter: CallFilter) -> bool {
        self.allowed().contains(filter)
    }
}

impl fmt::Display for ProxyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProxyType::Any => "Any",
            ProxyType::NonTransfer => "NonTransfer",
            ProxyType::Governance => "Governance",
            ProxyType::Staking => "Staking",
            ProxyType::IdentityJudgement => "IdentityJudgement",
            ProxyType::CancelProxy => "CancelProxy",
            ProxyType::Auction => "Auction",
            ProxyType::NominationPools => "NominationPools",
        };
        f.write_str(name)
    }
}

impl FromStr for ProxyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Any" => Ok(ProxyType::Any),
            "NonTransfer" => Ok(ProxyType::NonTransfer),
            "Governance" => Ok(ProxyType::Governance),
            "Staking" => Ok(ProxyType::Staking),
            "IdentityJudgement" => Ok(ProxyType::IdentityJudgement),
            "CancelProxy" => Ok(ProxyType::CancelProxy),
            "Auction" => Ok(ProxyType::Auction),
            "NominationPools" => Ok(ProxyType::NominationPools),
            other => Err(format!("unknown proxy type: {other}")),
        }
    }
}
