//! Deposit effect accumulators
//!
//! The interpreter walks a nested call and folds every deposit effect into
//! one [`ReserveOutcome`]. Amounts accumulate per address and are never
//! overwritten, so wrappers and batches simply add onto whatever their
//! inner calls already contributed.

use crate::chain::Balance;
use crate::crypto::AccountId;
use serde::Serialize;
use std::collections::BTreeMap;

/// Blocks each real account must wait before an announced action executes
pub type DelayMap = BTreeMap<AccountId, u32>;

/// Per-address balance deltas
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BalanceChanges {
    changes: BTreeMap<AccountId, Balance>,
}

impl BalanceChanges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate a delta for an address. Zero amounts are dropped so an
    /// empty pool release does not show up as a spurious row.
    pub fn add(&mut self, who: AccountId, value: Balance) {
        if value == 0 {
            return;
        }
        *self.changes.entry(who).or_insert(0) += value;
    }

    pub fn get(&self, who: &AccountId) -> Balance {
        self.changes.get(who).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Sum over every address
    pub fn total(&self) -> Balance {
        self.changes.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AccountId, &Balance)> {
        self.changes.iter()
    }
}

/// Net effect of submitting a call: what gets locked, what gets released,
/// and which accounts pick up an execution delay
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ReserveOutcome {
    pub reserve: BalanceChanges,
    pub unreserve: BalanceChanges,
    pub delay: DelayMap,
}

impl ReserveOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.reserve.is_empty() && self.unreserve.is_empty() && self.delay.is_empty()
    }
}
