//! Signing path resolution
//!
//! Depth-first search over an account's delegation graph, producing every
//! chain of steps that currently lets a locally held key move a pending
//! action forward. With no transaction in hand the walk covers the full
//! static graph; with one, each branch is correlated against the matching
//! child record and pruned by its approval state.

use crate::account::Account;
use crate::crypto::AccountId;
use crate::path::filter::{dedup_paths, FilterPath};
use crate::signer::LocalSigners;
use crate::transaction::{Transaction, TransactionKind, TransactionStatus};
use std::collections::HashSet;
use thiserror::Error;

/// Errors from the path resolver
#[derive(Error, Debug)]
pub enum PathError {
    /// The delegation graph loops back onto an address already on the
    /// current path. Chains are not known to permit building one, so this
    /// is treated as corrupt input rather than silently bounded.
    #[error("delegation cycle through {address}")]
    DelegationCycle { address: AccountId },
}

/// Compute every currently-actionable signing path for `account`
///
/// Returns the set of candidate paths, outermost account first in each.
/// An account nobody local can sign for yields an empty set; only a
/// malformed delegation graph is an error.
pub fn compute_filter_paths(
    signers: &dyn LocalSigners,
    account: &Account,
    transaction: Option<&Transaction>,
) -> Result<Vec<Vec<FilterPath>>, PathError> {
    // Propose records are judged against the full authority surface, the
    // same as having no transaction at all.
    let transaction = transaction.filter(|tx| tx.kind != TransactionKind::Propose);

    let mut paths = Vec::new();
    let mut buffer = Vec::new();
    let mut visiting = HashSet::new();
    walk(
        signers,
        account,
        transaction,
        FilterPath::Origin {
            address: account.address,
        },
        true,
        &mut buffer,
        &mut visiting,
        &mut paths,
    )?;

    if transaction.is_none() {
        append_proposers(signers, account, &mut paths);
    }

    Ok(dedup_paths(paths))
}

/// One DFS node: push the step, narrow actionability by the correlated
/// record, record the path if signable, then descend into delegatees and
/// members. The buffer is popped on every exit so parents see it intact.
#[allow(clippy::too_many_arguments)]
fn walk(
    signers: &dyn LocalSigners,
    account: &Account,
    transaction: Option<&Transaction>,
    step: FilterPath,
    approved: bool,
    buffer: &mut Vec<FilterPath>,
    visiting: &mut HashSet<AccountId>,
    paths: &mut Vec<Vec<FilterPath>>,
) -> Result<(), PathError> {
    if !visiting.insert(account.address) {
        return Err(PathError::DelegationCycle {
            address: account.address,
        });
    }
    buffer.push(step);

    let mut approved = approved;
    if let Some(tx) = transaction {
        // A proxy record only blocks once executed; anything else blocks
        // as soon as it leaves Pending.
        approved &= match tx.kind {
            TransactionKind::Proxy => tx.status != TransactionStatus::Success,
            _ => tx.status == TransactionStatus::Pending,
        };

        // An executed record ends the branch, nothing below it can still
        // contribute an approval.
        if tx.status == TransactionStatus::Success {
            buffer.pop();
            visiting.remove(&account.address);
            return Ok(());
        }
    }

    if approved && signers.has_local_signer(&account.address) {
        paths.push(buffer.clone());
    }

    // Delegatees become proxy steps. With a record in hand only the
    // delegatee the record acted through is followed; a delegatee with no
    // correlated child never acted and is skipped.
    for delegatee in &account.delegatees {
        let child = match transaction {
            Some(tx) => match tx.proxy_child_for(&delegatee.address()) {
                Some(child) => Some(child),
                None => continue,
            },
            None => None,
        };
        walk(
            signers,
            &delegatee.account,
            child,
            FilterPath::Proxy {
                real: account.address,
                proxy_type: delegatee.proxy_type,
                delay: delegatee.proxy_delay,
                address: delegatee.address(),
                genesis_hash: delegatee.proxy_network,
            },
            approved,
            buffer,
            visiting,
            paths,
        )?;
    }

    // Members become multisig steps, correlated by the address each
    // approval was signed as. A member without a child simply has not
    // acted yet and is still walked.
    let multisig_context =
        transaction.map_or(true, |tx| tx.kind == TransactionKind::Multisig);
    if account.is_multisig() && multisig_context {
        for member in &account.members {
            let child = transaction.and_then(|tx| tx.multisig_child_for(&member.address));
            walk(
                signers,
                member,
                child,
                FilterPath::Multisig {
                    multisig: account.address,
                    threshold: account.threshold(),
                    other_signatures: account.other_members(&member.address),
                    address: member.address,
                },
                approved,
                buffer,
                visiting,
                paths,
            )?;
        }
    }

    buffer.pop();
    visiting.remove(&account.address);
    Ok(())
}

/// Append a synthetic two-step path for every proposer the local wallet
/// can sign for, reusing the first discovered origin step so ids stay
/// consistent with the rest of the result set.
fn append_proposers(
    signers: &dyn LocalSigners,
    account: &Account,
    paths: &mut Vec<Vec<FilterPath>>,
) {
    if account.proposers.is_empty() {
        return;
    }
    let origin = paths
        .first()
        .and_then(|path| path.first())
        .cloned()
        .unwrap_or(FilterPath::Origin {
            address: account.address,
        });
    for proposer in &account.proposers {
        if signers.has_local_signer(&proposer.proposer) {
            paths.push(vec![
                origin.clone(),
                FilterPath::Proposer {
                    address: proposer.proposer,
                },
            ]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{Delegatee, Proposer, ProxyType};
    use crate::crypto::GenesisHash;
    use crate::signer::SignerSet;

    fn account(byte: u8) -> AccountId {
        AccountId([byte; 32])
    }

    fn signers(bytes: &[u8]) -> SignerSet {
        bytes.iter().map(|b| account(*b)).collect()
    }

    fn delegatee(inner: Account) -> Delegatee {
        Delegatee {
            account: inner,
            proxy_type: ProxyType::Any,
            proxy_delay: 0,
            proxy_network: GenesisHash([0; 32]),
        }
    }

    #[test]
    fn test_leaf_account_with_local_signer_has_one_trivial_path() {
        let leaf = Account::plain(account(1));
        let paths = compute_filter_paths(&signers(&[1]), &leaf, None).unwrap();

        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].len(), 1);
        assert_eq!(paths[0][0].address(), account(1));
    }

    #[test]
    fn test_leaf_account_without_signer_has_no_paths() {
        let leaf = Account::plain(account(1));
        let paths = compute_filter_paths(&signers(&[9]), &leaf, None).unwrap();
        assert!(paths.is_empty());
    }

    #[test]
    fn test_nested_multisig_descends_to_signable_member() {
        // A = 2-of-{B, C}, B = 2-of-{D, E}, only D held locally
        let b = Account::multisig(
            account(2),
            2,
            vec![Account::plain(account(4)), Account::plain(account(5))],
        );
        let a = Account::multisig(account(1), 2, vec![b, Account::plain(account(3))]);

        let paths = compute_filter_paths(&signers(&[4]), &a, None).unwrap();

        assert_eq!(paths.len(), 1);
        let path = &paths[0];
        assert_eq!(path.len(), 3);
        assert_eq!(
            path[0],
            FilterPath::Origin {
                address: account(1)
            }
        );
        assert_eq!(
            path[1],
            FilterPath::Multisig {
                multisig: account(1),
                threshold: 2,
                other_signatures: vec![account(3)],
                address: account(2),
            }
        );
        assert_eq!(
            path[2],
            FilterPath::Multisig {
                multisig: account(2),
                threshold: 2,
                other_signatures: vec![account(5)],
                address: account(4),
            }
        );
    }

    #[test]
    fn test_every_signable_member_yields_its_own_path() {
        let a = Account::multisig(
            account(1),
            2,
            vec![Account::plain(account(2)), Account::plain(account(3))],
        );
        let paths = compute_filter_paths(&signers(&[2, 3]), &a, None).unwrap();

        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].last().unwrap().address(), account(2));
        assert_eq!(paths[1].last().unwrap().address(), account(3));
    }

    #[test]
    fn test_delegatees_walked_before_members() {
        let mut a = Account::multisig(account(1), 1, vec![Account::plain(account(2))]);
        a.delegatees.push(delegatee(Account::plain(account(3))));

        let paths = compute_filter_paths(&signers(&[2, 3]), &a, None).unwrap();
        assert_eq!(paths.len(), 2);
        assert!(matches!(paths[0][1], FilterPath::Proxy { .. }));
        assert!(matches!(paths[1][1], FilterPath::Multisig { .. }));
    }

    #[test]
    fn test_signable_intermediate_and_leaf_both_recorded() {
        // B itself is held locally in addition to its member D
        let b = Account::multisig(account(2), 1, vec![Account::plain(account(4))]);
        let a = Account::multisig(account(1), 2, vec![b, Account::plain(account(3))]);

        let paths = compute_filter_paths(&signers(&[2, 4]), &a, None).unwrap();

        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].len(), 2);
        assert_eq!(paths[0].last().unwrap().address(), account(2));
        assert_eq!(paths[1].len(), 3);
        assert_eq!(paths[1].last().unwrap().address(), account(4));
    }

    #[test]
    fn test_executed_proxy_branch_is_not_traversed() {
        let mut a = Account::plain(account(1));
        a.delegatees.push(delegatee(Account::plain(account(2))));
        a.delegatees.push(delegatee(Account::plain(account(3))));

        let tx = Transaction::new(account(1), TransactionKind::Proxy, TransactionStatus::Pending)
            .with_child(
                Transaction::new(account(1), TransactionKind::Proxy, TransactionStatus::Success)
                    .with_delegate(account(2)),
            )
            .with_child(
                Transaction::new(account(1), TransactionKind::Announce, TransactionStatus::Pending)
                    .with_delegate(account(3)),
            );

        let paths = compute_filter_paths(&signers(&[2, 3]), &a, Some(&tx)).unwrap();

        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].last().unwrap().address(), account(3));
        assert!(paths
            .iter()
            .all(|path| path.iter().all(|step| step.address() != account(2))));
    }

    #[test]
    fn test_unmatched_delegatee_not_followed_under_transaction() {
        let mut a = Account::plain(account(1));
        a.delegatees.push(delegatee(Account::plain(account(2))));

        // The record has no child for delegatee 2, so only the origin can act
        let tx = Transaction::new(account(1), TransactionKind::Proxy, TransactionStatus::Pending);
        let paths = compute_filter_paths(&signers(&[1, 2]), &a, Some(&tx)).unwrap();

        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].last().unwrap().address(), account(1));
    }

    #[test]
    fn test_member_with_executed_approval_is_pruned() {
        let a = Account::multisig(
            account(1),
            2,
            vec![Account::plain(account(2)), Account::plain(account(3))],
        );
        let tx = Transaction::new(account(1), TransactionKind::Multisig, TransactionStatus::Pending)
            .with_child(Transaction::new(
                account(2),
                TransactionKind::Multisig,
                TransactionStatus::Success,
            ));

        let paths = compute_filter_paths(&signers(&[2, 3]), &a, Some(&tx)).unwrap();

        // Member 2 already approved; member 3 has not acted and still can
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].last().unwrap().address(), account(3));
    }

    #[test]
    fn test_cancelled_transaction_blocks_every_path() {
        let a = Account::multisig(
            account(1),
            2,
            vec![Account::plain(account(2)), Account::plain(account(3))],
        );
        let tx = Transaction::new(
            account(1),
            TransactionKind::Multisig,
            TransactionStatus::Cancelled,
        );

        let paths = compute_filter_paths(&signers(&[2, 3]), &a, Some(&tx)).unwrap();
        assert!(paths.is_empty());
    }

    #[test]
    fn test_non_multisig_record_blocks_member_descent() {
        let mut a = Account::multisig(account(1), 1, vec![Account::plain(account(2))]);
        a.delegatees.push(delegatee(Account::plain(account(3))));

        let tx = Transaction::new(account(1), TransactionKind::Announce, TransactionStatus::Pending)
            .with_child(
                Transaction::new(account(1), TransactionKind::Announce, TransactionStatus::Pending)
                    .with_delegate(account(3)),
            );

        let paths = compute_filter_paths(&signers(&[2, 3]), &a, Some(&tx)).unwrap();

        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].last().unwrap().address(), account(3));
    }

    #[test]
    fn test_propose_record_treated_as_static_graph() {
        let mut a = Account::multisig(account(1), 1, vec![Account::plain(account(2))]);
        a.proposers.push(Proposer {
            proposer: account(7),
        });

        let tx = Transaction::new(account(1), TransactionKind::Propose, TransactionStatus::Pending);

        let with_tx = compute_filter_paths(&signers(&[2, 7]), &a, Some(&tx)).unwrap();
        let without = compute_filter_paths(&signers(&[2, 7]), &a, None).unwrap();

        assert_eq!(with_tx, without);
        assert!(with_tx
            .iter()
            .any(|path| matches!(path.last(), Some(FilterPath::Proposer { .. }))));
    }

    #[test]
    fn test_proposer_path_reuses_discovered_origin_step() {
        let mut a = Account::multisig(account(1), 1, vec![Account::plain(account(2))]);
        a.proposers.push(Proposer {
            proposer: account(7),
        });

        let paths = compute_filter_paths(&signers(&[2, 7]), &a, None).unwrap();

        assert_eq!(paths.len(), 2);
        assert_eq!(paths[1].len(), 2);
        assert_eq!(paths[1][0], paths[0][0]);
        assert_eq!(
            paths[1][1],
            FilterPath::Proposer {
                address: account(7)
            }
        );
    }

    #[test]
    fn test_unsignable_proposer_is_ignored() {
        let mut a = Account::plain(account(1));
        a.proposers.push(Proposer {
            proposer: account(7),
        });

        let paths = compute_filter_paths(&signers(&[9]), &a, None).unwrap();
        assert!(paths.is_empty());
    }

    #[test]
    fn test_delegation_cycle_is_an_error() {
        let mut b = Account::plain(account(2));
        b.delegatees.push(delegatee(Account::plain(account(1))));
        let mut a = Account::plain(account(1));
        a.delegatees.push(delegatee(b));

        let result = compute_filter_paths(&signers(&[1]), &a, None);
        assert!(matches!(
            result,
            Err(PathError::DelegationCycle { address }) if address == account(1)
        ));
    }

    #[test]
    fn test_diamond_delegation_is_not_a_cycle() {
        // Both B and C delegate to the same D; D appears on two distinct paths
        let mut b = Account::plain(account(2));
        b.delegatees.push(delegatee(Account::plain(account(4))));
        let mut c = Account::plain(account(3));
        c.delegatees.push(delegatee(Account::plain(account(4))));
        let mut a = Account::plain(account(1));
        a.delegatees.push(delegatee(b));
        a.delegatees.push(delegatee(c));

        let paths = compute_filter_paths(&signers(&[4]), &a, None).unwrap();

        assert_eq!(paths.len(), 2);
        assert!(paths.iter().all(|p| p.last().unwrap().address() == account(4)));
    }

    #[test]
    fn test_proxy_step_carries_delegation_parameters() {
        let mut a = Account::plain(account(1));
        a.delegatees.push(Delegatee {
            account: Account::plain(account(2)),
            proxy_type: ProxyType::Staking,
            proxy_delay: 50,
            proxy_network: GenesisHash([9; 32]),
        });

        let paths = compute_filter_paths(&signers(&[2]), &a, None).unwrap();

        assert_eq!(paths.len(), 1);
        assert_eq!(
            paths[0][1],
            FilterPath::Proxy {
                real: account(1),
                proxy_type: ProxyType::Staking,
                delay: 50,
                address: account(2),
                genesis_hash: GenesisHash([9; 32]),
            }
        );
    }
}
