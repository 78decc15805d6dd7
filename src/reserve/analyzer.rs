//! Deposit and delay interpreter
//!
//! Walks a decoded call and its wrapped children, applying one accounting
//! rule per (pallet, method) pair. The signer context starts at the
//! submitting address and changes whenever a wrapper hands execution to a
//! different account: a multisig call executes as the derived multisig, a
//! proxy call as the real account. Chain reads and descent are strictly
//! sequential, so the maps mutate in a deterministic order; any failed
//! read or undecodable inner call fails the whole resolution.

use crate::call::{Call, CallBytes, MultisigCall, ProxyCall, UtilityCall};
use crate::chain::{ChainError, ChainQuery};
use crate::crypto::AccountId;
use crate::reserve::outcome::ReserveOutcome;
use futures::future::BoxFuture;

/// Net deposit and delay effects of submitting `call` as `signer`
pub async fn resolve_reserve(
    query: &dyn ChainQuery,
    signer: &AccountId,
    call: &Call,
) -> Result<ReserveOutcome, ChainError> {
    let mut outcome = ReserveOutcome::new();
    interpret(query, *signer, call.clone(), &mut outcome).await?;
    Ok(outcome)
}

/// Entry point for raw extrinsic bytes: decode the method, then interpret
pub async fn extrinsic_reserve(
    query: &dyn ChainQuery,
    signer: &AccountId,
    extrinsic: &CallBytes,
) -> Result<ReserveOutcome, ChainError> {
    let call = query.decode_call(extrinsic).await?;
    resolve_reserve(query, signer, &call).await
}

/// One interpreter step. Boxed because wrappers recurse through decoded
/// inner calls.
fn interpret<'a>(
    query: &'a dyn ChainQuery,
    signer: AccountId,
    call: Call,
    outcome: &'a mut ReserveOutcome,
) -> BoxFuture<'a, Result<(), ChainError>> {
    Box::pin(async move {
        match call {
            Call::Multisig(multisig_call) => {
                interpret_multisig(query, signer, multisig_call, outcome).await
            }
            Call::Proxy(proxy_call) => interpret_proxy(query, signer, proxy_call, outcome).await,
            Call::Utility(utility_call) => {
                let (UtilityCall::Batch { calls }
                | UtilityCall::BatchAll { calls }
                | UtilityCall::ForceBatch { calls }) = utility_call;
                for bytes in calls {
                    let inner = query.decode_call(&bytes).await?;
                    interpret(query, signer, inner, outcome).await?;
                }
                Ok(())
            }
            Call::Other { .. } => Ok(()),
        }
    })
}

async fn interpret_multisig(
    query: &dyn ChainQuery,
    signer: AccountId,
    call: MultisigCall,
    outcome: &mut ReserveOutcome,
) -> Result<(), ChainError> {
    match call {
        MultisigCall::AsMulti {
            threshold,
            other_signatories,
            call: inner,
            ..
        } => {
            let call_hash = query.hash_call(&inner);
            let multisig = derive(query, &signer, &other_signatories, threshold);
            match query.multisig_entry(&multisig, &call_hash).await? {
                None => {
                    // Opening approval, the signer puts down the deposit
                    let constants = query.multisig_constants().await?;
                    outcome.reserve.add(signer, constants.deposit(threshold));
                }
                Some(entry) if finalizes(entry.approvals.len(), threshold) => {
                    // Executing approval, the opener gets the deposit back
                    outcome.unreserve.add(entry.depositor, entry.deposit);
                }
                Some(_) => {}
            }
            let inner_call = query.decode_call(&inner).await?;
            interpret(query, multisig, inner_call, outcome).await
        }
        MultisigCall::ApproveAsMulti {
            threshold,
            other_signatories,
            call_hash,
            ..
        } => {
            // An approval without the call can open an operation but never
            // execute it, so no deposit is ever released here.
            let multisig = derive(query, &signer, &other_signatories, threshold);
            if query.multisig_entry(&multisig, &call_hash).await?.is_none() {
                let constants = query.multisig_constants().await?;
                outcome.reserve.add(signer, constants.deposit(threshold));
            }
            Ok(())
        }
        MultisigCall::AsMultiThreshold1 {
            other_signatories,
            call: inner,
        } => {
            let multisig = derive(query, &signer, &other_signatories, 1);
            let inner_call = query.decode_call(&inner).await?;
            interpret(query, multisig, inner_call, outcome).await
        }
        MultisigCall::CancelAsMulti {
            threshold,
            other_signatories,
            call_hash,
            ..
        } => {
            let multisig = derive(query, &signer, &other_signatories, threshold);
            if let Some(entry) = query.multisig_entry(&multisig, &call_hash).await? {
                outcome.unreserve.add(entry.depositor, entry.deposit);
            }
            Ok(())
        }
    }
}

async fn interpret_proxy(
    query: &dyn ChainQuery,
    signer: AccountId,
    call: ProxyCall,
    outcome: &mut ReserveOutcome,
) -> Result<(), ChainError> {
    match call {
        ProxyCall::Proxy { real, call: inner, .. } => {
            let inner_call = query.decode_call(&inner).await?;
            interpret(query, real, inner_call, outcome).await
        }
        ProxyCall::Announce { real, .. } => {
            let constants = query.proxy_constants().await?;
            let (announcements, _) = query.announcements(&signer).await?;
            let amount = if announcements.is_empty() {
                constants.announcement_deposit_base + constants.announcement_deposit_factor
            } else {
                constants.announcement_deposit_factor
            };
            outcome.reserve.add(signer, amount);

            // A delayed delegation means the real account waits out the
            // delay before the announced action can run
            let (proxies, _) = query.proxies(&real).await?;
            if let Some(def) = proxies.iter().find(|p| p.delegate == signer && p.delay > 0) {
                outcome.delay.insert(real, def.delay);
            }
            Ok(())
        }
        ProxyCall::ProxyAnnounced {
            delegate,
            real,
            call: inner,
            ..
        } => {
            unreserve_announcement(query, &delegate, outcome).await?;
            let inner_call = query.decode_call(&inner).await?;
            interpret(query, real, inner_call, outcome).await
        }
        ProxyCall::RemoveAnnouncement { .. } => {
            unreserve_announcement(query, &signer, outcome).await
        }
        ProxyCall::RejectAnnouncement { delegate, .. } => {
            unreserve_announcement(query, &delegate, outcome).await
        }
        ProxyCall::CreatePure { .. } => {
            let constants = query.proxy_constants().await?;
            outcome.reserve.add(
                signer,
                constants.proxy_deposit_base + constants.proxy_deposit_factor,
            );
            Ok(())
        }
        ProxyCall::AddProxy { .. } => {
            let constants = query.proxy_constants().await?;
            let (proxies, _) = query.proxies(&signer).await?;
            let amount = if proxies.is_empty() {
                constants.proxy_deposit_base + constants.proxy_deposit_factor
            } else {
                constants.proxy_deposit_factor
            };
            outcome.reserve.add(signer, amount);
            Ok(())
        }
        ProxyCall::RemoveProxy { .. } => {
            let (proxies, total) = query.proxies(&signer).await?;
            let amount = if proxies.len() > 1 {
                query.proxy_constants().await?.proxy_deposit_factor
            } else {
                total
            };
            outcome.unreserve.add(signer, amount);
            Ok(())
        }
        ProxyCall::RemoveProxies => {
            let (_, total) = query.proxies(&signer).await?;
            outcome.unreserve.add(signer, total);
            Ok(())
        }
        ProxyCall::KillPure { .. } => {
            // Dispatched through the pure proxy itself, so the signer
            // context here is the account being killed
            let constants = query.proxy_constants().await?;
            outcome.unreserve.add(signer, constants.proxy_deposit_base);
            Ok(())
        }
    }
}

/// Deterministic multisig account for the signer plus the other signatories
fn derive(
    query: &dyn ChainQuery,
    signer: &AccountId,
    other_signatories: &[AccountId],
    threshold: u16,
) -> AccountId {
    let mut who = Vec::with_capacity(other_signatories.len() + 1);
    who.push(*signer);
    who.extend_from_slice(other_signatories);
    query.derive_multisig_address(&who, threshold)
}

/// Whether an approval arriving now is the one that reaches the threshold
fn finalizes(existing_approvals: usize, threshold: u16) -> bool {
    existing_approvals >= (threshold as usize).saturating_sub(1)
}

/// Release the deposit behind one pending announcement: the factor while
/// other announcements remain, the whole remaining pool for the last one
async fn unreserve_announcement(
    query: &dyn ChainQuery,
    announcer: &AccountId,
    outcome: &mut ReserveOutcome,
) -> Result<(), ChainError> {
    let (announcements, total) = query.announcements(announcer).await?;
    let amount = if announcements.len() > 1 {
        query.proxy_constants().await?.announcement_deposit_factor
    } else {
        total
    };
    outcome.unreserve.add(*announcer, amount);
    Ok(())
}
