//! Determinism digests for cross-run consistency.
//!
//! Two engines seeded with the same pool and fed the same batch must end in
//! the same state. The pool root and accepted root make that checkable
//! without comparing full payloads.

use sha2::{Digest, Sha256};
use utxoledger_core::UtxoPool;
use utxoledger_types::{Transaction, constants};

/// Hash the pool contents in `UtxoId` order.
///
/// Depends on every (hash, index, value, owner) entry; independent of
/// insertion history.
#[must_use]
pub fn compute_pool_root(pool: &UtxoPool) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(constants::POOL_ROOT_DOMAIN);
    hasher.update((pool.len() as u64).to_le_bytes());

    for (utxo, output) in pool.iter() {
        hasher.update(utxo.tx_hash.as_bytes());
        hasher.update(utxo.index.to_le_bytes());
        let value = output.value.normalize().to_string();
        hasher.update((value.len() as u64).to_le_bytes());
        hasher.update(value.as_bytes());
        hasher.update(output.owner.as_bytes());
    }

    let result = hasher.finalize();
    let mut root = [0u8; 32];
    root.copy_from_slice(&result);
    root
}

/// Hash the accepted transaction identities in commit order.
#[must_use]
pub fn compute_accepted_root(accepted: &[Transaction]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(constants::ACCEPTED_ROOT_DOMAIN);
    hasher.update((accepted.len() as u64).to_le_bytes());
    for tx in accepted {
        hasher.update(tx.hash().as_bytes());
    }

    let result = hasher.finalize();
    let mut root = [0u8; 32];
    root.copy_from_slice(&result);
    root
}

/// Recompute the pool root and compare with `expected_root`.
#[must_use]
pub fn verify_pool_root(pool: &UtxoPool, expected_root: &[u8; 32]) -> bool {
    compute_pool_root(pool) == *expected_root
}
