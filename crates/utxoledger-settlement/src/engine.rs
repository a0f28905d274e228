//! Epoch settlement engine.
//!
//! For each candidate, in submission order:
//! 1. Validate against the pool as it stands now
//! 2. On rejection, record the reason and move on (pool unchanged)
//! 3. On acceptance, remove every consumed UTXO exactly once
//! 4. Insert each output under `(tx.hash(), position)`
//! 5. Record the surplus for the supply audit
//!
//! The loop is strictly sequential: commit order is what resolves two
//! candidates claiming the same UTXO.

use chrono::Utc;
use utxoledger_core::{TxRejection, TxSummary, TxValidator, UtxoPool};
use utxoledger_types::{
    Amount, Ed25519Verifier, EngineConfig, EpochId, LedgerError, Result, SignatureVerifier,
    Transaction,
};

use crate::determinism::{compute_accepted_root, compute_pool_root};
use crate::report::{EpochReport, RejectedTx};
use crate::supply_audit::SupplyAudit;

/// Owns a UTXO pool and advances it one batch at a time.
///
/// The pool is copied in at construction and never handed out mutably, so
/// nothing outside the engine can observe or cause a partial commit.
pub struct SettlementEngine<V = Ed25519Verifier> {
    /// Current spendable outputs. Mutated only by `commit`.
    pool: UtxoPool,
    /// Rule gate for candidates.
    validator: TxValidator<V>,
    config: EngineConfig,
    /// Epoch the next batch will run as.
    next_epoch: EpochId,
    /// `None` if the opening pool value could not be summed.
    supply: Option<SupplyAudit>,
}

impl SettlementEngine<Ed25519Verifier> {
    /// Create an engine over a private copy of `pool`, verifying ed25519
    /// signatures with the default configuration.
    #[must_use]
    pub fn new(pool: &UtxoPool) -> Self {
        Self::with_verifier(pool, Ed25519Verifier, EngineConfig::default())
    }
}

impl<V: SignatureVerifier> SettlementEngine<V> {
    /// Create an engine over a private copy of `pool` with a custom oracle.
    #[must_use]
    pub fn with_verifier(pool: &UtxoPool, verifier: V, config: EngineConfig) -> Self {
        let pool = pool.clone();
        let supply = match pool.total_value() {
            Ok(opening) => Some(SupplyAudit::new(opening)),
            Err(err) => {
                tracing::warn!(%err, "Opening pool value not summable; supply audit disabled");
                None
            }
        };
        Self {
            pool,
            validator: TxValidator::new(verifier),
            config,
            next_epoch: EpochId::default(),
            supply,
        }
    }

    /// Whether `tx` would be accepted against the current pool. No mutation.
    pub fn is_valid_tx(&self, tx: &Transaction) -> bool {
        self.validator.is_valid(&self.pool, tx)
    }

    /// Like [`is_valid_tx`](Self::is_valid_tx), reporting the value profile
    /// or the first failing rule.
    pub fn validate_tx(&self, tx: &Transaction) -> std::result::Result<TxSummary, TxRejection> {
        self.validator.validate(&self.pool, tx)
    }

    /// Settle one batch and return the accepted transactions in commit order.
    ///
    /// An empty batch returns an empty list and leaves the pool untouched.
    pub fn handle_txs(&mut self, candidates: &[Transaction]) -> Vec<Transaction> {
        self.settle_epoch(candidates).accepted
    }

    /// Settle one batch and return the full report.
    ///
    /// Earlier candidates win conflicts: once a UTXO is consumed, any later
    /// candidate referencing it is rejected as missing.
    pub fn settle_epoch(&mut self, candidates: &[Transaction]) -> EpochReport {
        let epoch_id = self.next_epoch;
        self.next_epoch = epoch_id.next();

        let mut accepted = Vec::new();
        let mut rejected = Vec::new();
        let mut total_surplus = Some(Amount::ZERO);

        for (position, tx) in candidates.iter().enumerate() {
            match self.validator.validate(&self.pool, tx) {
                Ok(summary) => {
                    self.commit(tx, &summary);
                    if let Some(sum) = total_surplus {
                        total_surplus = sum.checked_add(summary.surplus);
                        if total_surplus.is_none() {
                            tracing::warn!(epoch = epoch_id.0, position, "Epoch surplus overflowed");
                        }
                    }
                    tracing::debug!(
                        epoch = epoch_id.0,
                        position,
                        tx = %tx.hash().short(),
                        inputs = tx.num_inputs(),
                        outputs = tx.num_outputs(),
                        surplus = %summary.surplus,
                        "Transaction accepted"
                    );
                    accepted.push(tx.clone());
                }
                Err(reason) => {
                    tracing::debug!(
                        epoch = epoch_id.0,
                        position,
                        tx = %tx.hash().short(),
                        code = reason.code(),
                        %reason,
                        "Transaction rejected"
                    );
                    rejected.push(RejectedTx {
                        position,
                        tx_hash: tx.hash(),
                        reason,
                    });
                }
            }
        }

        if self.config.audit_supply {
            if let Err(err) = self.verify_supply() {
                tracing::error!(epoch = epoch_id.0, %err, "Supply audit failed");
            }
        }

        let pool_root = compute_pool_root(&self.pool);
        let accepted_root = compute_accepted_root(&accepted);

        tracing::info!(
            epoch = epoch_id.0,
            candidates = candidates.len(),
            accepted = accepted.len(),
            rejected = rejected.len(),
            surplus = ?total_surplus,
            utxos = self.pool.len(),
            pool_root = hex::encode(pool_root),
            "Epoch settled"
        );

        EpochReport {
            epoch_id,
            accepted,
            rejected,
            total_surplus,
            pool_root,
            accepted_root,
            settled_at: Utc::now(),
        }
    }

    /// Apply a validated transaction to the pool.
    fn commit(&mut self, tx: &Transaction, summary: &TxSummary) {
        for input in tx.inputs() {
            let removed = self.pool.remove_utxo(&input.utxo_id());
            debug_assert!(removed.is_some(), "validated input must be in the pool");
        }
        self.pool.add_transaction_outputs(tx);

        if let Some(supply) = self.supply.as_mut() {
            if let Err(err) = supply.record_surplus(summary.surplus) {
                tracing::warn!(%err, "Surplus not recordable; supply audit disabled");
                self.supply = None;
            }
        }
    }

    /// Check that the pool holds exactly the opening supply minus every
    /// surplus dropped so far.
    pub fn verify_supply(&self) -> Result<()> {
        let supply = self.supply.as_ref().ok_or_else(|| {
            LedgerError::Internal("supply audit unavailable for this pool".to_string())
        })?;
        supply.verify(self.pool.total_value()?)
    }

    /// Read-only view of the current pool.
    #[must_use]
    pub fn pool(&self) -> &UtxoPool {
        &self.pool
    }

    /// Independent copy of the current pool.
    #[must_use]
    pub fn pool_snapshot(&self) -> UtxoPool {
        self.pool.clone()
    }

    /// Epoch the next call to `handle_txs` / `settle_epoch` will run as.
    #[must_use]
    pub fn next_epoch(&self) -> EpochId {
        self.next_epoch
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn validator(&self) -> &TxValidator<V> {
        &self.validator
    }
}
