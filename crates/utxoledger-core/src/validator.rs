//! Single-transaction validator: the rule gate every candidate passes.
//!
//! A transaction is valid against a pool iff:
//! 1. every input references a UTXO currently in the pool,
//! 2. every input's signature verifies against that UTXO's owner,
//! 3. no UTXO is claimed by more than one input,
//! 4. every output value is non-negative,
//! 5. the input total covers the output total (surplus is an implicit fee).
//!
//! ## Design Principles
//!
//! - **Read-only**: the pool is borrowed immutably; validation never mutates it
//! - **Call-local sums**: input/output totals are folds scoped to one call
//! - **Total**: every constructible transaction yields `Ok` or a [`TxRejection`]

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use utxoledger_types::{Amount, Ed25519Verifier, SignatureVerifier, Transaction};

use crate::{TxRejection, UtxoPool};

/// Value profile of a transaction that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxSummary {
    /// Sum of the values of the UTXOs consumed.
    pub input_total: Amount,
    /// Sum of the declared output values.
    pub output_total: Amount,
    /// `input_total - output_total`, never negative.
    pub surplus: Amount,
}

/// Applies the five transaction rules using a pluggable signature oracle.
#[derive(Debug, Clone, Default)]
pub struct TxValidator<V = Ed25519Verifier> {
    verifier: V,
}

impl<V: SignatureVerifier> TxValidator<V> {
    #[must_use]
    pub fn new(verifier: V) -> Self {
        Self { verifier }
    }

    #[must_use]
    pub fn verifier(&self) -> &V {
        &self.verifier
    }

    /// Boolean form of [`validate`](Self::validate).
    pub fn is_valid(&self, pool: &UtxoPool, tx: &Transaction) -> bool {
        self.validate(pool, tx).is_ok()
    }

    /// Check `tx` against the current state of `pool`.
    ///
    /// Inputs are examined in order (claim, existence, signature, value),
    /// then outputs in order, then conservation. The first failure is
    /// returned.
    pub fn validate(&self, pool: &UtxoPool, tx: &Transaction) -> Result<TxSummary, TxRejection> {
        let result = self.check(pool, tx);
        if let Err(reason) = &result {
            tracing::trace!(
                tx = %tx.hash().short(),
                code = reason.code(),
                %reason,
                "Transaction failed validation"
            );
        }
        result
    }

    fn check(&self, pool: &UtxoPool, tx: &Transaction) -> Result<TxSummary, TxRejection> {
        let mut claimed = HashSet::with_capacity(tx.num_inputs());
        let mut input_total = Amount::ZERO;

        for (input_index, input) in tx.inputs().iter().enumerate() {
            let utxo = input.utxo_id();

            // 3. No UTXO claimed twice within this transaction
            if !claimed.insert(utxo) {
                return Err(TxRejection::DuplicateInput { input_index, utxo });
            }

            // 1. Referenced UTXO must be unspent
            let spent = pool
                .get_tx_output(&utxo)
                .ok_or(TxRejection::MissingUtxo { input_index, utxo })?;

            // 2. Owner of the UTXO must have signed this input
            let signature = input
                .signature
                .as_deref()
                .ok_or(TxRejection::MissingSignature { input_index })?;
            let message = tx.raw_data_to_sign(input_index).unwrap_or_default();
            if !self.verifier.verify(&spent.owner, &message, signature) {
                return Err(TxRejection::InvalidSignature { input_index });
            }

            input_total = input_total
                .checked_add(spent.value)
                .ok_or(TxRejection::ValueOverflow)?;
        }

        let mut output_total = Amount::ZERO;
        for (output_index, output) in tx.outputs().iter().enumerate() {
            // 4. Non-negative outputs
            if output.value < Amount::ZERO {
                return Err(TxRejection::NegativeOutput {
                    output_index,
                    value: output.value,
                });
            }
            output_total = output_total
                .checked_add(output.value)
                .ok_or(TxRejection::ValueOverflow)?;
        }

        // 5. Conservation
        if input_total < output_total {
            return Err(TxRejection::InsufficientInput {
                inputs: input_total,
                outputs: output_total,
            });
        }

        Ok(TxSummary {
            input_total,
            output_total,
            surplus: input_total - output_total,
        })
    }
}
