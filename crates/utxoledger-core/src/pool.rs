//! The UTXO pool: currently spendable outputs keyed by [`UtxoId`].
//!
//! Iteration, listing and digests always go through sorted keys so that two
//! pools with the same contents are observably identical.

use std::collections::HashMap;

use utxoledger_types::{Amount, LedgerError, Result, Transaction, TxOutput, UtxoId};

/// A mapping from UTXO identifier to the output it names.
///
/// `Clone` is the copy constructor: a clone shares nothing with the original.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UtxoPool {
    /// Unspent outputs, indexed by producing transaction hash and output index.
    utxos: HashMap<UtxoId, TxOutput>,
}

impl UtxoPool {
    /// Create an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self {
            utxos: HashMap::new(),
        }
    }

    /// Add (or replace) the output stored under `utxo`.
    ///
    /// Returns the previous output if one was present.
    pub fn add_utxo(&mut self, utxo: UtxoId, output: TxOutput) -> Option<TxOutput> {
        self.utxos.insert(utxo, output)
    }

    /// Remove `utxo`, returning the output it held.
    pub fn remove_utxo(&mut self, utxo: &UtxoId) -> Option<TxOutput> {
        self.utxos.remove(utxo)
    }

    /// Remove `utxo`, failing if it is not present.
    pub fn spend(&mut self, utxo: &UtxoId) -> Result<TxOutput> {
        self.utxos
            .remove(utxo)
            .ok_or(LedgerError::UtxoNotFound(*utxo))
    }

    /// Insert every output of `tx` under `(tx.hash(), position)`.
    ///
    /// Returns the number of entries added. Positions past `u32::MAX` are
    /// not addressable and are not inserted.
    pub fn add_transaction_outputs(&mut self, tx: &Transaction) -> usize {
        let tx_hash = tx.hash();
        let mut added = 0;
        for (index, output) in (0u32..).zip(tx.outputs()) {
            self.utxos.insert(UtxoId::new(tx_hash, index), output.clone());
            added += 1;
        }
        added
    }

    #[must_use]
    pub fn get_tx_output(&self, utxo: &UtxoId) -> Option<&TxOutput> {
        self.utxos.get(utxo)
    }

    #[must_use]
    pub fn contains(&self, utxo: &UtxoId) -> bool {
        self.utxos.contains_key(utxo)
    }

    /// Every UTXO identifier in the pool, sorted.
    #[must_use]
    pub fn all_utxos(&self) -> Vec<UtxoId> {
        let mut ids: Vec<UtxoId> = self.utxos.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Entries in `UtxoId` order.
    pub fn iter(&self) -> impl Iterator<Item = (&UtxoId, &TxOutput)> {
        let mut entries: Vec<(&UtxoId, &TxOutput)> = self.utxos.iter().collect();
        entries.sort_unstable_by_key(|(id, _)| **id);
        entries.into_iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.utxos.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.utxos.is_empty()
    }

    /// Sum of all output values in the pool.
    pub fn total_value(&self) -> Result<Amount> {
        self.utxos
            .values()
            .try_fold(Amount::ZERO, |acc, out| acc.checked_add(out.value))
            .ok_or(LedgerError::AmountOverflow)
    }
}

impl FromIterator<(UtxoId, TxOutput)> for UtxoPool {
    fn from_iter<I: IntoIterator<Item = (UtxoId, TxOutput)>>(iter: I) -> Self {
        Self {
            utxos: iter.into_iter().collect(),
        }
    }
}
