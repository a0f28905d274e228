//! Per-epoch settlement report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utxoledger_core::TxRejection;
use utxoledger_types::{Amount, EpochId, Transaction, TxHash};

/// A candidate that was skipped, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedTx {
    /// Index of the candidate in the submitted batch.
    pub position: usize,
    pub tx_hash: TxHash,
    pub reason: TxRejection,
}

/// Outcome of one `settle_epoch` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochReport {
    pub epoch_id: EpochId,
    /// Accepted transactions in commit order (= submission order).
    pub accepted: Vec<Transaction>,
    /// Rejected candidates in submission order.
    pub rejected: Vec<RejectedTx>,
    /// Sum of the implicit fees of accepted transactions; `None` if the
    /// sum overflowed.
    pub total_surplus: Option<Amount>,
    /// Pool digest after settlement.
    pub pool_root: [u8; 32],
    /// Digest of accepted transaction hashes, in order.
    pub accepted_root: [u8; 32],
    pub settled_at: DateTime<Utc>,
}

impl EpochReport {
    /// Number of candidates that were submitted.
    #[must_use]
    pub fn candidate_count(&self) -> usize {
        self.accepted.len() + self.rejected.len()
    }

    /// Hashes of accepted transactions in commit order.
    #[must_use]
    pub fn accepted_hashes(&self) -> Vec<TxHash> {
        self.accepted.iter().map(Transaction::hash).collect()
    }

    /// Rejection recorded for the candidate at `position`, if any.
    #[must_use]
    pub fn rejection_at(&self, position: usize) -> Option<&TxRejection> {
        self.rejected
            .iter()
            .find(|r| r.position == position)
            .map(|r| &r.reason)
    }
}
