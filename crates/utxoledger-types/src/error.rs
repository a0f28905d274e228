//! Error types for the UtxoLedger settlement core.
//!
//! All errors use the `UL_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Transaction construction errors
//! - 2xx: Pool errors
//! - 3xx: Key / signature errors
//! - 6xx: Settlement invariant errors
//! - 9xx: General / internal errors
//!
//! Invalid *candidate transactions* never surface here: they are soft
//! rejections reported by the validation plane. These errors cover API misuse
//! and broken invariants only.

use thiserror::Error;

use crate::UtxoId;

/// Central error enum for all UtxoLedger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // =================================================================
    // Transaction Errors (1xx)
    // =================================================================
    /// An input index beyond the transaction's input list.
    #[error("UL_ERR_100: Input index {index} out of range (transaction has {len} inputs)")]
    InputIndexOutOfRange { index: usize, len: usize },

    /// A transaction hash could not be parsed.
    #[error("UL_ERR_102: Invalid transaction hash: {reason}")]
    InvalidHash { reason: String },

    // =================================================================
    // Pool Errors (2xx)
    // =================================================================
    /// The referenced UTXO is not in the pool.
    #[error("UL_ERR_200: UTXO not found: {0}")]
    UtxoNotFound(UtxoId),

    /// Summing amounts overflowed the decimal range.
    #[error("UL_ERR_201: Amount overflow")]
    AmountOverflow,

    // =================================================================
    // Key / Signature Errors (3xx)
    // =================================================================
    /// The owner identity is not a valid ed25519 public key.
    #[error("UL_ERR_300: Invalid owner key: {reason}")]
    InvalidOwnerKey { reason: String },

    // =================================================================
    // Settlement Errors (6xx)
    // =================================================================
    /// Supply conservation invariant violated. Critical.
    #[error("UL_ERR_600: Supply invariant violation: {reason}")]
    SupplyInvariantViolation { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("UL_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("UL_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (malformed config document, bad filter, etc.).
    #[error("UL_ERR_902: Configuration error: {0}")]
    Configuration(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, LedgerError>;

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
