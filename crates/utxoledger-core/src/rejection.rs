//! Reasons a candidate transaction is rejected.
//!
//! A rejection is data, not a fault: it is returned from validation, logged
//! and reported, and never aborts processing of the rest of a batch.
//! Codes use the `UL_REJ_` prefix, numbered after the rule they enforce.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utxoledger_types::{Amount, UtxoId};

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum TxRejection {
    /// Rule 1: the input's UTXO is not in the pool (spent or never existed).
    #[error("UL_REJ_1: input {input_index} references missing UTXO {utxo}")]
    MissingUtxo { input_index: usize, utxo: UtxoId },

    /// Rule 2: the input carries no signature.
    #[error("UL_REJ_2: input {input_index} is unsigned")]
    MissingSignature { input_index: usize },

    /// Rule 2: the signature does not verify against the UTXO's owner.
    #[error("UL_REJ_2: input {input_index} signature does not verify")]
    InvalidSignature { input_index: usize },

    /// Rule 3: a UTXO is claimed twice inside the same transaction.
    #[error("UL_REJ_3: input {input_index} claims {utxo} a second time")]
    DuplicateInput { input_index: usize, utxo: UtxoId },

    /// Rule 4: an output declares a negative value.
    #[error("UL_REJ_4: output {output_index} has negative value {value}")]
    NegativeOutput { output_index: usize, value: Amount },

    /// Rule 5: outputs claim more value than the inputs provide.
    #[error("UL_REJ_5: outputs {outputs} exceed inputs {inputs}")]
    InsufficientInput { inputs: Amount, outputs: Amount },

    /// Rule 5: a value sum left the representable range.
    #[error("UL_REJ_5: value sum overflow")]
    ValueOverflow,
}

impl TxRejection {
    /// Stable short code for structured log fields.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingUtxo { .. } => "missing_utxo",
            Self::MissingSignature { .. } => "missing_signature",
            Self::InvalidSignature { .. } => "invalid_signature",
            Self::DuplicateInput { .. } => "duplicate_input",
            Self::NegativeOutput { .. } => "negative_output",
            Self::InsufficientInput { .. } => "insufficient_input",
            Self::ValueOverflow => "value_overflow",
        }
    }
}
