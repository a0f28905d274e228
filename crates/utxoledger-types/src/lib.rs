//! # utxoledger-types
//!
//! Shared types, errors, and configuration for the **UtxoLedger** settlement core.
//!
//! This crate is the leaf dependency of the workspace. Every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`TxHash`], [`UtxoId`], [`OwnerKey`], [`EpochId`]
//! - **Transaction record**: [`Transaction`], [`TxInput`], [`TxOutput`], [`Amount`]
//! - **Signature oracle**: [`SignatureVerifier`], [`Ed25519Verifier`]
//! - **Configuration**: [`EngineConfig`], [`LogConfig`]
//! - **Errors**: [`LedgerError`] with `UL_ERR_` prefix codes
//! - **Constants**: domain separators and defaults

pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod signature;
pub mod transaction;

#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

// Re-export all primary types at crate root for ergonomic imports:
//   use utxoledger_types::{Transaction, TxOutput, UtxoId, ...};

pub use config::*;
pub use error::*;
pub use ids::*;
pub use signature::*;
pub use transaction::*;

// Constants are accessed via `utxoledger_types::constants::FOO`
// (not re-exported to avoid name collisions).
