//! # utxoledger-core
//!
//! **Pure validation plane for UtxoLedger.**
//!
//! This crate owns the UTXO pool abstraction and the single-transaction
//! rule set. It has:
//!
//! - **Zero side effects**: validation only reads the pool
//! - **Soft rejection**: a bad transaction is a [`TxRejection`] value, never a panic
//! - **Call-scoped state**: every evaluation starts from nothing
//!
//! Committing accepted transactions is the job of `utxoledger-settlement`.

pub mod pool;
pub mod rejection;
pub mod validator;

pub use pool::UtxoPool;
pub use rejection::TxRejection;
pub use validator::{TxSummary, TxValidator};
