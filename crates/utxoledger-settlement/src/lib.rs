//! # utxoledger-settlement
//!
//! **Finality Plane**: greedy epoch settlement of candidate transactions
//! against an exclusively owned UTXO pool.
//!
//! ## Architecture
//!
//! The [`SettlementEngine`] receives a caller-ordered batch and, for each
//! candidate in turn:
//! 1. Validates it against the pool as left by every earlier acceptance
//! 2. Skips it on rejection (pool untouched)
//! 3. On acceptance, removes its inputs and inserts its outputs
//!
//! After the batch it produces an [`EpochReport`] with determinism digests
//! and, when enabled, audits supply conservation.
//!
//! ## Conflict resolution
//!
//! Submission order is the tie-break: the earliest candidate claiming a UTXO
//! wins, and every later claimant fails the existence rule.

pub mod determinism;
pub mod engine;
pub mod report;
pub mod supply_audit;
pub mod telemetry;

pub use determinism::{compute_accepted_root, compute_pool_root, verify_pool_root};
pub use engine::SettlementEngine;
pub use report::{EpochReport, RejectedTx};
pub use supply_audit::SupplyAudit;
pub use telemetry::init_tracing;
