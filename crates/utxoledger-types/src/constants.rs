//! System-wide constants for the UtxoLedger settlement core.

/// Length in bytes of an owner identity (raw ed25519 public key).
pub const OWNER_KEY_LENGTH: usize = 32;

/// Length in bytes of a transaction identity hash (SHA-256).
pub const TX_HASH_LENGTH: usize = 32;

/// Length in bytes of an ed25519 signature.
pub const SIGNATURE_LENGTH: usize = 64;

/// Domain separator for transaction identity hashes.
pub const TX_HASH_DOMAIN: &[u8] = b"utxoledger:tx:v1:";

/// Domain separator for per-input signable messages.
pub const SIGNING_DOMAIN: &[u8] = b"utxoledger:sig:v1:";

/// Domain separator for the pool digest.
pub const POOL_ROOT_DOMAIN: &[u8] = b"utxoledger:pool_root:v1:";

/// Domain separator for the accepted-set digest.
pub const ACCEPTED_ROOT_DOMAIN: &[u8] = b"utxoledger:accepted_root:v1:";

/// Whether the engine audits supply conservation after every epoch by default.
pub const DEFAULT_AUDIT_SUPPLY: bool = true;

/// Default `tracing` filter directive.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "UtxoLedger";
