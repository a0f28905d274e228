//! Identifiers used throughout UtxoLedger.
//!
//! Transaction identities are SHA-256 digests, owner identities are raw
//! ed25519 public keys, and a UTXO is addressed by the pair
//! (producing transaction hash, output index).

use std::fmt;

use ed25519_dalek::VerifyingKey;
use serde::{Deserialize, Serialize};

use crate::{LedgerError, Result, constants};

// ---------------------------------------------------------------------------
// TxHash
// ---------------------------------------------------------------------------

/// Stable identity hash of a transaction (SHA-256 over its canonical bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TxHash(pub [u8; constants::TX_HASH_LENGTH]);

impl TxHash {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; constants::TX_HASH_LENGTH] {
        &self.0
    }

    /// Parse a hash from its 64-character hex form.
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s).map_err(|e| LedgerError::InvalidHash {
            reason: e.to_string(),
        })?;
        let arr: [u8; constants::TX_HASH_LENGTH] =
            bytes.try_into().map_err(|v: Vec<u8>| LedgerError::InvalidHash {
                reason: format!("expected {} bytes, got {}", constants::TX_HASH_LENGTH, v.len()),
            })?;
        Ok(Self(arr))
    }

    /// First four bytes in hex, for log lines.
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

// ---------------------------------------------------------------------------
// UtxoId
// ---------------------------------------------------------------------------

/// Address of an unspent output: the transaction that produced it plus the
/// output's position in that transaction.
///
/// Ordering is by hash, then index, which gives pools a deterministic
/// iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct UtxoId {
    pub tx_hash: TxHash,
    pub index: u32,
}

impl UtxoId {
    #[must_use]
    pub fn new(tx_hash: TxHash, index: u32) -> Self {
        Self { tx_hash, index }
    }
}

impl fmt::Display for UtxoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.tx_hash, self.index)
    }
}

// ---------------------------------------------------------------------------
// OwnerKey
// ---------------------------------------------------------------------------

/// Identity of an output's owner.
/// This is the raw ed25519 public key (32 bytes).
///
/// The bytes are not checked to be a valid curve point at construction;
/// an invalid key simply never verifies a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct OwnerKey(pub [u8; constants::OWNER_KEY_LENGTH]);

impl OwnerKey {
    #[must_use]
    pub fn from_pubkey(bytes: [u8; constants::OWNER_KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn from_verifying_key(key: &VerifyingKey) -> Self {
        Self::from_pubkey(key.to_bytes())
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; constants::OWNER_KEY_LENGTH] {
        &self.0
    }

    /// Decode into an ed25519 verifying key.
    pub fn to_verifying_key(&self) -> Result<VerifyingKey> {
        VerifyingKey::from_bytes(&self.0).map_err(|e| LedgerError::InvalidOwnerKey {
            reason: e.to_string(),
        })
    }

    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for OwnerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "owner:{}", hex::encode(&self.0[..8]))
    }
}

// ---------------------------------------------------------------------------
// EpochId
// ---------------------------------------------------------------------------

/// Monotonically increasing identifier for one settlement round.
///
/// An engine's first batch runs as `EpochId(0)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct EpochId(pub u64);

impl EpochId {
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for EpochId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "epoch:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
