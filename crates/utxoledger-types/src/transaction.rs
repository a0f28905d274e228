//! The transaction record consumed by the settlement core.
//!
//! A [`Transaction`] is an ordered list of inputs (each naming a prior output
//! and carrying a signature) and an ordered list of outputs (value + owner).
//! Its identity hash is recomputed on every mutation, so [`Transaction::hash`]
//! always commits to the current contents, signatures included.
//!
//! ## Canonical encodings
//!
//! ```text
//! sign(i) = "utxoledger:sig:v1:" || in[i].prev_hash || in[i].index
//!           || Σ outputs (len(value) || value || owner)
//! hash    = SHA-256("utxoledger:tx:v1:" || n_in || Σ inputs (prev_hash || index || len(sig) || sig)
//!           || n_out || Σ outputs (len(value) || value || owner))
//! ```
//!
//! Values are encoded as their normalized decimal string so `10` and `10.00`
//! sign and hash identically.

use ed25519_dalek::SigningKey;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{LedgerError, OwnerKey, Result, TxHash, UtxoId, constants, signature};

/// Type alias for ledger amounts. Signed so that malformed negative outputs
/// are representable and can be rejected by validation.
pub type Amount = Decimal;

/// A reference to a prior output plus the signature authorizing its spend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxInput {
    /// Hash of the transaction that produced the output being spent.
    pub prev_tx_hash: TxHash,
    /// Position of that output in the producing transaction.
    pub output_index: u32,
    /// Signature over this input's signable message. `None` until signed.
    pub signature: Option<Vec<u8>>,
}

impl TxInput {
    #[must_use]
    pub fn new(prev_tx_hash: TxHash, output_index: u32) -> Self {
        Self {
            prev_tx_hash,
            output_index,
            signature: None,
        }
    }

    /// The UTXO this input claims.
    #[must_use]
    pub fn utxo_id(&self) -> UtxoId {
        UtxoId::new(self.prev_tx_hash, self.output_index)
    }
}

/// A newly created output: value and the key allowed to spend it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutput {
    pub value: Amount,
    pub owner: OwnerKey,
}

impl TxOutput {
    #[must_use]
    pub fn new(value: Amount, owner: OwnerKey) -> Self {
        Self { value, owner }
    }
}

/// Serialized shape of a transaction. The hash is not trusted from the wire;
/// it is recomputed on deserialization.
#[derive(Clone, Serialize, Deserialize)]
struct RawTransaction {
    inputs: Vec<TxInput>,
    outputs: Vec<TxOutput>,
}

/// An ordered set of inputs and outputs with a content-derived identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawTransaction", into = "RawTransaction")]
pub struct Transaction {
    hash: TxHash,
    inputs: Vec<TxInput>,
    outputs: Vec<TxOutput>,
}

impl Transaction {
    /// An empty transaction (no inputs, no outputs).
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(Vec::new(), Vec::new())
    }

    /// Build from explicit parts, computing the identity hash.
    #[must_use]
    pub fn from_parts(inputs: Vec<TxInput>, outputs: Vec<TxOutput>) -> Self {
        let hash = compute_hash(&inputs, &outputs);
        Self {
            hash,
            inputs,
            outputs,
        }
    }

    /// A transaction with no inputs that mints one output.
    ///
    /// Used to seed pools with initial value. Submitted as a settlement
    /// candidate it fails conservation unless its output is zero.
    #[must_use]
    pub fn coinbase(value: Amount, owner: OwnerKey) -> Self {
        Self::from_parts(Vec::new(), vec![TxOutput::new(value, owner)])
    }

    /// Stable identity hash of the current contents.
    #[must_use]
    pub fn hash(&self) -> TxHash {
        self.hash
    }

    #[must_use]
    pub fn inputs(&self) -> &[TxInput] {
        &self.inputs
    }

    #[must_use]
    pub fn outputs(&self) -> &[TxOutput] {
        &self.outputs
    }

    #[must_use]
    pub fn input(&self, index: usize) -> Option<&TxInput> {
        self.inputs.get(index)
    }

    #[must_use]
    pub fn output(&self, index: usize) -> Option<&TxOutput> {
        self.outputs.get(index)
    }

    #[must_use]
    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    #[must_use]
    pub fn num_outputs(&self) -> usize {
        self.outputs.len()
    }

    /// Append an unsigned input spending `prev_tx_hash:output_index`.
    pub fn add_input(&mut self, prev_tx_hash: TxHash, output_index: u32) {
        self.inputs.push(TxInput::new(prev_tx_hash, output_index));
        self.rehash();
    }

    /// Append an output. Signatures made before this call no longer match.
    pub fn add_output(&mut self, value: Amount, owner: OwnerKey) {
        self.outputs.push(TxOutput::new(value, owner));
        self.rehash();
    }

    /// Remove the input at `index`.
    pub fn remove_input(&mut self, index: usize) -> Result<TxInput> {
        if index >= self.inputs.len() {
            return Err(LedgerError::InputIndexOutOfRange {
                index,
                len: self.inputs.len(),
            });
        }
        let removed = self.inputs.remove(index);
        self.rehash();
        Ok(removed)
    }

    /// Attach a precomputed signature to the input at `index`.
    pub fn add_signature(&mut self, index: usize, signature: Vec<u8>) -> Result<()> {
        let len = self.inputs.len();
        let input = self
            .inputs
            .get_mut(index)
            .ok_or(LedgerError::InputIndexOutOfRange { index, len })?;
        input.signature = Some(signature);
        self.rehash();
        Ok(())
    }

    /// Sign the input at `index` with `key` over its canonical message.
    pub fn sign_input(&mut self, index: usize, key: &SigningKey) -> Result<()> {
        let message = self
            .raw_data_to_sign(index)
            .ok_or(LedgerError::InputIndexOutOfRange {
                index,
                len: self.inputs.len(),
            })?;
        self.add_signature(index, signature::sign_message(key, &message))
    }

    /// The exact bytes the owner of input `index`'s UTXO must sign.
    ///
    /// Returns `None` if `index` is out of range.
    #[must_use]
    pub fn raw_data_to_sign(&self, index: usize) -> Option<Vec<u8>> {
        let input = self.inputs.get(index)?;
        let mut payload = Vec::with_capacity(64 + self.outputs.len() * 48);
        payload.extend_from_slice(constants::SIGNING_DOMAIN);
        payload.extend_from_slice(input.prev_tx_hash.as_bytes());
        payload.extend_from_slice(&input.output_index.to_le_bytes());
        for output in &self.outputs {
            put_output(&mut payload, output);
        }
        Some(payload)
    }

    fn rehash(&mut self) {
        self.hash = compute_hash(&self.inputs, &self.outputs);
    }
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new()
    }
}

impl From<RawTransaction> for Transaction {
    fn from(raw: RawTransaction) -> Self {
        Self::from_parts(raw.inputs, raw.outputs)
    }
}

impl From<Transaction> for RawTransaction {
    fn from(tx: Transaction) -> Self {
        Self {
            inputs: tx.inputs,
            outputs: tx.outputs,
        }
    }
}

fn compute_hash(inputs: &[TxInput], outputs: &[TxOutput]) -> TxHash {
    let mut hasher = Sha256::new();
    hasher.update(constants::TX_HASH_DOMAIN);
    hasher.update((inputs.len() as u64).to_le_bytes());
    for input in inputs {
        hasher.update(input.prev_tx_hash.as_bytes());
        hasher.update(input.output_index.to_le_bytes());
        let sig = input.signature.as_deref().unwrap_or_default();
        hasher.update((sig.len() as u64).to_le_bytes());
        hasher.update(sig);
    }
    hasher.update((outputs.len() as u64).to_le_bytes());
    let mut buf = Vec::with_capacity(outputs.len() * 48);
    for output in outputs {
        put_output(&mut buf, output);
    }
    hasher.update(&buf);

    let result = hasher.finalize();
    let mut hash = [0u8; constants::TX_HASH_LENGTH];
    hash.copy_from_slice(&result);
    TxHash(hash)
}

fn put_output(buf: &mut Vec<u8>, output: &TxOutput) {
    let value = output.value.normalize().to_string();
    buf.extend_from_slice(&(value.len() as u64).to_le_bytes());
    buf.extend_from_slice(value.as_bytes());
    buf.extend_from_slice(output.owner.as_bytes());
}
