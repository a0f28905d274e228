//! Test fixtures. **Never use in production.**
//!
//! Enabled for this crate's own tests and, downstream, through the
//! `test-helpers` feature.

use ed25519_dalek::SigningKey;

use crate::{Amount, OwnerKey, Transaction, TxOutput, UtxoId};

/// An ed25519 keypair standing in for a ledger participant.
#[derive(Debug, Clone)]
pub struct TestKey {
    signing: SigningKey,
}

impl TestKey {
    /// Fresh random keypair.
    pub fn generate() -> Self {
        Self {
            signing: SigningKey::generate(&mut rand::rngs::OsRng),
        }
    }

    /// Deterministic keypair from a one-byte seed.
    pub fn from_seed(seed: u8) -> Self {
        Self {
            signing: SigningKey::from_bytes(&[seed; 32]),
        }
    }

    pub fn owner(&self) -> OwnerKey {
        OwnerKey::from_verifying_key(&self.signing.verifying_key())
    }

    pub fn signing_key(&self) -> &SigningKey {
        &self.signing
    }
}

/// Build a transaction spending `inputs` into `outputs`, signing each input
/// with the paired key after all outputs are in place.
pub fn signed_spend(inputs: &[(UtxoId, &TestKey)], outputs: &[(Amount, OwnerKey)]) -> Transaction {
    let mut tx = Transaction::from_parts(
        Vec::new(),
        outputs
            .iter()
            .map(|(value, owner)| TxOutput::new(*value, *owner))
            .collect(),
    );
    for (utxo, _) in inputs {
        tx.add_input(utxo.tx_hash, utxo.index);
    }
    for (index, (_, key)) in inputs.iter().enumerate() {
        tx.sign_input(index, key.signing_key())
            .expect("input index is in range by construction");
    }
    tx
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::{Ed25519Verifier, SignatureVerifier, TxHash};

    #[test]
    fn seeded_keys_are_stable() {
        assert_eq!(TestKey::from_seed(4).owner(), TestKey::from_seed(4).owner());
        assert_ne!(TestKey::from_seed(4).owner(), TestKey::from_seed(5).owner());
    }

    #[test]
    fn generated_keys_differ() {
        assert_ne!(TestKey::generate().owner(), TestKey::generate().owner());
    }

    #[test]
    fn signed_spend_signs_every_input() {
        let alice = TestKey::from_seed(1);
        let bob = TestKey::from_seed(2);
        let utxos = [
            UtxoId::new(TxHash([1u8; 32]), 0),
            UtxoId::new(TxHash([1u8; 32]), 1),
        ];
        let tx = signed_spend(
            &[(utxos[0], &alice), (utxos[1], &bob)],
            &[(Decimal::new(5, 0), bob.owner())],
        );
        for (i, key) in [&alice, &bob].into_iter().enumerate() {
            let sig = tx.input(i).unwrap().signature.as_deref().unwrap();
            let msg = tx.raw_data_to_sign(i).unwrap();
            assert!(Ed25519Verifier.verify(&key.owner(), &msg, sig));
        }
    }
}
