//! Signature oracle.
//!
//! The settlement core never inspects keys or signatures itself. It asks a
//! [`SignatureVerifier`] whether `signature` authorizes `message` for
//! `owner`, and treats the answer as final.

use ed25519_dalek::{Signature, Signer, SigningKey};

use crate::{OwnerKey, constants};

/// Pure signature check: no side effects, no shared state, no caching.
///
/// Implementations must return `false` for anything they cannot parse
/// rather than panicking.
pub trait SignatureVerifier {
    fn verify(&self, owner: &OwnerKey, message: &[u8], signature: &[u8]) -> bool;
}

/// Closures make convenient oracles for tests and embedding.
impl<F> SignatureVerifier for F
where
    F: Fn(&OwnerKey, &[u8], &[u8]) -> bool,
{
    fn verify(&self, owner: &OwnerKey, message: &[u8], signature: &[u8]) -> bool {
        self(owner, message, signature)
    }
}

/// Ed25519 oracle with strict verification (rejects small-order keys and
/// malleable signatures).
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Verifier;

impl SignatureVerifier for Ed25519Verifier {
    fn verify(&self, owner: &OwnerKey, message: &[u8], signature: &[u8]) -> bool {
        if signature.len() != constants::SIGNATURE_LENGTH {
            return false;
        }
        let Ok(key) = owner.to_verifying_key() else {
            return false;
        };
        let Ok(sig) = Signature::from_slice(signature) else {
            return false;
        };
        key.verify_strict(message, &sig).is_ok()
    }
}

/// Sign `message` with `key`, returning the 64-byte signature.
#[must_use]
pub fn sign_message(key: &SigningKey, message: &[u8]) -> Vec<u8> {
    key.sign(message).to_bytes().to_vec()
}
