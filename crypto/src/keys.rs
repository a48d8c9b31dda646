//! secp256k1 key generation.

use k256::ecdsa::{SigningKey, VerifyingKey};
use plasma_types::{KeyPair, PrivateKey, PublicKey};
use rand::rngs::OsRng;

use crate::hash::sha256_multi;
use crate::CryptoError;

pub(crate) fn signing_key(private: &PrivateKey) -> Result<SigningKey, CryptoError> {
    SigningKey::from_slice(&private.0).map_err(|_| CryptoError::InvalidPrivateKey)
}

pub(crate) fn encode_public(verifying_key: &VerifyingKey) -> Result<PublicKey, CryptoError> {
    let point = verifying_key.to_encoded_point(true);
    PublicKey::from_bytes(point.as_bytes()).map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))
}

/// Generate a new key pair from a secure random source.
pub fn generate_keypair() -> KeyPair {
    loop {
        let signing = SigningKey::random(&mut OsRng);
        if let Ok(public) = encode_public(signing.verifying_key()) {
            return KeyPair {
                public,
                private: PrivateKey(signing.to_bytes().into()),
            };
        }
    }
}

/// Derive the compressed public key from a private key.
pub fn public_from_private(private: &PrivateKey) -> Result<PublicKey, CryptoError> {
    let signing = signing_key(private)?;
    encode_public(signing.verifying_key())
}

/// Reconstruct a full key pair from a private key.
pub fn keypair_from_private(private: PrivateKey) -> Result<KeyPair, CryptoError> {
    let public = public_from_private(&private)?;
    Ok(KeyPair { public, private })
}

/// Derive a key pair deterministically from a 32-byte seed.
///
/// The scalar is `sha256(seed || counter)` for the first counter that lands
/// inside the curve order.
pub fn keypair_from_seed(seed: &[u8; 32]) -> KeyPair {
    let mut counter: u32 = 0;
    loop {
        let candidate = sha256_multi(&[seed, &counter.to_be_bytes()]);
        if let Ok(kp) = keypair_from_private(PrivateKey(candidate)) {
            return kp;
        }
        counter = counter.wrapping_add(1);
    }
}
