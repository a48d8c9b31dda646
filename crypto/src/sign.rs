//! Recoverable ECDSA signing over 32-byte transaction hashes.

use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use plasma_types::{PrivateKey, PublicKey, RecoverableSignature};

use crate::keys::{encode_public, signing_key};
use crate::CryptoError;

/// Sign a 32-byte prehash, returning `(r, s, recovery_id)`.
///
/// Signing is deterministic (RFC 6979) and `s` is normalized to the low half
/// of the curve order.
pub fn sign_recoverable(
    hash: &[u8; 32],
    private_key: &PrivateKey,
) -> Result<RecoverableSignature, CryptoError> {
    let key = signing_key(private_key)?;
    let (sig, recid) = key
        .sign_prehash_recoverable(hash)
        .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;
    let bytes = sig.to_bytes();
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&bytes[..32]);
    s.copy_from_slice(&bytes[32..]);
    Ok(RecoverableSignature::new(r, s, recid.to_byte()))
}

/// Recover the compressed public key that produced `signature` over `hash`.
pub fn recover_public_key(
    hash: &[u8; 32],
    signature: &RecoverableSignature,
) -> Result<PublicKey, CryptoError> {
    let recid = RecoveryId::from_byte(signature.recovery_id).ok_or_else(|| {
        CryptoError::RecoveryFailed(format!("recovery id {} out of range", signature.recovery_id))
    })?;
    let mut raw = [0u8; 64];
    raw[..32].copy_from_slice(&signature.r);
    raw[32..].copy_from_slice(&signature.s);
    let sig =
        Signature::from_slice(&raw).map_err(|e| CryptoError::RecoveryFailed(e.to_string()))?;
    let key = VerifyingKey::recover_from_prehash(hash, &sig, recid)
        .map_err(|e| CryptoError::RecoveryFailed(e.to_string()))?;
    encode_public(&key)
}

/// Whether `signature` over `hash` recovers to `expected`.
///
/// Returns `false` for malformed signatures as well as for a different signer.
pub fn verify_recoverable(
    hash: &[u8; 32],
    signature: &RecoverableSignature,
    expected: &PublicKey,
) -> bool {
    recover_public_key(hash, signature)
        .map(|pk| &pk == expected)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::sha256;
    use crate::keys::{generate_keypair, keypair_from_seed};

    #[test]
    fn sign_and_recover() {
        let kp = generate_keypair();
        let hash = sha256(b"transfer");
        let sig = sign_recoverable(&hash, &kp.private).unwrap();
        assert!(sig.recovery_id <= 3);
        assert_eq!(recover_public_key(&hash, &sig).unwrap(), kp.public);
        assert!(verify_recoverable(&hash, &sig, &kp.public));
    }

    #[test]
    fn wrong_hash_recovers_different_key() {
        let kp = generate_keypair();
        let sig = sign_recoverable(&sha256(b"a"), &kp.private).unwrap();
        assert!(!verify_recoverable(&sha256(b"b"), &sig, &kp.public));
    }

    #[test]
    fn wrong_key_fails() {
        let kp1 = generate_keypair();
        let kp2 = generate_keypair();
        let hash = sha256(b"x");
        let sig = sign_recoverable(&hash, &kp1.private).unwrap();
        assert!(!verify_recoverable(&hash, &sig, &kp2.public));
    }

    #[test]
    fn signature_deterministic() {
        let kp = keypair_from_seed(&[99u8; 32]);
        let hash = sha256(b"deterministic");
        let a = sign_recoverable(&hash, &kp.private).unwrap();
        let b = sign_recoverable(&hash, &kp.private).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn bad_recovery_id_is_error() {
        let kp = generate_keypair();
        let hash = sha256(b"x");
        let mut sig = sign_recoverable(&hash, &kp.private).unwrap();
        sig.recovery_id = 9;
        assert!(matches!(
            recover_public_key(&hash, &sig),
            Err(CryptoError::RecoveryFailed(_))
        ));
        assert!(!verify_recoverable(&hash, &sig, &kp.public));
    }

    #[test]
    fn zero_scalars_are_rejected() {
        let sig = RecoverableSignature::new([0u8; 32], [0u8; 32], 0);
        assert!(recover_public_key(&[1u8; 32], &sig).is_err());
    }
}
