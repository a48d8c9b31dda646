//! secp256k1 key and recoverable-signature types.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::PlasmaError;

/// A 33-byte SEC1-compressed secp256k1 public key.
///
/// Crosses text boundaries (the `ownerPubKey` transaction field) as
/// lowercase hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; 33]);

/// A 32-byte secp256k1 secret scalar.
///
/// This type intentionally does not implement `Debug`, `Serialize`, or `Clone`
/// to prevent accidental exposure. Key bytes are zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey(pub [u8; 32]);

/// A secp256k1 key pair (public + private).
///
/// Use `plasma_crypto::generate_keypair()` or `plasma_crypto::keypair_from_private()`
/// to construct key pairs.
pub struct KeyPair {
    pub public: PublicKey,
    pub private: PrivateKey,
}

/// A recoverable ECDSA signature split into its components.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecoverableSignature {
    pub r: [u8; 32],
    pub s: [u8; 32],
    /// Recovery id in `0..=3`.
    pub recovery_id: u8,
}

impl PublicKey {
    pub const LEN: usize = 33;

    /// Accept a compressed SEC1 encoding (`0x02`/`0x03` prefix + 32 bytes).
    ///
    /// Only the shape is checked here; curve membership is checked by the
    /// crypto crate when the key is used.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PlasmaError> {
        let arr: [u8; 33] = bytes.try_into().map_err(|_| PlasmaError::InvalidLength {
            expected: Self::LEN,
            got: bytes.len(),
        })?;
        if arr[0] != 0x02 && arr[0] != 0x03 {
            return Err(PlasmaError::InvalidPublicKey(format!(
                "bad SEC1 prefix {:#04x}",
                arr[0]
            )));
        }
        Ok(Self(arr))
    }

    pub fn from_hex(s: &str) -> Result<Self, PlasmaError> {
        let bytes = hex::decode(s).map_err(|e| PlasmaError::InvalidHex(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 33] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", hex::encode(&self.0[..5]))
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PubKeyVisitor;

        impl serde::de::Visitor<'_> for PubKeyVisitor {
            type Value = PublicKey;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a 66-character hex compressed public key")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
                PublicKey::from_hex(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(PubKeyVisitor)
    }
}

impl RecoverableSignature {
    pub fn new(r: [u8; 32], s: [u8; 32], recovery_id: u8) -> Self {
        Self { r, s, recovery_id }
    }
}
