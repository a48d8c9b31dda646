//! Transaction hash type.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::PlasmaError;

/// A 32-byte SHA-256 transaction hash.
///
/// Used both as the `hash`/`sigHash` field of a child-chain transaction and
/// as the leaf value stored in a block's sparse Merkle tree.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TxHash([u8; 32]);

impl TxHash {
    pub const ZERO: Self = Self([0u8; 32]);

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Build from a byte slice that must be exactly 32 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, PlasmaError> {
        let arr: [u8; 32] = bytes.try_into().map_err(|_| PlasmaError::InvalidLength {
            expected: 32,
            got: bytes.len(),
        })?;
        Ok(Self(arr))
    }

    /// Parse the 64-character lowercase hex rendering produced by `Display`.
    pub fn from_hex(s: &str) -> Result<Self, PlasmaError> {
        let bytes = hex::decode(s).map_err(|e| PlasmaError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }
}

impl fmt::Debug for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxHash({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl From<[u8; 32]> for TxHash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_full_lowercase_hex() {
        let h = TxHash::new([0xAB; 32]);
        assert_eq!(h.to_string(), "ab".repeat(32));
    }

    #[test]
    fn debug_is_short() {
        let h = TxHash::new([0x01; 32]);
        assert_eq!(format!("{:?}", h), "TxHash(01010101)");
    }

    #[test]
    fn hex_roundtrip() {
        let h = TxHash::new([7u8; 32]);
        assert_eq!(TxHash::from_hex(&h.to_string()).unwrap(), h);
    }

    #[test]
    fn from_slice_rejects_wrong_length() {
        let err = TxHash::from_slice(&[0u8; 31]).unwrap_err();
        assert_eq!(err, PlasmaError::InvalidLength { expected: 32, got: 31 });
    }
}
