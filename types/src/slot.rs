//! 256-bit coin slot identifiers.
//!
//! A slot is stored big-endian, so byte order and numeric order agree and
//! bit `i` (counting from the least significant bit) addresses level `i`
//! of a sparse Merkle tree path.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::PlasmaError;

/// A 256-bit coin slot, unique per coin for the coin's whole lifetime.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CoinSlot([u8; 32]);

impl CoinSlot {
    pub const ZERO: Self = Self([0u8; 32]);

    /// Number of bits in a slot.
    pub const BITS: usize = 256;

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn from_u64(value: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Parse a hex slot of 1 to 64 digits, without `0x` prefix.
    ///
    /// Shorter inputs are treated as numbers and left-padded with zeros.
    pub fn from_hex(s: &str) -> Result<Self, PlasmaError> {
        if s.is_empty() {
            return Err(PlasmaError::InvalidHex("empty slot".into()));
        }
        let digits = s.trim_start_matches('0');
        if digits.len() > 64 {
            return Err(PlasmaError::SlotOutOfRange(digits.len()));
        }
        let padded = format!("{:0>64}", digits);
        let bytes = hex::decode(&padded).map_err(|e| PlasmaError::InvalidHex(e.to_string()))?;
        let mut out = [0u8; 32];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }

    /// The canonical text form: 64 lowercase hex digits, no prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Bit `i` counted from the least significant bit.
    pub fn bit(&self, i: usize) -> bool {
        if i >= Self::BITS {
            return false;
        }
        let byte = self.0[31 - i / 8];
        (byte >> (i % 8)) & 1 == 1
    }

    /// Keep only the low `depth` bits.
    pub fn masked(&self, depth: usize) -> Self {
        if depth >= Self::BITS {
            return *self;
        }
        let mut out = [0u8; 32];
        let full_bytes = depth / 8;
        let rem_bits = depth % 8;
        out[32 - full_bytes..].copy_from_slice(&self.0[32 - full_bytes..]);
        if rem_bits > 0 {
            let idx = 31 - full_bytes;
            out[idx] = self.0[idx] & ((1u8 << rem_bits) - 1);
        }
        Self(out)
    }

    /// Index of the parent node one level up (shift right by one bit).
    pub fn parent(&self) -> Self {
        let mut out = [0u8; 32];
        let mut carry = 0u8;
        for (i, byte) in self.0.iter().enumerate() {
            out[i] = (byte >> 1) | (carry << 7);
            carry = byte & 1;
        }
        Self(out)
    }

    /// Index of the sibling node at the same level (flip the lowest bit).
    pub fn sibling(&self) -> Self {
        let mut out = self.0;
        out[31] ^= 1;
        Self(out)
    }
}

impl fmt::Debug for CoinSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.to_hex();
        let trimmed = digits.trim_start_matches('0');
        write!(f, "CoinSlot({})", if trimmed.is_empty() { "0" } else { trimmed })
    }
}

impl fmt::Display for CoinSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<u64> for CoinSlot {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_hex_is_left_padded() {
        let slot = CoinSlot::from_hex("1f").unwrap();
        assert_eq!(slot, CoinSlot::from_u64(0x1f));
        assert_eq!(slot.to_hex().len(), 64);
        assert!(slot.to_hex().ends_with("1f"));
    }

    #[test]
    fn leading_zeros_do_not_count_against_width() {
        let long = format!("{}{}", "0".repeat(10), "f".repeat(64));
        let slot = CoinSlot::from_hex(&long).unwrap();
        assert_eq!(slot.as_bytes(), &[0xFF; 32]);
    }

    #[test]
    fn too_wide_is_rejected() {
        let err = CoinSlot::from_hex(&"1".repeat(65)).unwrap_err();
        assert_eq!(err, PlasmaError::SlotOutOfRange(65));
    }

    #[test]
    fn non_hex_is_rejected() {
        assert!(matches!(
            CoinSlot::from_hex("xyz"),
            Err(PlasmaError::InvalidHex(_))
        ));
        assert!(CoinSlot::from_hex("").is_err());
    }

    #[test]
    fn bits_count_from_lsb() {
        let slot = CoinSlot::from_u64(0b1010);
        assert!(!slot.bit(0));
        assert!(slot.bit(1));
        assert!(!slot.bit(2));
        assert!(slot.bit(3));
        assert!(!slot.bit(255));
        assert!(!slot.bit(300));
    }

    #[test]
    fn high_bit_lives_in_first_byte() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0x80;
        assert!(CoinSlot::new(bytes).bit(255));
    }

    #[test]
    fn masked_keeps_low_bits() {
        let slot = CoinSlot::new([0xFF; 32]);
        let m = slot.masked(12);
        assert_eq!(m, CoinSlot::from_u64(0x0FFF));
        assert_eq!(slot.masked(256), slot);
        assert_eq!(slot.masked(0), CoinSlot::ZERO);
    }

    #[test]
    fn parent_shifts_right_across_bytes() {
        let slot = CoinSlot::from_u64(0x0100);
        assert_eq!(slot.parent(), CoinSlot::from_u64(0x80));
    }

    #[test]
    fn sibling_flips_lowest_bit() {
        assert_eq!(CoinSlot::from_u64(6).sibling(), CoinSlot::from_u64(7));
        assert_eq!(CoinSlot::from_u64(7).sibling(), CoinSlot::from_u64(6));
    }

    #[test]
    fn debug_trims_leading_zeros() {
        assert_eq!(format!("{:?}", CoinSlot::from_u64(0xab)), "CoinSlot(ab)");
        assert_eq!(format!("{:?}", CoinSlot::ZERO), "CoinSlot(0)");
    }
}
