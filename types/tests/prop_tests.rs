use proptest::prelude::*;

use plasma_types::{CoinSlot, Timestamp, TxHash};

proptest! {
    /// TxHash bincode serialization roundtrip.
    #[test]
    fn tx_hash_bincode_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let hash = TxHash::new(bytes);
        let encoded = bincode::serialize(&hash).unwrap();
        let decoded: TxHash = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded, hash);
    }

    /// TxHash::is_zero is true only for all-zero bytes.
    #[test]
    fn tx_hash_is_zero_correct(bytes in prop::array::uniform32(0u8..)) {
        prop_assert_eq!(TxHash::new(bytes).is_zero(), bytes == [0u8; 32]);
    }

    /// Slot text form always parses back to the same slot.
    #[test]
    fn slot_hex_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let slot = CoinSlot::new(bytes);
        let text = slot.to_hex();
        prop_assert_eq!(text.len(), 64);
        prop_assert_eq!(CoinSlot::from_hex(&text).unwrap(), slot);
    }

    /// Slot ordering agrees with numeric ordering of small values.
    #[test]
    fn slot_ordering_matches_u64(a in any::<u64>(), b in any::<u64>()) {
        prop_assert_eq!(CoinSlot::from_u64(a) < CoinSlot::from_u64(b), a < b);
    }

    /// parent() is integer division by two.
    #[test]
    fn slot_parent_halves(v in any::<u64>()) {
        prop_assert_eq!(CoinSlot::from_u64(v).parent(), CoinSlot::from_u64(v / 2));
    }

    /// bit(i) agrees with the u64 bit for the low 64 bits.
    #[test]
    fn slot_bits_match_u64(v in any::<u64>(), i in 0usize..64) {
        prop_assert_eq!(CoinSlot::from_u64(v).bit(i), (v >> i) & 1 == 1);
    }

    /// masked(d) keeps exactly the low d bits.
    #[test]
    fn slot_mask_matches_u64(v in any::<u64>(), d in 0usize..64) {
        prop_assert_eq!(
            CoinSlot::from_u64(v).masked(d),
            CoinSlot::from_u64(v & ((1u64 << d) - 1))
        );
    }

    /// Timestamp::has_expired matches the arithmetic definition.
    #[test]
    fn timestamp_expiry(start in 0u64..1_000_000, window in 0u64..1000, now in 0u64..2_000_000) {
        let t = Timestamp::new(start);
        prop_assert_eq!(t.has_expired(window, Timestamp::new(now)), now > start + window);
        prop_assert_eq!(t.remaining(window, Timestamp::new(now)) == 0, now > start + window);
    }
}
