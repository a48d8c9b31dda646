//! Byte encoding for stored records.
//!
//! Backends persist records as opaque bincode bytes; these helpers map
//! codec failures onto [`StoreError::Serialization`].

use crate::StoreError;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub fn to_bytes<T: Serialize>(record: &T) -> Result<Vec<u8>, StoreError> {
    bincode::serialize(record).map_err(|e| StoreError::Serialization(e.to_string()))
}

pub fn from_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, StoreError> {
    bincode::deserialize(bytes).map_err(|e| StoreError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChildBlock, Coin};
    use plasma_types::{AccountId, BlockKind, BlockRoot, CoinSlot, Timestamp};

    #[test]
    fn coin_roundtrip() {
        let coin = Coin {
            slot: CoinSlot::from_u64(42),
            denomination: 50_000,
            balance: 50_000,
            owner: AccountId::new("alice").unwrap(),
            owner_pub_key: Some(plasma_crypto::keypair_from_seed(&[1; 32]).public),
            created_at: Timestamp::new(10),
        };
        let bytes = to_bytes(&coin).unwrap();
        assert_eq!(from_bytes::<Coin>(&bytes).unwrap(), coin);
    }

    #[test]
    fn truncated_bytes_are_a_serialization_error() {
        let block = ChildBlock {
            height: 1000,
            root: BlockRoot::new([7; 32]),
            kind: BlockKind::Submitted,
            created_at: Timestamp::new(1),
        };
        let bytes = to_bytes(&block).unwrap();
        let err = from_bytes::<ChildBlock>(&bytes[..bytes.len() - 1]).unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }
}
