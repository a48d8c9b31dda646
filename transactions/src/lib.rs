//! Child-chain transaction model.
//!
//! Two record kinds exist:
//! - **Deposit**: creates a coin; its hash covers only the slot, so the root
//!   chain can rebuild the deposit block without the deposit payload
//! - **Transfer**: moves a coin to a new owner; its hash covers the whole record
//!
//! Records are encoded as canonical CBOR maps. Once hashed, the hash is
//! embedded under both `hash` and `sigHash` to form the with-hash encoding
//! that is submitted to the root chain and signed.

pub mod deposit;
pub mod error;
pub mod fields;
pub mod hashed;
pub mod transfer;

use plasma_codec::Value;
use plasma_types::{AccountId, CoinSlot, PublicKey, TxHash};
use serde::{Deserialize, Serialize};

pub use deposit::DepositTx;
pub use error::TransactionError;
pub use hashed::HashedTx;
pub use transfer::TransferTx;

use fields::Record;

/// A child-chain transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChildChainTx {
    Deposit(DepositTx),
    Transfer(TransferTx),
}

/// Build a deposit record.
pub fn new_deposit(
    owner: AccountId,
    owner_pub_key: PublicKey,
    slot: CoinSlot,
    balance: u64,
    prev_block: u64,
) -> ChildChainTx {
    ChildChainTx::Deposit(DepositTx {
        owner,
        owner_pub_key,
        slot,
        balance,
        prev_block,
    })
}

/// Build a transfer record.
pub fn new_transfer(
    owner: AccountId,
    owner_pub_key: PublicKey,
    from_slot: CoinSlot,
    to_slot: CoinSlot,
    balance: u64,
    prev_block: u64,
) -> ChildChainTx {
    ChildChainTx::Transfer(TransferTx {
        owner,
        owner_pub_key,
        slot: from_slot,
        to_slot,
        balance,
        prev_block,
    })
}

/// Hash of a deposit into `slot`: `sha256(cbor_text(slot_hex))`.
///
/// Owner and balance do not contribute. Two deposits into the same slot
/// therefore share a hash; slots are never reused, so the root chain can
/// recompute a deposit block from the slot alone.
pub fn deposit_hash(slot: &CoinSlot) -> TxHash {
    TxHash::new(plasma_crypto::sha256(&plasma_codec::encode_text(
        &slot.to_hex(),
    )))
}

/// Hash of an encoded transfer: `sha256(tx_bytes)`.
pub fn common_hash(tx_bytes: &[u8]) -> TxHash {
    TxHash::new(plasma_crypto::sha256(tx_bytes))
}

/// Attach `hash`/`sigHash` to a record.
pub fn with_hash(tx: ChildChainTx) -> Result<HashedTx, TransactionError> {
    HashedTx::new(tx)
}

impl ChildChainTx {
    pub fn slot(&self) -> &CoinSlot {
        match self {
            Self::Deposit(tx) => &tx.slot,
            Self::Transfer(tx) => &tx.slot,
        }
    }

    pub fn owner(&self) -> &AccountId {
        match self {
            Self::Deposit(tx) => &tx.owner,
            Self::Transfer(tx) => &tx.owner,
        }
    }

    pub fn owner_pub_key(&self) -> &PublicKey {
        match self {
            Self::Deposit(tx) => &tx.owner_pub_key,
            Self::Transfer(tx) => &tx.owner_pub_key,
        }
    }

    pub fn balance(&self) -> u64 {
        match self {
            Self::Deposit(tx) => tx.balance,
            Self::Transfer(tx) => tx.balance,
        }
    }

    pub fn prev_block(&self) -> u64 {
        match self {
            Self::Deposit(tx) => tx.prev_block,
            Self::Transfer(tx) => tx.prev_block,
        }
    }

    pub fn is_deposit(&self) -> bool {
        matches!(self, Self::Deposit(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Deposit(_) => "deposit",
            Self::Transfer(_) => "transfer",
        }
    }

    pub(crate) fn entries(&self) -> Vec<(String, Value)> {
        match self {
            Self::Deposit(tx) => tx.entries(),
            Self::Transfer(tx) => tx.entries(),
        }
    }

    /// Canonical encoding without hash fields.
    pub fn encode(&self) -> Result<Vec<u8>, TransactionError> {
        Ok(plasma_codec::encode_canonical(&Value::Map(self.entries()))?)
    }

    /// Transaction hash according to the variant's rule.
    pub fn hash(&self) -> Result<TxHash, TransactionError> {
        match self {
            Self::Deposit(tx) => Ok(deposit_hash(&tx.slot)),
            Self::Transfer(_) => Ok(common_hash(&self.encode()?)),
        }
    }

    /// Decode the encoding produced by [`ChildChainTx::encode`].
    pub fn decode(bytes: &[u8]) -> Result<Self, TransactionError> {
        let value = plasma_codec::decode(bytes)?;
        let record = Record::new(&value)?;
        for field in [fields::HASH, fields::SIG_HASH] {
            if record.has(field) {
                return Err(TransactionError::UnexpectedField(field.to_string()));
            }
        }
        let tx = Self::from_record(&record)?;
        if tx.encode()? != bytes {
            return Err(TransactionError::NonCanonical);
        }
        Ok(tx)
    }

    pub(crate) fn from_record(record: &Record<'_>) -> Result<Self, TransactionError> {
        let owner = record.owner()?;
        let owner_pub_key = record.pub_key()?;
        let slot = record.slot(fields::SLOT)?;
        let balance = record.uint(fields::BALANCE)?;
        let prev_block = record.uint(fields::PREV_BLOCK)?;
        if record.has(fields::TO_SLOT) {
            let to_slot = record.slot(fields::TO_SLOT)?;
            Ok(new_transfer(owner, owner_pub_key, slot, to_slot, balance, prev_block))
        } else {
            Ok(new_deposit(owner, owner_pub_key, slot, balance, prev_block))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plasma_crypto::keypair_from_seed;

    fn owner(name: &str) -> AccountId {
        AccountId::new(name).unwrap()
    }

    fn key(seed: u8) -> PublicKey {
        keypair_from_seed(&[seed; 32]).public
    }

    #[test]
    fn deposit_hash_depends_only_on_slot() {
        let slot = CoinSlot::from_u64(0xabc);
        let a = new_deposit(owner("alice"), key(1), slot, 50_000, 0);
        let b = new_deposit(owner("bob"), key(2), slot, 1, 7);
        assert_eq!(a.hash().unwrap(), b.hash().unwrap());
        assert_eq!(a.hash().unwrap(), deposit_hash(&slot));

        let c = new_deposit(owner("alice"), key(1), CoinSlot::from_u64(0xabd), 50_000, 0);
        assert_ne!(a.hash().unwrap(), c.hash().unwrap());
    }

    #[test]
    fn deposit_hash_is_sha256_of_cbor_slot_text() {
        let slot = CoinSlot::from_u64(1);
        let mut cbor = vec![0x78, 64];
        cbor.extend_from_slice(slot.to_hex().as_bytes());
        assert_eq!(deposit_hash(&slot).as_bytes(), &plasma_crypto::sha256(&cbor));
    }

    #[test]
    fn transfer_hash_covers_every_field() {
        let base = new_transfer(owner("bob"), key(2), 5u64.into(), 6u64.into(), 100, 1000);
        let variants = [
            new_transfer(owner("carol"), key(2), 5u64.into(), 6u64.into(), 100, 1000),
            new_transfer(owner("bob"), key(3), 5u64.into(), 6u64.into(), 100, 1000),
            new_transfer(owner("bob"), key(2), 5u64.into(), 7u64.into(), 100, 1000),
            new_transfer(owner("bob"), key(2), 5u64.into(), 6u64.into(), 99, 1000),
            new_transfer(owner("bob"), key(2), 5u64.into(), 6u64.into(), 100, 1001),
        ];
        for v in variants {
            assert_ne!(v.hash().unwrap(), base.hash().unwrap());
        }
        assert_eq!(base.hash().unwrap(), common_hash(&base.encode().unwrap()));
    }

    #[test]
    fn encoding_uses_canonical_key_order() {
        let tx = new_transfer(owner("bob"), key(2), 5u64.into(), 6u64.into(), 100, 1000);
        let value = plasma_codec::decode(&tx.encode().unwrap()).unwrap();
        let keys: Vec<_> = value.as_map().unwrap().iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(keys, ["slot", "owner", "toSlot", "balance", "prevBlock", "ownerPubKey"]);
    }

    #[test]
    fn plain_decode_roundtrip() {
        let tx = new_deposit(owner("alice"), key(1), 9u64.into(), 50_000, 0);
        let bytes = tx.encode().unwrap();
        assert_eq!(ChildChainTx::decode(&bytes).unwrap(), tx);
    }

    #[test]
    fn plain_decode_rejects_hash_fields() {
        let hashed = with_hash(new_deposit(owner("alice"), key(1), 9u64.into(), 1, 0)).unwrap();
        assert_eq!(
            ChildChainTx::decode(&hashed.encode().unwrap()).unwrap_err(),
            TransactionError::UnexpectedField("hash".into())
        );
    }

    #[test]
    fn plain_decode_rejects_reordered_keys() {
        let tx = new_deposit(owner("alice"), key(1), 9u64.into(), 1, 0);
        let mut entries = tx.entries();
        entries.reverse();
        let bytes = plasma_codec::encode(&Value::Map(entries)).unwrap();
        assert_eq!(ChildChainTx::decode(&bytes).unwrap_err(), TransactionError::NonCanonical);
    }

    #[test]
    fn plain_decode_rejects_short_slot_text() {
        let tx = new_deposit(owner("alice"), key(1), 9u64.into(), 1, 0);
        let mut entries = tx.entries();
        entries[0].1 = Value::text("9");
        let bytes = plasma_codec::encode(&Value::Map(entries)).unwrap();
        assert_eq!(ChildChainTx::decode(&bytes).unwrap_err(), TransactionError::NonCanonical);
    }

    #[test]
    fn accessors_follow_variant() {
        let d = new_deposit(owner("alice"), key(1), 9u64.into(), 5, 0);
        let t = new_transfer(owner("bob"), key(2), 9u64.into(), 10u64.into(), 4, 1);
        assert!(d.is_deposit());
        assert!(!t.is_deposit());
        assert_eq!(t.owner().as_str(), "bob");
        assert_eq!(t.balance(), 4);
        assert_eq!(t.prev_block(), 1);
        assert_eq!(d.slot(), &CoinSlot::from_u64(9));
        assert_eq!(t.kind(), "transfer");
    }
}
