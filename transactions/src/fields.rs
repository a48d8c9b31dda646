//! Field names and typed field extraction for transaction records.

use plasma_codec::Value;
use plasma_types::{AccountId, CoinSlot, PublicKey, TxHash};

use crate::TransactionError;

pub const HASH: &str = "hash";
pub const SLOT: &str = "slot";
pub const OWNER: &str = "owner";
pub const TO_SLOT: &str = "toSlot";
pub const BALANCE: &str = "balance";
pub const SIG_HASH: &str = "sigHash";
pub const PREV_BLOCK: &str = "prevBlock";
pub const OWNER_PUB_KEY: &str = "ownerPubKey";

const KNOWN: [&str; 8] = [HASH, SLOT, OWNER, TO_SLOT, BALANCE, SIG_HASH, PREV_BLOCK, OWNER_PUB_KEY];

/// A decoded record map with typed accessors.
pub(crate) struct Record<'a> {
    entries: &'a [(String, Value)],
}

impl<'a> Record<'a> {
    pub fn new(value: &'a Value) -> Result<Self, TransactionError> {
        let entries = value
            .as_map()
            .ok_or(TransactionError::NotAMap(value.type_name()))?;
        if let Some((k, _)) = entries.iter().find(|(k, _)| !KNOWN.contains(&k.as_str())) {
            return Err(TransactionError::UnexpectedField(k.clone()));
        }
        Ok(Self { entries })
    }

    pub fn has(&self, field: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == field)
    }

    fn get(&self, field: &'static str) -> Result<&'a Value, TransactionError> {
        self.entries
            .iter()
            .find(|(k, _)| k == field)
            .map(|(_, v)| v)
            .ok_or(TransactionError::MissingField(field))
    }

    fn text(&self, field: &'static str) -> Result<&'a str, TransactionError> {
        let v = self.get(field)?;
        v.as_text().ok_or_else(|| invalid(field, format!("expected text, got {}", v.type_name())))
    }

    pub fn uint(&self, field: &'static str) -> Result<u64, TransactionError> {
        let v = self.get(field)?;
        v.as_u64()
            .ok_or_else(|| invalid(field, format!("expected unsigned integer, got {:?}", v)))
    }

    pub fn slot(&self, field: &'static str) -> Result<CoinSlot, TransactionError> {
        CoinSlot::from_hex(self.text(field)?).map_err(|e| invalid(field, e.to_string()))
    }

    pub fn owner(&self) -> Result<AccountId, TransactionError> {
        AccountId::new(self.text(OWNER)?).map_err(|e| invalid(OWNER, e.to_string()))
    }

    pub fn pub_key(&self) -> Result<PublicKey, TransactionError> {
        PublicKey::from_hex(self.text(OWNER_PUB_KEY)?)
            .map_err(|e| invalid(OWNER_PUB_KEY, e.to_string()))
    }

    pub fn hash(&self, field: &'static str) -> Result<TxHash, TransactionError> {
        let v = self.get(field)?;
        let bytes = v
            .as_bytes()
            .ok_or_else(|| invalid(field, format!("expected bytes, got {}", v.type_name())))?;
        TxHash::from_slice(bytes).map_err(|e| invalid(field, e.to_string()))
    }
}

fn invalid(field: &'static str, reason: String) -> TransactionError {
    TransactionError::InvalidField { field, reason }
}
