//! Exit record storage trait.

use crate::StoreError;
use plasma_types::{AccountId, CoinSlot, ExitState, PublicKey, Timestamp};
use serde::{Deserialize, Serialize};

/// A claim to withdraw a coin, keyed by slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitRecord {
    pub slot: CoinSlot,
    pub exitor: AccountId,
    /// Key of the exiting transaction's owner; later spends must be signed by it.
    pub owner_pub_key: PublicKey,
    pub amount: u64,
    /// Block of the parent transaction; `None` for deposit exits.
    pub parent_block: Option<u64>,
    pub exiting_block: u64,
    pub created_at: Timestamp,
    pub state: ExitState,
}

pub trait ExitStore {
    fn get_exit(&self, slot: &CoinSlot) -> Result<ExitRecord, StoreError>;

    /// Insert or replace the record for `record.slot`.
    fn put_exit(&self, record: &ExitRecord) -> Result<(), StoreError>;

    fn delete_exit(&self, slot: &CoinSlot) -> Result<(), StoreError>;

    fn exit_count(&self) -> Result<u64, StoreError>;

    fn iter_exits(&self) -> Result<Vec<ExitRecord>, StoreError>;

    /// Count records in a given state without keeping them.
    fn exits_in_state(&self, state: ExitState) -> Result<u64, StoreError> {
        Ok(self
            .iter_exits()?
            .iter()
            .filter(|r| r.state == state)
            .count() as u64)
    }
}
