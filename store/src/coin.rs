//! Coin storage trait.

use crate::StoreError;
use plasma_types::{AccountId, CoinSlot, PublicKey, Timestamp};
use serde::{Deserialize, Serialize};

/// A coin held by the root chain, identified by its slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub slot: CoinSlot,
    /// Face value fixed at deposit, or once by liquidity provision.
    pub denomination: u64,
    /// Balance carried by the last finalized exit (initially the deposit).
    pub balance: u64,
    pub owner: AccountId,
    /// Key registered at deposit; empty coins have none.
    pub owner_pub_key: Option<PublicKey>,
    pub created_at: Timestamp,
}

impl Coin {
    pub fn is_empty(&self) -> bool {
        self.denomination == 0
    }
}

pub trait CoinStore {
    fn get_coin(&self, slot: &CoinSlot) -> Result<Coin, StoreError>;
    fn put_coin(&self, coin: &Coin) -> Result<(), StoreError>;
    fn delete_coin(&self, slot: &CoinSlot) -> Result<(), StoreError>;
    fn coin_exists(&self, slot: &CoinSlot) -> Result<bool, StoreError>;
    fn coin_count(&self) -> Result<u64, StoreError>;

    /// Every coin owned by `owner`.
    fn coins_of(&self, owner: &AccountId) -> Result<Vec<Coin>, StoreError>;
}
