//! Deposit transaction: the first record of every coin.

use plasma_codec::Value;
use plasma_types::{AccountId, CoinSlot, PublicKey};
use serde::{Deserialize, Serialize};

use crate::fields;

/// A deposit of `balance` into `slot`, owned by `owner`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositTx {
    pub owner: AccountId,
    pub owner_pub_key: PublicKey,
    pub slot: CoinSlot,
    pub balance: u64,
    pub prev_block: u64,
}

impl DepositTx {
    pub(crate) fn entries(&self) -> Vec<(String, Value)> {
        vec![
            (fields::SLOT.into(), Value::text(self.slot.to_hex())),
            (fields::OWNER.into(), Value::text(self.owner.as_str())),
            (fields::BALANCE.into(), Value::uint(self.balance)),
            (fields::PREV_BLOCK.into(), Value::uint(self.prev_block)),
            (fields::OWNER_PUB_KEY.into(), Value::text(self.owner_pub_key.to_hex())),
        ]
    }
}
