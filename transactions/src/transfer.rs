//! Transfer transaction: moves a coin to a new owner.

use plasma_codec::Value;
use plasma_types::{AccountId, CoinSlot, PublicKey};
use serde::{Deserialize, Serialize};

use crate::fields;

/// A transfer of the coin in `slot`.
///
/// `owner`/`owner_pub_key` name the recipient; the transfer must be signed
/// by the key of the previous owner. `prev_block` is the height of the block
/// holding the transaction this one spends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferTx {
    pub owner: AccountId,
    pub owner_pub_key: PublicKey,
    pub slot: CoinSlot,
    pub to_slot: CoinSlot,
    pub balance: u64,
    pub prev_block: u64,
}

impl TransferTx {
    pub(crate) fn entries(&self) -> Vec<(String, Value)> {
        vec![
            (fields::SLOT.into(), Value::text(self.slot.to_hex())),
            (fields::OWNER.into(), Value::text(self.owner.as_str())),
            (fields::TO_SLOT.into(), Value::text(self.to_slot.to_hex())),
            (fields::BALANCE.into(), Value::uint(self.balance)),
            (fields::PREV_BLOCK.into(), Value::uint(self.prev_block)),
            (fields::OWNER_PUB_KEY.into(), Value::text(self.owner_pub_key.to_hex())),
        ]
    }
}
