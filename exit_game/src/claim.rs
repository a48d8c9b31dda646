//! Inputs to `start_exit`.

use plasma_types::CoinSlot;

/// A transaction together with the evidence that it was committed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxInclusion {
    /// With-hash encoding of the transaction.
    pub tx_bytes: Vec<u8>,
    /// Compressed sparse Merkle proof for the transaction's slot.
    pub proof: Vec<u8>,
    /// Child-block height the transaction was committed at.
    pub block: u64,
}

impl TxInclusion {
    pub fn new(tx_bytes: Vec<u8>, proof: Vec<u8>, block: u64) -> Self {
        Self {
            tx_bytes,
            proof,
            block,
        }
    }
}

/// A claim to exit a coin.
///
/// Deposit exits carry no parent. Transfer exits carry the transaction the
/// transfer spends, and the signature must come from that parent's owner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExitClaim {
    pub slot: CoinSlot,
    pub parent: Option<TxInclusion>,
    pub exiting: TxInclusion,
    /// Signature over the exiting transaction's hash, in on-chain hex form.
    pub signature: String,
}

impl ExitClaim {
    pub fn deposit(slot: CoinSlot, exiting: TxInclusion, signature: String) -> Self {
        Self {
            slot,
            parent: None,
            exiting,
            signature,
        }
    }

    pub fn transfer(
        slot: CoinSlot,
        parent: TxInclusion,
        exiting: TxInclusion,
        signature: String,
    ) -> Self {
        Self {
            slot,
            parent: Some(parent),
            exiting,
            signature,
        }
    }
}
