//! Events emitted by the exit game for callers to process.

use plasma_types::{AccountId, BlockRoot, CoinSlot};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum ExitEvent {
    /// A deposit created a coin and its deposit block.
    CoinDeposited {
        slot: CoinSlot,
        owner: AccountId,
        amount: u64,
        block: u64,
    },
    EmptyCoinCreated { slot: CoinSlot, owner: AccountId },
    LiquidityProvided { slot: CoinSlot, amount: u64 },
    BlockSubmitted { height: u64, root: BlockRoot },
    ExitStarted {
        slot: CoinSlot,
        exitor: AccountId,
        amount: u64,
        exiting_block: u64,
    },
    ExitChallenged {
        slot: CoinSlot,
        challenger: AccountId,
        block: u64,
    },
    ExitFinalized {
        slot: CoinSlot,
        exitor: AccountId,
        amount: u64,
    },
    /// The exit amount was paid out and the coin removed.
    Withdrawn {
        slot: CoinSlot,
        exitor: AccountId,
        amount: u64,
    },
}

impl ExitEvent {
    /// The slot an event concerns, if any.
    pub fn slot(&self) -> Option<&CoinSlot> {
        match self {
            Self::CoinDeposited { slot, .. }
            | Self::EmptyCoinCreated { slot, .. }
            | Self::LiquidityProvided { slot, .. }
            | Self::ExitStarted { slot, .. }
            | Self::ExitChallenged { slot, .. }
            | Self::ExitFinalized { slot, .. }
            | Self::Withdrawn { slot, .. } => Some(slot),
            Self::BlockSubmitted { .. } => None,
        }
    }
}
