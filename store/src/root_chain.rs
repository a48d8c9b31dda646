//! The root-chain collaborator surface.

use crate::{
    BalanceStore, ChildBlock, ChildBlockStore, Coin, CoinStore, ExitRecord, ExitStore, StoreError,
};
use plasma_types::{BlockKind, BlockRoot, CoinSlot, Timestamp};

/// Everything the exit game needs from the root chain.
///
/// Implementors expose the four stores; the query surface is provided on
/// top of them. Absent records are reported as `None` rather than as
/// [`StoreError::NotFound`].
pub trait RootChain {
    type Coins: CoinStore;
    type Blocks: ChildBlockStore;
    type Exits: ExitStore;
    type Balances: BalanceStore;

    fn coin_store(&self) -> &Self::Coins;
    fn block_store(&self) -> &Self::Blocks;
    fn exit_store(&self) -> &Self::Exits;
    fn balance_store(&self) -> &Self::Balances;

    /// Commit an operator-submitted root at `height`.
    fn submit_block_root(
        &self,
        height: u64,
        root: BlockRoot,
        now: Timestamp,
    ) -> Result<(), StoreError> {
        self.block_store().put_block(&ChildBlock {
            height,
            root,
            kind: BlockKind::Submitted,
            created_at: now,
        })
    }

    fn query_exit(&self, slot: &CoinSlot) -> Result<Option<ExitRecord>, StoreError> {
        optional(self.exit_store().get_exit(slot))
    }

    fn query_block_root(&self, height: u64) -> Result<Option<BlockRoot>, StoreError> {
        Ok(optional(self.block_store().get_block(height))?.map(|b| b.root))
    }

    fn query_coin(&self, slot: &CoinSlot) -> Result<Option<Coin>, StoreError> {
        optional(self.coin_store().get_coin(slot))
    }

    fn summary(&self) -> Result<RootChainSummary, StoreError> {
        Ok(RootChainSummary {
            coins: self.coin_store().coin_count()?,
            blocks: self.block_store().block_count()?,
            exits: self.exit_store().exit_count()?,
            latest_height: self.block_store().latest_height()?,
        })
    }
}

/// Summary statistics for the root chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RootChainSummary {
    pub coins: u64,
    pub blocks: u64,
    pub exits: u64,
    pub latest_height: u64,
}

fn optional<T>(result: Result<T, StoreError>) -> Result<Option<T>, StoreError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(StoreError::NotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}
