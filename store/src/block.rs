//! Child-block root storage trait.

use crate::StoreError;
use plasma_types::{BlockKind, BlockRoot, Timestamp};
use serde::{Deserialize, Serialize};

/// A committed child-chain block root.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildBlock {
    pub height: u64,
    pub root: BlockRoot,
    pub kind: BlockKind,
    pub created_at: Timestamp,
}

/// Trait for child-block storage. Heights are write-once.
pub trait ChildBlockStore {
    /// Store a block; fails with [`StoreError::Duplicate`] if the height is taken.
    fn put_block(&self, block: &ChildBlock) -> Result<(), StoreError>;

    fn get_block(&self, height: u64) -> Result<ChildBlock, StoreError>;

    fn block_exists(&self, height: u64) -> Result<bool, StoreError>;

    /// Highest committed height, or 0 when nothing has been committed.
    fn latest_height(&self) -> Result<u64, StoreError>;

    fn block_count(&self) -> Result<u64, StoreError>;
}
