//! Sparse Merkle tree over 256-bit coin slots.
//!
//! - Fixed depth `D` (`1..=256`); a slot addresses the leaf at its low `D` bits
//! - Interior node = `sha256(left || right)`, empty leaf = 32 zero bytes
//! - Only nodes on paths to non-empty leaves are materialized, so building
//!   costs `O(leaves * D)` hashes
//! - One verification routine serves both membership and non-membership

mod defaults;
mod error;
mod proof;
mod tree;

pub use defaults::DefaultHashes;
pub use error::SmtError;
pub use proof::{verify, MerkleProof};
pub use tree::SparseMerkleTree;

use plasma_types::TxHash;

/// Leaf value of a slot with no transaction in the block.
pub const DEFAULT_LEAF: TxHash = TxHash::ZERO;

/// Largest supported depth (one level per slot bit).
pub const MAX_DEPTH: usize = 256;

pub(crate) fn check_depth(depth: usize) -> Result<(), SmtError> {
    if depth == 0 || depth > MAX_DEPTH {
        return Err(SmtError::InvalidDepth(depth));
    }
    Ok(())
}
