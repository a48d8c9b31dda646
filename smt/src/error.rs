use plasma_types::CoinSlot;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SmtError {
    #[error("tree depth must be in 1..=256, got {0}")]
    InvalidDepth(usize),

    #[error("two leaves map to the same position {0}")]
    DuplicateLeaf(CoinSlot),

    #[error("malformed proof: {0}")]
    MalformedProof(String),
}
