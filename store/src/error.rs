use thiserror::Error;

/// Failures surfaced by the root-chain record stores.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("no record for {0}")]
    NotFound(String),

    #[error("record already exists: {0}")]
    Duplicate(String),

    /// The backend refused or failed the operation; retrying may succeed.
    #[error("store backend unavailable: {0}")]
    Backend(String),

    #[error("record encoding failed: {0}")]
    Serialization(String),

    #[error("stored record is inconsistent: {0}")]
    Corruption(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
