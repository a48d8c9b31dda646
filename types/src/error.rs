//! Parsing and validation errors for the shared types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlasmaError {
    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("invalid length: expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("coin slot does not fit in 256 bits: {0} hex digits")]
    SlotOutOfRange(usize),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid account id: {0:?}")]
    InvalidAccount(String),

    #[error("invalid protocol parameter: {0}")]
    InvalidParam(String),
}
