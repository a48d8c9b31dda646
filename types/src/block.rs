//! Committed child-block roots.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::PlasmaError;

/// The sparse Merkle root of one child-chain block, as committed to the root chain.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockRoot([u8; 32]);

impl BlockRoot {
    pub const ZERO: Self = Self([0u8; 32]);

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    pub fn from_hex(s: &str) -> Result<Self, PlasmaError> {
        let bytes = hex::decode(s).map_err(|e| PlasmaError::InvalidHex(e.to_string()))?;
        let arr: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| PlasmaError::InvalidLength {
                expected: 32,
                got: bytes.len(),
            })?;
        Ok(Self(arr))
    }
}

impl fmt::Debug for BlockRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockRoot({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for BlockRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// How a child block entered the root chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    /// Root computed by the root chain itself when a coin was deposited.
    Deposit,
    /// Root submitted by the operator for a batch of child-chain transfers.
    Submitted,
}
