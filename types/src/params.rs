//! Protocol parameters for the commit chain and its exit game.

use serde::{Deserialize, Serialize};

use crate::PlasmaError;

/// Default sparse Merkle tree depth used for every child block.
pub const DEFAULT_SMT_DEPTH: usize = 64;

/// Default challenge window in seconds.
pub const DEFAULT_CHALLENGE_WINDOW_SECS: u64 = 7;

/// Default spacing between operator-submitted child block heights.
pub const DEFAULT_CHILD_BLOCK_INTERVAL: u64 = 1000;

/// Parameters shared by the root chain and every child-chain participant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolParams {
    /// Depth of the sparse Merkle tree; leaves are addressed by the low
    /// `smt_depth` bits of a coin slot. Valid range: `1..=256`.
    #[serde(default = "default_smt_depth")]
    pub smt_depth: usize,

    /// Seconds after `start_exit` during which the exit can be challenged.
    #[serde(default = "default_challenge_window_secs")]
    pub challenge_window_secs: u64,

    /// Submitted child blocks land on multiples of this value; deposit
    /// blocks fill the heights in between.
    #[serde(default = "default_child_block_interval")]
    pub child_block_interval: u64,
}

fn default_smt_depth() -> usize {
    DEFAULT_SMT_DEPTH
}

fn default_challenge_window_secs() -> u64 {
    DEFAULT_CHALLENGE_WINDOW_SECS
}

fn default_child_block_interval() -> u64 {
    DEFAULT_CHILD_BLOCK_INTERVAL
}

impl ProtocolParams {
    pub fn validate(&self) -> Result<(), PlasmaError> {
        if self.smt_depth == 0 || self.smt_depth > 256 {
            return Err(PlasmaError::InvalidParam(format!(
                "smt_depth must be in 1..=256, got {}",
                self.smt_depth
            )));
        }
        if self.challenge_window_secs == 0 {
            return Err(PlasmaError::InvalidParam(
                "challenge_window_secs must be at least 1".into(),
            ));
        }
        if self.child_block_interval < 2 {
            return Err(PlasmaError::InvalidParam(format!(
                "child_block_interval must leave room for deposit blocks, got {}",
                self.child_block_interval
            )));
        }
        Ok(())
    }
}

impl Default for ProtocolParams {
    fn default() -> Self {
        Self {
            smt_depth: DEFAULT_SMT_DEPTH,
            challenge_window_secs: DEFAULT_CHALLENGE_WINDOW_SECS,
            child_block_interval: DEFAULT_CHILD_BLOCK_INTERVAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let p = ProtocolParams::default();
        assert_eq!(p.smt_depth, 64);
        assert_eq!(p.challenge_window_secs, 7);
        assert_eq!(p.child_block_interval, 1000);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn depth_out_of_range_is_invalid() {
        let mut p = ProtocolParams::default();
        p.smt_depth = 0;
        assert!(p.validate().is_err());
        p.smt_depth = 257;
        assert!(p.validate().is_err());
        p.smt_depth = 256;
        assert!(p.validate().is_ok());
    }

    #[test]
    fn interval_of_one_is_invalid() {
        let p = ProtocolParams {
            child_block_interval: 1,
            ..ProtocolParams::default()
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn zero_challenge_window_is_invalid() {
        let p = ProtocolParams {
            challenge_window_secs: 0,
            ..ProtocolParams::default()
        };
        assert!(p.validate().is_err());
        let p = ProtocolParams {
            challenge_window_secs: 1,
            ..ProtocolParams::default()
        };
        assert!(p.validate().is_ok());
    }
}
