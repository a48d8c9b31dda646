//! Exit lifecycle state.

use serde::{Deserialize, Serialize};

/// The state of the exit record for a coin slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExitState {
    /// No exit record exists for the slot.
    #[default]
    None,
    /// Exit started; the challenge window is running.
    Exiting,
    /// A later spend was proven; the exit can never finalize.
    Challenged,
    /// Window elapsed without a challenge; the amount is payable to the exitor.
    Finalized,
}

impl ExitState {
    /// Whether this record blocks a new `start_exit` on the same slot.
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Exiting | Self::Finalized)
    }

    /// Whether the record is still inside its dispute phase.
    pub fn is_challengeable(&self) -> bool {
        matches!(self, Self::Exiting)
    }

    pub fn is_withdrawable(&self) -> bool {
        matches!(self, Self::Finalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn challenged_record_is_not_live() {
        assert!(!ExitState::Challenged.is_live());
        assert!(!ExitState::None.is_live());
        assert!(ExitState::Exiting.is_live());
        assert!(ExitState::Finalized.is_live());
    }

    #[test]
    fn only_exiting_is_challengeable() {
        assert!(ExitState::Exiting.is_challengeable());
        assert!(!ExitState::Finalized.is_challengeable());
        assert!(!ExitState::Challenged.is_challengeable());
    }
}
