//! Exit game for the plasma commit chain.
//!
//! The root chain holds coins and the roots of child-chain blocks. A coin
//! leaves the child chain through an exit: the claimant proves that the
//! coin's latest transaction (and its parent) were committed, waits out the
//! challenge window, and withdraws. Anyone holding a later committed spend
//! of the coin can cancel the exit during the window.
//!
//! [`ExitGame`] applies these operations one at a time against a
//! [`plasma_store::RootChain`], checking every precondition before the first
//! write.

pub mod claim;
pub mod config;
pub mod error;
pub mod events;
pub mod game;

pub use claim::{ExitClaim, TxInclusion};
pub use config::{ConfigError, ExitGameConfig};
pub use error::{Disposition, ErrorKind, ExitError};
pub use events::ExitEvent;
pub use game::ExitGame;
