//! Abstract storage traits for the root-chain collaborator.
//!
//! The exit game never touches a backend directly. It reads and writes
//! coins, child-block roots, exit records and account balances through the
//! traits here, bundled by [`RootChain`]. An in-memory implementation lives
//! in `plasma-nullables`.

pub mod balance;
pub mod block;
pub mod coin;
pub mod error;
pub mod exit;
pub mod record;
pub mod root_chain;

pub use balance::BalanceStore;
pub use block::{ChildBlock, ChildBlockStore};
pub use coin::{Coin, CoinStore};
pub use error::StoreError;
pub use exit::{ExitRecord, ExitStore};
pub use root_chain::{RootChain, RootChainSummary};
