//! Fundamental types for the plasma commit chain.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! coin slots, account identifiers, hashes, keys and signatures, timestamps,
//! protocol parameters, and the exit state enum.

pub mod account;
pub mod block;
pub mod error;
pub mod hash;
pub mod keys;
pub mod params;
pub mod slot;
pub mod state;
pub mod time;

pub use account::AccountId;
pub use block::{BlockKind, BlockRoot};
pub use error::PlasmaError;
pub use hash::TxHash;
pub use keys::{KeyPair, PrivateKey, PublicKey, RecoverableSignature};
pub use params::ProtocolParams;
pub use slot::CoinSlot;
pub use state::ExitState;
pub use time::Timestamp;
