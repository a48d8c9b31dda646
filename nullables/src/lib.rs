//! Nullable infrastructure for deterministic testing.
//!
//! The exit game takes its time from the caller and its state from a
//! [`plasma_store::RootChain`]. This crate provides stand-ins for both that
//! never touch the filesystem or a real chain:
//! - [`NullClock`] only moves when told to
//! - [`NullStore`] keeps every record in memory and can be told to fail writes

pub mod clock;
pub mod store;

pub use clock::NullClock;
pub use store::NullStore;
