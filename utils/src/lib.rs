//! Shared utilities for the plasma commit chain.

pub mod logging;
pub mod stats;
pub mod time;

pub use logging::{init_logging, LogFormat, TryInitError};
pub use stats::StatsCounter;
pub use time::format_duration;
