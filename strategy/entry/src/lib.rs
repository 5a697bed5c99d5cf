//! Leveraged entry strategy crate.
//!
//! Opens a futures position sized from a fixed share of the account balance
//! and protects it with a position-closing stop.

pub mod config;
mod entry;
pub mod sizing;
mod types;

pub use config::EntryStrategyConfig;
pub use entry::EntryStrategy;
pub use sizing::{PositionSizing, SizingError};
pub use types::EntryReport;
