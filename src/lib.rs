//! BTC Oracle - weekly bias, sentiment and risk tooling for a single BTC trader.

pub mod commands;
pub mod config;
pub mod error;
pub mod services;
pub mod sources;
pub mod types;

// Re-export commonly used types
pub use commands::{Command, CommandOutput, Dispatcher, LogKind, LogLine, Session};
pub use config::Config;
pub use error::{AppError, Result};
pub use sources::{LiveFeed, MarketFeed};
pub use types::*;
