//! Technical indicator implementations.

pub mod rsi;
pub mod sma;

pub use rsi::{calculate_rsi, NEUTRAL_RSI, RSI_PERIOD};
pub use sma::{calc_simple_ma, calc_weekly_ma, WEEK_STEP};
