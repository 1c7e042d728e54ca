pub mod bias;
pub mod oracle;
pub mod risk;
pub mod sentiment;
pub mod signals;

pub use bias::classify_bias;
pub use oracle::recommend;
pub use risk::{position_size, risk_reward, MIN_RISK_REWARD};
pub use sentiment::{classify_text, normalize_sentiment};
pub use signals::indicators::{calc_simple_ma, calc_weekly_ma, calculate_rsi};
pub use signals::{compute_moving_averages, compute_snapshot, week_open_timestamp};
