use serde::{Deserialize, Serialize};
use std::fmt;

use super::SentimentStatus;

/// Weekly directional lean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Bias {
    Bullish,
    Bearish,
}

impl fmt::Display for Bias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bias::Bullish => f.write_str("BULLISH"),
            Bias::Bearish => f.write_str("BEARISH"),
        }
    }
}

/// Final call of the oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Long,
    Short,
    NoTrade,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Long => f.write_str("LONG"),
            Verdict::Short => f.write_str("SHORT"),
            Verdict::NoTrade => f.write_str("NO TRADE"),
        }
    }
}

/// Output of the `play` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecommendation {
    pub bias: Bias,
    pub sentiment: SentimentStatus,
    pub rsi: f64,
    pub verdict: Verdict,
    /// Percent, 0-100.
    pub confidence: u8,
    pub reasoning: String,
    /// True when price or sentiment input was a fallback value.
    pub degraded: bool,
}
