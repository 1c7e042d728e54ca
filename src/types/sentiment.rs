use serde::{Deserialize, Serialize};
use std::fmt;

/// Fear & Greed band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SentimentStatus {
    ExtremeGreed,
    Greed,
    Neutral,
    Fear,
    ExtremeFear,
}

impl SentimentStatus {
    /// Wire form, e.g. `EXTREME_GREED`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentStatus::ExtremeGreed => "EXTREME_GREED",
            SentimentStatus::Greed => "GREED",
            SentimentStatus::Neutral => "NEUTRAL",
            SentimentStatus::Fear => "FEAR",
            SentimentStatus::ExtremeFear => "EXTREME_FEAR",
        }
    }

    /// Human form, e.g. `EXTREME GREED`.
    pub fn display_name(&self) -> &'static str {
        match self {
            SentimentStatus::ExtremeGreed => "EXTREME GREED",
            SentimentStatus::Greed => "GREED",
            SentimentStatus::Neutral => "NEUTRAL",
            SentimentStatus::Fear => "FEAR",
            SentimentStatus::ExtremeFear => "EXTREME FEAR",
        }
    }
}

impl fmt::Display for SentimentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized Fear & Greed reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentResult {
    pub score: u8,
    pub status: SentimentStatus,
    pub label: String,
    /// Set when this is the fallback value rather than a live reading.
    pub degraded: bool,
}

impl SentimentResult {
    /// Fallback used when the sentiment feed cannot be reached.
    pub fn unavailable() -> Self {
        Self {
            score: 50,
            status: SentimentStatus::Neutral,
            label: "SENTIMENT DATA UNAVAILABLE.".to_string(),
            degraded: true,
        }
    }
}

/// Outcome of the offline keyword classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextClassification {
    Bullish,
    Bearish,
    Neutral,
}

impl TextClassification {
    pub fn summary(&self) -> &'static str {
        match self {
            TextClassification::Bullish => {
                "CLASSIFICATION: BULLISH. DETECTED OPTIMISM VIA KEYWORD SCANNING."
            }
            TextClassification::Bearish => {
                "CLASSIFICATION: BEARISH. DETECTED FEAR VIA KEYWORD SCANNING."
            }
            TextClassification::Neutral => {
                "CLASSIFICATION: NEUTRAL / NOISE. NO CLEAR BIAS DETECTED."
            }
        }
    }
}
