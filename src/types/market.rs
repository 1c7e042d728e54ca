use serde::{Deserialize, Serialize};

/// A single daily close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    pub timestamp_ms: i64,
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp_ms: i64, price: f64) -> Self {
        Self { timestamp_ms, price }
    }
}

/// How much of a snapshot is backed by real data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataQuality {
    /// Price and enough history for RSI.
    Complete,
    /// Price is live but history is shorter than the RSI window, so RSI is the neutral 50.
    InsufficientHistory,
    /// Upstream price data was unavailable; every field is a sentinel.
    Unavailable,
}

/// Point-in-time market view used by the bias classifier and the oracle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    pub price: f64,
    /// Signed 24h change in percent.
    pub change_24h: f64,
    pub rsi: f64,
    pub weekly_open: f64,
    pub weekly_close: f64,
    pub quality: DataQuality,
}

impl MarketSnapshot {
    /// Sentinel snapshot for when the price feed is down.
    pub fn unavailable() -> Self {
        Self {
            price: 0.0,
            change_24h: 0.0,
            rsi: 50.0,
            weekly_open: 0.0,
            weekly_close: 0.0,
            quality: DataQuality::Unavailable,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.quality != DataQuality::Complete
    }
}

/// Moving averages for the `ma` readout. Zero means not enough history.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovingAverageSet {
    pub ma50: f64,
    pub ma100: f64,
    pub ma200: f64,
    pub ma200w: f64,
    /// 52-week sampled average, shown when the 200-week window is out of reach.
    pub ma52w: f64,
    pub current_price: f64,
}

impl MovingAverageSet {
    /// Signed distance of the current price from `ma`, in percent.
    /// `None` when the average is the insufficient-history sentinel.
    pub fn distance_pct(&self, ma: f64) -> Option<f64> {
        if ma <= 0.0 || self.current_price <= 0.0 {
            return None;
        }
        Some((self.current_price - ma) / ma * 100.0)
    }

    /// Labelled averages in display order.
    pub fn labelled(&self) -> [(&'static str, f64); 4] {
        [
            ("50D", self.ma50),
            ("100D", self.ma100),
            ("200D", self.ma200),
            ("200W", self.ma200w),
        ]
    }
}

/// RSI reading band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RsiZone {
    Overbought,
    Neutral,
    Oversold,
}

impl RsiZone {
    pub fn from_rsi(rsi: f64) -> Self {
        if rsi > 70.0 {
            RsiZone::Overbought
        } else if rsi < 30.0 {
            RsiZone::Oversold
        } else {
            RsiZone::Neutral
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RsiZone::Overbought => "OVERBOUGHT",
            RsiZone::Neutral => "NEUTRAL",
            RsiZone::Oversold => "OVERSOLD",
        }
    }
}
