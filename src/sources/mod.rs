//! Market data sources.
//!
//! Every network call lives here. The rest of the crate sees already-parsed numbers through
//! [`MarketFeed`], and the `load_*` helpers turn feed failures into the degraded defaults the
//! core expects.

pub mod bybit;
pub mod coingecko;
pub mod fear_greed;

pub use bybit::BybitClient;
pub use coingecko::CoinGeckoClient;
pub use fear_greed::FearGreedClient;

use chrono::Utc;
use reqwest::Client;
use std::time::Duration;
use tracing::warn;

use crate::config::Config;
use crate::error::Result;
use crate::services::{compute_moving_averages, compute_snapshot, normalize_sentiment};
use crate::types::{FuturesData, MarketSnapshot, MovingAverageSet, PricePoint, SentimentResult};

/// Spot price with its signed 24h change in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceQuote {
    pub price: f64,
    pub change_24h: f64,
}

/// Raw Fear & Greed index reading.
#[derive(Debug, Clone, PartialEq)]
pub struct FearGreedReading {
    pub score: u8,
    pub classification: String,
}

/// Provider of raw market inputs.
#[allow(async_fn_in_trait)]
pub trait MarketFeed {
    /// Current BTC price and 24h change.
    async fn price_quote(&self) -> Result<PriceQuote>;

    /// Ascending daily closes covering the last `days` days.
    async fn daily_history(&self, days: u32) -> Result<Vec<PricePoint>>;

    /// Latest Fear & Greed reading.
    async fn fear_greed(&self) -> Result<FearGreedReading>;

    /// Perpetual futures stats.
    async fn futures(&self) -> Result<FuturesData>;
}

/// Fetch price and history concurrently and build a snapshot.
pub async fn load_snapshot<F: MarketFeed>(feed: &F, history_days: u32) -> Result<MarketSnapshot> {
    let (quote, history) = tokio::join!(feed.price_quote(), feed.daily_history(history_days));
    let quote = quote?;
    let history = history?;
    Ok(compute_snapshot(quote.price, quote.change_24h, &history, Utc::now()))
}

/// Like [`load_snapshot`] but collapses any failure to the unavailable sentinel.
pub async fn load_snapshot_or_sentinel<F: MarketFeed>(feed: &F, history_days: u32) -> MarketSnapshot {
    match load_snapshot(feed, history_days).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!("Price data unavailable, using sentinel snapshot: {}", e);
            MarketSnapshot::unavailable()
        }
    }
}

/// Normalized sentiment, or the fallback reading when the feed fails.
pub async fn load_sentiment<F: MarketFeed>(feed: &F) -> SentimentResult {
    match feed.fear_greed().await {
        Ok(reading) => normalize_sentiment(reading.score, &reading.classification),
        Err(e) => {
            warn!("Sentiment data unavailable: {}", e);
            SentimentResult::unavailable()
        }
    }
}

/// Moving averages over `history_days` of daily closes.
pub async fn load_moving_averages<F: MarketFeed>(
    feed: &F,
    history_days: u32,
) -> Result<MovingAverageSet> {
    let history = feed.daily_history(history_days).await?;
    Ok(compute_moving_averages(&history))
}

/// Live HTTP-backed feed.
#[derive(Clone)]
pub struct LiveFeed {
    coingecko: CoinGeckoClient,
    fear_greed: FearGreedClient,
    bybit: BybitClient,
}

impl LiveFeed {
    /// Build all clients over one shared HTTP client.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent("btc-oracle/0.1 (terminal)")
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;

        Ok(Self {
            coingecko: CoinGeckoClient::new(client.clone(), config.coingecko_api_key.clone()),
            fear_greed: FearGreedClient::new(client.clone()),
            bybit: BybitClient::new(client),
        })
    }
}

impl MarketFeed for LiveFeed {
    async fn price_quote(&self) -> Result<PriceQuote> {
        self.coingecko.fetch_price().await
    }

    async fn daily_history(&self, days: u32) -> Result<Vec<PricePoint>> {
        self.coingecko.fetch_daily_history(days).await
    }

    async fn fear_greed(&self) -> Result<FearGreedReading> {
        self.fear_greed.fetch_latest().await
    }

    async fn futures(&self) -> Result<FuturesData> {
        self.bybit.fetch_futures().await
    }
}
