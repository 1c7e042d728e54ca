//! Command dispatcher tests against an in-memory feed.

use btc_oracle::sources::{FearGreedReading, MarketFeed, PriceQuote};
use btc_oracle::{AppError, CommandOutput, Config, Dispatcher, FuturesData, LogKind, PricePoint, Result};
use chrono::Utc;

const DAY_MS: i64 = 86_400_000;

#[derive(Clone, Default)]
struct MockFeed {
    quote: Option<PriceQuote>,
    history: Vec<PricePoint>,
    fear_greed: Option<FearGreedReading>,
    futures: Option<FuturesData>,
}

fn offline() -> AppError {
    AppError::ExternalApi("offline".to_string())
}

impl MarketFeed for MockFeed {
    async fn price_quote(&self) -> Result<PriceQuote> {
        self.quote.ok_or_else(offline)
    }

    async fn daily_history(&self, days: u32) -> Result<Vec<PricePoint>> {
        if self.quote.is_none() {
            return Err(offline());
        }
        let keep = self.history.len().min(days as usize);
        Ok(self.history[self.history.len() - keep..].to_vec())
    }

    async fn fear_greed(&self) -> Result<FearGreedReading> {
        self.fear_greed.clone().ok_or_else(offline)
    }

    async fn futures(&self) -> Result<FuturesData> {
        self.futures.clone().ok_or_else(offline)
    }
}

/// Flat history at `level` ending now, `days` long.
fn flat_history(level: f64, days: i64) -> Vec<PricePoint> {
    let now = Utc::now().timestamp_millis();
    (0..days)
        .rev()
        .map(|d| PricePoint::new(now - d * DAY_MS, level))
        .collect()
}

fn live_feed(price: f64, score: u8, label: &str) -> MockFeed {
    MockFeed {
        quote: Some(PriceQuote {
            price,
            change_24h: 1.25,
        }),
        history: flat_history(100.0, 30),
        fear_greed: Some(FearGreedReading {
            score,
            classification: label.to_string(),
        }),
        futures: Some(FuturesData {
            symbol: "BTCUSDT".to_string(),
            funding_rate_pct: 0.01,
            // 2024-05-13 08:00 UTC
            next_funding_time_ms: 1_715_587_200_000,
            open_interest_usd: 3_000_000_000.0,
            long_short_ratio: 1.5,
        }),
    }
}

fn dispatcher(feed: MockFeed) -> Dispatcher<MockFeed> {
    Dispatcher::new(feed, &Config::default())
}

fn has_line(output: &CommandOutput, text: &str) -> bool {
    output.lines.iter().any(|l| l.text == text)
}

#[tokio::test]
async fn test_price_readout() {
    let mut d = dispatcher(live_feed(97_123.45, 50, "Neutral"));
    let out = d.run_line("price").await;
    assert!(has_line(&out, "FETCHING REAL-TIME BTC DATA..."));
    assert!(has_line(&out, "BTC: $97,123.45 | 24h: +1.25%"));
    assert!(!out.has_error());
}

#[tokio::test]
async fn test_rsi_readout_on_flat_history() {
    let mut d = dispatcher(live_feed(100.0, 50, "Neutral"));
    let out = d.run_line("RSI").await;
    assert!(has_line(&out, "RSI (14): 100.0 [OVERBOUGHT]"));
}

#[tokio::test]
async fn test_bias_bearish_below_weekly_open() {
    let mut d = dispatcher(live_feed(90.0, 50, "Neutral"));
    let out = d.run_line("bias").await;
    assert!(has_line(&out, "WEEKLY OPEN: $100.00 | CURRENT: $90"));
    let verdict = out.lines.last().unwrap();
    assert_eq!(verdict.text, "VERDICT: BEARISH");
    assert_eq!(verdict.kind, LogKind::Danger);
}

#[tokio::test]
async fn test_play_bearish_short() {
    let mut d = dispatcher(live_feed(90.0, 50, "Neutral"));
    let out = d.run_line("play").await;
    assert!(has_line(&out, "ORACLE REPORT :: BEARISH"));
    assert!(has_line(&out, "VERDICT: SHORT | CONFIDENCE: 80%"));
    assert!(!out.text().contains("UNAVAILABLE"));
}

#[tokio::test]
async fn test_play_overheated_bullish() {
    let mut d = dispatcher(live_feed(110.0, 90, "Extreme Greed"));
    let out = d.run_line("play").await;
    assert!(has_line(&out, "SENTIMENT: EXTREME GREED | RSI (14): 100.0"));
    // Overbought bullish is NO TRADE at 60, minus the sentiment penalty
    assert!(has_line(&out, "VERDICT: NO TRADE | CONFIDENCE: 40%"));
    assert!(out.text().contains("WARNING: SENTIMENT OVERHEATED."));
}

#[tokio::test]
async fn test_offline_feed_degrades() {
    let mut d = dispatcher(MockFeed::default());

    let out = d.run_line("play").await;
    assert!(has_line(&out, "VERDICT: LONG | CONFIDENCE: 65%"));
    assert!(has_line(
        &out,
        "NOTE: PRICE DATA UNAVAILABLE. BIAS AND RSI ARE DEFAULTS."
    ));
    assert!(has_line(
        &out,
        "NOTE: SENTIMENT DATA UNAVAILABLE. SCORE DEFAULTS TO NEUTRAL 50."
    ));
    assert!(!out.has_error());

    let out = d.run_line("sentiment").await;
    assert!(has_line(&out, "SENTIMENT DATA UNAVAILABLE."));

    let out = d.run_line("price").await;
    assert!(out.has_error());

    let out = d.run_line("bias").await;
    assert!(has_line(&out, "VERDICT: BULLISH"));
}

#[tokio::test]
async fn test_play_short_history_is_not_reported_as_outage() {
    let mut feed = live_feed(110.0, 50, "Neutral");
    feed.history = flat_history(100.0, 5);
    let mut d = dispatcher(feed);

    let out = d.run_line("play").await;
    assert!(has_line(&out, "VERDICT: LONG | CONFIDENCE: 65%"));
    assert!(has_line(
        &out,
        "NOTE: NOT ENOUGH HISTORY FOR RSI. RSI DEFAULTS TO NEUTRAL 50."
    ));
    assert!(!out.text().contains("UNAVAILABLE"));
}

#[tokio::test]
async fn test_calc_bouncer() {
    let mut d = dispatcher(MockFeed::default());

    let out = d.run_line("calc 100 90").await;
    assert!(has_line(&out, "ANALYSIS: Entry $100 | Stop $90 | Target $160"));
    assert!(has_line(&out, "R:R RATIO: 6.00:1"));
    assert!(has_line(&out, "THE BOUNCER: TRADE APPROVED."));

    let out = d.run_line("calc 100 90 120").await;
    assert!(has_line(&out, "R:R RATIO: 2.00:1"));
    assert!(has_line(
        &out,
        "THE BOUNCER: TRADE REJECTED. 6:1 MINIMUM RR NOT MET."
    ));

    let out = d.run_line("calc 1e308 -1e308").await;
    assert!(has_line(&out, "ERROR: RISK IS OUT OF RANGE"));
    assert!(!out.text().contains("NaN"));

    let out = d.run_line("calc 100 100").await;
    assert!(has_line(
        &out,
        "ERROR: ENTRY AND STOP ARE EQUAL. RISK DISTANCE IS ZERO."
    ));
}

#[tokio::test]
async fn test_settings_feed_position_size() {
    let mut d = dispatcher(MockFeed::default());
    assert_eq!(d.session().account_size, 10_000.0);

    let out = d.run_line("size 1 100 95").await;
    assert!(has_line(&out, "CALCULATING POSITION SIZE (Account: $10,000)..."));
    assert!(has_line(&out, "RISK AMOUNT: $100.00 (1.0%)"));
    assert!(has_line(&out, "POSITION SIZE: 20.0000 BTC"));
    assert!(has_line(&out, "NOTIONAL VALUE: $2000.00"));

    let out = d.run_line("settings 25000").await;
    assert!(has_line(&out, "SETTINGS UPDATED: ACCOUNT SIZE = $25,000"));
    assert_eq!(d.session().account_size, 25_000.0);

    let out = d.run_line("size 2% 100 95").await;
    assert!(has_line(&out, "RISK AMOUNT: $500.00 (2.0%)"));

    let out = d.run_line("settings").await;
    assert!(has_line(&out, "ACCOUNT SIZE: $25,000"));

    let out = d.run_line("settings zero").await;
    assert!(has_line(&out, "ERROR: INVALID AMOUNT."));
    assert_eq!(d.session().account_size, 25_000.0);
}

#[tokio::test]
async fn test_futures_readouts() {
    let mut d = dispatcher(live_feed(100.0, 50, "Neutral"));

    let out = d.run_line("funding").await;
    assert!(has_line(
        &out,
        "BTCUSDT FUNDING: 0.0100% (LONGS PAY SHORTS) | NEXT: 08:00 UTC"
    ));

    let out = d.run_line("oi").await;
    assert!(has_line(&out, "BTCUSDT OPEN INTEREST: $3.00B"));

    let out = d.run_line("lsratio").await;
    assert!(has_line(&out, "LONG/SHORT RATIO: 1.50 [MORE ACCOUNTS LONG]"));

    let mut offline = dispatcher(MockFeed::default());
    assert!(offline.run_line("funding").await.has_error());
}

#[tokio::test]
async fn test_moving_average_readout() {
    let mut feed = live_feed(100.0, 50, "Neutral");
    feed.history = flat_history(100.0, 60);
    let mut d = dispatcher(feed);

    let out = d.run_line("ma").await;
    assert!(has_line(&out, "50D MA: $100 | DISTANCE: +0.00%"));
    assert!(has_line(&out, "100D MA: INSUFFICIENT HISTORY"));
    assert!(has_line(&out, "200W MA: INSUFFICIENT HISTORY"));
    assert!(!out.text().contains("52W"));
}

#[tokio::test]
async fn test_moving_average_readout_falls_back_to_52_weeks() {
    let mut feed = live_feed(100.0, 50, "Neutral");
    feed.history = flat_history(100.0, 365);
    let mut d = dispatcher(feed);

    let out = d.run_line("ma").await;
    assert!(has_line(&out, "200D MA: $100 | DISTANCE: +0.00%"));
    assert!(has_line(&out, "200W MA: INSUFFICIENT HISTORY"));
    assert!(has_line(&out, "52W MA: $100 | DISTANCE: +0.00%"));
}

#[tokio::test]
async fn test_misc_commands() {
    let mut d = dispatcher(MockFeed::default());

    let out = d.run_line("clear").await;
    assert!(out.clear_screen);
    assert!(out.lines.is_empty());

    let out = d.run_line("help").await;
    assert!(out.text().contains("play"));
    assert!(out.text().contains("settings"));

    let out = d.run_line("analyze wagmi, buy the dip").await;
    assert!(has_line(
        &out,
        "CLASSIFICATION: BULLISH. DETECTED OPTIMISM VIA KEYWORD SCANNING."
    ));

    let out = d.run_line("gaps").await;
    assert!(has_line(&out, "COMMAND 'gaps' IS NOT YET FULLY IMPLEMENTED."));

    let out = d.run_line("lambo").await;
    assert!(has_line(&out, "COMMAND NOT FOUND: lambo. TYPE 'HELP' FOR OPTIONS."));
    assert!(out.has_error());

    let out = d.run_line("calc 1").await;
    assert!(has_line(&out, "USAGE: CALC <ENTRY> <STOP> [TARGET]"));

    assert!(d.run_line("   ").await.lines.is_empty());
}

#[test]
fn test_dispatcher_blocking_entry() {
    let mut d = dispatcher(MockFeed::default());
    let out = tokio_test::block_on(d.run_line("calc 97000 96000 103000"));
    assert!(has_line(&out, "THE BOUNCER: TRADE APPROVED."));
}
