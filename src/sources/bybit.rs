use crate::error::{AppError, Result};
use crate::types::{funding_rate_pct, long_short_ratio, open_interest_usd, FuturesData};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

const BYBIT_MARKET_URL: &str = "https://api.bybit.com/v5/market";
const SYMBOL: &str = "BTCUSDT";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BybitResponse<T> {
    ret_code: i64,
    ret_msg: String,
    result: Option<BybitList<T>>,
}

#[derive(Debug, Deserialize)]
struct BybitList<T> {
    list: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TickerEntry {
    last_price: String,
    funding_rate: String,
    next_funding_time: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OpenInterestEntry {
    open_interest: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountRatioEntry {
    buy_ratio: String,
    sell_ratio: String,
}

fn parse_num<T: std::str::FromStr>(field: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::ExternalApi(format!("Bybit: bad {} value '{}'", field, raw)))
}

/// Unwrap the Bybit envelope and return the first list entry.
fn first_entry<T>(response: BybitResponse<T>) -> Result<T> {
    if response.ret_code != 0 {
        return Err(AppError::ExternalApi(format!("Bybit: {}", response.ret_msg)));
    }

    response
        .result
        .and_then(|r| r.list.into_iter().next())
        .ok_or_else(|| AppError::ExternalApi("Bybit: empty result list".to_string()))
}

/// Bybit v5 public market client for BTCUSDT linear perpetual stats.
#[derive(Clone)]
pub struct BybitClient {
    client: Client,
}

impl BybitClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn fetch_first<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}/{}", BYBIT_MARKET_URL, path);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Bybit request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "Bybit API error: {}",
                response.status()
            )));
        }

        first_entry(response.json().await?)
    }

    /// Funding, open interest (USD) and long/short ratio in one go.
    pub async fn fetch_futures(&self) -> Result<FuturesData> {
        let ticker_path = format!("tickers?category=linear&symbol={}", SYMBOL);
        let oi_path = format!(
            "open-interest?category=linear&symbol={}&intervalTime=5min&limit=1",
            SYMBOL
        );
        let ratio_path = format!(
            "account-ratio?category=linear&symbol={}&period=1d&limit=1",
            SYMBOL
        );

        let (ticker, oi, ratio) = tokio::try_join!(
            self.fetch_first::<TickerEntry>(&ticker_path),
            self.fetch_first::<OpenInterestEntry>(&oi_path),
            self.fetch_first::<AccountRatioEntry>(&ratio_path),
        )?;

        let data = build_futures_data(ticker, oi, ratio)?;
        debug!(
            "Bybit {} funding {:.4}% OI ${:.0} L/S {:.2}",
            data.symbol, data.funding_rate_pct, data.open_interest_usd, data.long_short_ratio
        );
        Ok(data)
    }
}

fn build_futures_data(
    ticker: TickerEntry,
    oi: OpenInterestEntry,
    ratio: AccountRatioEntry,
) -> Result<FuturesData> {
    let last_price: f64 = parse_num("lastPrice", &ticker.last_price)?;
    let raw_funding: f64 = parse_num("fundingRate", &ticker.funding_rate)?;
    let oi_coins: f64 = parse_num("openInterest", &oi.open_interest)?;
    let buy: f64 = parse_num("buyRatio", &ratio.buy_ratio)?;
    let sell: f64 = parse_num("sellRatio", &ratio.sell_ratio)?;

    Ok(FuturesData {
        symbol: SYMBOL.to_string(),
        funding_rate_pct: funding_rate_pct(raw_funding),
        next_funding_time_ms: parse_num("nextFundingTime", &ticker.next_funding_time)?,
        open_interest_usd: open_interest_usd(oi_coins, last_price),
        long_short_ratio: long_short_ratio(buy, sell),
    })
}
