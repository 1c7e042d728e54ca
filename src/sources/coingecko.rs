use crate::error::{AppError, Result};
use crate::types::PricePoint;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::PriceQuote;

const COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";
const COIN_ID: &str = "bitcoin";

#[derive(Debug, Deserialize)]
struct SimplePriceResponse {
    bitcoin: Option<SimplePrice>,
}

#[derive(Debug, Deserialize)]
struct SimplePrice {
    usd: Option<f64>,
    usd_24h_change: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    prices: Vec<[f64; 2]>,
}

/// CoinGecko REST client for BTC spot price and daily history.
#[derive(Clone)]
pub struct CoinGeckoClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl CoinGeckoClient {
    /// Create a new CoinGecko client.
    pub fn new(client: Client, api_key: Option<String>) -> Self {
        Self {
            client,
            api_key,
            base_url: COINGECKO_API_URL.to_string(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let mut request = self.client.get(url).header("Accept", "application/json");

        // Demo key raises the rate limit and the history window
        if let Some(ref key) = self.api_key {
            request = request.header("x-cg-demo-api-key", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("CoinGecko request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            let snippet: String = text.chars().take(200).collect();
            warn!("CoinGecko API returned {}: {}", status, snippet);
            return Err(AppError::ExternalApi(format!("CoinGecko API error: {}", status)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Failed to parse CoinGecko response: {}", e)))
    }

    /// Current USD price and 24h change in percent.
    pub async fn fetch_price(&self) -> Result<PriceQuote> {
        let url = format!(
            "{}/simple/price?ids={}&vs_currencies=usd&include_24hr_change=true",
            self.base_url, COIN_ID
        );

        let data: SimplePriceResponse = self.get_json(&url).await?;
        let quote = data
            .bitcoin
            .ok_or_else(|| AppError::ExternalApi("CoinGecko response missing bitcoin".to_string()))?;

        let price = quote
            .usd
            .filter(|p| *p > 0.0)
            .ok_or_else(|| AppError::ExternalApi("CoinGecko response missing usd price".to_string()))?;

        debug!("CoinGecko BTC price {:.2}", price);

        Ok(PriceQuote {
            price,
            change_24h: quote.usd_24h_change.unwrap_or(0.0),
        })
    }

    /// Daily closes for the last `days` days, ascending by time.
    pub async fn fetch_daily_history(&self, days: u32) -> Result<Vec<PricePoint>> {
        let url = format!(
            "{}/coins/{}/market_chart?vs_currency=usd&days={}&interval=daily",
            self.base_url, COIN_ID, days
        );

        let chart: MarketChartResponse = self.get_json(&url).await?;
        let points = parse_market_chart(&chart.prices);

        debug!("CoinGecko returned {} daily points for {} days", points.len(), days);
        Ok(points)
    }
}

/// Convert `[timestamp_ms, price]` pairs, dropping non-positive prices.
fn parse_market_chart(raw: &[[f64; 2]]) -> Vec<PricePoint> {
    raw.iter()
        .filter(|[_, price]| price.is_finite() && *price > 0.0)
        .map(|[ts, price]| PricePoint::new(*ts as i64, *price))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_market_chart() {
        let json = r#"{"prices":[[1715558400000,61000.5],[1715644800000.0,62000.0],[1715731200000,0]]}"#;
        let chart: MarketChartResponse = serde_json::from_str(json).unwrap();
        let points = parse_market_chart(&chart.prices);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0], PricePoint::new(1_715_558_400_000, 61000.5));
        assert_eq!(points[1].timestamp_ms, 1_715_644_800_000);
    }

    #[test]
    fn test_parse_simple_price() {
        let json = r#"{"bitcoin":{"usd":97123.45,"usd_24h_change":-1.25}}"#;
        let data: SimplePriceResponse = serde_json::from_str(json).unwrap();
        let quote = data.bitcoin.unwrap();
        assert_eq!(quote.usd, Some(97123.45));
        assert_eq!(quote.usd_24h_change, Some(-1.25));
    }
}
