use crate::error::{AppError, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::FearGreedReading;

const FEAR_GREED_API_URL: &str = "https://api.alternative.me/fng/?limit=1";

#[derive(Debug, Deserialize)]
struct FearGreedResponse {
    #[serde(default)]
    data: Vec<FearGreedEntry>,
}

#[derive(Debug, Deserialize)]
struct FearGreedEntry {
    value: String,
    value_classification: String,
}

/// alternative.me Fear & Greed index client.
#[derive(Clone)]
pub struct FearGreedClient {
    client: Client,
    url: String,
}

impl FearGreedClient {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            url: FEAR_GREED_API_URL.to_string(),
        }
    }

    /// Latest index value and its classification label.
    pub async fn fetch_latest(&self) -> Result<FearGreedReading> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Fear & Greed request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "Fear & Greed API error: {}",
                response.status()
            )));
        }

        let body: FearGreedResponse = response.json().await?;
        let reading = parse_reading(body)?;
        debug!("Fear & Greed {} ({})", reading.score, reading.classification);
        Ok(reading)
    }
}

fn parse_reading(body: FearGreedResponse) -> Result<FearGreedReading> {
    let entry = body
        .data
        .into_iter()
        .next()
        .ok_or_else(|| AppError::ExternalApi("Fear & Greed returned no data".to_string()))?;

    let score: u8 = entry
        .value
        .trim()
        .parse()
        .map_err(|_| AppError::ExternalApi(format!("Bad Fear & Greed value: {}", entry.value)))?;

    Ok(FearGreedReading {
        score,
        classification: entry.value_classification,
    })
}
