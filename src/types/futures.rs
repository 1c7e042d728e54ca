use serde::{Deserialize, Serialize};

/// Perpetual futures readings for a linear contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuturesData {
    pub symbol: String,
    /// Funding rate in percent per interval.
    pub funding_rate_pct: f64,
    pub next_funding_time_ms: i64,
    pub open_interest_usd: f64,
    pub long_short_ratio: f64,
}

/// Long/short account ratio from buy and sell shares.
/// Returns 1.0 (balanced) when there is no sell side to divide by.
pub fn long_short_ratio(buy_ratio: f64, sell_ratio: f64) -> f64 {
    if sell_ratio > 0.0 {
        buy_ratio / sell_ratio
    } else {
        1.0
    }
}

/// Open interest in coins converted to USD at `last_price`.
pub fn open_interest_usd(open_interest_coins: f64, last_price: f64) -> f64 {
    open_interest_coins * last_price
}

/// Raw exchange funding rate (fraction) to percent.
pub fn funding_rate_pct(raw_rate: f64) -> f64 {
    raw_rate * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_short_ratio() {
        assert!((long_short_ratio(0.6, 0.4) - 1.5).abs() < 1e-9);
        assert_eq!(long_short_ratio(0.5, 0.0), 1.0);
    }

    #[test]
    fn test_open_interest_usd() {
        assert_eq!(open_interest_usd(2.0, 50_000.0), 100_000.0);
    }

    #[test]
    fn test_funding_rate_pct() {
        assert!((funding_rate_pct(0.0001) - 0.01).abs() < 1e-12);
    }
}
