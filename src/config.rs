use std::env;

/// Default account size used by the position sizer.
pub const DEFAULT_ACCOUNT_SIZE: f64 = 10_000.0;

/// Days of daily history fetched for RSI (Wilder smoothing needs well over 14 candles).
pub const DEFAULT_RSI_HISTORY_DAYS: u32 = 100;

/// Days of daily history for moving averages when a CoinGecko key is present.
/// 200 weeks of weekly samples need at least 1394 daily closes.
pub const DEFAULT_MA_HISTORY_DAYS_PRO: u32 = 1500;

/// Free tier only serves a year of daily history.
pub const DEFAULT_MA_HISTORY_DAYS_FREE: u32 = 365;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Starting account size for the `size` command (session value, not persisted).
    pub account_size: f64,
    /// CoinGecko API key (optional, unlocks longer history).
    pub coingecko_api_key: Option<String>,
    /// Lookback for the RSI/weekly-open history request.
    pub rsi_history_days: u32,
    /// Lookback for the moving-average history request.
    pub ma_history_days: u32,
    /// Per-request HTTP timeout in seconds.
    pub http_timeout_secs: u64,
    /// Log file used while the terminal UI owns the screen.
    pub log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            account_size: DEFAULT_ACCOUNT_SIZE,
            coingecko_api_key: None,
            rsi_history_days: DEFAULT_RSI_HISTORY_DAYS,
            ma_history_days: DEFAULT_MA_HISTORY_DAYS_FREE,
            http_timeout_secs: 10,
            log_file: "btc-oracle.log".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let coingecko_api_key = env::var("COINGECKO_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());

        let default_ma_days = if coingecko_api_key.is_some() {
            DEFAULT_MA_HISTORY_DAYS_PRO
        } else {
            DEFAULT_MA_HISTORY_DAYS_FREE
        };

        Self {
            account_size: env::var("ACCOUNT_SIZE")
                .ok()
                .and_then(|v| v.parse::<f64>().ok())
                .filter(|v| v.is_finite() && *v > 0.0)
                .unwrap_or(defaults.account_size),
            rsi_history_days: env::var("RSI_HISTORY_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.rsi_history_days),
            ma_history_days: env::var("MA_HISTORY_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default_ma_days),
            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.http_timeout_secs),
            log_file: env::var("LOG_FILE").unwrap_or(defaults.log_file),
            coingecko_api_key,
        }
    }
}
