//! Market signal collection.
//!
//! Turns raw price samples into the normalized [`MarketSnapshot`] and
//! [`MovingAverageSet`] consumed by the oracle and the terminal readouts.

pub mod indicators;

use chrono::{DateTime, Datelike, Utc};

use crate::types::{DataQuality, MarketSnapshot, MovingAverageSet, PricePoint};
use indicators::{calc_simple_ma, calc_weekly_ma, calculate_rsi, RSI_PERIOD};

/// Weeks in the long-term weekly average.
pub const WEEKLY_MA_WEEKS: usize = 200;

/// Weeks in the short weekly average (fits in a year of daily history).
pub const SHORT_WEEKLY_MA_WEEKS: usize = 52;

const DAY_SECS: i64 = 86_400;

/// Timestamp (ms) of the most recent Monday 00:00 UTC at or before `now`.
pub fn week_open_timestamp(now: DateTime<Utc>) -> i64 {
    let days_back = now.weekday().num_days_from_monday() as i64;
    let today_midnight = now.timestamp().div_euclid(DAY_SECS) * DAY_SECS;
    (today_midnight - days_back * DAY_SECS) * 1000
}

/// Price of the sample closest in time to `target_ms`. The earliest sample wins ties.
pub fn nearest_price(history: &[PricePoint], target_ms: i64) -> Option<f64> {
    history
        .iter()
        .min_by_key(|p| (p.timestamp_ms - target_ms).unsigned_abs())
        .map(|p| p.price)
}

/// Build a snapshot from the live price, 24h change and ascending daily history.
///
/// RSI(14) runs over the history closes. The weekly open is the sample nearest to this week's
/// Monday 00:00 UTC; the weekly close is always the live price. With no history at all the
/// weekly open falls back to the live price.
pub fn compute_snapshot(
    current_price: f64,
    change_24h: f64,
    history: &[PricePoint],
    now: DateTime<Utc>,
) -> MarketSnapshot {
    let closes: Vec<f64> = history.iter().map(|p| p.price).collect();
    let rsi = calculate_rsi(&closes, RSI_PERIOD);

    let weekly_open =
        nearest_price(history, week_open_timestamp(now)).unwrap_or(current_price);

    let quality = if closes.len() < RSI_PERIOD + 1 {
        DataQuality::InsufficientHistory
    } else {
        DataQuality::Complete
    };

    MarketSnapshot {
        price: current_price,
        change_24h,
        rsi,
        weekly_open,
        weekly_close: current_price,
        quality,
    }
}

/// 50/100/200-day simple averages plus the 200- and 52-week sampled averages.
pub fn compute_moving_averages(history: &[PricePoint]) -> MovingAverageSet {
    let closes: Vec<f64> = history.iter().map(|p| p.price).collect();

    MovingAverageSet {
        ma50: calc_simple_ma(&closes, 50),
        ma100: calc_simple_ma(&closes, 100),
        ma200: calc_simple_ma(&closes, 200),
        ma200w: calc_weekly_ma(&closes, WEEKLY_MA_WEEKS),
        ma52w: calc_weekly_ma(&closes, SHORT_WEEKLY_MA_WEEKS),
        current_price: closes.last().copied().unwrap_or(0.0),
    }
}
