//! Relative Strength Index (RSI) indicator.

/// Default RSI lookback.
pub const RSI_PERIOD: usize = 14;

/// Value reported when there are not enough closes to seed the averages.
pub const NEUTRAL_RSI: f64 = 50.0;

/// Wilder-smoothed RSI over closes in ascending time order.
///
/// Values range from 0-100:
/// - Below 30: Oversold
/// - Above 70: Overbought
///
/// The first `period` deltas seed simple averages of gains and losses; every later delta is
/// folded in with Wilder's smoothing (factor `1 / period`). Fewer than `period + 1` closes
/// returns [`NEUTRAL_RSI`]. No sorting is done, so out-of-order input gives a wrong answer.
pub fn calculate_rsi(prices: &[f64], period: usize) -> f64 {
    if period == 0 || prices.len() < period + 1 {
        return NEUTRAL_RSI;
    }

    let mut gains = 0.0;
    let mut losses = 0.0;

    for window in prices[..=period].windows(2) {
        let change = window[1] - window[0];
        if change >= 0.0 {
            gains += change;
        } else {
            losses -= change;
        }
    }

    let mut avg_gain = gains / period as f64;
    let mut avg_loss = losses / period as f64;
    let keep = (period - 1) as f64;

    for window in prices[period..].windows(2) {
        let change = window[1] - window[0];
        let (gain, loss) = if change >= 0.0 { (change, 0.0) } else { (0.0, -change) };
        avg_gain = (avg_gain * keep + gain) / period as f64;
        avg_loss = (avg_loss * keep + loss) / period as f64;
    }

    if avg_loss == 0.0 {
        return 100.0;
    }

    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}
