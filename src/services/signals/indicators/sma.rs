//! Simple Moving Average (SMA) helpers.

/// Days between weekly samples.
pub const WEEK_STEP: usize = 7;

/// Mean of the last `window` values; 0 when there is not enough history.
pub fn calc_simple_ma(series: &[f64], window: usize) -> f64 {
    if window == 0 || series.len() < window {
        return 0.0;
    }

    series.iter().rev().take(window).sum::<f64>() / window as f64
}

/// Weekly moving average approximated from daily closes.
///
/// Samples every 7th value walking back from the most recent close and averages the first
/// `window_weeks` of them. This is not a true weekly candle close. Returns 0 when fewer than
/// `window_weeks` samples can be taken.
pub fn calc_weekly_ma(daily: &[f64], window_weeks: usize) -> f64 {
    if window_weeks == 0 {
        return 0.0;
    }

    let samples: Vec<f64> = daily
        .iter()
        .rev()
        .step_by(WEEK_STEP)
        .take(window_weeks)
        .copied()
        .collect();

    if samples.len() < window_weeks {
        return 0.0;
    }

    samples.iter().sum::<f64>() / window_weeks as f64
}
