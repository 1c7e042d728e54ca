//! Weekly bias classification.

use crate::types::{Bias, MarketSnapshot};

/// BULLISH when the week is trading at or above its open, BEARISH otherwise.
///
/// A zero price is the unavailable-feed sentinel and classifies as BULLISH so downstream
/// logic always has a bias; check [`MarketSnapshot::quality`] to tell the two apart.
pub fn classify_bias(snapshot: &MarketSnapshot) -> Bias {
    if snapshot.price == 0.0 {
        return Bias::Bullish;
    }

    if snapshot.weekly_close >= snapshot.weekly_open {
        Bias::Bullish
    } else {
        Bias::Bearish
    }
}
