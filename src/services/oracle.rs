//! Trade recommendation engine.
//!
//! A fixed rule table over weekly bias and RSI, with a sentiment penalty on bullish calls.

use super::bias::classify_bias;
use crate::types::{Bias, MarketSnapshot, SentimentResult, TradeRecommendation, Verdict};

/// Fear & Greed score above which bullish calls are penalized.
pub const OVERHEATED_SCORE: u8 = 80;

/// Confidence removed from a bullish call when sentiment is overheated.
pub const OVERHEATED_PENALTY: i32 = 20;

const OVERHEATED_WARNING: &str = " WARNING: SENTIMENT OVERHEATED.";

/// Rule-table recommendation for one snapshot and sentiment reading.
///
/// Pure: identical inputs always produce an identical recommendation.
pub fn recommend(snapshot: &MarketSnapshot, sentiment: &SentimentResult) -> TradeRecommendation {
    let bias = classify_bias(snapshot);
    let rsi = snapshot.rsi;

    let (verdict, mut confidence, mut reasoning) = match bias {
        Bias::Bullish => {
            let (verdict, confidence, reasoning) = if rsi < 40.0 {
                (Verdict::Long, 85, "WEEKLY BULLISH + OVERSOLD RSI. GOOD R:R ZONE.")
            } else if rsi > 70.0 {
                (
                    Verdict::NoTrade,
                    60,
                    "WEEKLY BULLISH BUT RSI OVERBOUGHT. WAIT FOR PULLBACK.",
                )
            } else {
                (Verdict::Long, 65, "TREND FOLLOWING. MONITOR LOWER TIMEFRAMES.")
            };
            (verdict, confidence, reasoning.to_string())
        }
        Bias::Bearish => {
            let (verdict, confidence, reasoning) = if rsi > 60.0 {
                (Verdict::Short, 80, "WEEKLY BEARISH + RSI RESET. FADE THE RALLY.")
            } else if rsi < 30.0 {
                (
                    Verdict::NoTrade,
                    60,
                    "WEEKLY BEARISH BUT OVERSOLD. SHORT SQUEEZE RISK.",
                )
            } else {
                (Verdict::Short, 65, "TREND FOLLOWING. SELL RALLIES.")
            };
            (verdict, confidence, reasoning.to_string())
        }
    };

    // Bullish branch only.
    if bias == Bias::Bullish && sentiment.score > OVERHEATED_SCORE {
        confidence -= OVERHEATED_PENALTY;
        reasoning.push_str(OVERHEATED_WARNING);
    }

    TradeRecommendation {
        bias,
        sentiment: sentiment.status,
        rsi,
        verdict,
        confidence: confidence.clamp(0, 100) as u8,
        reasoning,
        degraded: snapshot.is_degraded() || sentiment.degraded,
    }
}
