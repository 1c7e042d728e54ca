//! Fear & Greed normalization and offline text classification.

use crate::types::{SentimentResult, SentimentStatus, TextClassification};

const BULL_WORDS: &[&str] = &[
    "moon",
    "pump",
    "buy",
    "long",
    "bull",
    "breakout",
    "send it",
    "god candle",
    "wagmi",
    "accumulation",
];

const BEAR_WORDS: &[&str] = &[
    "dump",
    "crash",
    "sell",
    "short",
    "bear",
    "breakdown",
    "rekt",
    "rug",
    "capitulation",
    "distribution",
];

/// Map a raw classification label onto a status.
///
/// The label is uppercased and whitespace runs become `_`, then the first substring match wins
/// in the order EXTREME_GREED, GREED, EXTREME_FEAR, FEAR. Anything else is NEUTRAL.
pub fn status_from_label(raw_label: &str) -> SentimentStatus {
    let normalized = raw_label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_uppercase();

    const ORDER: [SentimentStatus; 4] = [
        SentimentStatus::ExtremeGreed,
        SentimentStatus::Greed,
        SentimentStatus::ExtremeFear,
        SentimentStatus::Fear,
    ];

    ORDER
        .into_iter()
        .find(|status| normalized.contains(status.as_str()))
        .unwrap_or(SentimentStatus::Neutral)
}

/// Build a [`SentimentResult`] from a 0-100 score and the provider's label.
pub fn normalize_sentiment(raw_score: u8, raw_label: &str) -> SentimentResult {
    let score = raw_score.min(100);
    let status = status_from_label(raw_label);

    SentimentResult {
        score,
        status,
        label: format!("MARKET IS {} ({}/100).", status.display_name(), score),
        degraded: false,
    }
}

/// Keyword scan of pasted social text. Each keyword counts once.
pub fn classify_text(text: &str) -> TextClassification {
    let lower = text.to_lowercase();
    let bull = BULL_WORDS.iter().filter(|w| lower.contains(*w)).count();
    let bear = BEAR_WORDS.iter().filter(|w| lower.contains(*w)).count();

    match bull.cmp(&bear) {
        std::cmp::Ordering::Greater => TextClassification::Bullish,
        std::cmp::Ordering::Less => TextClassification::Bearish,
        std::cmp::Ordering::Equal => TextClassification::Neutral,
    }
}
