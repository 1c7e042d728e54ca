//! Command layer shared by the one-shot CLI and the terminal UI.

mod dispatcher;
mod output;

pub use dispatcher::{Dispatcher, Session};
pub use output::{
    format_compact_usd, format_signed_pct, format_usd, CommandOutput, LogKind, LogLine,
};

use crate::error::{AppError, Result};

/// Commands shown by `help`, in display order.
pub const COMMANDS: &[(&str, &str)] = &[
    ("play", "Get the current trade recommendation"),
    ("bias", "Show weekly bias (bull/bear)"),
    ("sentiment", "Fear & Greed market sentiment"),
    ("rsi", "Current RSI reading"),
    ("price", "Current BTC price and stats"),
    ("ma", "Distance to key moving averages (50D, 100D, 200D, 200W)"),
    ("funding", "Current BTC funding rate (Bybit perpetuals)"),
    ("oi", "BTC open interest"),
    ("lsratio", "Long/short account ratio"),
    ("calc", "Check a trade against 6:1 R:R (calc <entry> <stop> [target])"),
    ("size", "Position size calculator (size <risk%> <entry> <stop>)"),
    ("analyze", "Keyword sentiment scan of pasted text (analyze <text>)"),
    ("settings", "View/update account size (settings [amount])"),
    ("clear", "Clear terminal"),
    ("help", "Show all commands"),
];

/// Recognised command words that this build does not serve.
const UNIMPLEMENTED: &[&str] = &["ask", "gaps", "usage", "debug"];

/// A parsed terminal command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Clear,
    Price,
    Rsi,
    Bias,
    Sentiment,
    Analyze(String),
    Play,
    Calc {
        entry: f64,
        stop: f64,
        target: Option<f64>,
    },
    Size {
        risk_percent: f64,
        entry: f64,
        stop: f64,
    },
    Settings(Option<f64>),
    Funding,
    OpenInterest,
    LongShortRatio,
    MovingAverages,
    Unimplemented(String),
    Unknown(String),
    Empty,
}

fn parse_number(raw: &str) -> Result<f64> {
    let cleaned = raw.trim_start_matches('$').replace(',', "");
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| AppError::InvalidInput(format!("ERROR: INVALID NUMBER '{}'.", raw)))
}

fn usage(text: &str) -> AppError {
    AppError::InvalidInput(format!("USAGE: {}", text))
}

impl Command {
    /// Parse a command line. The command word is case-insensitive.
    pub fn parse(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(first) = words.next() else {
            return Ok(Command::Empty);
        };
        let word = first.to_lowercase();
        let args: Vec<&str> = words.collect();

        let command = match word.as_str() {
            "help" => Command::Help,
            "clear" => Command::Clear,
            "price" => Command::Price,
            "rsi" => Command::Rsi,
            "bias" => Command::Bias,
            "sentiment" => Command::Sentiment,
            "play" => Command::Play,
            "funding" => Command::Funding,
            "oi" => Command::OpenInterest,
            "lsratio" => Command::LongShortRatio,
            "ma" => Command::MovingAverages,
            "analyze" => {
                if args.is_empty() {
                    return Err(usage("analyze <text>"));
                }
                Command::Analyze(args.join(" "))
            }
            "calc" => {
                if args.len() < 2 {
                    return Err(usage("calc <entry> <stop> [target]"));
                }
                Command::Calc {
                    entry: parse_number(args[0])?,
                    stop: parse_number(args[1])?,
                    target: args.get(2).map(|t| parse_number(t)).transpose()?,
                }
            }
            "size" => {
                if args.len() < 3 {
                    return Err(usage("size <risk%> <entry> <stop>"));
                }
                Command::Size {
                    risk_percent: parse_number(args[0].trim_end_matches('%'))?,
                    entry: parse_number(args[1])?,
                    stop: parse_number(args[2])?,
                }
            }
            "settings" => match args.first() {
                None => Command::Settings(None),
                Some(raw) => {
                    let amount = parse_number(raw)
                        .ok()
                        .filter(|v| *v > 0.0)
                        .ok_or_else(|| AppError::InvalidInput("ERROR: INVALID AMOUNT.".to_string()))?;
                    Command::Settings(Some(amount))
                }
            },
            other if UNIMPLEMENTED.contains(&other) => Command::Unimplemented(other.to_string()),
            other => Command::Unknown(other.to_string()),
        };

        Ok(command)
    }
}
