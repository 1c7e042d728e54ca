//! Command execution against a [`MarketFeed`].

use chrono::DateTime;
use tracing::{info, warn};

use super::output::{format_compact_usd, format_signed_pct, format_usd, CommandOutput, LogKind};
use super::{Command, COMMANDS};
use crate::config::Config;
use crate::services::{classify_bias, classify_text, position_size, recommend, risk_reward};
use crate::sources::{
    load_moving_averages, load_sentiment, load_snapshot, load_snapshot_or_sentinel, MarketFeed,
};
use crate::types::{Bias, DataQuality, MovingAverageSet, RsiZone, Verdict};

/// Per-session user settings. Lives only as long as the process.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub account_size: f64,
}

/// Runs parsed commands and renders their output lines.
pub struct Dispatcher<F> {
    feed: F,
    session: Session,
    rsi_history_days: u32,
    ma_history_days: u32,
}

impl<F: MarketFeed> Dispatcher<F> {
    pub fn new(feed: F, config: &Config) -> Self {
        Self {
            feed,
            session: Session {
                account_size: config.account_size,
            },
            rsi_history_days: config.rsi_history_days,
            ma_history_days: config.ma_history_days,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Parse and execute one input line.
    pub async fn run_line(&mut self, line: &str) -> CommandOutput {
        match Command::parse(line) {
            Ok(command) => self.execute(command).await,
            Err(e) => CommandOutput::error(e.terminal_message()),
        }
    }

    /// Execute a parsed command.
    pub async fn execute(&mut self, command: Command) -> CommandOutput {
        info!("Executing command: {:?}", command);

        match command {
            Command::Empty => CommandOutput::new(),
            Command::Help => self.help(),
            Command::Clear => CommandOutput {
                lines: Vec::new(),
                clear_screen: true,
            },
            Command::Price => self.price().await,
            Command::Rsi => self.rsi().await,
            Command::Bias => self.bias().await,
            Command::Sentiment => self.sentiment().await,
            Command::Analyze(text) => self.analyze(&text),
            Command::Play => self.play().await,
            Command::Calc {
                entry,
                stop,
                target,
            } => self.calc(entry, stop, target),
            Command::Size {
                risk_percent,
                entry,
                stop,
            } => self.size(risk_percent, entry, stop),
            Command::Settings(amount) => self.settings(amount),
            Command::Funding => self.funding().await,
            Command::OpenInterest => self.open_interest().await,
            Command::LongShortRatio => self.long_short_ratio().await,
            Command::MovingAverages => self.moving_averages().await,
            Command::Unimplemented(word) => {
                let mut out = CommandOutput::new();
                out.system(format!("COMMAND '{}' IS NOT YET FULLY IMPLEMENTED.", word));
                out
            }
            Command::Unknown(word) => CommandOutput::error(format!(
                "COMMAND NOT FOUND: {}. TYPE 'HELP' FOR OPTIONS.",
                word
            )),
        }
    }

    fn help(&self) -> CommandOutput {
        let mut out = CommandOutput::new();
        out.system("AVAILABLE COMMANDS:");
        for (name, description) in COMMANDS {
            out.info(format!("  {:<10} {}", name, description));
        }
        out
    }

    async fn price(&self) -> CommandOutput {
        let mut out = CommandOutput::new();
        out.system("FETCHING REAL-TIME BTC DATA...");

        match self.feed.price_quote().await {
            Ok(quote) => {
                let kind = if quote.change_24h >= 0.0 {
                    LogKind::Success
                } else {
                    LogKind::Danger
                };
                out.push(
                    kind,
                    format!(
                        "BTC: {} | 24h: {}",
                        format_usd(quote.price, 2),
                        format_signed_pct(quote.change_24h)
                    ),
                );
            }
            Err(e) => out.fail(format!("ERROR: {}", e.terminal_message())),
        }
        out
    }

    async fn rsi(&self) -> CommandOutput {
        let mut out = CommandOutput::new();
        out.system("CALCULATING RELATIVE STRENGTH...");

        match load_snapshot(&self.feed, self.rsi_history_days).await {
            Ok(snapshot) => {
                let zone = RsiZone::from_rsi(snapshot.rsi);
                out.info(format!("RSI (14): {:.1} [{}]", snapshot.rsi, zone.label()));
                if snapshot.quality == DataQuality::InsufficientHistory {
                    out.system("NOT ENOUGH HISTORY FOR RSI. SHOWING NEUTRAL DEFAULT.");
                }
            }
            Err(e) => out.fail(format!("ERROR: {}", e.terminal_message())),
        }
        out
    }

    async fn bias(&self) -> CommandOutput {
        let mut out = CommandOutput::new();
        out.system("ANALYZING WEEKLY CANDLE STRUCTURE...");

        let snapshot = load_snapshot_or_sentinel(&self.feed, self.rsi_history_days).await;
        let bias = classify_bias(&snapshot);

        if snapshot.quality == DataQuality::Unavailable {
            out.system("PRICE DATA UNAVAILABLE. BIAS DEFAULTS TO BULLISH.");
        } else {
            out.info(format!(
                "WEEKLY OPEN: {} | CURRENT: {}",
                format_usd(snapshot.weekly_open, 2),
                format_usd(snapshot.price, 0)
            ));
        }

        let kind = match bias {
            Bias::Bullish => LogKind::Success,
            Bias::Bearish => LogKind::Danger,
        };
        out.push(kind, format!("VERDICT: {}", bias));
        out
    }

    async fn sentiment(&self) -> CommandOutput {
        let mut out = CommandOutput::new();
        out.system("CONSULTING THE HIVE MIND...");
        let sentiment = load_sentiment(&self.feed).await;
        out.info(sentiment.label);
        out
    }

    fn analyze(&self, text: &str) -> CommandOutput {
        let mut out = CommandOutput::new();
        out.system("PROCESSING TEXT INPUT...");
        out.success(classify_text(text).summary());
        out
    }

    async fn play(&self) -> CommandOutput {
        let mut out = CommandOutput::new();
        out.system("RUNNING FULL SYSTEM ANALYSIS...");

        let (snapshot, sentiment) = tokio::join!(
            load_snapshot_or_sentinel(&self.feed, self.rsi_history_days),
            load_sentiment(&self.feed)
        );
        let rec = recommend(&snapshot, &sentiment);

        let bias_kind = match rec.bias {
            Bias::Bullish => LogKind::Success,
            Bias::Bearish => LogKind::Danger,
        };
        out.push(bias_kind, format!("ORACLE REPORT :: {}", rec.bias));
        out.info(format!(
            "SENTIMENT: {} | RSI (14): {:.1}",
            rec.sentiment.display_name(),
            rec.rsi
        ));

        let verdict_kind = match rec.verdict {
            Verdict::Long => LogKind::Success,
            Verdict::Short => LogKind::Danger,
            Verdict::NoTrade => LogKind::System,
        };
        out.push(
            verdict_kind,
            format!("VERDICT: {} | CONFIDENCE: {}%", rec.verdict, rec.confidence),
        );
        out.info(format!("> {}", rec.reasoning));

        if rec.degraded {
            warn!(
                "Recommendation built from degraded inputs (snapshot {:?}, sentiment degraded: {})",
                snapshot.quality, sentiment.degraded
            );
        }
        match snapshot.quality {
            DataQuality::Complete => {}
            DataQuality::InsufficientHistory => {
                out.system("NOTE: NOT ENOUGH HISTORY FOR RSI. RSI DEFAULTS TO NEUTRAL 50.")
            }
            DataQuality::Unavailable => {
                out.system("NOTE: PRICE DATA UNAVAILABLE. BIAS AND RSI ARE DEFAULTS.")
            }
        }
        if sentiment.degraded {
            out.system("NOTE: SENTIMENT DATA UNAVAILABLE. SCORE DEFAULTS TO NEUTRAL 50.");
        }
        out
    }

    fn calc(&self, entry: f64, stop: f64, target: Option<f64>) -> CommandOutput {
        let result = match risk_reward(entry, stop, target) {
            Ok(result) => result,
            Err(e) => return CommandOutput::error(format!("ERROR: {}", e.terminal_message())),
        };

        let mut out = CommandOutput::new();
        out.info(format!(
            "ANALYSIS: Entry ${} | Stop ${} | Target ${:.0}",
            result.entry, result.stop, result.target
        ));

        let ratio_line = format!("R:R RATIO: {:.2}:1", result.ratio);
        if result.approved {
            out.success(ratio_line);
            out.success("THE BOUNCER: TRADE APPROVED.");
        } else {
            out.fail(ratio_line);
            out.fail("THE BOUNCER: TRADE REJECTED. 6:1 MINIMUM RR NOT MET.");
        }
        out
    }

    fn size(&self, risk_percent: f64, entry: f64, stop: f64) -> CommandOutput {
        let account = self.session.account_size;
        let result = match position_size(account, risk_percent, entry, stop) {
            Ok(result) => result,
            Err(e) => return CommandOutput::error(format!("ERROR: {}", e.terminal_message())),
        };

        let mut out = CommandOutput::new();
        out.system(format!(
            "CALCULATING POSITION SIZE (Account: {})...",
            format_usd(account, 0)
        ));
        out.info(format!(
            "RISK AMOUNT: ${:.2} ({:.1}%)",
            result.risk_amount, risk_percent
        ));
        out.success(format!("POSITION SIZE: {:.4} BTC", result.position_size));
        out.info(format!("NOTIONAL VALUE: ${:.2}", result.notional_value));
        out
    }

    fn settings(&mut self, amount: Option<f64>) -> CommandOutput {
        let mut out = CommandOutput::new();
        match amount {
            None => {
                out.system("CURRENT SETTINGS:");
                out.info(format!(
                    "ACCOUNT SIZE: {}",
                    format_usd(self.session.account_size, 0)
                ));
                out.info("USE: settings <new_amount> TO UPDATE.");
            }
            Some(amount) => {
                self.session.account_size = amount;
                info!("Account size updated to {}", amount);
                out.success(format!(
                    "SETTINGS UPDATED: ACCOUNT SIZE = {}",
                    format_usd(amount, 0)
                ));
            }
        }
        out
    }

    async fn funding(&self) -> CommandOutput {
        let mut out = CommandOutput::new();
        out.system("QUERYING PERPETUAL FUNDING...");

        match self.feed.futures().await {
            Ok(data) => {
                let next = DateTime::from_timestamp_millis(data.next_funding_time_ms)
                    .map(|t| t.format("%H:%M UTC").to_string())
                    .unwrap_or_else(|| "UNKNOWN".to_string());
                let side = if data.funding_rate_pct >= 0.0 {
                    "LONGS PAY SHORTS"
                } else {
                    "SHORTS PAY LONGS"
                };
                out.info(format!(
                    "{} FUNDING: {:.4}% ({}) | NEXT: {}",
                    data.symbol, data.funding_rate_pct, side, next
                ));
            }
            Err(e) => out.fail(format!("ERROR: {}", e.terminal_message())),
        }
        out
    }

    async fn open_interest(&self) -> CommandOutput {
        let mut out = CommandOutput::new();
        out.system("QUERYING OPEN INTEREST...");

        match self.feed.futures().await {
            Ok(data) => out.info(format!(
                "{} OPEN INTEREST: {}",
                data.symbol,
                format_compact_usd(data.open_interest_usd)
            )),
            Err(e) => out.fail(format!("ERROR: {}", e.terminal_message())),
        }
        out
    }

    async fn long_short_ratio(&self) -> CommandOutput {
        let mut out = CommandOutput::new();
        out.system("QUERYING ACCOUNT POSITIONING...");

        match self.feed.futures().await {
            Ok(data) => {
                let lean = if data.long_short_ratio > 1.0 {
                    "MORE ACCOUNTS LONG"
                } else if data.long_short_ratio < 1.0 {
                    "MORE ACCOUNTS SHORT"
                } else {
                    "BALANCED"
                };
                out.info(format!(
                    "LONG/SHORT RATIO: {:.2} [{}]",
                    data.long_short_ratio, lean
                ));
            }
            Err(e) => out.fail(format!("ERROR: {}", e.terminal_message())),
        }
        out
    }

    async fn moving_averages(&self) -> CommandOutput {
        let mut out = CommandOutput::new();
        out.system("SCANNING MOVING AVERAGES...");

        let mas = match load_moving_averages(&self.feed, self.ma_history_days).await {
            Ok(mas) => mas,
            Err(e) => {
                out.fail(format!("ERROR: {}", e.terminal_message()));
                return out;
            }
        };

        out.info(format!("BTC: {}", format_usd(mas.current_price, 0)));
        for (label, ma) in mas.labelled() {
            push_ma_line(&mut out, &mas, label, ma);
        }

        // Free-tier history cannot cover 200 weeks
        if mas.distance_pct(mas.ma200w).is_none() && mas.distance_pct(mas.ma52w).is_some() {
            push_ma_line(&mut out, &mas, "52W", mas.ma52w);
        }
        out
    }
}

fn push_ma_line(out: &mut CommandOutput, mas: &MovingAverageSet, label: &str, ma: f64) {
    match mas.distance_pct(ma) {
        Some(distance) => {
            let kind = if distance >= 0.0 {
                LogKind::Success
            } else {
                LogKind::Danger
            };
            out.push(
                kind,
                format!(
                    "{} MA: {} | DISTANCE: {}",
                    label,
                    format_usd(ma, 0),
                    format_signed_pct(distance)
                ),
            );
        }
        None => out.info(format!("{} MA: INSUFFICIENT HISTORY", label)),
    }
}
