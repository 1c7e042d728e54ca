mod tui;

use btc_oracle::{CommandOutput, Config, Dispatcher, LiveFeed, LogKind};
use clap::Parser;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// BTC trading-bias oracle.
#[derive(Parser, Debug)]
#[command(name = "btc-oracle", version, about = "BTC trading-bias oracle", long_about = None)]
struct Cli {
    /// Run one command and exit (e.g. `play`, `calc 97000 96000`). Starts the terminal UI when empty.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

fn default_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "btc_oracle=info".into())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env();

    if cli.command.is_empty() {
        // The terminal UI owns stdout, so logs go to a file
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)?;
        tracing_subscriber::registry()
            .with(default_filter())
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(default_filter())
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    info!(
        "Starting BTC Oracle (account size {}, coingecko key: {})",
        config.account_size,
        config.coingecko_api_key.is_some()
    );

    let feed = LiveFeed::new(&config)?;
    let mut dispatcher = Dispatcher::new(feed, &config);

    if cli.command.is_empty() {
        tui::run_tui(dispatcher).await?;
        return Ok(());
    }

    let output = dispatcher.run_line(&cli.command.join(" ")).await;
    print_output(&output);

    if output.has_error() {
        std::process::exit(1);
    }
    Ok(())
}

fn print_output(output: &CommandOutput) {
    for line in &output.lines {
        match line.kind {
            LogKind::Error => eprintln!("{}", line.text),
            _ => println!("{}", line.text),
        }
    }
}
