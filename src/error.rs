use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Zero risk distance: entry {entry} equals stop {stop}")]
    ZeroRiskDistance { entry: f64, stop: f64 },

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl AppError {
    /// Short uppercase message for terminal output.
    pub fn terminal_message(&self) -> String {
        match self {
            AppError::ZeroRiskDistance { .. } => {
                "ENTRY AND STOP ARE EQUAL. RISK DISTANCE IS ZERO.".to_string()
            }
            AppError::InvalidInput(msg) => msg.to_uppercase(),
            other => other.to_string().to_uppercase(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
