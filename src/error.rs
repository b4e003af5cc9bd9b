use thiserror::Error;

pub type Result<T> = std::result::Result<T, SmartCareError>;

#[derive(Error, Debug)]
pub enum SmartCareError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("insufficient balance: have {available}, need {required}")]
    InsufficientFunds { available: u64, required: u64 },
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("balance changed concurrently, payment aborted")]
    BalanceConflict,
    #[error("no active session, please log in first")]
    NoSession,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl From<reqwest::Error> for SmartCareError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
