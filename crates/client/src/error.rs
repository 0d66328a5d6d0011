use engine::EngineError;
use thiserror::Error;

use crate::sync::SyncError;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Input(#[from] EngineError),
    #[error("not logged in or session expired: run `expense login --token <TOKEN>`")]
    SessionExpired,
    #[error("{0}")]
    Sync(SyncError),
}

impl From<SyncError> for AppError {
    fn from(value: SyncError) -> Self {
        match value {
            SyncError::AuthExpired => Self::SessionExpired,
            other => Self::Sync(other),
        }
    }
}
