use config::ConfigError;
use std::num::ParseIntError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),
    #[error("Logging error: {0}")]
    LoggingError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("API error: {0}")]
    ApiError(String),
    #[error("JSON parse error: {0}")]
    JsonParseError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Parse int error: {0}")]
    ParseIntError(#[from] ParseIntError),
    #[error("ABI decode error: {0}")]
    DecodeError(String),
    #[error("Unsupported contract: {0}")]
    UnsupportedContract(String),
    #[error("Concern filter error: {0}")]
    FilterError(String),
    #[error("Notify error: {0}")]
    NotifyError(String),
}

pub type ScannerResult<T> = Result<T, AppError>;
