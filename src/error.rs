//! Error handling for the screener

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScreenerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("PDF extraction error: {0}")]
    Extraction(String),

    #[error("Provider failure: {0}")]
    ProviderFailure(String),

    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

/// Coarse classification used by the screening state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Extraction,
    ProviderFailure,
    MalformedResponse,
    Other,
}

impl ScreenerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScreenerError::Validation(_) => ErrorKind::Validation,
            ScreenerError::Extraction(_) => ErrorKind::Extraction,
            ScreenerError::ProviderFailure(_) => ErrorKind::ProviderFailure,
            ScreenerError::MalformedResponse(_) => ErrorKind::MalformedResponse,
            _ => ErrorKind::Other,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScreenerError>;

/// Transport-level reqwest failures (connect, timeout, body read) come from the provider side
impl From<reqwest::Error> for ScreenerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ScreenerError::ProviderFailure(format!("request timed out: {}", err))
        } else {
            ScreenerError::ProviderFailure(err.to_string())
        }
    }
}
