// src/error.rs
//! Error type shared by every fallible client operation.
//!
//! The `Display` text of each variant is what the user sees after `Ошибка: `
//! in the status area, so messages stay short and self-contained.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    /// Connection refused, DNS failure, broken pipe and friends.
    #[error("{0}")]
    Transport(String),

    /// The backend answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The backend answered 2xx but the payload does not fit the contract.
    #[error("{0}")]
    Decode(String),

    /// Empty or malformed user input.
    #[error("{0}")]
    Input(String),

    #[error("CSV: {0}")]
    Csv(String),

    #[error("{0}")]
    Io(String),

    #[error("configuration: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            ClientError::Decode(value.to_string())
        } else {
            ClientError::Transport(value.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(value: serde_json::Error) -> Self {
        ClientError::Decode(value.to_string())
    }
}

impl From<csv::Error> for ClientError {
    fn from(value: csv::Error) -> Self {
        ClientError::Csv(value.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(value: std::io::Error) -> Self {
        ClientError::Io(value.to_string())
    }
}

impl From<config::ConfigError> for ClientError {
    fn from(value: config::ConfigError) -> Self {
        ClientError::Config(value.to_string())
    }
}

impl From<ron::Error> for ClientError {
    fn from(value: ron::Error) -> Self {
        ClientError::Config(value.to_string())
    }
}

impl From<ron::error::SpannedError> for ClientError {
    fn from(value: ron::error::SpannedError) -> Self {
        ClientError::Config(value.to_string())
    }
}
