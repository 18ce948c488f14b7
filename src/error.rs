use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for card-diff operations
pub type Result<T> = std::result::Result<T, CardDiffError>;

/// Error types for card-diff operations
#[derive(Debug, Error)]
pub enum CardDiffError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Payload parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Invalid payload: {message}")]
    InvalidPayload { message: String },

    #[error("Malformed {kind} fragment: {message}")]
    MalformedFragment { kind: String, message: String },

    #[error("Tab '{tab}' not found")]
    TabNotFound { tab: String },

    #[error("Data provider failed for card {card_id}: {message}")]
    Provider { card_id: String, message: String },

    #[error("General error: {message}")]
    General { message: String },
}

impl CardDiffError {
    /// Create a new invalid configuration error
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a new invalid payload error
    pub fn invalid_payload<S: Into<String>>(message: S) -> Self {
        Self::InvalidPayload {
            message: message.into(),
        }
    }

    /// Create a new malformed fragment error (`kind` is "style" or "script")
    pub fn malformed_fragment<S: Into<String>>(kind: S, message: S) -> Self {
        Self::MalformedFragment {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Create a new data provider error
    pub fn provider<S: Into<String>>(card_id: S, message: S) -> Self {
        Self::Provider {
            card_id: card_id.into(),
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }
}
