//! Unified error type for Atrium
//!
//! Failures inside the engine are narrow: configuration defects, malformed
//! tokens, and collaborator I/O. Permission denial is never an error; the
//! query API answers `false` instead.

use serde::{Deserialize, Serialize};

/// Unified error type for all fallible Atrium operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum AtriumError {
    /// Invalid input, token or configuration value
    #[error("Invalid: {message}")]
    Invalid {
        /// Error message describing the invalid input
        message: String,
    },

    /// Referenced record does not exist
    #[error("Not found: {message}")]
    NotFound {
        /// Error message describing what was not found
        message: String,
    },

    /// Configuration could not be loaded or parsed
    #[error("Config error: {message}")]
    Config {
        /// Error message describing the configuration failure
        message: String,
    },

    /// Identity collaborator failure
    #[error("Identity error: {message}")]
    Identity {
        /// Error message describing the identity failure
        message: String,
    },

    /// Filesystem failure while reading configuration data
    #[error("I/O error: {message}")]
    Io {
        /// Error message describing the I/O failure
        message: String,
    },
}

impl AtriumError {
    /// Create an invalid input error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an identity collaborator error
    pub fn identity(message: impl Into<String>) -> Self {
        Self::Identity {
            message: message.into(),
        }
    }

    /// Create an I/O error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Short category label for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Invalid { .. } => "invalid",
            Self::NotFound { .. } => "not_found",
            Self::Config { .. } => "config",
            Self::Identity { .. } => "identity",
            Self::Io { .. } => "io",
        }
    }
}

impl From<std::io::Error> for AtriumError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

impl From<toml::de::Error> for AtriumError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(err.to_string())
    }
}

/// Standard result type for Atrium operations
pub type AtriumResult<T> = Result<T, AtriumError>;
