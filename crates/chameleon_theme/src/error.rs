//! Theming error types
//!
//! Only setup failures are errors. Missing styles and vanished views at
//! runtime degrade to [`StyleRes::UNDEFINED`](crate::StyleRes::UNDEFINED).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThemeError {
    /// The host's inflation pipeline has no styled view factory installed
    #[error("host has no styled view factory installed; wrap its base resources before inflating views")]
    HostNotWrapped,

    /// A config document failed to parse
    #[error("invalid theme config: {0}")]
    Config(#[from] toml::de::Error),

    /// A config file could not be read
    #[error("failed to read theme config: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for theming setup operations
pub type Result<T> = std::result::Result<T, ThemeError>;
