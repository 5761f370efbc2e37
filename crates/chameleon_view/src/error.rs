//! Host error types

use std::path::PathBuf;

use chameleon_theme::ThemeError;
use thiserror::Error;

/// Errors raised while setting up a host
#[derive(Debug, Error)]
pub enum HostError {
    /// Resource document failed to parse
    #[error("invalid resource document: {0}")]
    Resources(#[source] toml::de::Error),

    /// Layout markup failed to parse
    #[error("invalid layout markup: {0}")]
    Layout(#[source] toml::de::Error),

    /// A file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Theming is not wired into this host
    #[error(transparent)]
    Theme(#[from] ThemeError),
}

/// Result type for host operations
pub type Result<T> = std::result::Result<T, HostError>;
