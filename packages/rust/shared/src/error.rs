//! Error types for terradex.
//!
//! Library crates use [`TerradexError`] via `thiserror`.
//! App crates (cli/tui) wrap this with `color-eyre` for rich diagnostics.
//!
//! Navigation, search, rendering and anchor resolution never produce these
//! errors. Only configuration and schema acquisition can fail.

use std::path::PathBuf;

/// Top-level error type for all terradex operations.
#[derive(Debug, thiserror::Error)]
pub enum TerradexError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Schema document could not be decoded.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// The schema-producing subprocess failed or could not be spawned.
    #[error("loader error: {0}")]
    Loader(String),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error (unsupported format version, bad flag value, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, TerradexError>;

impl TerradexError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = TerradexError::config("unknown schema source 'ftp'");
        assert_eq!(err.to_string(), "config error: unknown schema source 'ftp'");

        let err = TerradexError::Loader("tofu exited with status 1".into());
        assert!(err.to_string().starts_with("loader error:"));

        let err = TerradexError::io(
            "/tmp/missing.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert!(err.to_string().contains("/tmp/missing.json"));
    }
}
