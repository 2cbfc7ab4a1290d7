//! Error types for Ponder Core.

use thiserror::Error;

/// Result type alias for Ponder operations.
pub type Result<T> = std::result::Result<T, PonderError>;

/// Errors that can occur in Ponder operations.
///
/// Only the tokenizer and configuration boundaries are fallible. The
/// per-step hot path (`accept`/`apply`) never errors; anomalies there
/// degrade locally instead (an unresolvable tag disables its transition, a
/// missing bias target is a no-op, an empty candidate set leaves the
/// selection unset).
#[derive(Error, Debug)]
pub enum PonderError {
    /// Tokenizer loading or encoding error.
    #[error("tokenizer error: {0}")]
    TokenizerError(String),

    /// Invalid configuration.
    #[error("config error: {0}")]
    ConfigError(String),

    /// I/O error.
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}
