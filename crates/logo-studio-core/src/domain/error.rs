//! Crate-level error taxonomy for Logo Studio.

use crate::host::HostError;

/// Errors produced while loading [`StudioConfig`](crate::config::StudioConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// Logo Studio errors.
///
/// Generation failures never surface here: they are classified and stored as
/// presentation state by the orchestrator.
#[derive(Debug, thiserror::Error)]
pub enum StudioError {
    #[error("host capability error: {0}")]
    Host(#[from] HostError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for Logo Studio operations.
pub type Result<T> = std::result::Result<T, StudioError>;
