//! Structured log installation
//!
//! - Logs go to stderr; stdout carries only the progress report
//! - `RUST_LOG` wins over the configured level
//! - Installing twice is an error, not a panic

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Observability errors. Never fatal to a validation run on their own.
#[derive(Debug, Error)]
pub enum ObservabilityError {
    #[error("Invalid log filter '{filter}': {message}")]
    InvalidFilter { filter: String, message: String },

    #[error("Log subscriber already installed: {0}")]
    AlreadyInstalled(String),
}

/// Result type for observability operations
pub type ObservabilityResult<T> = Result<T, ObservabilityError>;

/// Builds the log filter from `RUST_LOG`, falling back to `default_level`.
pub fn build_filter(default_level: &str) -> ObservabilityResult<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(default_level).map_err(|e| ObservabilityError::InvalidFilter {
        filter: default_level.to_string(),
        message: e.to_string(),
    })
}

/// Installs the global `tracing` subscriber.
pub fn init_logging(default_level: &str) -> ObservabilityResult<()> {
    let filter = build_filter(default_level)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| ObservabilityError::AlreadyInstalled(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_level_is_valid_filter() {
        assert!(EnvFilter::try_new("warn").is_ok());
    }

    #[test]
    fn test_second_install_is_an_error() {
        let _ = init_logging("warn");
        assert!(matches!(
            init_logging("warn"),
            Err(ObservabilityError::AlreadyInstalled(_))
        ));
    }
}
