//! services/console/src/error.rs
//!
//! Defines the primary error type for the console service.

use crate::config::ConfigError;

/// The primary error type for the `console` service.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents a failure building the HTTP client.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Represents a standard Input/Output error (e.g., reading the terminal).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_failures_keep_their_cause() {
        let err: ConsoleError =
            ConfigError::InvalidValue("REQUEST_TIMEOUT_SECS".to_string(), "0".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid value for the environment variable REQUEST_TIMEOUT_SECS: 0"
        );

        let err: ConsoleError =
            std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdout closed").into();
        assert!(matches!(err, ConsoleError::Io(_)));
        assert_eq!(err.to_string(), "IO error: stdout closed");
    }
}
