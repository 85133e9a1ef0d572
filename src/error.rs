//! Error types for infer-cli.

/// Result type alias for infer-cli operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for infer-cli.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Unknown provider '{0}'")]
    UnknownProvider(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error was raised locally, before any network call.
    pub fn is_local(&self) -> bool {
        matches!(self, Error::Config(_) | Error::UnknownProvider(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;

    #[test]
    fn test_config_error_is_local() {
        let err = Error::from(ConfigError::MissingKey {
            var: "HF_API_KEY".to_string(),
            provider: "hugging_face".to_string(),
        });
        assert!(err.is_local());
        assert!(err.to_string().contains("HF_API_KEY"));
    }

    #[test]
    fn test_provider_error_is_not_local() {
        let err = Error::Provider("groq returned 401".to_string());
        assert!(!err.is_local());
        assert_eq!(err.to_string(), "Provider error: groq returned 401");
    }
}
