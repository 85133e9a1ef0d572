//! Configuration parsing and validation for infer-cli.
//!
//! The config file is optional. Without one, every provider uses its default
//! base URL and reads its key from the conventional environment variable
//! (`GROQ_API_KEY`, `HF_API_KEY`, `OPENROUTER_API_KEY`, `GEMINI_API_KEY`).

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::Path;
use std::time::Duration;

use crate::router::ProviderId;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP client settings. Unset timeouts fall back to the client defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds
    pub timeout_secs: Option<u64>,
    /// Connect timeout in seconds
    pub connect_timeout_secs: Option<u64>,
}

impl HttpConfig {
    /// Build the shared HTTP client.
    pub fn build_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = self.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        builder.build()
    }
}

/// API key wrapper that redacts in Debug/Display/Serialize and zeroizes on drop.
#[derive(Clone)]
pub struct ApiKey(SecretString);

impl ApiKey {
    /// Access the raw key value. Every call site is auditable via `grep expose_secret`.
    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl std::fmt::Display for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl Serialize for ApiKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str("[REDACTED]")
    }
}

impl<'de> serde::Deserialize<'de> for ApiKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(|s| ApiKey(SecretString::from(s)))
    }
}

impl From<String> for ApiKey {
    fn from(s: String) -> Self {
        ApiKey(SecretString::from(s))
    }
}

impl From<&str> for ApiKey {
    fn from(s: &str) -> Self {
        ApiKey(SecretString::from(s))
    }
}

/// How a provider's API key was resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum KeySource {
    /// Key was a literal string in config (no ${} references)
    Literal,
    /// Key contained ${VAR} references expanded from environment
    EnvExpanded,
    /// Key came from the provider's conventional env var (holds var name)
    Convention(String),
    /// No key available
    None,
}

impl std::fmt::Display for KeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeySource::Literal => write!(f, "config-literal"),
            KeySource::EnvExpanded => write!(f, "env-expanded"),
            KeySource::Convention(var) => write!(f, "convention ({})", var),
            KeySource::None => write!(f, "none"),
        }
    }
}

/// Per-provider overrides.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderConfig {
    /// Base URL for the provider's API; defaults to the vendor endpoint
    pub base_url: Option<String>,
    /// API key, literal or containing `${VAR}` references
    pub api_key: Option<ApiKey>,
}

/// Provider tables, one per supported provider.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub groq: ProviderConfig,
    #[serde(default)]
    pub hugging_face: ProviderConfig,
    #[serde(default)]
    pub openrouter: ProviderConfig,
    #[serde(default)]
    pub google_gemini: ProviderConfig,
}

impl ProvidersConfig {
    /// Settings for one provider.
    pub fn get(&self, provider: ProviderId) -> &ProviderConfig {
        match provider {
            ProviderId::Groq => &self.groq,
            ProviderId::HuggingFace => &self.hugging_face,
            ProviderId::OpenRouter => &self.openrouter,
            ProviderId::GoogleGemini => &self.google_gemini,
        }
    }

    /// Mutable settings for one provider.
    pub fn get_mut(&mut self, provider: ProviderId) -> &mut ProviderConfig {
        match provider {
            ProviderId::Groq => &mut self.groq,
            ProviderId::HuggingFace => &mut self.hugging_face,
            ProviderId::OpenRouter => &mut self.openrouter,
            ProviderId::GoogleGemini => &mut self.google_gemini,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level, overridden by RUST_LOG when set
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            source: e,
        })?;

        Self::parse_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        for provider in ProviderId::MENU_ORDER {
            if let Some(url) = &self.providers.get(provider).base_url {
                if url.is_empty() {
                    return Err(ConfigError::Validation(format!(
                        "Provider '{}' has empty base_url",
                        provider
                    )));
                }
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    return Err(ConfigError::Validation(format!(
                        "Provider '{}' base_url must be http(s): {}",
                        provider, url
                    )));
                }
            }
        }

        Ok(())
    }

    /// Effective base URL for a provider, without a trailing slash.
    pub fn base_url(&self, provider: ProviderId) -> &str {
        self.providers
            .get(provider)
            .base_url
            .as_deref()
            .unwrap_or_else(|| provider.default_base_url())
            .trim_end_matches('/')
    }

    /// Resolve a provider's API key using a custom environment lookup.
    ///
    /// - `api_key` containing `${VAR}`: expanded, source = `EnvExpanded`
    /// - `api_key` literal: used as is, source = `Literal`
    /// - `api_key` absent: the provider's conventional env var,
    ///   source = `Convention(var_name)` or `KeySource::None`
    ///
    /// An empty resolved value counts as no key.
    pub fn resolve_key_with<F>(
        &self,
        provider: ProviderId,
        lookup: F,
    ) -> Result<(Option<ApiKey>, KeySource), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (value, source) = match &self.providers.get(provider).api_key {
            Some(raw_key) if raw_key.expose_secret().contains("${") => {
                let expanded =
                    expand_env_vars_with(raw_key.expose_secret(), provider.as_str(), &lookup)?;
                (Some(ApiKey::from(expanded)), KeySource::EnvExpanded)
            }
            Some(raw_key) => (Some(raw_key.clone()), KeySource::Literal),
            None => {
                let var_name = provider.key_env_var();
                match lookup(var_name) {
                    Some(value) => (
                        Some(ApiKey::from(value)),
                        KeySource::Convention(var_name.to_string()),
                    ),
                    None => (None, KeySource::None),
                }
            }
        };

        match value {
            Some(key) if !key.expose_secret().is_empty() => Ok((Some(key), source)),
            _ => Ok((None, KeySource::None)),
        }
    }

    /// Resolve a provider's API key from the process environment.
    pub fn resolve_key(
        &self,
        provider: ProviderId,
    ) -> Result<(Option<ApiKey>, KeySource), ConfigError> {
        self.resolve_key_with(provider, |name| std::env::var(name).ok())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Configuration validation error: {0}")]
    Validation(String),

    #[error("Environment variable '{var}' not set for provider '{provider}': {message}")]
    EnvVar {
        var: String,
        provider: String,
        message: String,
    },

    #[error("Please set the {var} environment variable.")]
    MissingKey { var: String, provider: String },
}

/// Expand all `${VAR}` references in a string using a custom lookup function.
///
/// Supports multiple `${VAR}` in one string. Fails on first missing variable,
/// unclosed `${`, or empty variable name.
fn expand_env_vars_with<F>(
    input: &str,
    provider_name: &str,
    lookup: F,
) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if !input.contains("${") {
        return Ok(input.to_string());
    }

    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        // The input may be a secret; never echo it back in the error.
        let end = after.find('}').ok_or_else(|| ConfigError::EnvVar {
            var: "<unclosed>".to_string(),
            provider: provider_name.to_string(),
            message: "Unclosed '${' in api_key".to_string(),
        })?;

        let var_name = &after[..end];
        if var_name.is_empty() {
            return Err(ConfigError::EnvVar {
                var: "".to_string(),
                provider: provider_name.to_string(),
                message: "Empty variable name in '${}' reference".to_string(),
            });
        }

        let value = lookup(var_name).ok_or_else(|| ConfigError::EnvVar {
            var: var_name.to_string(),
            provider: provider_name.to_string(),
            message: format!(
                "Environment variable '{}' is not set (referenced in provider '{}')",
                var_name, provider_name
            ),
        })?;

        result.push_str(&value);
        rest = &after[end + 1..];
    }

    result.push_str(rest);
    Ok(result)
}
