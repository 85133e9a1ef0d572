//! Routing a (provider, model, query) triple to its vendor call.

use std::sync::Arc;

use reqwest::Client;

use super::catalog::ProviderId;
use crate::config::{ApiKey, Config, ConfigError};
use crate::error::{Error, Result};
use crate::provider as upstream;

/// Normalized answers to one query. Holds zero or one element today.
pub type ResultSet = Vec<String>;

/// Result returned by OpenRouter when the completion has no choices.
pub const NO_RESPONSE_FROM_OPENROUTER: &str = "No response from OpenRouter";

/// Environment lookup used to resolve API keys at call time.
pub type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Sends queries to the selected provider and normalizes the answers.
#[derive(Clone)]
pub struct Dispatcher {
    config: Arc<Config>,
    http_client: Client,
    env: EnvLookup,
}

impl Dispatcher {
    /// Create a dispatcher with an HTTP client built from the config.
    pub fn new(config: Config) -> Result<Self> {
        if let Some(url) = &config.providers.openrouter.base_url {
            tracing::warn!(
                base_url = %url,
                "OpenRouter base_url overridden; only intended for local mocks or gateways"
            );
        }
        let http_client = config.http.build_client()?;
        Ok(Self::with_client(config, http_client))
    }

    /// Create a dispatcher around an existing HTTP client.
    pub fn with_client(config: Config, http_client: Client) -> Self {
        Self {
            config: Arc::new(config),
            http_client,
            env: Arc::new(|name: &str| std::env::var(name).ok()),
        }
    }

    /// Replace the process environment as the source of API keys.
    pub fn with_env_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.env = Arc::new(lookup);
        self
    }

    /// Resolve the provider's key, if one is configured.
    fn api_key(&self, provider: ProviderId) -> Result<Option<ApiKey>> {
        let env = self.env.as_ref();
        let (key, source) = self.config.resolve_key_with(provider, |name| env(name))?;
        tracing::debug!(provider = %provider, key_source = %source, "Resolved API key");
        Ok(key)
    }

    /// Resolve a key the provider cannot be called without.
    ///
    /// Fails before any network call when the key is missing.
    fn required_key(&self, provider: ProviderId) -> Result<ApiKey> {
        self.api_key(provider)?.ok_or_else(|| {
            tracing::warn!(provider = %provider, "API key missing, not sending request");
            ConfigError::MissingKey {
                var: provider.key_env_var().to_string(),
                provider: provider.to_string(),
            }
            .into()
        })
    }

    /// Dispatch by provider name. Unknown names yield an empty result set.
    pub async fn dispatch_named(&self, provider: &str, model: &str, query: &str) -> Result<ResultSet> {
        match provider.parse::<ProviderId>() {
            Ok(provider) => self.dispatch(provider, model, query).await,
            Err(_) => {
                tracing::warn!(provider = %provider, "Unknown provider, returning no results");
                Ok(Vec::new())
            }
        }
    }

    /// Send `query` to `model` on `provider` and normalize the answer.
    pub async fn dispatch(&self, provider: ProviderId, model: &str, query: &str) -> Result<ResultSet> {
        tracing::info!(provider = %provider, model = %model, "Dispatching query");

        let base_url = self.config.base_url(provider);

        match provider {
            ProviderId::Groq => {
                let api_key = self.api_key(provider)?;
                let response = upstream::chat_completion(
                    &self.http_client,
                    provider,
                    base_url,
                    api_key.as_ref(),
                    model,
                    query,
                )
                .await?;
                let text = response.first_text().ok_or_else(|| {
                    Error::Provider(format!("Provider '{}' returned no choices", provider))
                })?;
                Ok(vec![text])
            }

            ProviderId::GoogleGemini => {
                let api_key = self.api_key(provider)?;
                let response = upstream::generate_content(
                    &self.http_client,
                    base_url,
                    api_key.as_ref(),
                    model,
                    query,
                )
                .await?;
                let text = response.text().ok_or_else(|| {
                    Error::Provider(format!("Provider '{}' returned no text", provider))
                })?;
                Ok(vec![text])
            }

            ProviderId::HuggingFace => {
                let api_key = self.required_key(provider)?;
                let response = upstream::text_generation(
                    &self.http_client,
                    base_url,
                    &api_key,
                    model,
                    query,
                )
                .await?;
                Ok(vec![upstream::normalize_text_generation(&response)])
            }

            ProviderId::OpenRouter => {
                let api_key = self.required_key(provider)?;
                let result = upstream::chat_completion(
                    &self.http_client,
                    provider,
                    base_url,
                    Some(&api_key),
                    model,
                    query,
                )
                .await;

                // Remote failures are reported in-band so the session carries on.
                match result {
                    Ok(response) => Ok(vec![response
                        .first_text()
                        .unwrap_or_else(|| NO_RESPONSE_FROM_OPENROUTER.to_string())]),
                    Err(e) => {
                        tracing::warn!(error = %e, "OpenRouter call failed, reporting in-band");
                        Ok(vec![format!("Error: {}", in_band_message(&e))])
                    }
                }
            }
        }
    }
}

fn in_band_message(error: &Error) -> String {
    match error {
        Error::Provider(message) => message.clone(),
        other => other.to_string(),
    }
}
