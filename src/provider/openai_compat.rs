//! OpenAI-compatible chat completions (Groq, OpenRouter).

use reqwest::{header, Client};

use super::check_status;
use super::types::{ChatCompletionRequest, ChatCompletionResponse};
use crate::config::ApiKey;
use crate::error::{Error, Result};
use crate::router::ProviderId;

/// POST `{base_url}/chat/completions` with a single user message.
pub async fn chat_completion(
    client: &Client,
    provider: ProviderId,
    base_url: &str,
    api_key: Option<&ApiKey>,
    model: &str,
    query: &str,
) -> Result<ChatCompletionResponse> {
    let url = format!("{}/chat/completions", base_url.trim_end_matches('/'));
    let request = ChatCompletionRequest::single_user(model, query);

    let mut upstream_request = client
        .post(&url)
        .header(header::CONTENT_TYPE, "application/json")
        .json(&request);

    if let Some(api_key) = api_key {
        upstream_request = upstream_request.header(
            header::AUTHORIZATION,
            format!("Bearer {}", api_key.expose_secret()),
        );
    }

    tracing::debug!(provider = %provider, url = %url, model = %model, "Sending chat completion");

    let response = upstream_request.send().await.map_err(|e| {
        tracing::error!(error = %e, provider = %provider, "Failed to reach provider");
        Error::Provider(format!("Failed to reach provider '{}': {}", provider, e))
    })?;

    let response = check_status(provider, response).await?;

    response.json::<ChatCompletionResponse>().await.map_err(|e| {
        tracing::error!(error = %e, provider = %provider, "Failed to parse provider response");
        Error::Provider(format!(
            "Failed to parse response from '{}': {}",
            provider, e
        ))
    })
}
