//! Google Gemini generateContent.

use reqwest::{header, Client};

use super::check_status;
use super::types::{GenerateContentRequest, GenerateContentResponse};
use crate::config::ApiKey;
use crate::error::{Error, Result};
use crate::router::ProviderId;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// POST `{base_url}/models/{model}:generateContent`.
pub async fn generate_content(
    client: &Client,
    base_url: &str,
    api_key: Option<&ApiKey>,
    model: &str,
    query: &str,
) -> Result<GenerateContentResponse> {
    let provider = ProviderId::GoogleGemini;
    let url = format!(
        "{}/models/{}:generateContent",
        base_url.trim_end_matches('/'),
        model
    );

    let mut upstream_request = client
        .post(&url)
        .header(header::CONTENT_TYPE, "application/json")
        .json(&GenerateContentRequest::from_text(query));

    if let Some(api_key) = api_key {
        upstream_request = upstream_request.header(API_KEY_HEADER, api_key.expose_secret());
    }

    tracing::debug!(url = %url, "Sending generateContent");

    let response = upstream_request.send().await.map_err(|e| {
        tracing::error!(error = %e, provider = %provider, "Failed to reach provider");
        Error::Provider(format!("Failed to reach provider '{}': {}", provider, e))
    })?;

    let response = check_status(provider, response).await?;

    response
        .json::<GenerateContentResponse>()
        .await
        .map_err(|e| {
            Error::Provider(format!(
                "Failed to parse response from '{}': {}",
                provider, e
            ))
        })
}
