//! Hugging Face serverless text generation.

use reqwest::{header, Client};
use serde_json::Value;

use super::check_status;
use super::types::TextGenerationRequest;
use crate::config::ApiKey;
use crate::error::{Error, Result};
use crate::router::ProviderId;

/// Placeholder result when a response object lacks `generated_text`.
pub const NO_TEXT_RETURNED: &str = "No text returned";

/// POST `{base_url}/models/{model}` and return the raw JSON body.
///
/// Models answer either with a list of objects or a single object, so the
/// body is kept untyped until [`normalize_text_generation`] looks at it.
pub async fn text_generation(
    client: &Client,
    base_url: &str,
    api_key: &ApiKey,
    model: &str,
    query: &str,
) -> Result<Value> {
    let provider = ProviderId::HuggingFace;
    let url = format!("{}/models/{}", base_url.trim_end_matches('/'), model);

    let request = TextGenerationRequest {
        inputs: query.to_string(),
    };

    tracing::debug!(url = %url, "Sending text generation");

    let response = client
        .post(&url)
        .header(header::CONTENT_TYPE, "application/json")
        .header(
            header::AUTHORIZATION,
            format!("Bearer {}", api_key.expose_secret()),
        )
        .json(&request)
        .send()
        .await
        .map_err(|e| {
            tracing::error!(error = %e, provider = %provider, "Failed to reach provider");
            Error::Provider(format!("Failed to reach provider '{}': {}", provider, e))
        })?;

    let response = check_status(provider, response).await?;

    response.json::<Value>().await.map_err(|e| {
        Error::Provider(format!(
            "Failed to parse response from '{}': {}",
            provider, e
        ))
    })
}

/// Extract the generated text from whichever shape the model returned.
///
/// - non-empty list: `generated_text` of the first element
/// - object: its `generated_text`
/// - anything else: the value converted to a string
pub fn normalize_text_generation(response: &Value) -> String {
    match response {
        Value::Array(items) if !items.is_empty() => generated_text(&items[0]),
        Value::Object(_) => generated_text(response),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn generated_text(item: &Value) -> String {
    match item.get("generated_text") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => NO_TEXT_RETURNED.to_string(),
    }
}
