//! HTTP calls to the vendor inference APIs.
//!
//! Each function performs exactly one request and returns the decoded vendor
//! response. Turning that response into a result set is the dispatcher's job.

mod gemini;
mod huggingface;
mod openai_compat;
pub mod types;

pub use gemini::generate_content;
pub use huggingface::{normalize_text_generation, text_generation, NO_TEXT_RETURNED};
pub use openai_compat::chat_completion;

use crate::error::{Error, Result};
use crate::router::ProviderId;

/// Turn a non-success upstream response into a provider error.
async fn check_status(
    provider: ProviderId,
    response: reqwest::Response,
) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_body = response.text().await.unwrap_or_default();
    tracing::error!(
        status = %status,
        provider = %provider,
        body = %error_body,
        "Provider returned error"
    );
    Err(Error::Provider(format!(
        "Provider '{}' returned {}: {}",
        provider, status, error_body
    )))
}
