//! Request and response types for the vendor inference APIs.

use serde::{Deserialize, Serialize};

/// Chat completion request (OpenAI-compatible, used by Groq and OpenRouter).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
}

/// A chat message.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl ChatCompletionRequest {
    /// Single-turn request carrying one user message.
    pub fn single_user(model: &str, query: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![Message {
                role: "user".to_string(),
                content: query.to_string(),
            }],
        }
    }
}

/// Chat completion response. Only the fields we read are modeled.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// A completion choice.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

/// Assistant message in a completion choice. `content` may be null.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Text of the first choice, if any choice was returned.
    pub fn first_text(&self) -> Option<String> {
        self.choices
            .first()
            .map(|c| c.message.content.clone().unwrap_or_default())
    }
}

/// Gemini generateContent request.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

/// Gemini content block.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Gemini content part. Non-text parts deserialize with `text: None`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl GenerateContentRequest {
    pub fn from_text(query: &str) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(query.to_string()),
                }],
            }],
        }
    }
}

/// Gemini generateContent response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    ///
    /// Returns `None` when there is no candidate or it carries no text part.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let texts: Vec<&str> = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }
}

/// Hugging Face text-generation request.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TextGenerationRequest {
    pub inputs: String,
}
