//! Static provider and model tables.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A hosted inference provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    Groq,
    HuggingFace,
    OpenRouter,
    GoogleGemini,
}

/// One selectable model in a provider's menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelOption {
    /// Menu text shown to the user
    pub label: &'static str,
    /// Model identifier understood by the provider's API
    pub id: &'static str,
}

const fn model(label: &'static str, id: &'static str) -> ModelOption {
    ModelOption { label, id }
}

const GROQ_MODELS: &[ModelOption] = &[
    model("Llama 3.3 70b", "llama-3.3-70b-versatile"),
    model("Llama 3 70b 8192", "llama3-70b-8192"),
    model("Deepseek R1", "deepseek-r1-distill-llama-70b"),
];

const HUGGING_FACE_MODELS: &[ModelOption] = &[model(
    "Meta Llama 3.2 3B",
    "meta-llama/Llama-3.2-3B-Instruct",
)];

const OPENROUTER_MODELS: &[ModelOption] = &[
    model("OpenAI: GPT 4o mini", "openai/gpt-4o-mini-search-preview"),
    model("OpenAI: GPT 4o search preview", "openai/gpt-4o-search-preview"),
    model("Anthropic: Claude 3.7 Sonnet", "anthropic/claude-3.7-sonnet"),
];

const GOOGLE_GEMINI_MODELS: &[ModelOption] = &[
    model("Gemini 2.0 Flash", "gemini-2.0-flash"),
    model("Gemini 2.0 Flash Experimental", "gemini-2.0-flash-exp"),
    model("Gemini 2.0 Flash Thinking", "gemini-2.0-flash-thinking-exp-01-21"),
    model("Gemini 2.0 Pro", "gemini-2.0-pro-exp"),
];

impl ProviderId {
    /// Providers in main-menu order (choice 1 through 4).
    pub const MENU_ORDER: [ProviderId; 4] = [
        ProviderId::Groq,
        ProviderId::HuggingFace,
        ProviderId::OpenRouter,
        ProviderId::GoogleGemini,
    ];

    /// Stable identifier used in config tables and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderId::Groq => "groq",
            ProviderId::HuggingFace => "hugging_face",
            ProviderId::OpenRouter => "openrouter",
            ProviderId::GoogleGemini => "google_gemini",
        }
    }

    /// Human-readable name for the main menu.
    pub fn label(self) -> &'static str {
        match self {
            ProviderId::Groq => "Groq",
            ProviderId::HuggingFace => "Hugging Face",
            ProviderId::OpenRouter => "OpenRouter",
            ProviderId::GoogleGemini => "Google Gemini",
        }
    }

    /// Conventional environment variable holding this provider's API key.
    pub fn key_env_var(self) -> &'static str {
        match self {
            ProviderId::Groq => "GROQ_API_KEY",
            ProviderId::HuggingFace => "HF_API_KEY",
            ProviderId::OpenRouter => "OPENROUTER_API_KEY",
            ProviderId::GoogleGemini => "GEMINI_API_KEY",
        }
    }

    /// Whether a missing key is rejected before any network call.
    ///
    /// Groq and Gemini leave the decision to the remote API.
    pub fn requires_key(self) -> bool {
        matches!(self, ProviderId::HuggingFace | ProviderId::OpenRouter)
    }

    /// Base URL used when the config does not override it.
    pub fn default_base_url(self) -> &'static str {
        match self {
            ProviderId::Groq => "https://api.groq.com/openai/v1",
            ProviderId::HuggingFace => "https://api-inference.huggingface.co",
            ProviderId::OpenRouter => "https://openrouter.ai/api/v1",
            ProviderId::GoogleGemini => "https://generativelanguage.googleapis.com/v1beta",
        }
    }

    /// Ordered model menu for this provider.
    pub fn models(self) -> &'static [ModelOption] {
        match self {
            ProviderId::Groq => GROQ_MODELS,
            ProviderId::HuggingFace => HUGGING_FACE_MODELS,
            ProviderId::OpenRouter => OPENROUTER_MODELS,
            ProviderId::GoogleGemini => GOOGLE_GEMINI_MODELS,
        }
    }

    /// Model used when the menu choice does not match any entry.
    pub fn default_model(self) -> &'static ModelOption {
        &self.models()[0]
    }

    /// Look up a model by its 1-based menu number.
    ///
    /// Only the exact number as printed matches; `02` or `+2` do not.
    pub fn model_by_choice(self, choice: &str) -> Option<&'static ModelOption> {
        let choice = choice.trim();
        self.models()
            .iter()
            .enumerate()
            .find(|(i, _)| (i + 1).to_string() == choice)
            .map(|(_, model)| model)
    }

    /// Look up a provider by its 1-based main-menu number, matched exactly.
    pub fn from_menu_choice(choice: &str) -> Option<ProviderId> {
        let choice = choice.trim();
        Self::MENU_ORDER
            .iter()
            .enumerate()
            .find(|(i, _)| (i + 1).to_string() == choice)
            .map(|(_, provider)| *provider)
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "groq" => Ok(ProviderId::Groq),
            "hugging_face" => Ok(ProviderId::HuggingFace),
            "openrouter" => Ok(ProviderId::OpenRouter),
            "google_gemini" => Ok(ProviderId::GoogleGemini),
            other => Err(Error::UnknownProvider(other.to_string())),
        }
    }
}
