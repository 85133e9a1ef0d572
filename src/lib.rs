//! infer-cli - Interactive menu for hosted LLM inference providers
//!
//! This library provides the provider catalog, the dispatcher that calls
//! Groq, Hugging Face, OpenRouter, and Google Gemini, and the menus that
//! drive an interactive session.

pub mod config;
pub mod error;
pub mod menu;
pub mod provider;
pub mod router;
pub mod session;

pub use config::Config;
pub use error::{Error, Result};
pub use router::{Dispatcher, ProviderId, ResultSet};
pub use session::Session;
