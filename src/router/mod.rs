//! Router module: provider catalog and query dispatch.
//!
//! This module handles:
//! - The static provider and model tables shown in the menus
//! - Routing a query to the selected provider's API
//! - Normalizing each vendor's response into a result set

mod catalog;
mod dispatch;

pub use catalog::{ModelOption, ProviderId};
pub use dispatch::{Dispatcher, EnvLookup, ResultSet, NO_RESPONSE_FROM_OPENROUTER};
