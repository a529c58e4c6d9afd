pub mod catalog;
pub mod health;
pub mod stats;

use std::sync::Arc;

use crate::config::AppConfig;

/// Shared state handed to every handler
pub type AppState = Arc<AppConfig>;
