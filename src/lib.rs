pub mod api;
pub mod config;
pub mod error;
pub mod generator;
pub mod llm;
pub mod output;
pub mod prompt;
pub mod render;

use std::sync::Arc;
use llm::ChatClient;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn ChatClient>,
}
