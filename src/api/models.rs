use serde::Serialize;
use chrono::{DateTime, Utc};

use crate::output::GenerationResult;

pub use crate::generator::FormState as GenerateRequest;

#[derive(Serialize)]
pub struct GenerateResponse {
    pub url: String,
    pub output: GenerationResult,
    pub generated_at: DateTime<Utc>,
}
