//! One instance of the SEO content form: its inputs, its request status and
//! the last result it produced.

use std::sync::Arc;

use serde::Deserialize;

use crate::error::{AppError, Result, URL_REQUIRED};
use crate::llm::{ChatClient, ChatCompletionRequest};
use crate::output::GenerationResult;
use crate::prompt::build_messages;
use crate::render::{render, RenderedOutput};

pub const SUBMIT_LABEL: &str = "Generate Content";
pub const LOADING_LABEL: &str = "Generating...";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FormState {
    pub url: String,
    pub keywords: String,
    #[serde(alias = "businessInfo")]
    pub business_info: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Error(AppError),
    Success(GenerationResult),
}

/// What the page shows for an instance at a given moment.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub error: Option<String>,
    pub submit_enabled: bool,
    pub submit_label: &'static str,
    pub output: Option<RenderedOutput>,
}

pub struct SeoGenerator {
    client: Arc<dyn ChatClient>,
    form: FormState,
    status: RequestStatus,
    // Last successful result while the status has moved past Success.
    retained: Option<GenerationResult>,
}

impl SeoGenerator {
    pub fn new(client: Arc<dyn ChatClient>) -> Self {
        Self {
            client,
            form: FormState::default(),
            status: RequestStatus::Idle,
            retained: None,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn status(&self) -> &RequestStatus {
        &self.status
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.form.url = url.into();
    }

    pub fn set_keywords(&mut self, keywords: impl Into<String>) {
        self.form.keywords = keywords.into();
    }

    pub fn set_business_info(&mut self, business_info: impl Into<String>) {
        self.form.business_info = business_info.into();
    }

    pub fn set_form(&mut self, form: FormState) {
        self.form = form;
    }

    /// The most recent successful result, even if a later submission is in
    /// flight or failed.
    pub fn output(&self) -> Option<&GenerationResult> {
        match &self.status {
            RequestStatus::Success(result) => Some(result),
            _ => self.retained.as_ref(),
        }
    }

    /// Starts a submission.
    ///
    /// Returns the request to send, or `None` when nothing may be sent: either
    /// a request is already in flight (state untouched) or the URL is missing
    /// (state is now `Error`).
    pub fn begin_submit(&mut self) -> Option<ChatCompletionRequest> {
        if self.status == RequestStatus::Loading {
            log::debug!("Submission ignored, a request is already in flight");
            return None;
        }

        // Clears any previous error.
        if let RequestStatus::Success(previous) = std::mem::replace(&mut self.status, RequestStatus::Loading) {
            self.retained = Some(previous);
        }

        if self.form.url.trim().is_empty() {
            self.status = RequestStatus::Error(AppError::Validation(URL_REQUIRED.to_string()));
            return None;
        }

        Some(ChatCompletionRequest::new(build_messages(&self.form)))
    }

    /// Applies the outcome of the exchange started by [`begin_submit`].
    ///
    /// [`begin_submit`]: SeoGenerator::begin_submit
    pub fn finish_submit(&mut self, outcome: Result<Option<String>>) {
        let parsed = outcome.and_then(|content| {
            GenerationResult::parse(content.as_deref().unwrap_or("{}"))
        });

        match parsed {
            Ok(result) => {
                self.retained = None;
                self.status = RequestStatus::Success(result);
            }
            Err(err) => {
                log::error!("Generation failed for {}: {}", self.form.url, err);
                self.status = RequestStatus::Error(err);
            }
        }
    }

    /// Runs one full submission against the configured client.
    ///
    /// Fails with [`AppError::InFlight`] when an earlier submission on this
    /// instance never finished.
    pub async fn submit(&mut self) -> Result<&GenerationResult> {
        let Some(request) = self.begin_submit() else {
            return self.outcome();
        };

        log::info!("Requesting SEO content for {}", self.form.url);
        let start = std::time::Instant::now();
        let outcome = self.client.complete(&request).await;
        log::info!("LLM call finished in {:?}", start.elapsed());

        self.finish_submit(outcome);
        self.outcome()
    }

    fn outcome(&self) -> Result<&GenerationResult> {
        match &self.status {
            RequestStatus::Success(result) => Ok(result),
            RequestStatus::Error(err) => Err(err.clone()),
            RequestStatus::Idle | RequestStatus::Loading => Err(AppError::InFlight),
        }
    }

    pub fn view(&self) -> View {
        let loading = self.status == RequestStatus::Loading;
        View {
            error: match &self.status {
                RequestStatus::Error(err) => Some(err.user_message()),
                _ => None,
            },
            submit_enabled: !loading,
            submit_label: if loading { LOADING_LABEL } else { SUBMIT_LABEL },
            output: self.output().map(render),
        }
    }
}
