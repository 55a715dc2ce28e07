//! SemSense: renders semester form data into a fixed advisor prompt, relays it
//! to Gemini and hands the model output back untouched.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use padikk_config::SemSenseConfig;

pub mod gemini;
pub mod prompt;

pub use gemini::{GeminiClient, TextGenerator};
pub use prompt::{SemesterPlanRequest, Subject};

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("[{status}] {message}")]
    Upstream { status: String, message: String },
    #[error("gemini request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("gemini returned no text: {0}")]
    EmptyResponse(String),
}

#[derive(Debug, Error)]
pub enum SemSenseError {
    #[error("Missing required fields: semesterNumber, subjects, weeklyAvailableHours")]
    MissingFields,
    #[error("Gemini API key not configured")]
    NotConfigured,
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// How a failed generation is reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidApiKey,
    RateLimited,
    Other,
}

/// Classify an upstream failure by its message, checking for `API key` first.
pub fn classify_failure(message: &str) -> FailureKind {
    if message.contains("API key") {
        FailureKind::InvalidApiKey
    } else if message.contains("rate limit") {
        FailureKind::RateLimited
    } else {
        FailureKind::Other
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterPlan {
    pub semester_number: Value,
    pub student_name: Value,
    pub analysis_timestamp: String,
    pub ai_analysis: String,
    pub subjects_count: usize,
    pub weekly_available_hours: Value,
}

#[derive(Clone)]
pub struct SemSense {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl SemSense {
    /// Build the relay from configuration, falling back to `GEMINI_API_KEY`.
    ///
    /// A missing key is not an error here; requests then fail with
    /// [`SemSenseError::NotConfigured`].
    pub fn from_config(config: &SemSenseConfig) -> Result<Self, GenerationError> {
        let configured = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty());
        let api_key_source = if configured.is_some() { "config" } else { "env" };

        let api_key = configured.or_else(|| {
            std::env::var(API_KEY_ENV)
                .ok()
                .filter(|key| !key.trim().is_empty())
        });

        let Some(api_key) = api_key else {
            warn!("GEMINI_API_KEY not set, SemSense requests will be rejected");
            return Ok(Self::disabled());
        };

        debug!(source = api_key_source, model = %config.model, "initialising Gemini client");

        let client = GeminiClient::new(config, api_key)?;
        Ok(Self::with_generator(Arc::new(client)))
    }

    pub fn with_generator(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator: Some(generator),
        }
    }

    pub fn disabled() -> Self {
        Self { generator: None }
    }

    pub fn is_configured(&self) -> bool {
        self.generator.is_some()
    }

    pub fn model(&self) -> Option<&str> {
        self.generator.as_deref().map(|generator| generator.model())
    }

    /// Validate, render, generate. Validation happens before any outbound call.
    pub async fn plan(&self, request: SemesterPlanRequest) -> Result<SemesterPlan, SemSenseError> {
        if !request.has_required_fields() {
            return Err(SemSenseError::MissingFields);
        }

        let generator = self.generator.as_ref().ok_or(SemSenseError::NotConfigured)?;

        let prompt = request.render_prompt();
        let subjects_count = request.subjects().len();

        info!(
            semester = %request.semester_number,
            subjects = subjects_count,
            hours = %request.weekly_available_hours,
            model = generator.model(),
            "sending semester plan prompt"
        );

        let analysis = generator.generate(&prompt).await.map_err(|e| {
            error!(error = %e, "semester plan generation failed");
            e
        })?;

        info!("semester plan generated");

        let student_name = request.student_name();
        Ok(SemesterPlan {
            semester_number: request.semester_number,
            student_name,
            analysis_timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            ai_analysis: analysis,
            subjects_count,
            weekly_available_hours: request.weekly_available_hours,
        })
    }
}
