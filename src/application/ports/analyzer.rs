//! Beat analysis port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::analysis::AnalysisResult;
use crate::domain::audio::AudioSubmission;

/// Analysis errors.
///
/// Transport failures and malformed-response failures are distinct kinds so
/// callers can tell "the backend was unreachable" apart from "the backend
/// answered garbage". Display strings are user-facing; internal detail is
/// carried in the variant payloads and never includes credentials.
#[derive(Debug, Clone, Error)]
pub enum AnalysisError {
    #[error("API key not configured")]
    MissingApiKey,

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Failed to parse AI response as JSON")]
    MalformedJson(String),

    #[error("Invalid response structure from AI")]
    SchemaViolation(String),

    #[error("No content returned from model")]
    EmptyResponse,
}

impl AnalysisError {
    /// Whether the failure came from the response body rather than transport
    pub fn is_malformed_response(&self) -> bool {
        matches!(
            self,
            Self::MalformedJson(_) | Self::SchemaViolation(_) | Self::EmptyResponse
        )
    }
}

/// Port for beat analysis backends.
///
/// Both direct model backends and the remote-server dispatcher implement
/// this trait; callers never know which strategy is active.
#[async_trait]
pub trait BeatAnalyzer: Send + Sync {
    /// Analyze an audio submission into a validated result.
    ///
    /// # Arguments
    /// * `audio` - The audio payload with its declared MIME type
    ///
    /// # Returns
    /// The validated analysis or a typed error
    async fn analyze(&self, audio: &AudioSubmission) -> Result<AnalysisResult, AnalysisError>;
}

#[async_trait]
impl BeatAnalyzer for std::sync::Arc<dyn BeatAnalyzer> {
    async fn analyze(&self, audio: &AudioSubmission) -> Result<AnalysisResult, AnalysisError> {
        self.as_ref().analyze(audio).await
    }
}
