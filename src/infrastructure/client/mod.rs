//! Remote analysis dispatcher
//!
//! Packages a validated submission as a multipart upload to a running
//! beat-scope server and decodes the response envelope. Implements the same
//! analyzer port as the direct backends, so "remote" is just one more
//! strategy the caller can inject.

use async_trait::async_trait;

use crate::application::ports::{AnalysisError, BeatAnalyzer};
use crate::domain::analysis::{AnalysisResult, ApiResponse};
use crate::domain::audio::AudioSubmission;

/// Dispatches submissions to a beat-scope server's `/api/analyze` boundary
pub struct RemoteAnalyzer {
    base_url: String,
    client: reqwest::Client,
}

impl RemoteAnalyzer {
    /// Create a dispatcher for the server at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/analyze", self.base_url)
    }
}

#[async_trait]
impl BeatAnalyzer for RemoteAnalyzer {
    async fn analyze(&self, audio: &AudioSubmission) -> Result<AnalysisResult, AnalysisError> {
        let part = reqwest::multipart::Part::bytes(audio.data().to_vec())
            .file_name(audio.file_name().to_string())
            .mime_str(audio.mime_type())
            .map_err(|e| AnalysisError::RequestFailed(format!("Invalid MIME type: {}", e)))?;

        let form = reqwest::multipart::Form::new().part("audio", part);

        let response = self
            .client
            .post(self.endpoint())
            .multipart(form)
            .send()
            .await
            .map_err(|e| AnalysisError::RequestFailed(e.to_string()))?;

        let status = response.status();

        let envelope: ApiResponse = response.json().await.map_err(|e| {
            AnalysisError::RequestFailed(format!("Invalid server response: {}", e))
        })?;

        if !envelope.success {
            let message = envelope
                .error
                .unwrap_or_else(|| format!("HTTP {}", status));
            return Err(AnalysisError::ApiError(message));
        }

        envelope.data.ok_or_else(|| {
            AnalysisError::RequestFailed("Server response missing analysis data".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_url() {
        let dispatcher = RemoteAnalyzer::new("http://localhost:8787");
        assert_eq!(dispatcher.endpoint(), "http://localhost:8787/api/analyze");
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let dispatcher = RemoteAnalyzer::new("http://localhost:8787/");
        assert_eq!(dispatcher.endpoint(), "http://localhost:8787/api/analyze");
    }
}
