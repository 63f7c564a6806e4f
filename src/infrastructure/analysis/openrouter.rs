//! OpenRouter analyzer adapter (streaming backend)
//!
//! Speaks the OpenAI-compatible chat completions API with an `input_audio`
//! content part and incremental delivery. The streamed frames are
//! reassembled by [`StreamAggregator`] and then run through the same parse
//! contract as the non-streaming backend.

use async_trait::async_trait;
use futures::StreamExt;
use serde::Serialize;
use tracing::debug;

use crate::application::ports::{AnalysisError, BeatAnalyzer};
use crate::domain::analysis::{AnalysisPrompt, AnalysisResult};
use crate::domain::audio::AudioSubmission;

use super::response::parse_analysis;
use super::sse::StreamAggregator;

/// OpenRouter chat completions endpoint
const API_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default model identifier
const DEFAULT_MODEL: &str = "google/gemini-3-flash-preview";

// Request types (OpenAI-compatible)

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: Vec<ContentPart>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    InputAudio { input_audio: InputAudio },
}

#[derive(Debug, Serialize)]
struct InputAudio {
    data: String,
    format: String,
}

/// OpenRouter beat analyzer (streaming backend)
pub struct OpenRouterAnalyzer {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenRouterAnalyzer {
    /// Create a new OpenRouter analyzer with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: API_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Create a new OpenRouter analyzer with a custom model
    pub fn with_model(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::new(api_key)
        }
    }

    /// Override the API base URL (for tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build the request body.
    /// The audio format token comes from the submission's declared MIME
    /// type; unrecognized types default to the WAV token.
    fn build_request(&self, audio: &AudioSubmission, prompt: &AnalysisPrompt) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: vec![
                    ContentPart::Text {
                        text: prompt.content().to_string(),
                    },
                    ContentPart::InputAudio {
                        input_audio: InputAudio {
                            data: audio.to_base64(),
                            format: audio.format_token().to_string(),
                        },
                    },
                ],
            }],
            temperature: 0.7,
            max_tokens: 2048,
            stream: true,
        }
    }
}

#[async_trait]
impl BeatAnalyzer for OpenRouterAnalyzer {
    async fn analyze(&self, audio: &AudioSubmission) -> Result<AnalysisResult, AnalysisError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = self.build_request(audio, &AnalysisPrompt::build());

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("HTTP-Referer", "https://github.com/yourusername/beat-scope")
            .header("X-Title", "BeatScope")
            .json(&body)
            .send()
            .await
            .map_err(|e| AnalysisError::RequestFailed(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AnalysisError::InvalidApiKey);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AnalysisError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AnalysisError::ApiError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        // Reassemble the streamed completion, in arrival order
        let mut aggregator = StreamAggregator::new();
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| AnalysisError::RequestFailed(e.to_string()))?;
            aggregator.push_chunk(&chunk);
        }

        let text = aggregator.finish()?;
        debug!(chars = text.len(), "Reassembled streamed completion");

        parse_analysis(text.trim())
    }
}
