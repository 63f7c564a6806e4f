//! Application configuration value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::InvalidBackendError;

/// Which model backend is active. Fixed at process start; not switchable by
/// the end user at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    #[default]
    Gemini,
    OpenRouter,
}

impl BackendKind {
    /// Get the identifier used in config files
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenRouter => "openrouter",
        }
    }

    /// Default model identifier for this backend
    pub const fn default_model(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini-2.5-pro",
            Self::OpenRouter => "google/gemini-3-flash-preview",
        }
    }
}

impl FromStr for BackendKind {
    type Err = InvalidBackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "openrouter" => Ok(Self::OpenRouter),
            _ => Err(InvalidBackendError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub gemini_api_key: Option<String>,
    pub openrouter_api_key: Option<String>,
    pub backend: Option<String>,
    pub model: Option<String>,
    pub listen: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            gemini_api_key: None,
            openrouter_api_key: None,
            backend: Some(BackendKind::Gemini.as_str().to_string()),
            model: None,
            listen: Some("127.0.0.1:8787".to_string()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            gemini_api_key: other.gemini_api_key.or(self.gemini_api_key),
            openrouter_api_key: other.openrouter_api_key.or(self.openrouter_api_key),
            backend: other.backend.or(self.backend),
            model: other.model.or(self.model),
            listen: other.listen.or(self.listen),
        }
    }

    /// Get backend as parsed BackendKind, or default if not set/invalid
    pub fn backend_or_default(&self) -> BackendKind {
        self.backend
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get the model identifier, or the backend's default
    pub fn model_or_default(&self) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| self.backend_or_default().default_model().to_string())
    }

    /// Get the listen address, or the default
    pub fn listen_or_default(&self) -> String {
        self.listen
            .clone()
            .unwrap_or_else(|| "127.0.0.1:8787".to_string())
    }

    /// Get the API key for the active backend, if configured
    pub fn api_key_for_backend(&self) -> Option<&str> {
        match self.backend_or_default() {
            BackendKind::Gemini => self.gemini_api_key.as_deref(),
            BackendKind::OpenRouter => self.openrouter_api_key.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_parses_known_values() {
        assert_eq!("gemini".parse::<BackendKind>().unwrap(), BackendKind::Gemini);
        assert_eq!(
            "OpenRouter".parse::<BackendKind>().unwrap(),
            BackendKind::OpenRouter
        );
    }

    #[test]
    fn backend_rejects_unknown() {
        assert!("claude".parse::<BackendKind>().is_err());
    }

    #[test]
    fn merge_prefers_other() {
        let base = AppConfig {
            gemini_api_key: Some("base-key".to_string()),
            backend: Some("gemini".to_string()),
            ..Default::default()
        };
        let overlay = AppConfig {
            backend: Some("openrouter".to_string()),
            ..Default::default()
        };

        let merged = base.merge(overlay);
        assert_eq!(merged.gemini_api_key, Some("base-key".to_string()));
        assert_eq!(merged.backend, Some("openrouter".to_string()));
    }

    #[test]
    fn backend_or_default_falls_back() {
        let config = AppConfig {
            backend: Some("not-a-backend".to_string()),
            ..Default::default()
        };
        assert_eq!(config.backend_or_default(), BackendKind::Gemini);
    }

    #[test]
    fn model_or_default_tracks_backend() {
        let config = AppConfig {
            backend: Some("openrouter".to_string()),
            ..Default::default()
        };
        assert_eq!(config.model_or_default(), "google/gemini-3-flash-preview");

        let explicit = AppConfig {
            model: Some("custom-model".to_string()),
            ..Default::default()
        };
        assert_eq!(explicit.model_or_default(), "custom-model");
    }

    #[test]
    fn api_key_for_backend_selects_matching_key() {
        let config = AppConfig {
            gemini_api_key: Some("g-key".to_string()),
            openrouter_api_key: Some("or-key".to_string()),
            backend: Some("openrouter".to_string()),
            ..Default::default()
        };
        assert_eq!(config.api_key_for_backend(), Some("or-key"));
    }
}
