//! Validated analysis result types
//!
//! These types only exist after the model response has passed schema
//! validation and percentage normalization; raw model output never
//! constructs them directly.

use serde::{Deserialize, Serialize};

/// One sub-genre entry in the style breakdown.
///
/// Across a result's styles the percentages sum to exactly 100. The value is
/// signed because the normalization tie-break can push the last entry
/// negative when the model's original values were wildly inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleBreakdown {
    pub name: String,
    pub percentage: i32,
    pub description: String,
}

/// A named sonic component of the beat, paired with a display icon key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreElement {
    pub name: String,
    pub description: String,
    pub icon: String,
}

impl CoreElement {
    /// Resolve the icon key, falling back to the default for unknown names
    pub fn icon_key(&self) -> IconKey {
        IconKey::from_name(&self.icon).unwrap_or_default()
    }
}

/// The fixed set of icon keys the model is asked to choose from.
/// Unrecognized keys resolve to [`IconKey::Music`] at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IconKey {
    Drum,
    #[default]
    Music,
    Bass,
    Waves,
    Mic,
    Radio,
    Headphones,
    Volume2,
    Zap,
    Sparkles,
}

impl IconKey {
    /// Get the wire-level key name
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Drum => "drum",
            Self::Music => "music",
            Self::Bass => "bass",
            Self::Waves => "waves",
            Self::Mic => "mic",
            Self::Radio => "radio",
            Self::Headphones => "headphones",
            Self::Volume2 => "volume-2",
            Self::Zap => "zap",
            Self::Sparkles => "sparkles",
        }
    }

    /// Look up a key by its wire name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "drum" => Some(Self::Drum),
            "music" => Some(Self::Music),
            "bass" => Some(Self::Bass),
            "waves" => Some(Self::Waves),
            "mic" => Some(Self::Mic),
            "radio" => Some(Self::Radio),
            "headphones" => Some(Self::Headphones),
            "volume-2" => Some(Self::Volume2),
            "zap" => Some(Self::Zap),
            "sparkles" => Some(Self::Sparkles),
            _ => None,
        }
    }
}

/// The complete validated analysis of one submission.
///
/// Constructed once per submission by the response parser, handed to the
/// presentation layer, and held transiently until the next submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub styles: Vec<StyleBreakdown>,
    pub bpm: u32,
    pub elements: Vec<CoreElement>,
    pub tags: Vec<String>,
    #[serde(rename = "searchKeywords")]
    pub search_keywords: String,
    pub summary: String,
}

impl AnalysisResult {
    /// Sum of the style percentages (exactly 100 for a validated result)
    pub fn percentage_total(&self) -> i32 {
        self.styles.iter().map(|s| s.percentage).sum()
    }
}

/// The server boundary's response envelope, shared by the server routes and
/// the remote dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<AnalysisResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    /// Successful envelope carrying a result
    pub fn ok(data: AnalysisResult) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Failure envelope carrying a user-facing message
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}
