//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod analysis;
pub mod audio;
pub mod config;
pub mod error;
pub mod recording;

// Re-export common types
pub use analysis::{AnalysisResult, CoreElement, IconKey, StyleBreakdown};
pub use audio::{AudioMimeType, AudioSubmission, IntakeError, PcmSignal};
pub use config::{AppConfig, BackendKind};
pub use error::*;
pub use recording::{RecordingSessionState, RecordingState};
