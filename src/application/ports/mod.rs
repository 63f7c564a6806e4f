//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod analyzer;
pub mod capture;
pub mod codec;
pub mod config;

// Re-export common types
pub use analyzer::{AnalysisError, BeatAnalyzer};
pub use capture::{CaptureError, MicrophoneCapture};
pub use codec::{AudioCodec, CaptureEncoding, CodecError};
pub use config::ConfigStore;
