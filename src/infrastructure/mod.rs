//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with external systems like cpal, the model APIs, etc.

pub mod analysis;
pub mod capture;
pub mod client;
pub mod config;
pub mod encoding;

// Re-export adapters
pub use analysis::{build_analyzer, GeminiAnalyzer, OpenRouterAnalyzer, UnconfiguredAnalyzer};
pub use capture::CpalCapture;
pub use client::RemoteAnalyzer;
pub use config::XdgConfigStore;
pub use encoding::FlacWavCodec;
