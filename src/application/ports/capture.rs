//! Microphone capture port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::audio::PcmSignal;

/// Capture errors
#[derive(Debug, Clone, Error)]
pub enum CaptureError {
    #[error("Microphone permission denied")]
    PermissionDenied,

    #[error("No audio input device available")]
    NoAudioDevice,

    #[error("Failed to start capture: {0}")]
    StartFailed(String),

    #[error("Capture failed: {0}")]
    CaptureFailed(String),
}

/// Port for signal-controlled microphone capture.
///
/// At most one capture is active per instance; chunks are appended in
/// capture order and concatenated in that same order at stop.
#[async_trait]
pub trait MicrophoneCapture: Send + Sync {
    /// Acquire the input device and start capturing.
    async fn start(&self) -> Result<(), CaptureError>;

    /// Stop capturing, release the device, and return the captured signal.
    async fn stop(&self) -> Result<PcmSignal, CaptureError>;

    /// Stop capturing and discard the captured signal.
    async fn cancel(&self) -> Result<(), CaptureError>;

    /// Check if currently capturing
    fn is_capturing(&self) -> bool;

    /// Get elapsed capture time in whole seconds
    fn elapsed_secs(&self) -> u64;
}
