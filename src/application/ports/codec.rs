//! Audio codec port interface

use thiserror::Error;

use crate::domain::audio::{AudioMimeType, PcmSignal};

/// Native container encoding used for the captured blob before WAV
/// finalization. Probed once per codec instance from a priority-ordered
/// list: FLAC (compressed, preferred) then WAV (generic default).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureEncoding {
    Flac,
    Wav,
}

impl CaptureEncoding {
    /// MIME type of blobs in this encoding
    pub const fn mime_type(&self) -> AudioMimeType {
        match self {
            Self::Flac => AudioMimeType::Flac,
            Self::Wav => AudioMimeType::Wav,
        }
    }

    /// File extension for fallback output in this encoding
    pub const fn extension(&self) -> &'static str {
        self.mime_type().extension()
    }
}

/// Codec errors
#[derive(Debug, Clone, Error)]
pub enum CodecError {
    #[error("Failed to encode audio: {0}")]
    EncodeFailed(String),

    #[error("Failed to decode audio: {0}")]
    DecodeFailed(String),
}

/// Port for encoding captured signals and decoding captured blobs.
///
/// WAV encoding has no failure path: a decoded signal is always encodable.
pub trait AudioCodec: Send + Sync {
    /// The native encoding selected when this codec was constructed
    fn native_encoding(&self) -> CaptureEncoding;

    /// Encode a captured signal into the native container
    fn encode_native(&self, signal: &PcmSignal) -> Result<Vec<u8>, CodecError>;

    /// Decode a native-container blob back into a mono signal
    fn decode_native(&self, bytes: &[u8]) -> Result<PcmSignal, CodecError>;

    /// Encode a signal as canonical 16-bit PCM mono WAV
    fn encode_wav(&self, signal: &PcmSignal) -> Vec<u8>;
}
