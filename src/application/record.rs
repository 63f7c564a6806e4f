//! Recording session use case
//!
//! Orchestrates microphone capture into a submittable audio file: enforces
//! the 30 second cap, owns the session state machine, and finalizes the
//! captured blob to canonical WAV with an explicit fallback branch when the
//! blob cannot be decoded.

use thiserror::Error;

use crate::domain::audio::{AudioSubmission, PcmSignal};
use crate::domain::recording::{
    InvalidStateTransition, RecordingSessionState, RecordingState, MAX_RECORDING_SECS,
};

use super::ports::{AudioCodec, CaptureEncoding, CaptureError, CodecError, MicrophoneCapture};

/// Errors from the recording session
#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    State(#[from] InvalidStateTransition),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// The session's finalized output.
///
/// Finalization prefers a canonical WAV re-encode of the captured blob; when
/// the blob cannot be decoded the session still produces a submittable file
/// by emitting the native blob verbatim, with the decode failure kept
/// observable instead of being discarded.
#[derive(Debug)]
pub enum FinalizedRecording {
    /// Canonical 16-bit PCM mono WAV
    CanonicalWav(AudioSubmission),
    /// The captured blob in its native encoding, because WAV conversion
    /// was unavailable
    NativeFallback {
        audio: AudioSubmission,
        reason: String,
    },
}

impl FinalizedRecording {
    /// The submittable audio payload, whichever branch was taken
    pub fn into_submission(self) -> AudioSubmission {
        match self {
            Self::CanonicalWav(audio) => audio,
            Self::NativeFallback { audio, .. } => audio,
        }
    }

    /// Whether the fallback branch was taken
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::NativeFallback { .. })
    }
}

/// One-shot (re-entrant) microphone recording session
pub struct RecordingSession<C, K>
where
    C: MicrophoneCapture,
    K: AudioCodec,
{
    capture: C,
    codec: K,
    state: RecordingSessionState,
}

impl<C, K> RecordingSession<C, K>
where
    C: MicrophoneCapture,
    K: AudioCodec,
{
    /// Create a new session in the idle state
    pub fn new(capture: C, codec: K) -> Self {
        Self {
            capture,
            codec,
            state: RecordingSessionState::new(),
        }
    }

    /// Get the current session state
    pub fn state(&self) -> RecordingState {
        self.state.state()
    }

    /// The native encoding selected for this session's captures
    pub fn native_encoding(&self) -> CaptureEncoding {
        self.codec.native_encoding()
    }

    /// Elapsed capture time in whole seconds
    pub fn elapsed_secs(&self) -> u64 {
        self.capture.elapsed_secs()
    }

    /// Whether the hard duration cap has been reached. Callers drive the
    /// same stop path for the cap as for a manual stop.
    pub fn cap_reached(&self) -> bool {
        self.capture.elapsed_secs() >= MAX_RECORDING_SECS
    }

    /// Start capturing. On device failure the session stays idle and the
    /// error is surfaced; no retry is attempted.
    pub async fn start(&mut self) -> Result<(), RecordError> {
        self.state.begin()?;
        if let Err(e) = self.capture.start().await {
            // The device was never acquired; return to idle so the caller
            // can retry manually.
            let _ = self.state.abort();
            return Err(e.into());
        }
        Ok(())
    }

    /// Stop capturing and finalize the recording into a submittable file.
    pub async fn stop(&mut self) -> Result<FinalizedRecording, RecordError> {
        self.state.finish()?;

        let finalized = match self.capture.stop().await {
            Ok(signal) => self.finalize(signal),
            Err(e) => {
                let _ = self.state.complete();
                return Err(e.into());
            }
        };

        self.state.complete()?;
        Ok(finalized)
    }

    /// Abandon the current capture without producing output.
    pub async fn cancel(&mut self) -> Result<(), RecordError> {
        self.state.abort()?;
        self.capture.cancel().await?;
        Ok(())
    }

    /// Encode the captured signal into the native container, then attempt
    /// the canonical WAV re-encode, falling back to the native blob when
    /// decoding is unavailable.
    fn finalize(&self, signal: PcmSignal) -> FinalizedRecording {
        let encoding = self.codec.native_encoding();

        let native = match self.codec.encode_native(&signal) {
            Ok(bytes) => bytes,
            Err(_) => {
                // The native encoder is unavailable; the decoded signal is
                // still in hand, so canonical WAV needs no decode step.
                let wav = self.codec.encode_wav(&signal);
                return FinalizedRecording::CanonicalWav(AudioSubmission::new(
                    wav,
                    "audio/wav",
                    "recording.wav",
                ));
            }
        };

        match self.codec.decode_native(&native) {
            Ok(decoded) => {
                let wav = self.codec.encode_wav(&decoded);
                FinalizedRecording::CanonicalWav(AudioSubmission::new(
                    wav,
                    "audio/wav",
                    "recording.wav",
                ))
            }
            Err(e) => FinalizedRecording::NativeFallback {
                audio: AudioSubmission::new(
                    native,
                    encoding.mime_type().as_str(),
                    format!("recording.{}", encoding.extension()),
                ),
                reason: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audio::PcmSignal;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
    use std::sync::Arc;

    struct MockCapture {
        capturing: Arc<AtomicBool>,
        elapsed: Arc<AtomicU64>,
        fail_start: bool,
    }

    impl MockCapture {
        fn new() -> Self {
            Self {
                capturing: Arc::new(AtomicBool::new(false)),
                elapsed: Arc::new(AtomicU64::new(0)),
                fail_start: false,
            }
        }

        fn failing() -> Self {
            Self {
                fail_start: true,
                ..Self::new()
            }
        }
    }

    #[async_trait]
    impl MicrophoneCapture for MockCapture {
        async fn start(&self) -> Result<(), CaptureError> {
            if self.fail_start {
                return Err(CaptureError::PermissionDenied);
            }
            self.capturing.store(true, Ordering::SeqCst);
            Ok(())
        }

        async fn stop(&self) -> Result<PcmSignal, CaptureError> {
            self.capturing.store(false, Ordering::SeqCst);
            Ok(PcmSignal::new(vec![0.0, 0.5, -0.5], 48_000))
        }

        async fn cancel(&self) -> Result<(), CaptureError> {
            self.capturing.store(false, Ordering::SeqCst);
            Ok(())
        }

        fn is_capturing(&self) -> bool {
            self.capturing.load(Ordering::SeqCst)
        }

        fn elapsed_secs(&self) -> u64 {
            self.elapsed.load(Ordering::SeqCst)
        }
    }

    struct MockCodec {
        decode_fails: bool,
    }

    impl AudioCodec for MockCodec {
        fn native_encoding(&self) -> CaptureEncoding {
            CaptureEncoding::Flac
        }

        fn encode_native(&self, _signal: &PcmSignal) -> Result<Vec<u8>, CodecError> {
            Ok(vec![0x66, 0x4c, 0x61, 0x43])
        }

        fn decode_native(&self, _bytes: &[u8]) -> Result<PcmSignal, CodecError> {
            if self.decode_fails {
                Err(CodecError::DecodeFailed("unreadable container".to_string()))
            } else {
                Ok(PcmSignal::new(vec![0.0, 0.5], 48_000))
            }
        }

        fn encode_wav(&self, signal: &PcmSignal) -> Vec<u8> {
            vec![b'R'; 44 + signal.len() * 2]
        }
    }

    #[tokio::test]
    async fn start_stop_produces_canonical_wav() {
        let mut session = RecordingSession::new(MockCapture::new(), MockCodec { decode_fails: false });

        session.start().await.unwrap();
        assert_eq!(session.state(), RecordingState::Recording);

        let finalized = session.stop().await.unwrap();
        assert!(!finalized.is_fallback());

        let submission = finalized.into_submission();
        assert_eq!(submission.mime_type(), "audio/wav");
        assert_eq!(submission.file_name(), "recording.wav");
        assert_eq!(session.state(), RecordingState::Idle);
    }

    #[tokio::test]
    async fn decode_failure_falls_back_to_native_blob() {
        let mut session = RecordingSession::new(MockCapture::new(), MockCodec { decode_fails: true });

        session.start().await.unwrap();
        let finalized = session.stop().await.unwrap();

        match finalized {
            FinalizedRecording::NativeFallback { audio, reason } => {
                assert_eq!(audio.mime_type(), "audio/flac");
                assert_eq!(audio.file_name(), "recording.flac");
                assert!(reason.contains("unreadable container"));
            }
            FinalizedRecording::CanonicalWav(_) => panic!("expected fallback"),
        }
        assert_eq!(session.state(), RecordingState::Idle);
    }

    #[tokio::test]
    async fn permission_denied_keeps_session_idle() {
        let mut session =
            RecordingSession::new(MockCapture::failing(), MockCodec { decode_fails: false });

        let err = session.start().await.unwrap_err();
        assert!(matches!(
            err,
            RecordError::Capture(CaptureError::PermissionDenied)
        ));
        assert_eq!(session.state(), RecordingState::Idle);

        // The session is retryable after the failure
        assert!(session.stop().await.is_err());
    }

    #[tokio::test]
    async fn start_twice_is_invalid() {
        let mut session = RecordingSession::new(MockCapture::new(), MockCodec { decode_fails: false });

        session.start().await.unwrap();
        let err = session.start().await.unwrap_err();
        assert!(matches!(err, RecordError::State(_)));
    }

    #[tokio::test]
    async fn cancel_discards_capture() {
        let mut session = RecordingSession::new(MockCapture::new(), MockCodec { decode_fails: false });

        session.start().await.unwrap();
        session.cancel().await.unwrap();
        assert_eq!(session.state(), RecordingState::Idle);
        assert!(!session.capture.is_capturing());
    }

    #[tokio::test]
    async fn cap_reached_after_max_duration() {
        let capture = MockCapture::new();
        let elapsed = Arc::clone(&capture.elapsed);
        let mut session = RecordingSession::new(capture, MockCodec { decode_fails: false });

        session.start().await.unwrap();
        assert!(!session.cap_reached());

        elapsed.store(MAX_RECORDING_SECS, Ordering::SeqCst);
        assert!(session.cap_reached());
    }
}
