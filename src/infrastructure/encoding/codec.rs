//! Codec adapter combining the FLAC/WAV encoders with symphonia decoding

use crate::application::ports::{AudioCodec, CaptureEncoding, CodecError};
use crate::domain::audio::PcmSignal;

use super::decode::decode_audio;
use super::flac::{encode_to_flac, flac_encoder_available};
use super::wav::encode_wav;

/// Codec for recording sessions.
///
/// The native encoding is probed once at construction from the priority
/// list: FLAC when the encoder verifies, otherwise the generic WAV default.
pub struct FlacWavCodec {
    encoding: CaptureEncoding,
}

impl FlacWavCodec {
    /// Create a codec, probing the best available native encoding
    pub fn new() -> Self {
        let encoding = if flac_encoder_available() {
            CaptureEncoding::Flac
        } else {
            CaptureEncoding::Wav
        };
        Self { encoding }
    }

    /// Create a codec with a fixed native encoding
    pub fn with_encoding(encoding: CaptureEncoding) -> Self {
        Self { encoding }
    }
}

impl Default for FlacWavCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioCodec for FlacWavCodec {
    fn native_encoding(&self) -> CaptureEncoding {
        self.encoding
    }

    fn encode_native(&self, signal: &PcmSignal) -> Result<Vec<u8>, CodecError> {
        match self.encoding {
            CaptureEncoding::Flac => encode_to_flac(signal),
            CaptureEncoding::Wav => Ok(encode_wav(signal)),
        }
    }

    fn decode_native(&self, bytes: &[u8]) -> Result<PcmSignal, CodecError> {
        decode_audio(bytes, Some(self.encoding.extension()))
    }

    fn encode_wav(&self, signal: &PcmSignal) -> Vec<u8> {
        encode_wav(signal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probes_flac_when_available() {
        let codec = FlacWavCodec::new();
        assert_eq!(codec.native_encoding(), CaptureEncoding::Flac);
    }

    #[test]
    fn native_round_trip() {
        let codec = FlacWavCodec::new();
        let signal = PcmSignal::new(vec![0.1; 4_800], 48_000);

        let native = codec.encode_native(&signal).unwrap();
        let decoded = codec.decode_native(&native).unwrap();
        assert_eq!(decoded.sample_rate(), 48_000);
        assert_eq!(decoded.len(), signal.len());
    }

    #[test]
    fn wav_encoding_has_canonical_header() {
        let codec = FlacWavCodec::with_encoding(CaptureEncoding::Wav);
        let signal = PcmSignal::new(vec![0.0; 100], 44_100);

        let native = codec.encode_native(&signal).unwrap();
        assert_eq!(&native[0..4], b"RIFF");
        assert_eq!(native.len(), 44 + 200);
    }
}
