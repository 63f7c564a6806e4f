//! FLAC encoder for the native capture container
//!
//! FLAC is the preferred native encoding for captured audio: lossless and
//! compressed, so the fallback file stays well under the upload cap.
//!
//! Settings:
//! - Source sample rate (no resampling)
//! - Mono channel
//! - 16-bit samples

use flacenc::bitsink::ByteSink;
use flacenc::component::BitRepr;
use flacenc::config;
use flacenc::error::Verify;
use flacenc::source::MemSource;

use crate::application::ports::CodecError;
use crate::domain::audio::PcmSignal;

use super::wav::sample_to_i16;

/// Bits per sample (16-bit audio)
const BITS_PER_SAMPLE: usize = 16;

/// Number of channels (mono)
const CHANNELS: usize = 1;

/// Whether the FLAC encoder can be configured on this build.
/// Used by the native-encoding probe.
pub fn flac_encoder_available() -> bool {
    config::Encoder::default().into_verified().is_ok()
}

/// Encode a decoded mono signal to FLAC
pub fn encode_to_flac(signal: &PcmSignal) -> Result<Vec<u8>, CodecError> {
    // flacenc consumes i32 samples; quantize with the same clamp/scale rule
    // as the WAV encoder
    let samples_i32: Vec<i32> = signal
        .samples()
        .iter()
        .map(|&s| sample_to_i16(s) as i32)
        .collect();

    let config = config::Encoder::default()
        .into_verified()
        .map_err(|(_, e)| CodecError::EncodeFailed(format!("FLAC config error: {:?}", e)))?;

    let source = MemSource::from_samples(
        &samples_i32,
        CHANNELS,
        BITS_PER_SAMPLE,
        signal.sample_rate() as usize,
    );

    let flac_stream = flacenc::encode_with_fixed_block_size(&config, source, config.block_size)
        .map_err(|e| CodecError::EncodeFailed(format!("FLAC encoding failed: {:?}", e)))?;

    let mut sink = ByteSink::new();
    flac_stream
        .write(&mut sink)
        .map_err(|e| CodecError::EncodeFailed(format!("FLAC write failed: {}", e)))?;

    Ok(sink.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoder_is_available() {
        assert!(flac_encoder_available());
    }

    #[test]
    fn encode_silence() {
        // 1 second of silence at 44.1kHz
        let signal = PcmSignal::new(vec![0.0; 44_100], 44_100);
        let flac_data = encode_to_flac(&signal).unwrap();

        // Should have valid FLAC data with header
        assert!(flac_data.len() > 50);
        // FLAC magic number: "fLaC"
        assert_eq!(&flac_data[0..4], b"fLaC");
    }

    #[test]
    fn encode_short_audio() {
        // 100ms at 48kHz
        let signal = PcmSignal::new(vec![0.0; 4_800], 48_000);
        assert!(encode_to_flac(&signal).is_ok());
    }

    #[test]
    fn encode_with_signal_compresses() {
        // A 440Hz sine wave
        let rate = 44_100u32;
        let samples: Vec<f32> = (0..rate as usize)
            .map(|i| {
                let t = i as f32 / rate as f32;
                f32::sin(2.0 * std::f32::consts::PI * 440.0 * t) * 0.5
            })
            .collect();
        let signal = PcmSignal::new(samples, rate);

        let flac_data = encode_to_flac(&signal).unwrap();
        // FLAC should compress below raw PCM size
        assert!(flac_data.len() < signal.len() * 2);
    }
}
