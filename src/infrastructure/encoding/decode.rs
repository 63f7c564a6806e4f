//! Audio decoding via symphonia
//!
//! Turns a captured container blob back into a mono signal for WAV
//! finalization. When the source has multiple channels only the first is
//! kept.

use std::io::Cursor;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::application::ports::CodecError;
use crate::domain::audio::PcmSignal;

/// Decode an in-memory audio blob into a mono signal.
///
/// The extension, when known, seeds the format probe.
pub fn decode_audio(bytes: &[u8], extension: Option<&str>) -> Result<PcmSignal, CodecError> {
    let cursor = Cursor::new(bytes.to_vec());
    let mss = MediaSourceStream::new(Box::new(cursor), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = extension {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| CodecError::DecodeFailed(format!("unsupported format: {}", e)))?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| CodecError::DecodeFailed("no supported audio tracks".to_string()))?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| CodecError::DecodeFailed("unknown sample rate".to_string()))?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| CodecError::DecodeFailed(format!("unsupported codec: {}", e)))?;

    let mut samples: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            // End of stream surfaces as an unexpected EOF on in-memory input
            Err(SymphoniaError::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(CodecError::DecodeFailed(format!("read failed: {}", e))),
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                let channels = spec.channels.count();
                let mut buf = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
                buf.copy_interleaved_ref(decoded);
                // First channel only: every channels-th interleaved sample
                samples.extend(buf.samples().iter().step_by(channels));
            }
            // Skip corrupt packets rather than failing the whole decode
            Err(SymphoniaError::DecodeError(_)) => continue,
            Err(e) => return Err(CodecError::DecodeFailed(format!("decode failed: {}", e))),
        }
    }

    if samples.is_empty() {
        return Err(CodecError::DecodeFailed("no audio frames decoded".to_string()));
    }

    Ok(PcmSignal::new(samples, sample_rate))
}
