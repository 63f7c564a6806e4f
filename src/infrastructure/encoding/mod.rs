//! Audio encoding infrastructure
//!
//! Canonical WAV output for submissions, FLAC for the native capture
//! container, and symphonia-backed decoding for WAV finalization.

mod codec;
mod decode;
mod flac;
mod wav;

pub use codec::FlacWavCodec;
pub use decode::decode_audio;
pub use flac::{encode_to_flac, flac_encoder_available};
pub use wav::{encode_wav, sample_to_i16, WAV_HEADER_LEN};
