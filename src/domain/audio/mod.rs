//! Audio value objects and intake validation

mod intake;
mod signal;
mod submission;

pub use intake::{first_audio_candidate, validate_upload, IntakeError, MAX_UPLOAD_BYTES};
pub use signal::PcmSignal;
pub use submission::{AudioMimeType, AudioSubmission};
