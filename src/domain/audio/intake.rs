//! Upload intake validation
//!
//! Shared by the CLI (before dispatch) and the server boundary (defense in
//! depth, since the client-side check can be bypassed).

use thiserror::Error;

/// Maximum accepted upload size (20 MiB)
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Audio subtypes accepted even when the full type string is inconsistent.
/// Some platforms report partial or vendor-prefixed MIME strings for common
/// containers, so subtypes are matched by substring containment.
const ACCEPTED_SUBTYPES: &[&str] = &[
    "mp3", "mpeg", "wav", "wave", "aac", "ogg", "flac", "x-m4a", "mp4",
];

/// Intake validation errors. Display strings are the wire-level error
/// messages returned by the server boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
    #[error("No audio file provided")]
    Empty,

    #[error("File too large (max 20MB)")]
    TooLarge,

    #[error("Unsupported file type")]
    UnsupportedType,
}

/// Validate a candidate upload against the size and type constraints.
///
/// Accepts the file when the declared type begins with `audio/`, or when it
/// contains one of the known audio subtypes.
pub fn validate_upload(size_bytes: usize, mime_type: &str) -> Result<(), IntakeError> {
    if size_bytes == 0 {
        return Err(IntakeError::Empty);
    }
    if size_bytes > MAX_UPLOAD_BYTES {
        return Err(IntakeError::TooLarge);
    }
    if !is_audio_type(mime_type) {
        return Err(IntakeError::UnsupportedType);
    }
    Ok(())
}

fn is_audio_type(mime_type: &str) -> bool {
    mime_type.starts_with("audio/") || ACCEPTED_SUBTYPES.iter().any(|s| mime_type.contains(s))
}

/// From a set of candidate (name, mime type) pairs, pick the first whose
/// declared type begins with the audio top-level type. The rest are ignored.
pub fn first_audio_candidate<'a, T>(candidates: &'a [(T, String)]) -> Option<&'a (T, String)> {
    candidates.iter().find(|(_, mime)| mime.starts_with("audio/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_file_under_limit() {
        // 19 MiB declared as audio/mp3
        assert!(validate_upload(19 * 1024 * 1024, "audio/mp3").is_ok());
    }

    #[test]
    fn rejects_file_over_limit() {
        // 21 MiB is rejected regardless of type
        let err = validate_upload(21 * 1024 * 1024, "audio/wav").unwrap_err();
        assert_eq!(err, IntakeError::TooLarge);
        assert_eq!(err.to_string(), "File too large (max 20MB)");
    }

    #[test]
    fn accepts_exact_limit() {
        assert!(validate_upload(MAX_UPLOAD_BYTES, "audio/wav").is_ok());
    }

    #[test]
    fn rejects_empty_file() {
        assert_eq!(validate_upload(0, "audio/wav"), Err(IntakeError::Empty));
    }

    #[test]
    fn accepts_audio_prefix() {
        assert!(validate_upload(100, "audio/x-exotic-container").is_ok());
    }

    #[test]
    fn accepts_partial_type_by_subtype() {
        // Some platforms report container types without the audio/ prefix
        assert!(validate_upload(100, "video/mp4").is_ok());
        assert!(validate_upload(100, "application/ogg").is_ok());
    }

    #[test]
    fn rejects_non_audio_type() {
        let err = validate_upload(100, "text/plain").unwrap_err();
        assert_eq!(err, IntakeError::UnsupportedType);
        assert_eq!(err.to_string(), "Unsupported file type");
    }

    #[test]
    fn first_candidate_picks_first_audio() {
        let files = vec![
            ("notes.txt", "text/plain".to_string()),
            ("beat.mp3", "audio/mpeg".to_string()),
            ("other.wav", "audio/wav".to_string()),
        ];
        let picked = first_audio_candidate(&files).unwrap();
        assert_eq!(picked.0, "beat.mp3");
    }

    #[test]
    fn first_candidate_none_when_no_audio() {
        let files = vec![("notes.txt", "text/plain".to_string())];
        assert!(first_audio_candidate(&files).is_none());
    }
}
