//! Audio submission value object

use std::fmt;

/// Audio MIME types the system itself produces or recognizes by extension.
///
/// Uploaded files may declare types outside this set; those are carried
/// verbatim as strings and validated by the intake rules instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioMimeType {
    Wav,
    Flac,
    Mp3,
    Mpeg,
    Ogg,
    Aac,
    M4a,
    Mp4,
    Webm,
}

impl AudioMimeType {
    /// Get the MIME type string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Wav => "audio/wav",
            Self::Flac => "audio/flac",
            Self::Mp3 => "audio/mp3",
            Self::Mpeg => "audio/mpeg",
            Self::Ogg => "audio/ogg",
            Self::Aac => "audio/aac",
            Self::M4a => "audio/x-m4a",
            Self::Mp4 => "audio/mp4",
            Self::Webm => "audio/webm",
        }
    }

    /// Get the file extension
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Flac => "flac",
            Self::Mp3 | Self::Mpeg => "mp3",
            Self::Ogg => "ogg",
            Self::Aac => "aac",
            Self::M4a => "m4a",
            Self::Mp4 => "mp4",
            Self::Webm => "webm",
        }
    }

    /// Guess a MIME type from a file extension (case-insensitive)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "wav" => Some(Self::Wav),
            "flac" => Some(Self::Flac),
            "mp3" => Some(Self::Mpeg),
            "ogg" | "oga" => Some(Self::Ogg),
            "aac" => Some(Self::Aac),
            "m4a" => Some(Self::M4a),
            "mp4" => Some(Self::Mp4),
            "webm" => Some(Self::Webm),
            _ => None,
        }
    }
}

impl fmt::Display for AudioMimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Value object representing an audio payload ready for analysis.
/// Contains the raw bytes, the declared MIME type, and the source file name.
/// Immutable once constructed; held by the dispatcher until transmitted.
#[derive(Debug, Clone)]
pub struct AudioSubmission {
    data: Vec<u8>,
    mime_type: String,
    file_name: String,
}

impl AudioSubmission {
    /// Create a submission from raw bytes with a declared MIME type
    pub fn new(data: Vec<u8>, mime_type: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            data,
            mime_type: mime_type.into(),
            file_name: file_name.into(),
        }
    }

    /// Get the raw audio data
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume and return the raw audio data
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Get the declared MIME type
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Get the source file name
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Get the size in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Get human-readable size
    pub fn human_readable_size(&self) -> String {
        let bytes = self.size_bytes();
        if bytes < 1024 {
            format!("{} B", bytes)
        } else if bytes < 1024 * 1024 {
            format!("{:.1} KB", bytes as f64 / 1024.0)
        } else {
            format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
        }
    }

    /// Encode the audio data as base64
    pub fn to_base64(&self) -> String {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }

    /// Map the declared MIME type to the audio format token the streaming
    /// backend expects. Unrecognized types default to "wav".
    pub fn format_token(&self) -> &'static str {
        match self.mime_type.as_str() {
            "audio/wav" | "audio/x-wav" | "audio/wave" => "wav",
            "audio/mp3" | "audio/mpeg" => "mp3",
            "audio/ogg" => "ogg",
            "audio/aac" => "aac",
            "audio/flac" => "flac",
            "audio/m4a" | "audio/x-m4a" => "m4a",
            "audio/webm" => "webm",
            _ => "wav",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_type_as_str() {
        assert_eq!(AudioMimeType::Wav.as_str(), "audio/wav");
        assert_eq!(AudioMimeType::Flac.as_str(), "audio/flac");
        assert_eq!(AudioMimeType::Mpeg.as_str(), "audio/mpeg");
    }

    #[test]
    fn mime_type_extension() {
        assert_eq!(AudioMimeType::Wav.extension(), "wav");
        assert_eq!(AudioMimeType::Flac.extension(), "flac");
        assert_eq!(AudioMimeType::Mpeg.extension(), "mp3");
    }

    #[test]
    fn from_extension_known() {
        assert_eq!(AudioMimeType::from_extension("WAV"), Some(AudioMimeType::Wav));
        assert_eq!(AudioMimeType::from_extension("mp3"), Some(AudioMimeType::Mpeg));
        assert_eq!(AudioMimeType::from_extension("m4a"), Some(AudioMimeType::M4a));
    }

    #[test]
    fn from_extension_unknown() {
        assert_eq!(AudioMimeType::from_extension("txt"), None);
    }

    #[test]
    fn submission_size() {
        let sub = AudioSubmission::new(vec![0u8; 1024], "audio/wav", "a.wav");
        assert_eq!(sub.size_bytes(), 1024);
        assert_eq!(sub.human_readable_size(), "1.0 KB");
    }

    #[test]
    fn human_readable_size_bytes() {
        let sub = AudioSubmission::new(vec![0u8; 500], "audio/wav", "a.wav");
        assert_eq!(sub.human_readable_size(), "500 B");
    }

    #[test]
    fn human_readable_size_mb() {
        let sub = AudioSubmission::new(vec![0u8; 2 * 1024 * 1024], "audio/wav", "a.wav");
        assert_eq!(sub.human_readable_size(), "2.0 MB");
    }

    #[test]
    fn to_base64_round_trip() {
        let sub = AudioSubmission::new(vec![1, 2, 3, 4], "audio/wav", "a.wav");
        let b64 = sub.to_base64();
        use base64::Engine;
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(&b64)
            .unwrap();
        assert_eq!(decoded, vec![1, 2, 3, 4]);
    }

    #[test]
    fn format_token_known_types() {
        let wav = AudioSubmission::new(vec![], "audio/x-wav", "a.wav");
        assert_eq!(wav.format_token(), "wav");
        let mp3 = AudioSubmission::new(vec![], "audio/mpeg", "a.mp3");
        assert_eq!(mp3.format_token(), "mp3");
        let m4a = AudioSubmission::new(vec![], "audio/x-m4a", "a.m4a");
        assert_eq!(m4a.format_token(), "m4a");
    }

    #[test]
    fn format_token_defaults_to_wav() {
        let odd = AudioSubmission::new(vec![], "audio/x-unknown-container", "a.bin");
        assert_eq!(odd.format_token(), "wav");
    }
}
