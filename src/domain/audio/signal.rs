//! Decoded PCM signal value object

/// A decoded mono audio signal: floating-point sample frames at a known
/// sample rate. When a source has multiple channels, only the first is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct PcmSignal {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl PcmSignal {
    /// Create a signal from mono samples at the given rate
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Get the sample frames
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Get the sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of sample frames
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the signal contains no frames
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in whole seconds, rounded down
    pub fn duration_secs(&self) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        self.samples.len() as u64 / self.sample_rate as u64
    }
}
