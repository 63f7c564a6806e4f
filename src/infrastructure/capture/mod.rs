//! Capture infrastructure module
//!
//! Cross-platform microphone capture using cpal. Captured chunks stay at
//! the device sample rate; encoding happens at session finalization.

mod cpal_capture;

pub use cpal_capture::CpalCapture;
