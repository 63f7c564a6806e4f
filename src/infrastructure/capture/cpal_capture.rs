//! Cross-platform microphone capture using cpal
//!
//! Captures floating-point chunks at the device's native sample rate and
//! channel layout, keeping only the first channel. Chunks are appended in
//! capture order; finalization concatenates them in that same order.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, StreamConfig};
use tokio::time::Duration as TokioDuration;

use crate::application::ports::{CaptureError, MicrophoneCapture};
use crate::domain::audio::PcmSignal;

/// Microphone capture adapter.
///
/// The stream is managed on a dedicated thread to avoid Send/Sync issues
/// with cpal::Stream which is not thread-safe. The thread owns the stream
/// and drops it (releasing the device) whenever the capturing flag clears,
/// on error paths included.
pub struct CpalCapture {
    /// Captured chunks (mono f32, at device sample rate), in capture order
    chunks: Arc<StdMutex<Vec<Vec<f32>>>>,
    /// Device sample rate, set once the stream is running
    device_sample_rate: Arc<AtomicU32>,
    /// Capture state flag
    is_capturing: Arc<AtomicBool>,
    /// Elapsed capture time in milliseconds
    elapsed_ms: Arc<AtomicU64>,
    /// Error reported by the capture thread during startup
    start_error: Arc<StdMutex<Option<CaptureError>>>,
}

impl CpalCapture {
    /// Create a new capture adapter
    pub fn new() -> Self {
        Self {
            chunks: Arc::new(StdMutex::new(Vec::new())),
            device_sample_rate: Arc::new(AtomicU32::new(0)),
            is_capturing: Arc::new(AtomicBool::new(false)),
            elapsed_ms: Arc::new(AtomicU64::new(0)),
            start_error: Arc::new(StdMutex::new(None)),
        }
    }

    /// Get the default input device
    fn get_input_device() -> Result<cpal::Device, CaptureError> {
        let host = cpal::default_host();
        host.default_input_device()
            .ok_or(CaptureError::NoAudioDevice)
    }

    /// Get a suitable input configuration.
    /// Prefers f32 or i16 formats; keeps the device's default rate.
    fn get_input_config(
        device: &cpal::Device,
    ) -> Result<(StreamConfig, SampleFormat), CaptureError> {
        let default = device
            .default_input_config()
            .map_err(|e| CaptureError::StartFailed(format!("Failed to get config: {}", e)))?;

        let sample_format = default.sample_format();
        if sample_format != SampleFormat::F32 && sample_format != SampleFormat::I16 {
            return Err(CaptureError::StartFailed(
                "Unsupported sample format".to_string(),
            ));
        }

        let config = StreamConfig {
            channels: default.channels(),
            sample_rate: default.sample_rate(),
            buffer_size: cpal::BufferSize::Default,
        };

        Ok((config, sample_format))
    }

    /// Keep only the first channel of an interleaved buffer
    fn first_channel(data: &[f32], channels: u16) -> Vec<f32> {
        if channels <= 1 {
            return data.to_vec();
        }
        data.iter().step_by(channels as usize).copied().collect()
    }

    fn record_start_error(slot: &Arc<StdMutex<Option<CaptureError>>>, error: CaptureError) {
        if let Ok(mut guard) = slot.lock() {
            *guard = Some(error);
        }
    }
}

impl Default for CpalCapture {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MicrophoneCapture for CpalCapture {
    async fn start(&self) -> Result<(), CaptureError> {
        if self.is_capturing.load(Ordering::SeqCst) {
            return Err(CaptureError::StartFailed(
                "Capture already in progress".to_string(),
            ));
        }

        {
            let mut chunks = self.chunks.lock().unwrap();
            chunks.clear();
        }
        if let Ok(mut guard) = self.start_error.lock() {
            *guard = None;
        }
        self.elapsed_ms.store(0, Ordering::SeqCst);
        self.is_capturing.store(true, Ordering::SeqCst);

        let chunks = Arc::clone(&self.chunks);
        let device_sample_rate = Arc::clone(&self.device_sample_rate);
        let is_capturing = Arc::clone(&self.is_capturing);
        let elapsed_ms = Arc::clone(&self.elapsed_ms);
        let start_error = Arc::clone(&self.start_error);

        // The stream lives on its own thread; cpal::Stream is not Send
        std::thread::spawn(move || {
            let device = match CpalCapture::get_input_device() {
                Ok(d) => d,
                Err(e) => {
                    CpalCapture::record_start_error(&start_error, e);
                    is_capturing.store(false, Ordering::SeqCst);
                    return;
                }
            };

            let (config, sample_format) = match CpalCapture::get_input_config(&device) {
                Ok(c) => c,
                Err(e) => {
                    CpalCapture::record_start_error(&start_error, e);
                    is_capturing.store(false, Ordering::SeqCst);
                    return;
                }
            };

            let channels = config.channels;
            device_sample_rate.store(config.sample_rate.0, Ordering::SeqCst);

            let chunks_clone = Arc::clone(&chunks);
            let is_capturing_clone = Arc::clone(&is_capturing);

            let stream_result = match sample_format {
                SampleFormat::F32 => device.build_input_stream(
                    &config,
                    move |data: &[f32], _: &cpal::InputCallbackInfo| {
                        if is_capturing_clone.load(Ordering::SeqCst) {
                            let mono = CpalCapture::first_channel(data, channels);
                            if let Ok(mut chunks) = chunks_clone.lock() {
                                chunks.push(mono);
                            }
                        }
                    },
                    |err| eprintln!("Audio stream error: {}", err),
                    None,
                ),

                SampleFormat::I16 => {
                    let chunks_clone = Arc::clone(&chunks);
                    let is_capturing_clone = Arc::clone(&is_capturing);

                    device.build_input_stream(
                        &config,
                        move |data: &[i16], _: &cpal::InputCallbackInfo| {
                            if is_capturing_clone.load(Ordering::SeqCst) {
                                let float: Vec<f32> =
                                    data.iter().map(|&s| s as f32 / 32768.0).collect();
                                let mono = CpalCapture::first_channel(&float, channels);
                                if let Ok(mut chunks) = chunks_clone.lock() {
                                    chunks.push(mono);
                                }
                            }
                        },
                        |err| eprintln!("Audio stream error: {}", err),
                        None,
                    )
                }

                _ => {
                    CpalCapture::record_start_error(
                        &start_error,
                        CaptureError::StartFailed("Unsupported sample format".to_string()),
                    );
                    is_capturing.store(false, Ordering::SeqCst);
                    return;
                }
            };

            let stream = match stream_result {
                Ok(s) => s,
                Err(_) => {
                    // A present device refusing a stream reads as a
                    // permission denial to the user
                    CpalCapture::record_start_error(
                        &start_error,
                        CaptureError::PermissionDenied,
                    );
                    is_capturing.store(false, Ordering::SeqCst);
                    return;
                }
            };

            if stream.play().is_err() {
                CpalCapture::record_start_error(&start_error, CaptureError::PermissionDenied);
                is_capturing.store(false, Ordering::SeqCst);
                return;
            }

            let started = std::time::Instant::now();
            while is_capturing.load(Ordering::SeqCst) {
                elapsed_ms.store(started.elapsed().as_millis() as u64, Ordering::SeqCst);
                std::thread::sleep(std::time::Duration::from_millis(100));
            }

            // Dropping the stream releases the device
            drop(stream);
        });

        // Give the thread a moment to acquire the device
        tokio::time::sleep(TokioDuration::from_millis(50)).await;

        if !self.is_capturing.load(Ordering::SeqCst) {
            let error = self
                .start_error
                .lock()
                .ok()
                .and_then(|mut guard| guard.take())
                .unwrap_or_else(|| {
                    CaptureError::StartFailed("Failed to start capture".to_string())
                });
            return Err(error);
        }

        Ok(())
    }

    async fn stop(&self) -> Result<PcmSignal, CaptureError> {
        if !self.is_capturing.load(Ordering::SeqCst) {
            return Err(CaptureError::CaptureFailed(
                "No capture in progress".to_string(),
            ));
        }

        self.is_capturing.store(false, Ordering::SeqCst);

        // Give the thread a moment to release the device
        tokio::time::sleep(TokioDuration::from_millis(100)).await;

        let sample_rate = self.device_sample_rate.load(Ordering::SeqCst);
        if sample_rate == 0 {
            return Err(CaptureError::CaptureFailed(
                "Sample rate not set".to_string(),
            ));
        }

        let chunks = {
            let mut guard = self.chunks.lock().unwrap();
            std::mem::take(&mut *guard)
        };

        // Concatenate in capture order
        let samples: Vec<f32> = chunks.into_iter().flatten().collect();

        if samples.is_empty() {
            return Err(CaptureError::CaptureFailed(
                "No audio data captured".to_string(),
            ));
        }

        Ok(PcmSignal::new(samples, sample_rate))
    }

    async fn cancel(&self) -> Result<(), CaptureError> {
        self.is_capturing.store(false, Ordering::SeqCst);

        tokio::time::sleep(TokioDuration::from_millis(100)).await;

        {
            let mut chunks = self.chunks.lock().unwrap();
            chunks.clear();
        }
        self.elapsed_ms.store(0, Ordering::SeqCst);

        Ok(())
    }

    fn is_capturing(&self) -> bool {
        self.is_capturing.load(Ordering::SeqCst)
    }

    fn elapsed_secs(&self) -> u64 {
        self.elapsed_ms.load(Ordering::SeqCst) / 1000
    }
}
