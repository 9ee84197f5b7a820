//! Audio capture - cpal input stream feeding the sample sink

use crate::SampleSink;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleFormat, Stream, StreamConfig};
use crossbeam_channel::Sender;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while setting up audio capture.
///
/// All of these are fatal at startup; there is no degraded capture mode.
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("No audio input device found")]
    NoInputDevice,
    #[error("Failed to query input config: {0}")]
    Config(#[from] cpal::DefaultStreamConfigError),
    #[error("Unsupported sample format: {0:?}")]
    UnsupportedFormat(SampleFormat),
    #[error("Failed to build input stream: {0}")]
    Build(#[from] cpal::BuildStreamError),
    #[error("Failed to start input stream: {0}")]
    Play(#[from] cpal::PlayStreamError),
}

/// Events reported by the running stream.
#[derive(Debug, Clone)]
pub enum CaptureEvent {
    /// Stream error after startup; the app treats this as fatal.
    Error(String),
}

/// The default input device, opened but not yet streaming.
///
/// Two-phase setup: `open` resolves the device and its native config (so the
/// pipeline can be sized from the real sample rate), `start` builds and plays
/// the stream into a sink. Any failure here aborts startup before a single
/// worker thread exists.
pub struct CaptureSource {
    device: Device,
    config: StreamConfig,
    sample_format: SampleFormat,
}

impl CaptureSource {
    /// Resolve the default input device and its default config.
    pub fn open() -> Result<Self, CaptureError> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or(CaptureError::NoInputDevice)?;
        let supported = device.default_input_config()?;
        let sample_format = supported.sample_format();
        let config: StreamConfig = supported.into();

        tracing::info!(
            device = device.name().unwrap_or_else(|_| "<unknown>".into()),
            sample_rate = config.sample_rate.0,
            channels = config.channels,
            ?sample_format,
            "opened input device"
        );

        Ok(Self {
            device,
            config,
            sample_format,
        })
    }

    /// Device sample rate in Hz; no negotiation happens.
    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate.0
    }

    /// Build and play the input stream, pushing into `sink`.
    ///
    /// Samples are normalized to [-1, 1] before the push. Multi-channel
    /// devices contribute only their first channel per frame (channel
    /// selection, not mixing). Capture stops when the returned stream is
    /// dropped. Runtime stream errors go out through `events`.
    pub fn start(
        self,
        sink: Arc<SampleSink>,
        events: Sender<CaptureEvent>,
    ) -> Result<Stream, CaptureError> {
        let channels = self.config.channels as usize;

        let error_callback = move |err: cpal::StreamError| {
            let _ = events.try_send(CaptureEvent::Error(err.to_string()));
        };

        // Scratch for the selected channel; reused across callbacks so the
        // real-time path stops allocating after warmup.
        let mut mono: Vec<f32> = Vec::new();

        let stream = match self.sample_format {
            SampleFormat::F32 => self.device.build_input_stream(
                &self.config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    mono.clear();
                    mono.extend(data.iter().step_by(channels).copied());
                    sink.push(&mono);
                },
                error_callback,
                None,
            )?,
            SampleFormat::I16 => self.device.build_input_stream(
                &self.config,
                move |data: &[i16], _: &cpal::InputCallbackInfo| {
                    mono.clear();
                    mono.extend(data.iter().step_by(channels).map(|&s| s as f32 / 32768.0));
                    sink.push(&mono);
                },
                error_callback,
                None,
            )?,
            SampleFormat::U16 => self.device.build_input_stream(
                &self.config,
                move |data: &[u16], _: &cpal::InputCallbackInfo| {
                    mono.clear();
                    mono.extend(
                        data.iter()
                            .step_by(channels)
                            .map(|&s| (s as f32 - 32768.0) / 32768.0),
                    );
                    sink.push(&mono);
                },
                error_callback,
                None,
            )?,
            other => return Err(CaptureError::UnsupportedFormat(other)),
        };

        stream.play()?;
        Ok(stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_error_messages() {
        let err = CaptureError::NoInputDevice;
        assert_eq!(err.to_string(), "No audio input device found");

        let err = CaptureError::UnsupportedFormat(SampleFormat::U8);
        assert!(err.to_string().contains("U8"));
    }
}
