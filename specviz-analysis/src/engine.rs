//! FFT engine - one window of samples in, N/2+1 complex bins out

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

use crate::bin_count;

/// Real-input forward FFT with a plan fixed at construction.
///
/// The plan and scratch buffer are built once, before any worker thread
/// starts, so the hot loop never constructs anything. The window length is
/// fixed for the life of the engine.
pub struct SpectrumEngine {
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    fft_size: usize,
}

impl SpectrumEngine {
    /// Plan a forward FFT of length `fft_size`.
    pub fn new(fft_size: usize) -> Self {
        assert!(fft_size.is_power_of_two(), "FFT size must be a power of two");
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_size);
        tracing::debug!(fft_size, "FFT plan constructed");

        Self {
            fft,
            scratch: vec![Complex::new(0.0, 0.0); fft_size],
            fft_size,
        }
    }

    /// Window length this engine transforms.
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Number of output bins (N/2 + 1).
    pub fn bin_count(&self) -> usize {
        bin_count(self.fft_size)
    }

    /// Transform one (already windowed) frame of N samples.
    ///
    /// Returns the N/2+1 non-redundant bins; bin k corresponds to frequency
    /// k * sample_rate / N. The returned slice borrows the engine's scratch
    /// buffer and is valid until the next call.
    pub fn transform(&mut self, frame: &[f32]) -> &[Complex<f32>] {
        debug_assert_eq!(frame.len(), self.fft_size);
        for (slot, &sample) in self.scratch.iter_mut().zip(frame) {
            *slot = Complex::new(sample, 0.0);
        }

        self.fft.process(&mut self.scratch);

        &self.scratch[..self.bin_count()]
    }
}
