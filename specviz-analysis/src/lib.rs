//! DSP core for specviz
//!
//! Provides the analysis half of the visualizer pipeline:
//! - HannWindow: raised-cosine taper applied before the transform
//! - SpectrumEngine: real-input FFT over one window of samples
//! - SpectrumCell: the published, lock-guarded latest spectrum
//! - mapper: magnitude to bar height / color conversion

mod engine;
mod mapper;
mod spectrum;
mod window;

pub use engine::SpectrumEngine;
pub use mapper::{bar_height, bin_hue, hsl_to_rgb, Bar, VisualizationMapper, DB_FLOOR_EPS, DYNAMIC_RANGE_DB};
pub use spectrum::{SpectrumCell, SpectrumFrame};
pub use window::HannWindow;

pub use rustfft::num_complex::Complex;

/// Default transform window length (power of two).
pub const DEFAULT_FFT_SIZE: usize = 4096;

/// Number of frequency bins produced for a given window length.
pub const fn bin_count(fft_size: usize) -> usize {
    fft_size / 2 + 1
}
