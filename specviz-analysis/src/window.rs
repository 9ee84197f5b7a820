//! Hann (raised-cosine) window applied before the transform

use std::f32::consts::PI;

/// Precomputed Hann taper for a fixed window length.
///
/// The taper suppresses spectral leakage from the transform's implicit
/// periodicity assumption. Coefficients are computed once at construction;
/// `apply` is a pure per-sample multiply.
pub struct HannWindow {
    coeffs: Vec<f32>,
}

impl HannWindow {
    /// Precompute coefficients w(i) = 0.5 * (1 - cos(2*pi*i / (len - 1))).
    ///
    /// Both edge coefficients are exactly zero.
    pub fn new(len: usize) -> Self {
        assert!(len >= 2, "window length must be at least 2");
        let denom = (len - 1) as f32;
        let coeffs = (0..len)
            .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f32 / denom).cos()))
            .collect();
        Self { coeffs }
    }

    /// Window length.
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Multiply each sample by its taper coefficient in place.
    ///
    /// `frame` must have the same length the window was built for.
    pub fn apply(&self, frame: &mut [f32]) {
        debug_assert_eq!(frame.len(), self.coeffs.len());
        for (sample, &w) in frame.iter_mut().zip(&self.coeffs) {
            *sample *= w;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_vanish() {
        let window = HannWindow::new(4096);
        let mut frame = vec![1.0f32; 4096];
        window.apply(&mut frame);

        assert_eq!(frame[0], 0.0);
        assert_eq!(frame[4095], 0.0);
    }

    #[test]
    fn test_peak_at_center() {
        let window = HannWindow::new(1025);
        let mut frame = vec![1.0f32; 1025];
        window.apply(&mut frame);

        // Odd length puts a coefficient of exactly 1.0 at the midpoint
        assert!((frame[512] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_deterministic_and_length_preserving() {
        let window = HannWindow::new(256);
        let input: Vec<f32> = (0..256).map(|i| (i as f32 * 0.013).sin()).collect();

        let mut a = input.clone();
        let mut b = input.clone();
        window.apply(&mut a);
        window.apply(&mut b);

        assert_eq!(a.len(), input.len());
        assert_eq!(a, b);
    }

    #[test]
    fn test_symmetric() {
        let window = HannWindow::new(512);
        let mut frame = vec![1.0f32; 512];
        window.apply(&mut frame);

        for i in 0..256 {
            assert!((frame[i] - frame[511 - i]).abs() < 1e-6);
        }
    }
}
