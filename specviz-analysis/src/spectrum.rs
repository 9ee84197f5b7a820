//! Published spectrum shared between the analysis worker and the renderer

use parking_lot::Mutex;
use rustfft::num_complex::Complex;

/// One complete frequency-domain result.
///
/// `sequence` is 0 until the first publish; every publish increments it, so a
/// consumer can tell "never produced" and "unchanged since last read" apart
/// from fresh data.
#[derive(Clone, Debug)]
pub struct SpectrumFrame {
    /// N/2 + 1 complex bins; bin k corresponds to k * sample_rate / N Hz.
    pub bins: Vec<Complex<f32>>,
    /// Number of completed publishes; 0 means all bins are zero.
    pub sequence: u64,
}

impl SpectrumFrame {
    pub fn new(bin_count: usize) -> Self {
        Self {
            bins: vec![Complex::new(0.0, 0.0); bin_count],
            sequence: 0,
        }
    }

    /// Magnitude of bin k, sqrt(re^2 + im^2).
    pub fn magnitude(&self, bin: usize) -> f32 {
        self.bins[bin].norm()
    }
}

/// Lock-guarded holder of the most recent complete spectrum.
///
/// Written only by the analysis worker, read only by the render loop. Both
/// sides do a single bounded copy under the lock, so a reader can never
/// observe a partially written result.
pub struct SpectrumCell {
    inner: Mutex<SpectrumFrame>,
}

impl SpectrumCell {
    /// Initial state: all bins zero, sequence 0 ("not yet produced").
    pub fn new(bin_count: usize) -> Self {
        Self {
            inner: Mutex::new(SpectrumFrame::new(bin_count)),
        }
    }

    /// Number of bins held.
    pub fn bin_count(&self) -> usize {
        self.inner.lock().bins.len()
    }

    /// Atomically replace the published bins with a completed result.
    pub fn publish(&self, bins: &[Complex<f32>]) {
        let mut frame = self.inner.lock();
        debug_assert_eq!(bins.len(), frame.bins.len());
        frame.bins.copy_from_slice(bins);
        frame.sequence += 1;
    }

    /// Copy the latest complete result into `out`, reusing its allocation.
    pub fn read_into(&self, out: &mut SpectrumFrame) {
        let frame = self.inner.lock();
        out.bins.resize(frame.bins.len(), Complex::new(0.0, 0.0));
        out.bins.copy_from_slice(&frame.bins);
        out.sequence = frame.sequence;
    }

    /// Allocating convenience wrapper around [`read_into`](Self::read_into).
    pub fn read(&self) -> SpectrumFrame {
        self.inner.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_silent() {
        let cell = SpectrumCell::new(2049);
        let frame = cell.read();

        assert_eq!(frame.sequence, 0);
        assert_eq!(frame.bins.len(), 2049);
        assert!(frame.bins.iter().all(|c| c.norm() == 0.0));
    }

    #[test]
    fn test_publish_then_read_round_trips() {
        let cell = SpectrumCell::new(5);
        let bins: Vec<Complex<f32>> = (0..5)
            .map(|i| Complex::new(i as f32, -(i as f32)))
            .collect();

        cell.publish(&bins);
        let frame = cell.read();

        assert_eq!(frame.sequence, 1);
        assert_eq!(frame.bins, bins);
    }

    #[test]
    fn test_sequence_counts_publishes() {
        let cell = SpectrumCell::new(3);
        let bins = vec![Complex::new(1.0, 0.0); 3];

        cell.publish(&bins);
        cell.publish(&bins);
        cell.publish(&bins);

        assert_eq!(cell.read().sequence, 3);
    }

    #[test]
    fn test_read_into_reuses_allocation() {
        let cell = SpectrumCell::new(4);
        cell.publish(&[Complex::new(2.0, 0.0); 4]);

        let mut out = SpectrumFrame::new(4);
        cell.read_into(&mut out);

        assert_eq!(out.sequence, 1);
        assert_eq!(out.magnitude(0), 2.0);
    }
}
