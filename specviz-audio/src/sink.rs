//! Circular store of the most recent window of captured samples

use parking_lot::Mutex;

/// Fixed-capacity circular buffer holding the N most recent mono samples.
///
/// One writer (the audio callback) and one reader (the analysis worker) share
/// it; both hold the internal lock only for a bounded copy. Overflow is not
/// an error: the oldest samples are silently overwritten, because only the
/// latest window matters for visualization.
pub struct SampleSink {
    inner: Mutex<Ring>,
}

struct Ring {
    buf: Vec<f32>,
    /// Next write position, always in [0, capacity).
    cursor: usize,
}

impl SampleSink {
    /// Allocate a sink holding `capacity` samples, initially silent.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "sink capacity must be non-zero");
        Self {
            inner: Mutex::new(Ring {
                buf: vec![0.0; capacity],
                cursor: 0,
            }),
        }
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().buf.len()
    }

    /// Append samples in arrival order, overwriting the oldest once full.
    ///
    /// Never blocks beyond the copy, never allocates, never errors.
    pub fn push(&self, samples: &[f32]) {
        let mut ring = self.inner.lock();
        let capacity = ring.buf.len();
        let mut cursor = ring.cursor;
        for &sample in samples {
            ring.buf[cursor] = sample;
            cursor = (cursor + 1) % capacity;
        }
        ring.cursor = cursor;
    }

    /// Copy the N most recent samples, oldest first, into `out`.
    ///
    /// The copy is atomic with respect to `push`: the result is the buffer
    /// state at a single instant.
    pub fn snapshot_into(&self, out: &mut Vec<f32>) {
        let ring = self.inner.lock();
        out.clear();
        out.extend_from_slice(&ring.buf[ring.cursor..]);
        out.extend_from_slice(&ring.buf[..ring.cursor]);
    }

    /// Allocating convenience wrapper around [`snapshot_into`](Self::snapshot_into).
    pub fn snapshot(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.capacity());
        self.snapshot_into(&mut out);
        out
    }
}
