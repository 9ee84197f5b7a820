//! Pipeline context and the periodic analysis worker
//!
//! Three independently clocked contexts share exactly two locks: the audio
//! callback writes the SampleSink, the analysis worker turns sink snapshots
//! into published spectra, and the render loop reads the SpectrumCell. No
//! context ever holds both locks, and none waits on another to make progress.

use specviz_analysis::{bin_count, HannWindow, SpectrumCell, SpectrumEngine};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::SampleSink;

/// Fixed pipeline parameters, set once at startup.
#[derive(Clone, Copy, Debug)]
pub struct PipelineConfig {
    /// Transform window length; power of two.
    pub fft_size: usize,
    /// Capture sample rate in Hz, as reported by the device.
    pub sample_rate: u32,
}

impl PipelineConfig {
    /// Nominal duration of one window of samples; the analysis cadence.
    pub fn analysis_interval(&self) -> Duration {
        Duration::from_secs_f64(self.fft_size as f64 / self.sample_rate as f64)
    }
}

/// Everything the three execution contexts share, constructed up front.
///
/// Owns the sample sink, the published spectrum, and the running flag; no
/// process-wide globals. The FFT plan is built inside [`Pipeline::new`],
/// before any worker thread exists.
pub struct Pipeline {
    config: PipelineConfig,
    sink: Arc<SampleSink>,
    spectrum: Arc<SpectrumCell>,
    running: Arc<AtomicBool>,
    worker: Option<AnalysisWorker>,
}

impl Pipeline {
    /// Allocate the shared buffers and plan the transform.
    pub fn new(config: PipelineConfig) -> Self {
        let sink = Arc::new(SampleSink::new(config.fft_size));
        let spectrum = Arc::new(SpectrumCell::new(bin_count(config.fft_size)));
        let worker = AnalysisWorker::new(config.fft_size);

        Self {
            config,
            sink,
            spectrum,
            running: Arc::new(AtomicBool::new(true)),
            worker: Some(worker),
        }
    }

    pub fn config(&self) -> PipelineConfig {
        self.config
    }

    /// The producer side: handed to the capture callback.
    pub fn sink(&self) -> Arc<SampleSink> {
        self.sink.clone()
    }

    /// The consumer side: read by the render loop.
    pub fn spectrum(&self) -> Arc<SpectrumCell> {
        self.spectrum.clone()
    }

    /// True until shutdown is requested.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Request shutdown; every loop observes this on its next iteration.
    pub fn shutdown(&self) {
        self.running.store(false, Ordering::Relaxed);
    }

    /// Spawn the periodic analysis worker.
    ///
    /// Each cycle snapshots the sink, windows, transforms, publishes, then
    /// sleeps for one window's duration. An in-flight cycle always completes;
    /// the flag is checked between cycles.
    ///
    /// Panics if called twice; there is exactly one analysis context.
    pub fn spawn_analysis(&mut self) -> JoinHandle<()> {
        let mut worker = self
            .worker
            .take()
            .expect("analysis worker already spawned");
        let sink = self.sink.clone();
        let spectrum = self.spectrum.clone();
        let running = self.running.clone();
        let interval = self.config.analysis_interval();

        thread::spawn(move || {
            tracing::debug!(?interval, "analysis worker started");
            while running.load(Ordering::Relaxed) {
                worker.run_cycle(&sink, &spectrum);
                thread::sleep(interval);
            }
            tracing::debug!("analysis worker stopped");
        })
    }
}

/// One analysis cycle's state: the engine, the taper, and a reused frame.
///
/// Separate from [`Pipeline`] so tests can drive cycles synchronously.
pub struct AnalysisWorker {
    engine: SpectrumEngine,
    window: HannWindow,
    frame: Vec<f32>,
}

impl AnalysisWorker {
    pub fn new(fft_size: usize) -> Self {
        Self {
            engine: SpectrumEngine::new(fft_size),
            window: HannWindow::new(fft_size),
            frame: Vec::with_capacity(fft_size),
        }
    }

    /// Snapshot, window, transform, publish. The sink lock and the spectrum
    /// lock are never held at the same time.
    pub fn run_cycle(&mut self, sink: &SampleSink, spectrum: &SpectrumCell) {
        sink.snapshot_into(&mut self.frame);
        self.window.apply(&mut self.frame);
        let bins = self.engine.transform(&self.frame);
        spectrum.publish(bins);
    }
}
