//! Audio capture and pipeline scheduling for specviz
//!
//! This crate owns the producer half of the visualizer pipeline:
//! - SampleSink: circular store of the most recent window of samples
//! - capture: cpal input stream feeding the sink from the default device
//! - Pipeline: the context object tying sink, engine, and published
//!   spectrum together, plus the periodic analysis worker thread

mod capture;
mod pipeline;
mod sink;

pub use capture::{CaptureError, CaptureEvent, CaptureSource};
pub use pipeline::{AnalysisWorker, Pipeline, PipelineConfig};
pub use sink::SampleSink;
