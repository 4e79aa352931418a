//! Streaming anomaly detection over a synthetic signal
//!
//! This crate re-exports the workspace crates and adds the driver that wires
//! them together:
//!
//! - [`dema_core`]: errors, validation, bounded history, configuration
//! - [`dema_signal`]: the synthetic signal generator
//! - [`dema_anomaly`]: the streaming anomaly scorer
//! - [`pipeline`]: generator -> scorer -> consumer loop
//! - [`sink`]: consumers of the per-step output
//!
//! ## Usage
//!
//! ```rust
//! use dema_stream::{CollectSink, RngSource, StreamConfig, StreamPipeline};
//!
//! let config = StreamConfig {
//!     data_stream_size: 200,
//!     ..StreamConfig::default()
//! };
//! let mut pipeline = StreamPipeline::from_config(&config, RngSource::seeded(7)).unwrap();
//! let mut sink = CollectSink::new();
//! let summary = pipeline.run(&mut sink).unwrap();
//!
//! assert_eq!(summary.samples, 200);
//! ```

pub mod pipeline;
pub mod sink;

pub use dema_anomaly;
pub use dema_core;
pub use dema_signal;

pub use dema_anomaly::{
    AnomalyEvent, AnomalyObserver, AnomalyScorer, NullObserver, RecordingObserver,
    ScorerParameters, StreamingScorer, Threshold, TracingObserver, Verdict,
};
pub use dema_core::{BoundedHistory, Error, Result, StreamConfig};
pub use dema_signal::{
    Injection, RandomSource, RngSource, Sample, ScriptedSource, SignalGenerator, SignalParameters,
};
pub use pipeline::{RunSummary, StepOutput, StreamPipeline};
pub use sink::{CollectSink, CsvSink, StepSink};
