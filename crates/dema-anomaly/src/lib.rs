//! Streaming anomaly scoring
//!
//! Scores one measurement at a time against an adaptive baseline:
//!
//! - **Trend signal**: an exponential moving average applied twice in
//!   sequence (EMA of EMA, see [`smoothing`]).
//! - **Dynamic threshold**: `sensitivity` times the population standard
//!   deviation of the most recent `history_capacity` raw values, or a fixed
//!   fallback of 10.0 until that window is full (see [`threshold`]).
//! - **Verdict**: a value is anomalous when it deviates from the trend signal
//!   by strictly more than the threshold. Positive verdicts are reported to an
//!   [`AnomalyObserver`].
//!
//! ## Usage
//!
//! ```rust
//! use dema_anomaly::{AnomalyScorer, NullObserver, ScorerParameters};
//!
//! let params = ScorerParameters::new(5, 0.5, 20, 2.0).unwrap();
//! let mut scorer = AnomalyScorer::with_observer(params, NullObserver).unwrap();
//!
//! // A flat stream collapses the threshold towards zero
//! for t in 0..20 {
//!     assert!(!scorer.score(10.0, t as f64));
//! }
//! assert!(scorer.score(10.5, 20.0));
//! ```

pub mod observer;
pub mod scorer;
pub mod smoothing;
pub mod threshold;
pub mod traits;
pub mod types;

pub use observer::{AnomalyObserver, NullObserver, RecordingObserver, TracingObserver};
pub use scorer::{AnomalyScorer, ScorerParameters};
pub use smoothing::{DoubleSmoother, SmootherState};
pub use threshold::{DynamicThreshold, Threshold, FALLBACK_THRESHOLD};
pub use traits::{ScorerProperties, StreamingScorer};
pub use types::{AnomalyEvent, Verdict};
