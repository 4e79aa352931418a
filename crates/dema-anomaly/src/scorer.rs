//! Streaming anomaly scorer
//!
//! Each call runs four steps in a fixed order:
//!
//! 1. fold the value into the EMA-of-EMA trend ([`DoubleSmoother`]),
//! 2. append the raw value to the bounded history,
//! 3. compute the threshold from the window as it now stands,
//! 4. flag the value when `|value - trend| > threshold`.
//!
//! Because the value is folded in before it is judged, a single outlier pulls
//! both the trend and the window spread toward itself.

use crate::observer::{AnomalyObserver, TracingObserver};
use crate::smoothing::DoubleSmoother;
use crate::threshold::{DynamicThreshold, Threshold};
use crate::traits::{ScorerProperties, StreamingScorer};
use crate::types::Verdict;
use dema_core::{validation, BoundedHistory, Result, StreamConfig};
use tracing::{debug, warn};

/// Parameters for the scorer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScorerParameters {
    /// Nominal smoothing window; validated and kept, not used by the recurrence
    pub window_length: usize,
    /// Smoothing factor of both EMA stages, in (0, 1]
    pub alpha: f64,
    /// Number of recent raw values behind the dynamic threshold
    pub history_capacity: usize,
    /// Multiplier on the window's standard deviation
    pub sensitivity: f64,
}

impl ScorerParameters {
    /// Create validated parameters
    pub fn new(
        window_length: usize,
        alpha: f64,
        history_capacity: usize,
        sensitivity: f64,
    ) -> Result<Self> {
        let params = Self {
            window_length,
            alpha,
            history_capacity,
            sensitivity,
        };
        params.validate()?;
        Ok(params)
    }

    /// Take `window_size`, `ema_alpha`, `lookback` and `threshold_factor`
    pub fn from_config(config: &StreamConfig) -> Result<Self> {
        Self::new(
            config.window_size,
            config.ema_alpha,
            config.lookback,
            config.threshold_factor,
        )
    }

    pub fn validate(&self) -> Result<()> {
        validation::positive_len("window_length", self.window_length)?;
        validation::smoothing_factor("alpha", self.alpha)?;
        validation::positive_len("history_capacity", self.history_capacity)?;
        validation::positive_real("sensitivity", self.sensitivity)?;
        Ok(())
    }
}

impl Default for ScorerParameters {
    fn default() -> Self {
        Self {
            window_length: 20,
            alpha: 0.3,
            history_capacity: 30,
            sensitivity: 3.0,
        }
    }
}

/// Double-smoothed trend + rolling standard deviation anomaly scorer
#[derive(Debug, Clone)]
pub struct AnomalyScorer<O: AnomalyObserver = TracingObserver> {
    params: ScorerParameters,
    smoother: DoubleSmoother,
    history: BoundedHistory,
    threshold: DynamicThreshold,
    observer: O,
    observations: usize,
}

impl AnomalyScorer<TracingObserver> {
    /// Create a scorer that logs anomalies through `tracing`
    pub fn new(params: ScorerParameters) -> Result<Self> {
        Self::with_observer(params, TracingObserver)
    }
}

impl<O: AnomalyObserver> AnomalyScorer<O> {
    /// Create a scorer with a custom observer
    pub fn with_observer(params: ScorerParameters, observer: O) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            smoother: DoubleSmoother::new(params.alpha),
            history: BoundedHistory::new(params.history_capacity)?,
            threshold: DynamicThreshold::new(params.sensitivity),
            params,
            observer,
            observations: 0,
        })
    }

    /// Score one value; `true` means anomalous
    pub fn score(&mut self, value: f64, timestamp: f64) -> bool {
        self.evaluate(value, timestamp).is_anomaly
    }

    /// Score one value and return the full decision record
    pub fn evaluate(&mut self, value: f64, timestamp: f64) -> Verdict {
        self.observations += 1;

        if !value.is_finite() {
            return self.reject_non_finite(value, timestamp);
        }

        let trend = self.trend_signal(value);

        let was_full = self.history.is_full();
        self.history.push(value);
        if !was_full && self.history.is_full() {
            debug!(
                observations = self.observations,
                "History window full, switching to dynamic threshold"
            );
        }

        let threshold = self.threshold.compute(&self.history);
        let deviation = (value - trend).abs();
        let verdict = Verdict {
            value,
            timestamp,
            trend,
            threshold,
            deviation,
            is_anomaly: deviation > threshold.value(),
        };

        if verdict.is_anomaly {
            self.notify(&verdict);
        }
        verdict
    }

    fn notify(&mut self, verdict: &Verdict) {
        if self.observer.is_enabled() {
            self.observer.on_anomaly(&verdict.event());
        }
    }

    /// Fold `value` into the smoother and return the new trend signal
    fn trend_signal(&mut self, value: f64) -> f64 {
        self.smoother.update(value)
    }

    /// NaN/Inf readings are flagged but kept out of the trend and the window
    fn reject_non_finite(&mut self, value: f64, timestamp: f64) -> Verdict {
        warn!(value, timestamp, "Non-finite value excluded from trend and history");
        let verdict = Verdict {
            value,
            timestamp,
            trend: self.smoother.double_trend().unwrap_or(f64::NAN),
            threshold: self.threshold.compute(&self.history),
            deviation: f64::INFINITY,
            is_anomaly: true,
        };
        self.notify(&verdict);
        verdict
    }

    /// Threshold that would apply to the current window
    pub fn current_threshold(&self) -> Threshold {
        self.threshold.compute(&self.history)
    }

    /// First-stage smoothed estimate
    pub fn trend(&self) -> Option<f64> {
        self.smoother.trend()
    }

    /// Trend signal (second-stage estimate)
    pub fn double_trend(&self) -> Option<f64> {
        self.smoother.double_trend()
    }

    pub fn smoother(&self) -> &DoubleSmoother {
        &self.smoother
    }

    pub fn history(&self) -> &BoundedHistory {
        &self.history
    }

    pub fn parameters(&self) -> &ScorerParameters {
        &self.params
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }
}

impl<O: AnomalyObserver> ScorerProperties for AnomalyScorer<O> {
    fn algorithm_name(&self) -> &'static str {
        "EMA-of-EMA"
    }

    fn warmup_len(&self) -> usize {
        self.params.history_capacity
    }
}

impl<O: AnomalyObserver> StreamingScorer for AnomalyScorer<O> {
    fn observe(&mut self, value: f64, timestamp: f64) -> Verdict {
        self.evaluate(value, timestamp)
    }

    fn reset(&mut self) {
        self.smoother.reset();
        self.history.clear();
        self.observations = 0;
    }

    fn observations(&self) -> usize {
        self.observations
    }
}
