//! Types produced by the scorer

use crate::threshold::Threshold;
use std::fmt;

/// Full record of one scoring decision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict {
    pub value: f64,
    pub timestamp: f64,
    /// Trend signal the value was compared against
    pub trend: f64,
    pub threshold: Threshold,
    /// `|value - trend|`
    pub deviation: f64,
    pub is_anomaly: bool,
}

impl Verdict {
    /// Observability payload for a positive verdict
    pub fn event(&self) -> AnomalyEvent {
        AnomalyEvent {
            value: self.value,
            timestamp: self.timestamp,
            trend: self.trend,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Verdict {{ t: {}, value: {:.4}, trend: {:.4}, deviation: {:.4}, threshold: {}, anomaly: {} }}",
            self.timestamp, self.value, self.trend, self.deviation, self.threshold, self.is_anomaly
        )
    }
}

/// Emitted to the observer whenever a value is flagged
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnomalyEvent {
    pub value: f64,
    pub timestamp: f64,
    pub trend: f64,
}

impl fmt::Display for AnomalyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Anomaly detected: {} at time {} deviates significantly from expected trend {}",
            self.value, self.timestamp, self.trend
        )
    }
}
