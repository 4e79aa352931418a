//! Volatility-derived deviation threshold

use dema_core::BoundedHistory;
use std::fmt;

/// Bound used until the history window is full
pub const FALLBACK_THRESHOLD: f64 = 10.0;

/// Threshold in effect for one verdict
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    /// History not yet full; fixed bound
    Fallback(f64),
    /// `sensitivity * population_std(history)`
    Dynamic(f64),
}

impl Threshold {
    pub fn value(self) -> f64 {
        match self {
            Threshold::Fallback(v) | Threshold::Dynamic(v) => v,
        }
    }

    pub fn is_dynamic(self) -> bool {
        matches!(self, Threshold::Dynamic(_))
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Threshold::Fallback(v) => write!(f, "{v:.4} (fallback)"),
            Threshold::Dynamic(v) => write!(f, "{v:.4} (dynamic)"),
        }
    }
}

/// Recomputes the threshold from the current window on every call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DynamicThreshold {
    sensitivity: f64,
}

impl DynamicThreshold {
    /// `sensitivity` must already be validated as positive
    pub(crate) fn new(sensitivity: f64) -> Self {
        Self { sensitivity }
    }

    pub fn compute(&self, history: &BoundedHistory) -> Threshold {
        if !history.is_full() {
            return Threshold::Fallback(FALLBACK_THRESHOLD);
        }
        // A full window is never empty
        let spread = history.population_std_dev().unwrap_or(0.0);
        Threshold::Dynamic(self.sensitivity * spread)
    }

    pub fn sensitivity(&self) -> f64 {
        self.sensitivity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fallback_until_full() {
        let threshold = DynamicThreshold::new(2.0);
        let mut history = BoundedHistory::new(3).unwrap();
        assert_eq!(threshold.compute(&history), Threshold::Fallback(10.0));

        history.push(1.0);
        history.push(100.0);
        assert_eq!(threshold.compute(&history), Threshold::Fallback(10.0));

        history.push(1.0);
        assert!(threshold.compute(&history).is_dynamic());
    }

    #[test]
    fn test_dynamic_value() {
        let threshold = DynamicThreshold::new(2.0);
        let mut history = BoundedHistory::new(5).unwrap();
        for v in [10.0, 10.0, 10.0, 10.0, 50.0] {
            history.push(v);
        }
        assert_relative_eq!(threshold.compute(&history).value(), 32.0, epsilon = 1e-12);
    }

    #[test]
    fn test_reacts_as_values_roll_off() {
        let threshold = DynamicThreshold::new(1.0);
        let mut history = BoundedHistory::new(2).unwrap();
        history.push(0.0);
        history.push(10.0);
        assert_relative_eq!(threshold.compute(&history).value(), 5.0, epsilon = 1e-12);

        history.push(10.0);
        assert_eq!(threshold.compute(&history), Threshold::Dynamic(0.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Threshold::Fallback(10.0).to_string(), "10.0000 (fallback)");
        assert_eq!(Threshold::Dynamic(1.5).to_string(), "1.5000 (dynamic)");
    }
}
