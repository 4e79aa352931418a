//! Streaming scorer traits

use crate::types::Verdict;

/// Properties of a scorer that don't depend on its state
pub trait ScorerProperties {
    /// Get the name of the scoring algorithm
    fn algorithm_name(&self) -> &'static str;

    /// Number of observations before the dynamic threshold applies
    fn warmup_len(&self) -> usize;
}

/// Online scoring of one value at a time
pub trait StreamingScorer: ScorerProperties {
    /// Fold in one value and return the decision for it
    fn observe(&mut self, value: f64, timestamp: f64) -> Verdict;

    /// Return to the freshly constructed state
    fn reset(&mut self);

    /// Number of values observed since construction or the last reset
    fn observations(&self) -> usize;

    /// Observe a slice of `(timestamp, value)` pairs in order
    fn observe_all(&mut self, points: &[(f64, f64)]) -> Vec<Verdict> {
        points
            .iter()
            .map(|&(timestamp, value)| self.observe(value, timestamp))
            .collect()
    }
}
