//! Two-stage exponential smoothing
//!
//! The trend signal is an EMA of an EMA:
//!
//! ```text
//! ema    <- alpha * x   + (1 - alpha) * ema
//! double <- alpha * ema + (1 - alpha) * double
//! ```
//!
//! and the signal reported is `double` itself. This is intentionally not the
//! textbook DEMA `2 * ema - double`; it lags more and smooths harder, and
//! verdicts depend on that exact recurrence.

/// Smoothing state; empty until the first value arrives
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SmootherState {
    Uninitialized,
    Initialized { ema: f64, double_ema: f64 },
}

/// EMA-of-EMA trend estimator
#[derive(Debug, Clone, PartialEq)]
pub struct DoubleSmoother {
    alpha: f64,
    state: SmootherState,
}

impl DoubleSmoother {
    /// `alpha` must already be validated to lie in (0, 1]
    pub(crate) fn new(alpha: f64) -> Self {
        Self {
            alpha,
            state: SmootherState::Uninitialized,
        }
    }

    /// Fold `value` in and return the updated trend signal
    pub fn update(&mut self, value: f64) -> f64 {
        let (ema, double_ema) = match self.state {
            // First value seeds both stages
            SmootherState::Uninitialized => (value, value),
            SmootherState::Initialized { ema, double_ema } => {
                let one_minus_alpha = 1.0 - self.alpha;
                let ema = self.alpha * value + one_minus_alpha * ema;
                let double_ema = self.alpha * ema + one_minus_alpha * double_ema;
                (ema, double_ema)
            }
        };
        self.state = SmootherState::Initialized { ema, double_ema };
        double_ema
    }

    /// First-stage estimate
    pub fn trend(&self) -> Option<f64> {
        match self.state {
            SmootherState::Uninitialized => None,
            SmootherState::Initialized { ema, .. } => Some(ema),
        }
    }

    /// Second-stage estimate, i.e. the trend signal
    pub fn double_trend(&self) -> Option<f64> {
        match self.state {
            SmootherState::Uninitialized => None,
            SmootherState::Initialized { double_ema, .. } => Some(double_ema),
        }
    }

    pub fn state(&self) -> SmootherState {
        self.state
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self.state, SmootherState::Initialized { .. })
    }

    pub fn reset(&mut self) {
        self.state = SmootherState::Uninitialized;
    }
}
