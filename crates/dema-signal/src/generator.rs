//! Synthetic measurement stream
//!
//! Each sample is the sum of four components:
//!
//! - a linear trend from 10 at the first index to 100 at the last,
//! - a seasonal sine of amplitude 15 and period `cycle_period`,
//! - Gaussian noise scaled by `noise_level`,
//! - an occasional injected spike (+50) or drop (-50).
//!
//! Injection uses two independent uniform gates: a spike when the first draw
//! exceeds 0.98, otherwise a drop when a second draw exceeds 0.96. The
//! unconditional drop rate is therefore 0.98 * 0.04 = 3.92%, not 4%.

use crate::random::RandomSource;
use dema_core::{validation, Result, StreamConfig};
use std::f64::consts::PI;
use std::fmt;
use std::iter::FusedIterator;
use tracing::{debug, trace};

/// Trend value at the first index
pub const TREND_START: f64 = 10.0;
/// Trend value at the last index
pub const TREND_END: f64 = 100.0;
/// Amplitude of the seasonal sine
pub const SEASONAL_AMPLITUDE: f64 = 15.0;
/// Magnitude of an injected spike or drop
pub const INJECTION_MAGNITUDE: f64 = 50.0;
/// First uniform gate; above it a spike is injected
pub const SPIKE_GATE: f64 = 0.98;
/// Second uniform gate; above it a drop is injected
pub const DROP_GATE: f64 = 0.96;

/// Perturbation added to a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Injection {
    /// +50 added
    Spike,
    /// 50 subtracted
    Drop,
}

impl Injection {
    /// Signed offset this injection adds to the clean signal
    pub fn offset(self) -> f64 {
        match self {
            Injection::Spike => INJECTION_MAGNITUDE,
            Injection::Drop => -INJECTION_MAGNITUDE,
        }
    }
}

impl fmt::Display for Injection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Injection::Spike => write!(f, "spike"),
            Injection::Drop => write!(f, "drop"),
        }
    }
}

/// One emitted measurement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Position in the stream, doubling as the timestamp
    pub index: usize,
    pub value: f64,
    /// Ground truth: the perturbation folded into `value`, if any
    pub injection: Option<Injection>,
}

/// Immutable generator parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalParameters {
    /// Total number of samples emitted before exhaustion
    pub size: usize,
    /// Scale of the N(0, 1) noise
    pub noise_level: f64,
    /// Period of the seasonal component, in samples
    pub cycle_period: usize,
}

impl SignalParameters {
    /// Create validated parameters
    pub fn new(size: usize, noise_level: f64, cycle_period: usize) -> Result<Self> {
        let params = Self {
            size,
            noise_level,
            cycle_period,
        };
        params.validate()?;
        Ok(params)
    }

    /// Take `data_stream_size`, `noise_level` and `seasonality`
    pub fn from_config(config: &StreamConfig) -> Result<Self> {
        Self::new(config.data_stream_size, config.noise_level, config.seasonality)
    }

    pub fn validate(&self) -> Result<()> {
        validation::positive_len("size", self.size)?;
        validation::non_negative_real("noise_level", self.noise_level)?;
        validation::positive_len("cycle_period", self.cycle_period)?;
        Ok(())
    }
}

/// Emits `size` samples one at a time, then stays exhausted
#[derive(Debug, Clone)]
pub struct SignalGenerator<R: RandomSource> {
    params: SignalParameters,
    cursor: usize,
    source: R,
}

impl<R: RandomSource> SignalGenerator<R> {
    /// Create a generator; fails with `InvalidConfiguration` on bad parameters
    pub fn new(params: SignalParameters, source: R) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            cursor: 0,
            source,
        })
    }

    /// Next sample, or `None` once `size` samples have been emitted
    pub fn next_sample(&mut self) -> Option<Sample> {
        if self.cursor >= self.params.size {
            return None;
        }

        let index = self.cursor;
        let clean = self.trend_at(index)
            + self.seasonal_at(index)
            + self.params.noise_level * self.source.standard_normal();

        let injection = self.draw_injection();
        let value = clean + injection.map_or(0.0, Injection::offset);

        if let Some(kind) = injection {
            debug!(index, value, "Injected {}", kind);
        }
        trace!(index, value, "Generated sample");

        self.cursor += 1;
        Some(Sample {
            index,
            value,
            injection,
        })
    }

    /// Two independent gates; the second is only drawn when the first fails
    fn draw_injection(&mut self) -> Option<Injection> {
        if self.source.unit_uniform() > SPIKE_GATE {
            Some(Injection::Spike)
        } else if self.source.unit_uniform() > DROP_GATE {
            Some(Injection::Drop)
        } else {
            None
        }
    }

    /// Linear trend at `index`, evaluated over the full declared size
    pub fn trend_at(&self, index: usize) -> f64 {
        let size = self.params.size;
        if size == 1 {
            return TREND_START;
        }
        // Pin the end point so it is exact regardless of rounding in the step
        if index == size - 1 {
            return TREND_END;
        }
        let step = (TREND_END - TREND_START) / (size - 1) as f64;
        TREND_START + index as f64 * step
    }

    /// Seasonal component at `index`
    pub fn seasonal_at(&self, index: usize) -> f64 {
        SEASONAL_AMPLITUDE * (2.0 * PI * index as f64 / self.params.cycle_period as f64).sin()
    }

    /// Index of the next sample to emit
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Samples left before exhaustion
    pub fn remaining(&self) -> usize {
        self.params.size - self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.params.size
    }

    pub fn parameters(&self) -> &SignalParameters {
        &self.params
    }

    pub fn source(&self) -> &R {
        &self.source
    }
}

impl<R: RandomSource> Iterator for SignalGenerator<R> {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        self.next_sample()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl<R: RandomSource> ExactSizeIterator for SignalGenerator<R> {}

impl<R: RandomSource> FusedIterator for SignalGenerator<R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedSource;
    use dema_core::Error;

    fn quiet(size: usize, cycle: usize) -> SignalGenerator<ScriptedSource> {
        let params = SignalParameters::new(size, 0.0, cycle).unwrap();
        SignalGenerator::new(params, ScriptedSource::quiet()).unwrap()
    }

    #[test]
    fn test_invalid_parameters() {
        for (size, noise, cycle) in [(0, 1.0, 10), (10, -1.0, 10), (10, 1.0, 0), (10, f64::NAN, 10)] {
            assert!(matches!(
                SignalParameters::new(size, noise, cycle),
                Err(Error::InvalidConfiguration(_))
            ));
        }

        let bad = SignalParameters {
            size: 5,
            noise_level: 0.0,
            cycle_period: 0,
        };
        assert!(SignalGenerator::new(bad, ScriptedSource::quiet()).is_err());
    }

    #[test]
    fn test_trend_endpoints_size_three() {
        let generator = quiet(3, 7);
        assert_eq!(generator.trend_at(0), 10.0);
        assert_eq!(generator.trend_at(1), 55.0);
        assert_eq!(generator.trend_at(2), 100.0);
    }

    #[test]
    fn test_trend_single_sample() {
        let generator = quiet(1, 7);
        assert_eq!(generator.trend_at(0), 10.0);
    }

    #[test]
    fn test_trend_last_point_exact() {
        let generator = quiet(7, 3);
        assert_eq!(generator.trend_at(0), TREND_START);
        assert_eq!(generator.trend_at(6), TREND_END);
        assert_eq!(generator.trend_at(3), 55.0);
    }

    #[test]
    fn test_emits_size_samples_then_exhausts() {
        let mut generator = quiet(4, 2);
        for expected in 0..4 {
            assert_eq!(generator.remaining(), 4 - expected);
            let sample = generator.next_sample().unwrap();
            assert_eq!(sample.index, expected);
        }
        assert!(generator.is_exhausted());
        for _ in 0..5 {
            assert_eq!(generator.next_sample(), None);
        }
        assert_eq!(generator.cursor(), 4);
    }

    #[test]
    fn test_exhausted_generator_draws_nothing() {
        let params = SignalParameters::new(2, 1.0, 4).unwrap();
        let mut generator = SignalGenerator::new(params, ScriptedSource::quiet()).unwrap();
        generator.by_ref().for_each(drop);
        let normals = generator.source().normal_draws();
        let uniforms = generator.source().uniform_draws();
        assert_eq!(generator.next(), None);
        assert_eq!(generator.source().normal_draws(), normals);
        assert_eq!(generator.source().uniform_draws(), uniforms);
    }

    #[test]
    fn test_clean_signal_is_trend_plus_seasonal() {
        let generator = quiet(20, 8);
        let expected: Vec<f64> = (0..20)
            .map(|c| generator.trend_at(c) + 15.0 * (2.0 * PI * c as f64 / 8.0).sin())
            .collect();
        let values: Vec<f64> = generator.map(|s| s.value).collect();
        assert_eq!(values, expected);
    }

    #[test]
    fn test_spike_injection() {
        let params = SignalParameters::new(1, 0.0, 4).unwrap();
        let source = ScriptedSource::new(vec![], vec![0.99]);
        let mut generator = SignalGenerator::new(params, source).unwrap();
        let sample = generator.next_sample().unwrap();
        assert_eq!(sample.injection, Some(Injection::Spike));
        assert_eq!(sample.value, 60.0);
        // The drop gate is never drawn after a spike
        assert_eq!(generator.source().uniform_draws(), 1);
    }

    #[test]
    fn test_drop_injection() {
        let params = SignalParameters::new(1, 0.0, 4).unwrap();
        let source = ScriptedSource::new(vec![], vec![0.5, 0.97]);
        let mut generator = SignalGenerator::new(params, source).unwrap();
        let sample = generator.next_sample().unwrap();
        assert_eq!(sample.injection, Some(Injection::Drop));
        assert_eq!(sample.value, -40.0);
        assert_eq!(generator.source().uniform_draws(), 2);
    }

    #[test]
    fn test_gates_are_strict() {
        let params = SignalParameters::new(1, 0.0, 4).unwrap();
        let source = ScriptedSource::new(vec![], vec![SPIKE_GATE, DROP_GATE]);
        let mut generator = SignalGenerator::new(params, source).unwrap();
        assert_eq!(generator.next_sample().unwrap().injection, None);
    }

    #[test]
    fn test_noise_scaled_by_level() {
        let params = SignalParameters::new(1, 2.5, 4).unwrap();
        let source = ScriptedSource::new(vec![-1.2], vec![0.0]);
        let mut generator = SignalGenerator::new(params, source).unwrap();
        let sample = generator.next_sample().unwrap();
        assert_eq!(sample.value, 10.0 + 2.5 * -1.2);
    }

    #[test]
    fn test_exact_size_iterator() {
        let mut generator = quiet(5, 3);
        assert_eq!(generator.len(), 5);
        generator.next();
        assert_eq!(generator.len(), 4);
        assert_eq!(generator.count(), 4);
    }

    #[test]
    fn test_from_config() {
        let config = StreamConfig {
            data_stream_size: 12,
            noise_level: 0.5,
            seasonality: 4,
            ..StreamConfig::default()
        };
        let params = SignalParameters::from_config(&config).unwrap();
        assert_eq!(params, SignalParameters::new(12, 0.5, 4).unwrap());
    }

    #[test]
    fn test_injection_display_and_offset() {
        assert_eq!(Injection::Spike.to_string(), "spike");
        assert_eq!(Injection::Drop.to_string(), "drop");
        assert_eq!(Injection::Spike.offset(), 50.0);
        assert_eq!(Injection::Drop.offset(), -50.0);
    }
}
