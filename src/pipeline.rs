//! Generator -> scorer -> consumer driver
//!
//! One step draws a sample, scores it and hands the resulting
//! [`StepOutput`] on. The pipeline ends when the generator is exhausted.

use crate::sink::StepSink;
use dema_anomaly::{AnomalyScorer, ScorerParameters, StreamingScorer};
use dema_core::{Result, StreamConfig};
use dema_signal::{Injection, RandomSource, SignalGenerator, SignalParameters};
use std::fmt;
use tracing::{debug, info};

/// What the consumer sees for each sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutput {
    pub timestamp: usize,
    pub value: f64,
    pub is_anomaly: bool,
    /// Ground truth from the generator
    pub injection: Option<Injection>,
}

/// Tallies over a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub samples: usize,
    pub anomalies: usize,
    pub injected: usize,
    /// Injected samples that were also flagged
    pub caught: usize,
}

impl RunSummary {
    fn record(&mut self, step: &StepOutput) {
        self.samples += 1;
        if step.is_anomaly {
            self.anomalies += 1;
        }
        if step.injection.is_some() {
            self.injected += 1;
            if step.is_anomaly {
                self.caught += 1;
            }
        }
    }

    /// Flagged samples that carried no injected perturbation
    pub fn organic_anomalies(&self) -> usize {
        self.anomalies - self.caught
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} samples, {} flagged, {}/{} injected perturbations caught",
            self.samples, self.anomalies, self.caught, self.injected
        )
    }
}

/// Sequential driver over one generator and one scorer
#[derive(Debug)]
pub struct StreamPipeline<R: RandomSource, S: StreamingScorer = AnomalyScorer> {
    generator: SignalGenerator<R>,
    scorer: S,
    summary: RunSummary,
}

impl<R: RandomSource> StreamPipeline<R, AnomalyScorer> {
    /// Build both stages from a configuration
    ///
    /// Every parameter is validated before either stage is constructed.
    pub fn from_config(config: &StreamConfig, source: R) -> Result<Self> {
        config.validate()?;
        let signal = SignalParameters::from_config(config)?;
        let scoring = ScorerParameters::from_config(config)?;
        debug!(?signal, ?scoring, "Building stream pipeline");

        Ok(Self::new(
            SignalGenerator::new(signal, source)?,
            AnomalyScorer::new(scoring)?,
        ))
    }
}

impl<R: RandomSource, S: StreamingScorer> StreamPipeline<R, S> {
    pub fn new(generator: SignalGenerator<R>, scorer: S) -> Self {
        Self {
            generator,
            scorer,
            summary: RunSummary::default(),
        }
    }

    /// Generate and score one sample; `None` once the generator is exhausted
    pub fn step(&mut self) -> Option<StepOutput> {
        let sample = self.generator.next_sample()?;
        let verdict = self.scorer.observe(sample.value, sample.index as f64);
        let output = StepOutput {
            timestamp: sample.index,
            value: sample.value,
            is_anomaly: verdict.is_anomaly,
            injection: sample.injection,
        };
        self.summary.record(&output);
        Some(output)
    }

    /// Drain the stream into `sink`
    pub fn run<K: StepSink + ?Sized>(&mut self, sink: &mut K) -> Result<RunSummary> {
        while let Some(step) = self.step() {
            sink.consume(&step)?;
        }
        sink.finish()?;
        info!(
            samples = self.summary.samples,
            anomalies = self.summary.anomalies,
            injected = self.summary.injected,
            caught = self.summary.caught,
            "Stream finished"
        );
        Ok(self.summary)
    }

    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    pub fn generator(&self) -> &SignalGenerator<R> {
        &self.generator
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }
}

impl<R: RandomSource, S: StreamingScorer> Iterator for StreamPipeline<R, S> {
    type Item = StepOutput;

    fn next(&mut self) -> Option<StepOutput> {
        self.step()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.generator.size_hint()
    }
}
