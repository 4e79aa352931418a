//! Consumers of pipeline output

use crate::pipeline::StepOutput;
use dema_core::{Error, Result};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Receives every step of a run in order
pub trait StepSink {
    fn consume(&mut self, step: &StepOutput) -> Result<()>;

    /// Called once after the last step
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Keeps every step in memory
#[derive(Debug, Clone, Default)]
pub struct CollectSink {
    steps: Vec<StepOutput>,
}

impl CollectSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &[StepOutput] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<StepOutput> {
        self.steps
    }
}

impl StepSink for CollectSink {
    fn consume(&mut self, step: &StepOutput) -> Result<()> {
        self.steps.push(*step);
        Ok(())
    }
}

#[derive(Serialize)]
struct CsvRecord {
    timestamp: usize,
    value: f64,
    is_anomaly: bool,
    injection: String,
}

impl From<&StepOutput> for CsvRecord {
    fn from(step: &StepOutput) -> Self {
        Self {
            timestamp: step.timestamp,
            value: step.value,
            is_anomaly: step.is_anomaly,
            injection: step.injection.map(|i| i.to_string()).unwrap_or_default(),
        }
    }
}

/// Writes `timestamp,value,is_anomaly,injection` rows
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl CsvSink<File> {
    /// Create (or truncate) a CSV file
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let writer = csv::Writer::from_path(path).map_err(std::io::Error::from)?;
        Ok(Self { writer })
    }
}

impl<W: Write> CsvSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(inner),
        }
    }

    /// Flush and hand back the underlying writer
    pub fn into_inner(self) -> Result<W> {
        self.writer.into_inner().map_err(|e| {
            Error::Io(std::io::Error::new(e.error().kind(), e.error().to_string()))
        })
    }
}

impl<W: Write> StepSink for CsvSink<W> {
    fn consume(&mut self, step: &StepOutput) -> Result<()> {
        self.writer
            .serialize(CsvRecord::from(step))
            .map_err(std::io::Error::from)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
