//! Stream configuration loading
//!
//! The configuration is a flat JSON object:
//!
//! ```json
//! {
//!     "data_stream_size": 1000,
//!     "noise_level": 2.0,
//!     "seasonality": 50,
//!     "window_size": 20,
//!     "ema_alpha": 0.3,
//!     "lookback": 30,
//!     "threshold_factor": 3.0
//! }
//! ```
//!
//! An optional `seed` makes runs reproducible. Absent keys are reported as
//! [`Error::MissingConfigurationKey`], out-of-domain values as
//! [`Error::InvalidConfiguration`], both before any stream object exists.

use crate::error::{Error, Result};
use crate::validation;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Validated configuration for one generator + scorer run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamConfig {
    /// Total number of samples the generator emits
    pub data_stream_size: usize,
    /// Standard deviation multiplier of the Gaussian noise
    pub noise_level: f64,
    /// Period of the seasonal component, in samples
    pub seasonality: usize,
    /// Nominal smoothing window length
    pub window_size: usize,
    /// Smoothing factor of both EMA stages
    pub ema_alpha: f64,
    /// Capacity of the rolling history behind the dynamic threshold
    pub lookback: usize,
    /// Multiplier applied to the rolling standard deviation
    pub threshold_factor: f64,
    /// Seed for the random source; entropy-seeded when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Wire form: every key optional so absence can be told apart from bad values
#[derive(Debug, Deserialize)]
struct RawStreamConfig {
    data_stream_size: Option<i64>,
    noise_level: Option<f64>,
    seasonality: Option<i64>,
    window_size: Option<i64>,
    ema_alpha: Option<f64>,
    lookback: Option<i64>,
    threshold_factor: Option<f64>,
    seed: Option<u64>,
}

fn require<T>(value: Option<T>, key: &str) -> Result<T> {
    value.ok_or_else(|| Error::MissingConfigurationKey(key.to_string()))
}

impl RawStreamConfig {
    fn into_config(self) -> Result<StreamConfig> {
        // Presence first, so a missing key is never masked by a bad neighbour
        let size = require(self.data_stream_size, "data_stream_size")?;
        let noise = require(self.noise_level, "noise_level")?;
        let cycle = require(self.seasonality, "seasonality")?;
        let window = require(self.window_size, "window_size")?;
        let alpha = require(self.ema_alpha, "ema_alpha")?;
        let lookback = require(self.lookback, "lookback")?;
        let factor = require(self.threshold_factor, "threshold_factor")?;

        Ok(StreamConfig {
            data_stream_size: validation::positive_len_from_i64("data_stream_size", size)?,
            noise_level: validation::non_negative_real("noise_level", noise)?,
            seasonality: validation::positive_len_from_i64("seasonality", cycle)?,
            window_size: validation::positive_len_from_i64("window_size", window)?,
            ema_alpha: validation::smoothing_factor("ema_alpha", alpha)?,
            lookback: validation::positive_len_from_i64("lookback", lookback)?,
            threshold_factor: validation::positive_real("threshold_factor", factor)?,
            seed: self.seed,
        })
    }
}

impl StreamConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawStreamConfig = serde_json::from_str(json)?;
        raw.into_config()
    }

    /// Read, parse and validate a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading stream configuration from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;
        debug!(config = %config.to_json_string()?, "Stream configuration loaded");
        Ok(config)
    }

    /// Compact JSON form, readable back by [`StreamConfig::from_json_str`]
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Re-check the domain of every field, for configs built in code
    pub fn validate(&self) -> Result<()> {
        validation::positive_len("data_stream_size", self.data_stream_size)?;
        validation::non_negative_real("noise_level", self.noise_level)?;
        validation::positive_len("seasonality", self.seasonality)?;
        validation::positive_len("window_size", self.window_size)?;
        validation::smoothing_factor("ema_alpha", self.ema_alpha)?;
        validation::positive_len("lookback", self.lookback)?;
        validation::positive_real("threshold_factor", self.threshold_factor)?;
        Ok(())
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            data_stream_size: 1000,
            noise_level: 2.0,
            seasonality: 50,
            window_size: 20,
            ema_alpha: 0.3,
            lookback: 30,
            threshold_factor: 3.0,
            seed: None,
        }
    }
}
