//! Synthetic signal generation
//!
//! Produces a finite stream of `(index, value)` samples built from a linear
//! trend, a seasonal sine, Gaussian noise and randomly injected spikes and
//! drops. All randomness comes from an injected [`RandomSource`].
//!
//! ## Usage
//!
//! ```rust
//! use dema_signal::{RngSource, SignalGenerator, SignalParameters};
//!
//! let params = SignalParameters::new(100, 1.0, 25).unwrap();
//! let generator = SignalGenerator::new(params, RngSource::seeded(42)).unwrap();
//!
//! let samples: Vec<_> = generator.collect();
//! assert_eq!(samples.len(), 100);
//! assert_eq!(samples[99].index, 99);
//! ```

pub mod generator;
pub mod random;

pub use generator::{Injection, Sample, SignalGenerator, SignalParameters};
pub use random::{RandomSource, RngSource, ScriptedSource};
