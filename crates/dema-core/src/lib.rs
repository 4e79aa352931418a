//! Core types for streaming anomaly scoring
//!
//! This crate holds the pieces shared by the signal generator, the anomaly
//! scorer and the driver:
//!
//! - [`Error`] / [`Result`]: the unified error type
//! - [`validation`]: parameter domain checks used by every constructor
//! - [`BoundedHistory`]: the fixed-capacity FIFO behind the dynamic threshold
//! - [`StreamConfig`]: JSON configuration loading
//!
//! # Example
//!
//! ```rust
//! use dema_core::BoundedHistory;
//!
//! let mut history = BoundedHistory::new(3).unwrap();
//! for v in [1.0, 2.0, 3.0, 4.0] {
//!     history.push(v);
//! }
//! assert_eq!(history.to_vec(), vec![2.0, 3.0, 4.0]);
//! ```

pub mod config;
pub mod error;
pub mod validation;
pub mod window;

pub use config::StreamConfig;
pub use error::{Error, Result};
pub use window::BoundedHistory;
