//! Parameter domain checks shared by constructors and the config loader

use crate::error::{Error, Result};

/// Require a length/count to be strictly positive
pub fn positive_len(name: &str, value: usize) -> Result<usize> {
    if value == 0 {
        return Err(Error::not_positive(name, value));
    }
    Ok(value)
}

/// Convert a signed integer read from configuration into a positive length
pub fn positive_len_from_i64(name: &str, value: i64) -> Result<usize> {
    if value <= 0 {
        return Err(Error::not_positive(name, value));
    }
    usize::try_from(value)
        .map_err(|_| Error::InvalidConfiguration(format!("{name} is too large: {value}")))
}

/// Require a finite, strictly positive real
pub fn positive_real(name: &str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(Error::non_finite(name));
    }
    if value <= 0.0 {
        return Err(Error::not_positive(name, value));
    }
    Ok(value)
}

/// Require a finite, non-negative real
pub fn non_negative_real(name: &str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(Error::non_finite(name));
    }
    if value < 0.0 {
        return Err(Error::out_of_range(name, value, "[0, inf)"));
    }
    Ok(value)
}

/// Require a smoothing factor in (0, 1]
pub fn smoothing_factor(name: &str, value: f64) -> Result<f64> {
    if !(value > 0.0 && value <= 1.0) {
        return Err(Error::out_of_range(name, value, "(0, 1]"));
    }
    Ok(value)
}
