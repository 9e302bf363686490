use thiserror::Error;

use crate::{is_finite, Vec3};

/// Errors surfaced by the aiming workspace.
///
/// Shot terminations (hit, miss, timeout, unreachable) are *not* errors; they are
/// reported as outcomes. Only malformed inputs and configuration land here.
#[derive(Debug, Error)]
pub enum AimError {
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    #[error("malformed configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("cannot read configuration: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = AimError> = std::result::Result<T, E>;

impl AimError {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        AimError::InvalidArgument { name, reason: reason.into() }
    }
}

/// Fails unless `value` is finite and strictly positive.
pub fn ensure_positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(AimError::invalid(name, format!("must be > 0, got {value}")))
    }
}

/// Fails unless `value` is finite and not negative.
pub fn ensure_non_negative(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(AimError::invalid(name, format!("must be >= 0, got {value}")))
    }
}

pub fn ensure_finite(name: &'static str, v: &Vec3) -> Result<()> {
    if is_finite(v) {
        Ok(())
    } else {
        Err(AimError::invalid(name, format!("must be finite, got ({}, {}, {})", v.x, v.y, v.z)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_rejects_zero_and_nan() {
        assert!(ensure_positive("mass", 1.0).is_ok());
        assert!(ensure_positive("mass", 0.0).is_err());
        assert!(ensure_positive("mass", f64::NAN).is_err());
    }

    #[test]
    fn message_names_the_argument() {
        let err = ensure_non_negative("speed", -2.0).unwrap_err();
        assert_eq!(err.to_string(), "invalid argument `speed`: must be >= 0, got -2");
    }
}
