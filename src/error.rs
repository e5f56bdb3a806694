//! Error type shared by every engine

use thiserror::Error;

/// Errors raised at the engine boundary
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("series lengths differ: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("series is empty")]
    EmptySeries,

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("parse error: {0}")]
    Parse(String),
}

impl SimError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        SimError::InvalidParameter { name, reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, SimError>;

/// Reject NaN/infinite inputs and values below `min`
pub(crate) fn ensure_at_least(name: &'static str, value: f64, min: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(SimError::invalid(name, format!("must be finite, got {}", value)));
    }
    if value < min {
        return Err(SimError::invalid(name, format!("must be >= {}, got {}", min, value)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_at_least() {
        assert!(ensure_at_least("x", 0.0, 0.0).is_ok());
        assert!(ensure_at_least("x", -0.01, 0.0).is_err());
        assert!(ensure_at_least("x", f64::NAN, 0.0).is_err());
        assert!(ensure_at_least("x", f64::INFINITY, 0.0).is_err());
    }

    #[test]
    fn test_message_names_parameter() {
        let err = SimError::invalid("runs", "must be >= 1");
        assert_eq!(err.to_string(), "invalid parameter `runs`: must be >= 1");
    }
}
