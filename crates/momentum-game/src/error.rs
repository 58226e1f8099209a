//! Tuning validation errors

/// Errors produced when validating movement tuning.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("'{field}' must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    #[error("'{field}' must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("'{field}' must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("'{field}' must lie in {range}, got {value}")]
    OutOfRange {
        field: &'static str,
        range: &'static str,
        value: f32,
    },
}

/// Reject NaN and infinities
pub(crate) fn finite(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

/// Finite and `>= 0`
pub(crate) fn non_negative(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if finite(field, value)? < 0.0 {
        return Err(ConfigError::Negative { field, value });
    }
    Ok(value)
}

/// Finite and `> 0`
pub(crate) fn positive(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if finite(field, value)? <= 0.0 {
        return Err(ConfigError::NotPositive { field, value });
    }
    Ok(value)
}
