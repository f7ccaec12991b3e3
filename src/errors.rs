use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("Physics error: {0}")]
    PhysicsError(String),

    #[error("Mission error: {0}")]
    MissionError(String),

    #[error("Initialization error: {0}")]
    InitializationError(String),
}

pub type SimulationResult<T> = Result<T, SimulationError>;

/// Rejects non-finite values with a message naming the field.
pub(crate) fn ensure_finite(name: &str, value: f64) -> SimulationResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SimulationError::InitializationError(format!(
            "{} must be finite, got {}",
            name, value
        )))
    }
}

pub(crate) fn ensure_positive(name: &str, value: f64) -> SimulationResult<()> {
    ensure_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(SimulationError::InitializationError(format!(
            "{} must be positive, got {}",
            name, value
        )))
    }
}

pub(crate) fn ensure_non_negative(name: &str, value: f64) -> SimulationResult<()> {
    ensure_finite(name, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(SimulationError::InitializationError(format!(
            "{} must not be negative, got {}",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ensure_positive("time_step", 0.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Initialization error: time_step must be positive, got 0"
        );

        let err = ensure_finite("altitude", f64::NAN).unwrap_err();
        assert!(err.to_string().contains("altitude must be finite"));
    }

    #[test]
    fn test_non_negative_accepts_zero() {
        assert!(ensure_non_negative("fuel", 0.0).is_ok());
        assert!(ensure_non_negative("fuel", -0.1).is_err());
    }
}
