//! Error types for the scenario simulator

use thiserror::Error;

use pidffb_errors::{ErrorCategory, ErrorSeverity, PidffbError, ValidationError};

#[derive(Error, Debug)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] PidffbError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl From<ValidationError> for SimError {
    fn from(e: ValidationError) -> Self {
        SimError::Core(e.into())
    }
}

impl From<std::io::Error> for SimError {
    fn from(e: std::io::Error) -> Self {
        SimError::Core(e.into())
    }
}

impl SimError {
    /// Stack-level category, `None` for document syntax errors.
    pub fn category(&self) -> Option<ErrorCategory> {
        match self {
            SimError::Core(e) => Some(e.category()),
            SimError::Json(_) | SimError::Yaml(_) => None,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SimError::Core(e) => e.severity(),
            SimError::Json(_) | SimError::Yaml(_) => ErrorSeverity::Error,
        }
    }

    /// Process exit code reported by the binary.
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            Some(ErrorCategory::IO) => 2,
            Some(ErrorCategory::Protocol) | None => 3,
            Some(ErrorCategory::Validation | ErrorCategory::Scenario) => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let err: SimError = PidffbError::scenario("events out of order").into();
        assert_eq!(err.exit_code(), 4);
        assert_eq!(err.category(), Some(ErrorCategory::Scenario));

        let err: SimError = ValidationError::required("ticks").into();
        assert_eq!(err.exit_code(), 4);
        assert_eq!(err.to_string(), "Validation error: Required field 'ticks' is missing");

        let err: SimError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_syntax_errors_have_no_category() {
        let err = serde_json::from_str::<u8>("x").err().map(SimError::from);
        assert!(err.as_ref().is_some_and(|e| e.category().is_none()));
        assert_eq!(err.map(|e| e.exit_code()), Some(3));
    }
}
