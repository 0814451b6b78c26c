//! Error types for cuantizar operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;

/// Main error type for cuantizar operations.
///
/// Provides detailed context about failures including invalid
/// hyperparameters, empty inputs, and palette persistence problems.
///
/// # Examples
///
/// ```
/// use cuantizar::error::CuantizarError;
///
/// let err = CuantizarError::InvalidHyperparameter {
///     param: "k".to_string(),
///     value: "0".to_string(),
///     constraint: "k >= 1".to_string(),
/// };
/// assert!(err.to_string().contains("Invalid hyperparameter"));
/// ```
#[derive(Debug)]
pub enum CuantizarError {
    /// Invalid hyperparameter value provided.
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// No points were supplied to the engine.
    EmptyInput,

    /// I/O error (file not found, permission denied, etc.).
    Io(std::io::Error),

    /// Serialization/deserialization error.
    Serialization(String),

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for CuantizarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CuantizarError::InvalidHyperparameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid hyperparameter: {param} = {value}, expected {constraint}"
                )
            }
            CuantizarError::EmptyInput => {
                write!(f, "Empty input: at least one point is required")
            }
            CuantizarError::Io(e) => write!(f, "I/O error: {e}"),
            CuantizarError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            CuantizarError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CuantizarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CuantizarError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CuantizarError {
    fn from(err: std::io::Error) -> Self {
        CuantizarError::Io(err)
    }
}

impl From<serde_json::Error> for CuantizarError {
    fn from(err: serde_json::Error) -> Self {
        CuantizarError::Serialization(err.to_string())
    }
}

impl From<&str> for CuantizarError {
    fn from(msg: &str) -> Self {
        CuantizarError::Other(msg.to_string())
    }
}

impl From<String> for CuantizarError {
    fn from(msg: String) -> Self {
        CuantizarError::Other(msg)
    }
}

impl CuantizarError {
    /// Create an invalid hyperparameter error with descriptive context.
    #[must_use]
    pub fn invalid_hyperparameter(param: &str, value: impl fmt::Display, constraint: &str) -> Self {
        Self::InvalidHyperparameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, CuantizarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_hyperparameter_display() {
        let err = CuantizarError::invalid_hyperparameter("k", 0, "k >= 1");
        assert!(err.to_string().contains("Invalid hyperparameter"));
        assert!(err.to_string().contains("k = 0"));
        assert!(err.to_string().contains("k >= 1"));
    }

    #[test]
    fn test_empty_input_display() {
        let err = CuantizarError::EmptyInput;
        assert!(err.to_string().contains("Empty input"));
    }

    #[test]
    fn test_io_error_source() {
        use std::error::Error;
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = CuantizarError::from(io);
        assert!(err.source().is_some());
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_from_str() {
        let err: CuantizarError = "something failed".into();
        assert_eq!(err.to_string(), "something failed");
    }

    #[test]
    fn test_serialization_display() {
        let err = CuantizarError::Serialization("bad json".to_string());
        assert!(err.to_string().contains("Serialization error"));
    }
}
