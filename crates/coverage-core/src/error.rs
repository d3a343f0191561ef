//! Error types for coverage simulation
//!
//! Provides a unified error type for all coverage crates.

use thiserror::Error;

/// Core error type for coverage simulation
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed run configuration (sample sizes, levels, repeat count)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Distribution parameter outside its domain
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    ///
    /// For estimators supplied by callers that reject a sample they cannot
    /// handle (too short, zero variance). The evaluator wraps it in
    /// [`Error::Estimator`].
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The estimator under test returned an error
    #[error(
        "Estimator '{estimator}' failed on scenario '{scenario}' \
         (sample size {sample_size}, trial {trial}): {source}"
    )]
    Estimator {
        estimator: String,
        scenario: String,
        sample_size: usize,
        trial: usize,
        #[source]
        source: Box<Error>,
    },

    /// The estimator returned bounds that cannot be tested for containment
    #[error(
        "Estimator '{estimator}' returned malformed interval [{lower}, {upper}] \
         on scenario '{scenario}' (sample size {sample_size}, trial {trial}): {reason}"
    )]
    MalformedInterval {
        estimator: String,
        scenario: String,
        sample_size: usize,
        trial: usize,
        lower: f64,
        upper: f64,
        reason: &'static str,
    },

    /// Threading or parallelization error
    #[error("Execution error: {0}")]
    Execution(String),

    /// IO error (report output)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for a probability outside [0, 1]
    pub fn invalid_probability(name: &str, p: f64) -> Self {
        Self::InvalidParameter(format!("{name} = {p} must be in [0, 1]"))
    }

    /// Create an error for an empty configuration list
    pub fn empty_list(field: &str) -> Self {
        Self::InvalidConfig(format!("{field} must not be empty"))
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::InvalidParameter(format!("{context} contains NaN or infinite values"))
    }

    /// Whether this error came from the estimator under test rather than the harness
    pub fn is_estimator_failure(&self) -> bool {
        matches!(self, Self::Estimator { .. } | Self::MalformedInterval { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidConfig("repeats must be positive".to_string());
        assert_eq!(err.to_string(), "Invalid configuration: repeats must be positive");

        let err = Error::InvalidParameter("sigma must be non-negative".to_string());
        assert_eq!(err.to_string(), "Invalid parameter: sigma must be non-negative");

        let err = Error::Execution("thread pool exhausted".to_string());
        assert_eq!(err.to_string(), "Execution error: thread pool exhausted");
    }

    #[test]
    fn test_error_helper_functions() {
        let err = Error::invalid_probability("theta", 1.5);
        assert_eq!(err.to_string(), "Invalid parameter: theta = 1.5 must be in [0, 1]");

        let err = Error::empty_list("sample_sizes");
        assert_eq!(err.to_string(), "Invalid configuration: sample_sizes must not be empty");

        let err = Error::non_finite("mean");
        assert_eq!(err.to_string(), "Invalid parameter: mean contains NaN or infinite values");
    }

    #[test]
    fn test_estimator_error_carries_context() {
        let err = Error::Estimator {
            estimator: "wald".to_string(),
            scenario: "rare events".to_string(),
            sample_size: 10,
            trial: 3,
            source: Box::new(Error::InvalidInput("zero variance".to_string())),
        };

        let msg = err.to_string();
        assert!(msg.contains("'wald'"));
        assert!(msg.contains("'rare events'"));
        assert!(msg.contains("sample size 10"));
        assert!(msg.contains("trial 3"));
        assert!(msg.contains("zero variance"));
        assert!(err.is_estimator_failure());

        use std::error::Error as _;
        assert!(err.source().is_some());
    }

    #[test]
    fn test_malformed_interval_display() {
        let err = Error::MalformedInterval {
            estimator: "broken".to_string(),
            scenario: "standard".to_string(),
            sample_size: 100,
            trial: 0,
            lower: f64::NAN,
            upper: 1.0,
            reason: "bound is NaN",
        };
        assert!(err.to_string().contains("[NaN, 1]"));
        assert!(err.is_estimator_failure());
        assert!(!Error::InvalidConfig(String::new()).is_estimator_failure());
    }

    #[test]
    fn test_error_from_anyhow() {
        let anyhow_err = anyhow::anyhow!("custom error message");
        let err: Error = anyhow_err.into();

        match err {
            Error::Other(_) => {
                assert!(err.to_string().contains("custom error message"));
            }
            _ => panic!("Wrong error type"),
        }
    }

    #[test]
    fn test_error_from_io_error() {
        use std::io;

        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("pipe closed"));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
