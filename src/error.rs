//! Error handling for eqcurve
//!
//! Precondition failures are reported as typed errors instead of letting
//! `NaN` coefficients leak into the response traces.

use thiserror::Error;

/// Result type alias for eqcurve operations
pub type Result<T> = std::result::Result<T, EqError>;

/// Failure to combine several frequency responses
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CombineError {
    #[error("No responses to combine")]
    Empty,

    #[error("Response {index} is on an incompatible frequency grid: {reason}")]
    IncompatibleGrids { index: usize, reason: String },
}

/// Main error type for eqcurve operations
#[derive(Error, Debug)]
pub enum EqError {
    // Parameter Errors
    #[error("Invalid parameter '{param}': got {value}, expected {expected}")]
    InvalidParameter {
        param: String,
        value: String,
        expected: String,
    },

    #[error("Unknown filter type: {name}")]
    UnknownFilterType { name: String },

    #[error("Invalid frequency sweep: {num_points} points (minimum 2)")]
    InvalidSweep { num_points: usize },

    #[error("Length mismatch for {what}: expected {expected}, found {found}")]
    LengthMismatch {
        what: String,
        expected: usize,
        found: usize,
    },

    // Combination Errors
    #[error("Combination failed: {0}")]
    Combine(#[from] CombineError),

    // Configuration Errors
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EqError {
    /// Shorthand for an [`EqError::InvalidParameter`]
    pub(crate) fn invalid(param: &str, value: f64, expected: impl Into<String>) -> Self {
        EqError::InvalidParameter {
            param: param.to_string(),
            value: value.to_string(),
            expected: expected.into(),
        }
    }

    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            EqError::InvalidParameter { .. } => "INVALID_PARAMETER",
            EqError::UnknownFilterType { .. } => "UNKNOWN_FILTER_TYPE",
            EqError::InvalidSweep { .. } => "INVALID_SWEEP",
            EqError::LengthMismatch { .. } => "LENGTH_MISMATCH",
            EqError::Combine(CombineError::Empty) => "COMBINE_EMPTY",
            EqError::Combine(CombineError::IncompatibleGrids { .. }) => "INCOMPATIBLE_GRIDS",
            EqError::ConfigError { .. } => "CONFIG_ERROR",
            EqError::Io(_) => "IO_ERROR",
            EqError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Check if this error is recoverable
    ///
    /// Recoverable errors leave nothing broken: the caller can skip the
    /// affected trace, fix the parameter and call again.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            EqError::InvalidParameter { .. }
                | EqError::UnknownFilterType { .. }
                | EqError::InvalidSweep { .. }
                | EqError::Combine(_)
        )
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            EqError::InvalidParameter { .. } => vec![
                "Keep Q above zero (0.1 is a sensible minimum)",
                "Keep the frequency between 0 Hz and half the sample rate",
            ],
            EqError::UnknownFilterType { .. } => vec![
                "Supported types: peak, lowshelf, highshelf, lowpass, highpass, bandpass, notch",
                "Short names PK, LS, HS, LP, HP, BP, NO are also accepted",
            ],
            EqError::InvalidSweep { .. } => vec!["Request at least 2 frequency points"],
            EqError::Combine(_) => vec![
                "Evaluate every response on the same frequency grid",
                "Skip the combined trace for this update",
            ],
            _ => vec![],
        }
    }
}
