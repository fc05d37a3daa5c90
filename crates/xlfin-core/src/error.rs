//! Error types for the xlfin library.
//!
//! Every formula reports failures through [`FinError`]. Callers such as
//! spreadsheet engines map the variants onto their own error-cell
//! conventions; nothing here is coerced to NaN or a default value.

use thiserror::Error;

/// A specialized Result type for xlfin operations.
pub type FinResult<T> = Result<T, FinError>;

/// The main error type for xlfin operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FinError {
    /// Date ordering or argument range violation.
    ///
    /// Examples: maturity on or before settlement, a frequency outside
    /// {1, 2, 4}, mismatched series lengths.
    #[error("Invalid range: {reason}")]
    InvalidRange {
        /// Description of the violated range.
        reason: String,
    },

    /// Unrecognised day count basis code.
    #[error("Unsupported day count basis: {code}")]
    UnsupportedBasis {
        /// The rejected basis code.
        code: i32,
    },

    /// A solver failed to converge, or a cash-flow series has no sign change.
    #[error("No solution: {reason}")]
    NoSolution {
        /// Description of why no solution was found.
        reason: String,
    },

    /// Mathematical domain violation (negative price, degenerate period, ...).
    #[error("Domain error: {reason}")]
    DomainError {
        /// Description of the domain violation.
        reason: String,
    },

    /// Error in date construction or parsing.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Configuration could not be parsed or failed validation.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the configuration error.
        reason: String,
    },
}

impl FinError {
    /// Creates an invalid range error.
    #[must_use]
    pub fn invalid_range(reason: impl Into<String>) -> Self {
        Self::InvalidRange {
            reason: reason.into(),
        }
    }

    /// Creates an unsupported basis error.
    #[must_use]
    pub fn unsupported_basis(code: i32) -> Self {
        Self::UnsupportedBasis { code }
    }

    /// Creates a no-solution error.
    #[must_use]
    pub fn no_solution(reason: impl Into<String>) -> Self {
        Self::NoSolution {
            reason: reason.into(),
        }
    }

    /// Creates a domain error.
    #[must_use]
    pub fn domain(reason: impl Into<String>) -> Self {
        Self::DomainError {
            reason: reason.into(),
        }
    }

    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Returns true for [`FinError::NoSolution`].
    #[must_use]
    pub fn is_no_solution(&self) -> bool {
        matches!(self, Self::NoSolution { .. })
    }
}

/// Returns `value` if it is finite, otherwise a domain error naming `what`.
pub fn ensure_finite(value: f64, what: &str) -> FinResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FinError::domain(format!("{what} is not finite")))
    }
}
