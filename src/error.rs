//! Error types for capability computation and batch evaluation.

use thiserror::Error;

use crate::capability::Field;

/// Input validation failures.
///
/// Every variant is fatal to the construction attempt that raised it: no
/// partial result is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CapabilityError {
    /// A value is not a usable number (unparseable text, NaN, or infinity).
    #[error("{field} must be numeric, got `{value}`")]
    InvalidType { field: Field, value: String },

    /// The standard deviation is zero or negative.
    #[error("standard deviation must be positive, got {value}")]
    InvalidStdDev { value: f64 },

    /// Neither specification limit was supplied.
    #[error("at least one specification limit (USL or LSL) must be provided")]
    MissingLimits,

    /// Both limits were supplied with the same value.
    #[error("USL and LSL cannot be equal (both {value})")]
    EqualLimits { value: f64 },

    /// The lower limit lies above the upper limit.
    #[error("LSL ({lsl}) cannot be greater than USL ({usl})")]
    InvertedLimits { usl: f64, lsl: f64 },
}

impl CapabilityError {
    pub fn invalid_type<S: Into<String>>(field: Field, value: S) -> Self {
        Self::InvalidType {
            field,
            value: value.into(),
        }
    }
}

/// Result alias for capability computation.
pub type Result<T> = std::result::Result<T, CapabilityError>;

/// Errors raised while reading, evaluating, or writing a CSV batch.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV at a specific line (1-indexed).
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A required column is absent from the header row.
    #[error("missing required column `{name}`")]
    MissingColumn { name: String },

    /// A row failed input validation and invalid rows are not being skipped.
    #[error("invalid row at line {line}: {source}")]
    InvalidRow {
        line: usize,
        #[source]
        source: CapabilityError,
    },
}

impl BatchError {
    pub fn parse<S: Into<String>>(line: usize, message: S) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_limits_message_names_both_limits() {
        let err = CapabilityError::InvertedLimits {
            usl: 7.0,
            lsl: 13.0,
        };
        assert_eq!(err.to_string(), "LSL (13) cannot be greater than USL (7)");
    }

    #[test]
    fn invalid_type_message_names_field() {
        let err = CapabilityError::invalid_type(Field::StdDev, "abc");
        assert_eq!(
            err.to_string(),
            "standard deviation must be numeric, got `abc`"
        );
    }

    #[test]
    fn invalid_row_keeps_source() {
        use std::error::Error as _;

        let err = BatchError::InvalidRow {
            line: 4,
            source: CapabilityError::MissingLimits,
        };
        assert!(err.to_string().starts_with("invalid row at line 4"));
        assert!(err.source().is_some());
    }
}
