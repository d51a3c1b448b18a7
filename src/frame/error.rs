//! Sample table error types

use thiserror::Error;

/// Errors that can occur while building or aggregating a frame
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrameError {
    /// A column's length differs from the frame's row count
    #[error("Column '{column}' has {actual} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// A column with the same name already exists
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    /// Requested column does not exist
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// Column has the wrong type for the operation
    #[error("Column '{column}' is {actual}, expected {expected}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Not enough values to compute the statistic
    #[error("Column '{column}' needs at least {required} values for {stat}")]
    InsufficientData {
        column: String,
        stat: &'static str,
        required: usize,
    },

    /// Integer aggregate does not fit in an i64
    #[error("Column '{column}' overflowed while computing {stat}")]
    Overflow {
        column: String,
        stat: &'static str,
    },

    /// Generator called with an empty or inverted range
    #[error("Invalid sample range: {0}")]
    InvalidRange(String),

    /// CSV serialization failed
    #[error("CSV error: {0}")]
    Csv(String),
}

impl From<csv::Error> for FrameError {
    fn from(err: csv::Error) -> Self {
        FrameError::Csv(err.to_string())
    }
}

/// Result type alias for frame operations
pub type FrameResult<T> = Result<T, FrameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FrameError::LengthMismatch {
            column: "users".to_string(),
            expected: 30,
            actual: 29,
        };
        assert_eq!(err.to_string(), "Column 'users' has 29 rows, expected 30");

        let err = FrameError::ColumnNotFound("revenue".to_string());
        assert_eq!(err.to_string(), "Column not found: revenue");
    }
}
