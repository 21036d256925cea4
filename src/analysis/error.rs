//! Analytics error types.

use thiserror::Error;

/// Errors that can occur during session analytics.
///
/// Sparse data is not an error here: missing inputs degrade to null
/// signals, so only malformed histories reject.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_error() {
        let err = AnalyticsError::InvalidInput("reps out of order".to_string());
        assert!(err.to_string().contains("reps out of order"));
    }
}
