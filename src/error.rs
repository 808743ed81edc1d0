use thiserror::Error;

/// Convenience result type for cleaning operations.
pub type CleanerResult<T> = Result<T, CleanerError>;

/// Error type returned by the cleaner, its configuration and the CSV helpers.
///
/// Every failure is surfaced immediately; no operation returns a partially cleaned table.
#[derive(Debug, Error)]
pub enum CleanerError {
    /// `transform` was called before a successful `fit`.
    #[error("cleaner is not fitted: call fit() before transform()")]
    NotFitted,

    /// A configured column (e.g. in `duplicate_subset`) does not exist in the table.
    #[error("column '{column}' not found. columns={available:?}")]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    /// Label encoding met a value that was not present when the encoder was fit.
    #[error("column '{column}' contains unseen category '{value}'")]
    UnseenCategory { column: String, value: String },

    /// A configuration option holds a value outside its enumeration.
    #[error("invalid value '{value}' for option '{option}' (expected one of: {expected})")]
    Configuration {
        option: &'static str,
        value: String,
        expected: &'static str,
    },

    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON configuration could not be decoded.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV input does not conform to the provided schema.
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A CSV value could not be parsed into the required [`crate::types::DataType`].
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::CleanerError;

    #[test]
    fn messages_name_the_offending_column() {
        let err = CleanerError::UnseenCategory {
            column: "color".to_string(),
            value: "green".to_string(),
        };
        assert_eq!(err.to_string(), "column 'color' contains unseen category 'green'");

        let err = CleanerError::MissingColumn {
            column: "id".to_string(),
            available: vec!["a".to_string()],
        };
        assert!(err.to_string().contains("column 'id' not found"));
    }

    #[test]
    fn io_errors_convert() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: CleanerError = io_err.into();
        assert!(matches!(err, CleanerError::Io(_)));
    }
}
