//! Error types for CSV parsing

use thiserror::Error;

/// Errors raised by dialect validation, parsing, and the reader wrapper
#[derive(Error, Debug)]
pub enum CsvError {
    /// Escape string appears inside the configured row break
    #[error("Row break [{row_break:?}] can not include escape string [{escape:?}]")]
    EscapeInRowBreak { escape: String, row_break: String },

    /// Escape string appears inside the configured column break
    #[error("Column break [{column_break:?}] can not include escape string [{escape:?}]")]
    EscapeInColumnBreak { escape: String, column_break: String },

    /// A dialect string option was empty
    #[error("Dialect option '{option}' must not be empty")]
    EmptyDialectOption { option: &'static str },

    /// Row field count disagrees with the resolved header count (strict mode)
    #[error("Number of columns ({fields}) does not match number of headers ({headers})")]
    ColumnMismatch { fields: usize, headers: usize },

    /// Failure while reading from an input source
    #[error("Read error: {0}")]
    ReadError(String),
}

impl CsvError {
    /// True for errors raised at parser construction, before any data
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            CsvError::EscapeInRowBreak { .. }
                | CsvError::EscapeInColumnBreak { .. }
                | CsvError::EmptyDialectOption { .. }
        )
    }
}

/// Result type alias for CSV operations
pub type Result<T> = std::result::Result<T, CsvError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CsvError::ColumnMismatch {
            fields: 3,
            headers: 2,
        };
        assert_eq!(
            err.to_string(),
            "Number of columns (3) does not match number of headers (2)"
        );

        let err = CsvError::EscapeInColumnBreak {
            escape: "\"".to_string(),
            column_break: "\",".to_string(),
        };
        assert!(err.to_string().contains("escape string"));
    }

    #[test]
    fn test_configuration_classification() {
        assert!(CsvError::EmptyDialectOption { option: "escape" }.is_configuration());
        assert!(!CsvError::ColumnMismatch {
            fields: 1,
            headers: 2
        }
        .is_configuration());
        assert!(!CsvError::ReadError("eof".to_string()).is_configuration());
    }
}
