//! Dialect configuration for CSV parsing

use crate::error::{CsvError, Result};

/// How the parser resolves column names for emitted records
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeaderMode {
    /// Use the first row as the header list (the row itself is not emitted)
    #[default]
    FirstRow,
    /// Use a fixed header list, never mutated afterwards
    Fixed(Vec<String>),
    /// Synthesize positional headers ("0", "1", ...), extended as wider rows appear
    Positional,
}

/// CSV dialect options
///
/// Controls the delimiter strings, quoting, header handling, and strictness.
/// All break strings are arbitrary non-empty strings, so CSV-like formats
/// with multi-character delimiters parse with the same machinery.
///
/// # Examples
///
/// ```
/// use csvstream::{Dialect, HeaderMode};
///
/// // RFC 4180-ish defaults: `"` escape, CRLF rows, `,` columns, strict
/// let dialect = Dialect::default();
///
/// // Semicolon-separated, single quotes, LF rows, lenient
/// let dialect = Dialect::default()
///     .escape("'")
///     .row_break("\n")
///     .column_break(";")
///     .strict(false);
///
/// // Fixed headers instead of consuming the first row
/// let dialect = Dialect::default()
///     .header_mode(HeaderMode::Fixed(vec!["id".to_string(), "name".to_string()]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dialect {
    /// Header resolution mode
    pub header_mode: HeaderMode,
    /// Quoting string wrapping escaped fields (default `"`)
    pub escape: String,
    /// Row terminator string (default CRLF)
    pub row_break: String,
    /// Column terminator string (default `,`)
    pub column_break: String,
    /// Whether column-count mismatches are fatal (default true)
    pub strict: bool,
}

impl Default for Dialect {
    fn default() -> Self {
        Dialect {
            header_mode: HeaderMode::FirstRow,
            escape: "\"".to_string(),
            row_break: "\r\n".to_string(),
            column_break: ",".to_string(),
            strict: true,
        }
    }
}

impl Dialect {
    /// Create a dialect with the default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the header mode (builder pattern)
    pub fn header_mode(mut self, mode: HeaderMode) -> Self {
        self.header_mode = mode;
        self
    }

    /// Set the escape string (builder pattern)
    pub fn escape<S: Into<String>>(mut self, escape: S) -> Self {
        self.escape = escape.into();
        self
    }

    /// Set the row break string (builder pattern)
    pub fn row_break<S: Into<String>>(mut self, row_break: S) -> Self {
        self.row_break = row_break.into();
        self
    }

    /// Set the column break string (builder pattern)
    pub fn column_break<S: Into<String>>(mut self, column_break: S) -> Self {
        self.column_break = column_break.into();
        self
    }

    /// Set strict mode (builder pattern)
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Validate the dialect invariants
    ///
    /// The escape string must be non-empty and must not occur inside either
    /// break string, otherwise the boundary scanner could not distinguish a
    /// closing escape from delimiter text. Runs once, at parser construction.
    pub fn validate(&self) -> Result<()> {
        for (option, value) in [
            ("escape", &self.escape),
            ("row_break", &self.row_break),
            ("column_break", &self.column_break),
        ] {
            if value.is_empty() {
                return Err(CsvError::EmptyDialectOption { option });
            }
        }

        if self.column_break.contains(&self.escape) {
            return Err(CsvError::EscapeInColumnBreak {
                escape: self.escape.clone(),
                column_break: self.column_break.clone(),
            });
        }
        if self.row_break.contains(&self.escape) {
            return Err(CsvError::EscapeInRowBreak {
                escape: self.escape.clone(),
                row_break: self.row_break.clone(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let dialect = Dialect::default();
        assert_eq!(dialect.header_mode, HeaderMode::FirstRow);
        assert_eq!(dialect.escape, "\"");
        assert_eq!(dialect.row_break, "\r\n");
        assert_eq!(dialect.column_break, ",");
        assert!(dialect.strict);
        assert!(dialect.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let dialect = Dialect::new()
            .escape("'")
            .row_break("\n")
            .column_break(";")
            .strict(false)
            .header_mode(HeaderMode::Positional);
        assert_eq!(dialect.escape, "'");
        assert_eq!(dialect.row_break, "\n");
        assert_eq!(dialect.column_break, ";");
        assert!(!dialect.strict);
        assert_eq!(dialect.header_mode, HeaderMode::Positional);
        assert!(dialect.validate().is_ok());
    }

    #[test]
    fn test_escape_in_column_break_rejected() {
        let dialect = Dialect::new().column_break("\",");
        match dialect.validate() {
            Err(CsvError::EscapeInColumnBreak { .. }) => {}
            other => panic!("expected EscapeInColumnBreak, got {:?}", other),
        }
    }

    #[test]
    fn test_escape_in_row_break_rejected() {
        let dialect = Dialect::new().escape("\r");
        match dialect.validate() {
            Err(CsvError::EscapeInRowBreak { .. }) => {}
            other => panic!("expected EscapeInRowBreak, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_options_rejected() {
        assert!(matches!(
            Dialect::new().escape("").validate(),
            Err(CsvError::EmptyDialectOption { option: "escape" })
        ));
        assert!(matches!(
            Dialect::new().row_break("").validate(),
            Err(CsvError::EmptyDialectOption { option: "row_break" })
        ));
        assert!(matches!(
            Dialect::new().column_break("").validate(),
            Err(CsvError::EmptyDialectOption {
                option: "column_break"
            })
        ));
    }

    #[test]
    fn test_multi_char_breaks_accepted() {
        let dialect = Dialect::new().row_break("||\n").column_break("||");
        assert!(dialect.validate().is_ok());
    }
}
