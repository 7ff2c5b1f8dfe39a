//! Incremental push parser with chunk-boundary suspension

use std::mem;

use tracing::trace;

use crate::dialect::Dialect;
use crate::error::Result;
use crate::headers::HeaderResolver;
use crate::record::Record;
use crate::scanner::{self, Boundary};

/// Incremental CSV parser fed by arbitrarily-sized text chunks
///
/// Chunks carry no semantic meaning: a chunk boundary may fall in the
/// middle of a field, an escape sequence, or a delimiter, and the output
/// is identical to parsing the whole input at once. Unterminated input is
/// buffered between calls; memory usage is bounded by the longest single
/// row, not the stream length.
///
/// Drive it with any number of [`push`](CsvParser::push) calls followed by
/// exactly one [`finish`](CsvParser::finish). A parser is single-owner and
/// single-stream: after `finish` or a fatal error, discard it.
///
/// # Examples
///
/// ```
/// use csvstream::{CsvParser, Dialect};
///
/// let mut parser = CsvParser::new(Dialect::default()).unwrap();
///
/// let mut records = parser.push("name,city\r\nAlice,NYC\r\n").unwrap();
/// records.extend(parser.finish().unwrap());
///
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].get("name"), Some("Alice"));
/// assert_eq!(records[0].get("city"), Some("NYC"));
/// ```
///
/// # Chunked input
///
/// ```
/// use csvstream::{CsvParser, Dialect, HeaderMode};
///
/// let dialect = Dialect::default()
///     .header_mode(HeaderMode::Fixed(vec!["a".to_string(), "b".to_string()]));
/// let mut parser = CsvParser::new(dialect).unwrap();
///
/// // The split lands inside the escaped field - the parser suspends
/// let mut records = parser.push("\"a").unwrap();
/// assert!(records.is_empty());
///
/// records.extend(parser.push("\",b\r\n").unwrap());
/// records.extend(parser.finish().unwrap());
///
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].get("a"), Some("a"));
/// assert_eq!(records[0].get("b"), Some("b"));
/// ```
pub struct CsvParser {
    // Configuration
    dialect: Dialect,

    // Precomputed scan needles
    escaped_column_end: String,
    escaped_row_end: String,
    doubled_escape: String,

    // State
    state: ParserState,
    resolver: HeaderResolver,
    row_count: u64,
}

/// Buffering state for the row in progress
///
/// `leftover` and `pending_fields` together always describe exactly one
/// partially-parsed row; they are taken and reset together whenever the
/// row completes.
#[derive(Debug, Default)]
struct ParserState {
    /// Unconsumed input tail, anchored at the start of the unterminated field
    leftover: String,
    /// Fields already extracted for the row in progress
    pending_fields: Vec<String>,
}

impl CsvParser {
    /// Create a parser for the given dialect
    ///
    /// Validates the dialect once, before any data is accepted; a dialect
    /// whose escape occurs inside a break string never yields a parser.
    pub fn new(dialect: Dialect) -> Result<Self> {
        dialect.validate()?;

        let escaped_column_end = format!("{}{}", dialect.escape, dialect.column_break);
        let escaped_row_end = format!("{}{}", dialect.escape, dialect.row_break);
        let doubled_escape = dialect.escape.repeat(2);
        let resolver = HeaderResolver::new(&dialect.header_mode);

        Ok(CsvParser {
            dialect,
            escaped_column_end,
            escaped_row_end,
            doubled_escape,
            state: ParserState::default(),
            resolver,
            row_count: 0,
        })
    }

    /// Feed one chunk of input, returning the records it completed
    ///
    /// Any suffix that does not yet contain a full row is buffered and
    /// resumed on the next call. An incomplete row is never an error.
    pub fn push(&mut self, chunk: &str) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        if self.state.leftover.is_empty() {
            self.process_data(chunk, false, &mut records)?;
        } else {
            let mut data = mem::take(&mut self.state.leftover);
            data.push_str(chunk);
            self.process_data(&data, false, &mut records)?;
        }
        Ok(records)
    }

    /// Signal end of input, returning the records of the final row
    ///
    /// A buffered partial row is closed with an implicit row terminator:
    /// the remaining text becomes its final field, minus the closing
    /// escape when the field opened with one. Input that ended exactly on
    /// a row break finalizes to nothing.
    pub fn finish(&mut self) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        let data = mem::take(&mut self.state.leftover);
        if !data.is_empty() || !self.state.pending_fields.is_empty() {
            trace!(
                "finalizing with {} leftover byte(s), {} pending field(s)",
                data.len(),
                self.state.pending_fields.len()
            );
            self.process_data(&data, true, &mut records)?;
        }
        Ok(records)
    }

    /// Get the resolved header list, if any
    ///
    /// `None` until a header row has been consumed (or synthesized); fixed
    /// headers are available immediately.
    pub fn headers(&self) -> Option<&[String]> {
        self.resolver.headers()
    }

    /// Number of rows parsed so far, including a consumed header row
    pub fn row_count(&self) -> u64 {
        self.row_count
    }

    /// The dialect this parser was constructed with
    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// Split `data` into fields and rows, emitting each completed row
    ///
    /// Both delimiters are scanned from the same field start on every
    /// iteration and the smaller offset wins (a tie is a row break). When
    /// neither is found the parser either suspends (more data expected) or
    /// closes the final row (`end_of_data`).
    fn process_data(&mut self, data: &str, end_of_data: bool, out: &mut Vec<Record>) -> Result<()> {
        let escape_len = self.dialect.escape.len();
        let column_len = self.dialect.column_break.len();
        let row_len = self.dialect.row_break.len();

        let mut fields = mem::take(&mut self.state.pending_fields);
        let mut start = 0usize;
        let mut escaped = data.starts_with(&self.dialect.escape);

        loop {
            let (column_at, row_at) = if escaped {
                (
                    scanner::find_escaped_end(
                        data,
                        start,
                        &self.dialect.escape,
                        &self.escaped_column_end,
                    ),
                    scanner::find_escaped_end(
                        data,
                        start,
                        &self.dialect.escape,
                        &self.escaped_row_end,
                    ),
                )
            } else {
                (
                    scanner::find_unescaped(data, start, &self.dialect.column_break),
                    scanner::find_unescaped(data, start, &self.dialect.row_break),
                )
            };

            let Some(boundary) = scanner::select_boundary(column_at, row_at) else {
                if !end_of_data {
                    trace!(
                        "suspending with {} pending field(s), {} leftover byte(s)",
                        fields.len(),
                        data.len() - start
                    );
                    self.state.pending_fields = fields;
                    self.state.leftover = data[start..].to_string();
                    return Ok(());
                }

                // Implicit row terminator: the remainder is the final field
                // of the final row, minus the closing escape if present.
                let end = if escaped
                    && data.len() >= start + 2 * escape_len
                    && data.ends_with(&self.dialect.escape)
                {
                    data.len() - escape_len
                } else {
                    data.len()
                };
                fields.push(scanner::extract_field(
                    data,
                    start,
                    end,
                    escaped,
                    &self.dialect.escape,
                    &self.doubled_escape,
                ));
                self.close_row(mem::take(&mut fields), out)?;
                return Ok(());
            };

            let (end, end_of_row, break_len) = match boundary {
                Boundary::Column(at) => (at, false, column_len),
                Boundary::Row(at) => (at, true, row_len),
            };

            fields.push(scanner::extract_field(
                data,
                start,
                end,
                escaped,
                &self.dialect.escape,
                &self.doubled_escape,
            ));

            if end_of_row {
                self.close_row(mem::take(&mut fields), out)?;
            }

            start = end + if escaped { escape_len } else { 0 } + break_len;
            escaped = data[start..].starts_with(&self.dialect.escape);
        }
    }

    fn close_row(&mut self, fields: Vec<String>, out: &mut Vec<Record>) -> Result<()> {
        self.row_count += 1;
        if let Some(record) = self.resolver.resolve_row(fields, self.dialect.strict)? {
            out.push(record);
        }
        Ok(())
    }
}
