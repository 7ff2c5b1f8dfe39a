//! Reading records from files and `io::Read` sources

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::dialect::Dialect;
use crate::error::{CsvError, Result};
use crate::parser::CsvParser;
use crate::record::Record;

/// Bytes handed to the parser per read
const CHUNK_SIZE: usize = 8192;

/// CSV reader that drives the incremental parser from any `Read` source
///
/// Reads fixed-size chunks and feeds them to a [`CsvParser`], so memory
/// usage stays bounded by the longest row regardless of input size. Chunk
/// edges falling inside fields, escapes, or multi-byte UTF-8 sequences are
/// handled transparently.
///
/// # Examples
///
/// ```no_run
/// use csvstream::CsvReader;
///
/// let mut reader = CsvReader::open("data.csv").unwrap();
///
/// for record in reader.records() {
///     let record = record.unwrap();
///     println!("{:?}", record);
/// }
/// ```
///
/// # With a custom dialect
///
/// ```no_run
/// use csvstream::{CsvReader, Dialect};
///
/// let dialect = Dialect::default().column_break(";").strict(false);
/// let mut reader = CsvReader::open_with_dialect("data.csv", dialect).unwrap();
///
/// for record in reader.records() {
///     let record = record.unwrap();
///     // ...
/// }
/// ```
pub struct CsvReader<R> {
    // Input source
    source: R,

    // Parser state
    parser: CsvParser,
    ready: VecDeque<Record>,
    utf8_carry: Vec<u8>,
    record_count: u64,
    finished: bool,
}

impl CsvReader<BufReader<File>> {
    /// Open a CSV file with the default dialect
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_dialect(path, Dialect::default())
    }

    /// Open a CSV file with a custom dialect
    pub fn open_with_dialect<P: AsRef<Path>>(path: P, dialect: Dialect) -> Result<Self> {
        let file = File::open(path.as_ref())
            .map_err(|e| CsvError::ReadError(format!("Failed to open CSV file: {}", e)))?;
        Self::new(BufReader::new(file), dialect)
    }
}

impl<R: Read> CsvReader<R> {
    /// Wrap any `Read` source with the given dialect
    pub fn new(source: R, dialect: Dialect) -> Result<Self> {
        Ok(CsvReader {
            source,
            parser: CsvParser::new(dialect)?,
            ready: VecDeque::new(),
            utf8_carry: Vec::new(),
            record_count: 0,
            finished: false,
        })
    }

    /// Get the resolved header list, if available yet
    pub fn headers(&self) -> Option<&[String]> {
        self.parser.headers()
    }

    /// Number of records handed out so far
    pub fn record_count(&self) -> u64 {
        self.record_count
    }

    /// Read a single record
    ///
    /// Returns `Ok(None)` when the input is exhausted and finalized.
    pub fn read_record(&mut self) -> Result<Option<Record>> {
        loop {
            if let Some(record) = self.ready.pop_front() {
                self.record_count += 1;
                return Ok(Some(record));
            }
            if self.finished {
                return Ok(None);
            }
            self.fill()?;
        }
    }

    /// Get iterator over records
    pub fn records(&mut self) -> Records<'_, R> {
        Records { reader: self }
    }

    /// Read one chunk from the source into the parser
    ///
    /// A read may end in the middle of a multi-byte UTF-8 sequence; the
    /// incomplete tail is carried over and prepended to the next chunk.
    fn fill(&mut self) -> Result<()> {
        let mut buffer = [0u8; CHUNK_SIZE];
        let read = self
            .source
            .read(&mut buffer)
            .map_err(|e| CsvError::ReadError(format!("Failed to read chunk: {}", e)))?;

        if read == 0 {
            if !self.utf8_carry.is_empty() {
                return Err(CsvError::ReadError(
                    "Input ended inside a UTF-8 sequence".to_string(),
                ));
            }
            self.ready.extend(self.parser.finish()?);
            self.finished = true;
            return Ok(());
        }

        self.utf8_carry.extend_from_slice(&buffer[..read]);
        let valid_len = match std::str::from_utf8(&self.utf8_carry) {
            Ok(_) => self.utf8_carry.len(),
            Err(e) if e.error_len().is_none() => e.valid_up_to(),
            Err(e) => {
                return Err(CsvError::ReadError(format!(
                    "Input is not valid UTF-8: {}",
                    e
                )))
            }
        };
        if valid_len > 0 {
            let chunk = std::str::from_utf8(&self.utf8_carry[..valid_len])
                .map_err(|e| CsvError::ReadError(format!("Input is not valid UTF-8: {}", e)))?;
            self.ready.extend(self.parser.push(chunk)?);
            self.utf8_carry.drain(..valid_len);
        }
        Ok(())
    }
}

/// Iterator over parsed records
pub struct Records<'a, R> {
    reader: &'a mut CsvReader<R>,
}

impl<'a, R: Read> Iterator for Records<'a, R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_record().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::HeaderMode;
    use std::io::Cursor;

    /// Source that yields one byte per read call
    struct OneByteReads<R>(R);

    impl<R: Read> Read for OneByteReads<R> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if buf.is_empty() {
                return Ok(0);
            }
            self.0.read(&mut buf[..1])
        }
    }

    fn collect<R: Read>(mut reader: CsvReader<R>) -> Vec<Record> {
        reader
            .records()
            .collect::<Result<Vec<_>>>()
            .expect("parse failed")
    }

    #[test]
    fn test_read_from_cursor() {
        let input = Cursor::new("a,b\r\n1,2\r\n3,4\r\n");
        let records = collect(CsvReader::new(input, Dialect::default()).unwrap());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("a"), Some("1"));
        assert_eq!(records[1].get("b"), Some("4"));
    }

    #[test]
    fn test_headers_after_first_fill() {
        let input = Cursor::new("a,b\r\n1,2\r\n");
        let mut reader = CsvReader::new(input, Dialect::default()).unwrap();
        assert_eq!(reader.headers(), None);
        let first = reader.read_record().unwrap().unwrap();
        assert_eq!(first.get("a"), Some("1"));
        assert_eq!(
            reader.headers(),
            Some(&["a".to_string(), "b".to_string()][..])
        );
        assert_eq!(reader.record_count(), 1);
    }

    #[test]
    fn test_single_byte_reads_match_bulk() {
        let input = "h\r\n\"multi\r\nline\",oops\r\n";
        let dialect = Dialect::default()
            .header_mode(HeaderMode::Fixed(vec!["x".to_string(), "y".to_string()]))
            .strict(false);

        let bulk = collect(CsvReader::new(Cursor::new(input), dialect.clone()).unwrap());
        let trickled = collect(
            CsvReader::new(OneByteReads(Cursor::new(input)), dialect).unwrap(),
        );
        assert_eq!(bulk, trickled);
    }

    #[test]
    fn test_multibyte_utf8_across_reads() {
        // One-byte reads split every multi-byte char across chunk edges
        let input = "名前,街\r\nアリス,東京\r\n";
        let records = collect(
            CsvReader::new(OneByteReads(Cursor::new(input)), Dialect::default()).unwrap(),
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("名前"), Some("アリス"));
        assert_eq!(records[0].get("街"), Some("東京"));
    }

    #[test]
    fn test_truncated_utf8_is_an_error() {
        let mut bytes = "a\r\nx".as_bytes().to_vec();
        bytes.push(0xE3); // first byte of a three-byte sequence, then EOF
        let mut reader = CsvReader::new(Cursor::new(bytes), Dialect::default()).unwrap();
        let result: Result<Vec<_>> = reader.records().collect();
        assert!(matches!(result, Err(CsvError::ReadError(_))));
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        let bytes = vec![b'a', 0xFF, b'b'];
        let mut reader = CsvReader::new(Cursor::new(bytes), Dialect::default()).unwrap();
        let result: Result<Vec<_>> = reader.records().collect();
        assert!(matches!(result, Err(CsvError::ReadError(_))));
    }

    #[test]
    fn test_open_missing_file() {
        let result = CsvReader::open("definitely_not_here.csv");
        assert!(matches!(result, Err(CsvError::ReadError(_))));
    }
}
