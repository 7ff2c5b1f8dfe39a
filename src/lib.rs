//! # csvstream
//!
//! Incremental streaming CSV parser with configurable dialects.
//!
//! The parser consumes input as arbitrarily-sized text chunks and emits
//! records as soon as their rows complete, so a multi-gigabyte stream
//! parses in constant memory. Chunk boundaries carry no meaning: a chunk
//! may end in the middle of a field, a quoted escape sequence, or a
//! multi-character delimiter, and the output is byte-for-byte identical to
//! parsing the whole input at once.
//!
//! ## Features
//!
//! - **Push interface**: feed chunks with [`CsvParser::push`], finalize
//!   once with [`CsvParser::finish`]
//! - **Configurable dialects**: escape, row break, and column break are
//!   arbitrary strings, so TSV, semicolon CSV, and custom formats all work
//! - **Escape-aware scanning**: delimiters inside quoted fields, doubled
//!   escapes as literals, quotes spanning chunk boundaries
//! - **Header handling**: first-row headers, fixed header lists, or
//!   synthesized positional headers, with strict or lenient
//!   column-count reconciliation
//! - **Reader wrapper**: [`CsvReader`] drives the parser from files or any
//!   `io::Read` source with an iterator interface
//!
//! ## Quick Start
//!
//! ```
//! use csvstream::{CsvParser, Dialect};
//!
//! let mut parser = CsvParser::new(Dialect::default()).unwrap();
//!
//! // Chunks can split anywhere - even inside the quoted field
//! let mut records = parser.push("name,quote\r\nBob,\"comma, in").unwrap();
//! records.extend(parser.push("side\"\r\n").unwrap());
//! records.extend(parser.finish().unwrap());
//!
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].get("quote"), Some("comma, inside"));
//! ```
//!
//! ## Reading Files
//!
//! ```no_run
//! use csvstream::CsvReader;
//!
//! let mut reader = CsvReader::open("data.csv").unwrap();
//! for record in reader.records() {
//!     let record = record.unwrap();
//!     println!("{:?}", record);
//! }
//! ```

mod dialect;
mod error;
mod headers;
mod parser;
mod record;
mod reader;
mod scanner;

pub use dialect::{Dialect, HeaderMode};
pub use error::{CsvError, Result};
pub use parser::CsvParser;
pub use record::Record;
pub use reader::{CsvReader, Records};
