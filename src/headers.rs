//! Header resolution and column-count reconciliation

use tracing::debug;

use crate::dialect::HeaderMode;
use crate::error::{CsvError, Result};
use crate::record::Record;

/// Resolves the header list and reconciles each row's width against it
///
/// One per parser. `Fixed` headers are terminal at construction; the other
/// modes lock in on the first closed row. Lenient reconciliation mutates
/// the header list persistently: a placeholder added for a wide row stays
/// for every later row.
#[derive(Debug)]
pub(crate) struct HeaderResolver {
    headers: Vec<String>,
    /// Header list locked in (fixed list supplied, or first row consumed)
    resolved: bool,
    /// Synthesize bare index names instead of placeholder names
    positional: bool,
}

impl HeaderResolver {
    pub(crate) fn new(mode: &HeaderMode) -> Self {
        match mode {
            HeaderMode::Fixed(headers) => {
                let mut resolver = HeaderResolver {
                    headers: Vec::with_capacity(headers.len()),
                    resolved: true,
                    positional: false,
                };
                for name in headers {
                    resolver.push_unique(name.clone());
                }
                resolver
            }
            HeaderMode::FirstRow => HeaderResolver {
                headers: Vec::new(),
                resolved: false,
                positional: false,
            },
            HeaderMode::Positional => HeaderResolver {
                headers: Vec::new(),
                resolved: false,
                positional: true,
            },
        }
    }

    pub(crate) fn headers(&self) -> Option<&[String]> {
        if self.headers.is_empty() {
            None
        } else {
            Some(&self.headers)
        }
    }

    /// Consume one closed row
    ///
    /// Returns `Ok(None)` for the row swallowed as the header list,
    /// `Ok(Some(record))` for an emitted row, or the fatal mismatch error
    /// in strict mode. Short lenient rows emit only the entries they have
    /// fields for; trailing headers are omitted, not filled.
    pub(crate) fn resolve_row(
        &mut self,
        fields: Vec<String>,
        strict: bool,
    ) -> Result<Option<Record>> {
        if !self.resolved {
            self.resolved = true;
            if self.positional {
                self.extend_positional(fields.len());
                debug!("synthesized {} positional header(s)", self.headers.len());
            } else {
                debug!("resolved {} header(s) from first row", fields.len());
                for name in fields {
                    self.push_unique(name);
                }
                return Ok(None);
            }
        }

        if fields.len() != self.headers.len() {
            if strict {
                return Err(CsvError::ColumnMismatch {
                    fields: fields.len(),
                    headers: self.headers.len(),
                });
            }
            if fields.len() > self.headers.len() {
                if self.positional {
                    self.extend_positional(fields.len());
                } else {
                    self.extend_placeholders(fields.len());
                }
                debug!("extended headers to {} column(s)", self.headers.len());
            }
        }

        Ok(Some(Record::from_row(&self.headers, fields)))
    }

    /// Append bare index names ("0", "1", ...) up to `width`
    fn extend_positional(&mut self, width: usize) {
        let mut buffer = itoa::Buffer::new();
        for index in self.headers.len()..width {
            let name = buffer.format(index).to_string();
            self.push_unique(name);
        }
    }

    /// Append placeholder names for columns beyond the known headers
    fn extend_placeholders(&mut self, width: usize) {
        for index in self.headers.len()..width {
            let name = format!("___UNKNOWN_HEADER_{}___", index);
            self.push_unique(name);
        }
    }

    /// Headers stay unique: a colliding name grows trailing underscores
    fn push_unique(&mut self, mut name: String) {
        while self.headers.contains(&name) {
            name.push('_');
        }
        self.headers.push(name);
    }
}
