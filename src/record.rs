//! Ordered record type for emitted rows

use indexmap::IndexMap;

/// One parsed row, an ordered map from header name to field value
///
/// Iteration order is insertion order, which equals header resolution
/// order, so field order in any downstream output always matches the
/// header list. Built on [`IndexMap`] for that guarantee.
///
/// # Examples
///
/// ```
/// use csvstream::{CsvParser, Dialect};
///
/// let mut parser = CsvParser::new(Dialect::default().row_break("\n")).unwrap();
/// let records = parser.push("name,age\nAlice,30\n").unwrap();
///
/// let record = &records[0];
/// assert_eq!(record.get("age"), Some("30"));
/// assert_eq!(record.len(), 2);
///
/// let headers: Vec<&str> = record.headers().collect();
/// assert_eq!(headers, vec!["name", "age"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record(IndexMap<String, String>);

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Record(IndexMap::new())
    }

    /// Pair headers with one row's fields, preserving header order
    ///
    /// Stops at the shorter of the two lists: a short row yields a record
    /// without entries for the trailing headers.
    pub(crate) fn from_row(headers: &[String], fields: Vec<String>) -> Self {
        let mut entries = IndexMap::with_capacity(headers.len().min(fields.len()));
        for (header, field) in headers.iter().zip(fields) {
            entries.insert(header.clone(), field);
        }
        Record(entries)
    }

    /// Get a field value by header name
    pub fn get(&self, header: &str) -> Option<&str> {
        self.0.get(header).map(|value| value.as_str())
    }

    /// True if the record holds a value for this header
    pub fn contains_header(&self, header: &str) -> bool {
        self.0.contains_key(header)
    }

    /// Number of (header, value) entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the record holds no entries
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over (header, value) pairs in header order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(h, v)| (h.as_str(), v.as_str()))
    }

    /// Iterate over header names in header order
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|h| h.as_str())
    }

    /// Iterate over field values in header order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.0.values().map(|v| v.as_str())
    }
}

impl FromIterator<(String, String)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Record(iter.into_iter().collect())
    }
}

impl IntoIterator for Record {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<Record> for IndexMap<String, String> {
    fn from(record: Record) -> Self {
        record.0
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_map(self.0.iter())
    }
}
