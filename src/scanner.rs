//! Escape-aware boundary scanning and field extraction
//!
//! The scanner answers one question: given a buffer and the start offset of
//! a field, where does that field end? For unescaped fields this is plain
//! substring search. For escaped fields the terminator is an occurrence of
//! `escape + delimiter` whose preceding run of escape repetitions is odd -
//! an even run means every escape in it is half of a doubled literal escape
//! and the occurrence is still inside the field.
//!
//! All offsets are byte offsets into valid UTF-8; matches from `str::find`
//! land on char boundaries, so slicing at returned offsets never panics.

/// Which delimiter closes the current field, and at what offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Boundary {
    /// Field ends at a column break
    Column(usize),
    /// Field ends at a row break (a row boundary also ends the column)
    Row(usize),
}

/// Pick the winning boundary from independent column and row scans
///
/// Both scans must start from the same field offset. The smaller offset
/// wins; a tie means the same occurrence satisfies both targets (a row
/// break carrying the column break as prefix), and the row break wins.
pub(crate) fn select_boundary(column_at: Option<usize>, row_at: Option<usize>) -> Option<Boundary> {
    match (column_at, row_at) {
        (Some(column), Some(row)) if column < row => Some(Boundary::Column(column)),
        (Some(column), None) => Some(Boundary::Column(column)),
        (_, Some(row)) => Some(Boundary::Row(row)),
        (None, None) => None,
    }
}

/// Find the next literal delimiter occurrence at or after `start`
pub(crate) fn find_unescaped(data: &str, start: usize, delimiter: &str) -> Option<usize> {
    data[start..].find(delimiter).map(|at| start + at)
}

/// Find the closing `escape + delimiter` occurrence for an escaped field
///
/// `needle` is the precomputed `escape + delimiter` string. A candidate at
/// offset `k` is the true terminator only when the run of escape
/// repetitions ending at `k` (the candidate's own escape included, never
/// walking back across `start`) has odd length. On an even run the search
/// resumes one byte short of the rejected needle's end: the dialect
/// invariant keeps the escape out of the delimiter, so no new candidate
/// can begin strictly inside the rejected delimiter bytes, but one may
/// start on its final character.
pub(crate) fn find_escaped_end(
    data: &str,
    start: usize,
    escape: &str,
    needle: &str,
) -> Option<usize> {
    let mut from = start;
    while let Some(found) = data[from..].find(needle) {
        let candidate = from + found;
        if escape_run_is_odd(data, start, candidate, escape) {
            return Some(candidate);
        }
        from = candidate + needle.len() - 1;
        while !data.is_char_boundary(from) {
            from -= 1;
        }
    }
    None
}

/// Count escape repetitions backward from `candidate`, odd run = closer
fn escape_run_is_odd(data: &str, start: usize, candidate: usize, escape: &str) -> bool {
    let mut count = 0usize;
    let mut index = candidate;
    while index > start {
        if data.is_char_boundary(index) && data[index..].starts_with(escape) {
            count += 1;
            match index.checked_sub(escape.len()) {
                Some(back) => index = back,
                None => break,
            }
        } else {
            break;
        }
    }
    count % 2 == 1
}

/// Cut the field text between `start` and the accepted `end` offset
///
/// Escaped fields drop the opening escape and collapse each doubled escape
/// to a single occurrence; `end` already excludes the closing escape.
/// Unescaped fields come back verbatim.
pub(crate) fn extract_field(
    data: &str,
    start: usize,
    end: usize,
    escaped: bool,
    escape: &str,
    doubled_escape: &str,
) -> String {
    if !escaped {
        return data[start..end].to_string();
    }
    let from = start + escape.len();
    if end <= from {
        return String::new();
    }
    data[from..end].replace(doubled_escape, escape)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescaped_search() {
        assert_eq!(find_unescaped("a,b,c", 0, ","), Some(1));
        assert_eq!(find_unescaped("a,b,c", 2, ","), Some(3));
        assert_eq!(find_unescaped(",a", 0, ","), Some(0));
        assert_eq!(find_unescaped("abc", 0, ","), None);
        assert_eq!(find_unescaped("a\r\nb", 0, "\r\n"), Some(1));
    }

    #[test]
    fn test_escaped_end_simple() {
        // "abc",x -> closing escape at offset 4
        assert_eq!(find_escaped_end("\"abc\",x", 0, "\"", "\","), Some(4));
    }

    #[test]
    fn test_escaped_end_skips_doubled() {
        // "a"",x -> the "" is a literal escape, no terminator in buffer
        assert_eq!(find_escaped_end("\"a\"\",x", 0, "\"", "\","), None);
        // "a""",x -> run of three: one closing escape after a doubled pair
        assert_eq!(find_escaped_end("\"a\"\"\",x", 0, "\"", "\","), Some(4));
    }

    #[test]
    fn test_escaped_end_resumes_after_rejection() {
        // "a"",b",c -> first candidate rejected (even run), second accepted
        let data = "\"a\"\",b\",c";
        assert_eq!(find_escaped_end(data, 0, "\"", "\","), Some(6));
    }

    #[test]
    fn test_escaped_end_empty_field() {
        // "", -> closing escape at offset 1
        assert_eq!(find_escaped_end("\"\",", 0, "\"", "\","), Some(1));
    }

    #[test]
    fn test_opening_escape_is_not_a_closer() {
        // ", -> the escape at offset 0 opened the field, run length 0
        assert_eq!(find_escaped_end("\",", 0, "\"", "\","), None);
    }

    #[test]
    fn test_multi_char_escape() {
        // ~~a~~~~b~~,c with escape ~~ -> doubled ~~~~ stays inside
        let data = "~~a~~~~b~~,c";
        assert_eq!(find_escaped_end(data, 0, "~~", "~~,"), Some(8));
        assert_eq!(extract_field(data, 0, 8, true, "~~", "~~~~"), "a~~b");
    }

    #[test]
    fn test_run_walk_stops_at_non_escape() {
        // é"", -> run walk must not step into the multi-byte char
        let data = "\"é\"\",x\",y";
        assert_eq!(find_escaped_end(data, 0, "\"", "\","), Some(7));
    }

    #[test]
    fn test_select_boundary_prefers_smaller_offset() {
        assert_eq!(select_boundary(Some(1), Some(3)), Some(Boundary::Column(1)));
        assert_eq!(select_boundary(Some(5), Some(2)), Some(Boundary::Row(2)));
        assert_eq!(select_boundary(Some(4), None), Some(Boundary::Column(4)));
        assert_eq!(select_boundary(None, Some(0)), Some(Boundary::Row(0)));
        assert_eq!(select_boundary(None, None), None);
    }

    #[test]
    fn test_select_boundary_tie_is_row() {
        // Same occurrence satisfying both targets terminates the row
        assert_eq!(select_boundary(Some(2), Some(2)), Some(Boundary::Row(2)));
        assert_eq!(select_boundary(Some(0), Some(0)), Some(Boundary::Row(0)));
    }

    #[test]
    fn test_extract_unescaped_verbatim() {
        assert_eq!(extract_field("a\"\"b,c", 0, 4, false, "\"", "\"\""), "a\"\"b");
        assert_eq!(extract_field("abc", 1, 1, false, "\"", "\"\""), "");
    }

    #[test]
    fn test_extract_escaped_collapses_doubles() {
        // "a""b" -> a"b
        let data = "\"a\"\"b\",x";
        assert_eq!(extract_field(data, 0, 5, true, "\"", "\"\""), "a\"b");
    }

    #[test]
    fn test_extract_escaped_empty() {
        assert_eq!(extract_field("\"\",x", 0, 1, true, "\"", "\"\""), "");
        // end clamped below the opening escape yields empty, not a panic
        assert_eq!(extract_field("\"", 0, 0, true, "\"", "\"\""), "");
    }
}
