//! Quote-aware line tokenization.
//!
//! Splits one line into raw field values under a single-byte separator and
//! the `"` quote character. Fields are emitted verbatim, quotes included;
//! downstream statistics operate on the raw string.

use std::borrow::Cow;

/// Result of tokenizing one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenized {
    /// Raw field values, left to right.
    pub fields: Vec<String>,
    /// A quoted field was still open at end of line.
    pub unterminated_quote: bool,
}

/// Split `line` into raw fields on `separator`.
///
/// A field beginning with `"` is quoted: it re-consumes separator bytes as
/// literal content until the accumulated field closes its quote. `""` inside
/// a quoted field denotes a literal `"`; a `\"` escape is normalized to `""`
/// before splitting. An unterminated quote ends the field at line end and
/// is flagged for the caller to report.
pub fn tokenize(line: &str, separator: u8) -> Tokenized {
    // Backslash-escaped quotes are treated as doubled quotes.
    let prepared: Cow<'_, str> = if line.contains("\\\"") {
        Cow::Owned(line.replace("\\\"", "\"\""))
    } else {
        Cow::Borrowed(line)
    };

    let sep = separator as char;
    let mut fields = Vec::new();
    let mut unterminated_quote = false;
    let mut pieces = prepared.split(sep);

    while let Some(piece) = pieces.next() {
        if !piece.starts_with('"') {
            fields.push(piece.to_string());
            continue;
        }

        let mut field = piece.to_string();
        // Closed when the quote count (opener included) is even and the
        // field ends on a quote; an odd count means the trailing quote is
        // an escape half or the field is still open.
        loop {
            let quotes = bytecount::count(field.as_bytes(), b'"');
            if quotes % 2 == 0 && field.ends_with('"') {
                break;
            }
            match pieces.next() {
                Some(next) => {
                    field.push(sep);
                    field.push_str(next);
                }
                None => {
                    unterminated_quote = true;
                    break;
                }
            }
        }
        fields.push(field);
    }

    Tokenized {
        fields,
        unterminated_quote,
    }
}

/// Strip one layer of surrounding quotes and collapse doubled quotes.
///
/// Used for header names; data fields stay verbatim.
pub fn unquote(field: &str) -> String {
    if field.len() >= 2 && field.starts_with('"') && field.ends_with('"') {
        field[1..field.len() - 1].replace("\"\"", "\"")
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(line: &str, sep: u8) -> Vec<String> {
        tokenize(line, sep).fields
    }

    #[test]
    fn test_plain_split() {
        assert_eq!(fields("a,b,c", b','), vec!["a", "b", "c"]);
        assert_eq!(fields("1;2;3", b';'), vec!["1", "2", "3"]);
        assert_eq!(fields("single", b','), vec!["single"]);
    }

    #[test]
    fn test_empty_fields_between_separators() {
        assert_eq!(fields("a,,c", b','), vec!["a", "", "c"]);
        assert_eq!(fields("a,b,", b','), vec!["a", "b", ""]);
        assert_eq!(fields(",a", b','), vec!["", "a"]);
    }

    #[test]
    fn test_quoted_field_with_embedded_separator() {
        let t = tokenize("\"a,b\",2", b',');
        assert_eq!(t.fields, vec!["\"a,b\"", "2"]);
        assert!(!t.unterminated_quote);
    }

    #[test]
    fn test_doubled_quote_is_literal() {
        let t = tokenize("\"c\"\"d\",3", b',');
        assert_eq!(t.fields, vec!["\"c\"\"d\"", "3"]);
        assert!(!t.unterminated_quote);
    }

    #[test]
    fn test_backslash_escape_normalized() {
        let t = tokenize(r#""c\"d",3"#, b',');
        assert_eq!(t.fields, vec!["\"c\"\"d\"", "3"]);
    }

    #[test]
    fn test_quoted_field_spanning_many_pieces() {
        let t = tokenize("\"a,b,c,d\",x", b',');
        assert_eq!(t.fields, vec!["\"a,b,c,d\"", "x"]);
    }

    #[test]
    fn test_escaped_quote_before_separator_stays_open() {
        // "a"",b" is one field: the "" is an escape, not a close.
        let t = tokenize("\"a\"\",b\"", b',');
        assert_eq!(t.fields, vec!["\"a\"\",b\""]);
        assert!(!t.unterminated_quote);
    }

    #[test]
    fn test_unterminated_quote_ends_at_eol() {
        let t = tokenize("\"open,1,2", b',');
        assert_eq!(t.fields, vec!["\"open,1,2"]);
        assert!(t.unterminated_quote);
    }

    #[test]
    fn test_empty_quoted_field() {
        let t = tokenize("\"\",x", b',');
        assert_eq!(t.fields, vec!["\"\"", "x"]);
        assert!(!t.unterminated_quote);
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"name\""), "name");
        assert_eq!(unquote("\"a\"\"b\""), "a\"b");
        assert_eq!(unquote("plain"), "plain");
        assert_eq!(unquote("\""), "\"");
        assert_eq!(unquote("\"\""), "");
    }
}
