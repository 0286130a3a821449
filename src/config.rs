//! Scan configuration and the dynamic qualifier boundary.
//!
//! A [`ScanConfig`] is the fully-typed option set for one scan. Callers that
//! hold loosely-structured qualifier objects (nested JSON, case-insensitive
//! keys) go through [`ScanConfig::from_json`], which flattens the object to
//! lowercased dotted paths and warns on anything it does not recognize.

use crate::diagnostics::Diagnostics;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Default number of data lines sampled per scan.
pub const DEFAULT_READ_LINES: usize = 200;

/// Header handling for the first sampled line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderRule {
    /// The first line is a header row.
    Present,
    /// The first line is data; columns are unnamed.
    Absent,
    /// Decide from the first line's contents.
    #[default]
    Auto,
}

/// Options for one scan.
///
/// The same structure is echoed back in the scan result with the detected
/// separator and header decision filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanConfig {
    /// Field separator. `None` requests detection.
    #[serde(serialize_with = "ser_opt_separator")]
    pub separator: Option<u8>,
    /// Header handling.
    pub header: HeaderRule,
    /// Quote character. Always `"`.
    #[serde(serialize_with = "ser_separator")]
    pub quote: u8,
    /// Data lines to sample; 0 reads the whole file.
    pub read_lines: usize,
    /// Emit `NOT NULL` for columns with zero observed nulls.
    pub strict: bool,
    /// Mirror diagnostics to stderr as they are produced.
    pub verbose: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            separator: None,
            header: HeaderRule::Auto,
            quote: b'"',
            read_lines: DEFAULT_READ_LINES,
            strict: false,
            verbose: false,
        }
    }
}

impl ScanConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a config from a dynamic qualifier object.
    ///
    /// Nested objects are flattened to dotted paths with every segment
    /// lowercased, so `{"From": {"File": {"ColumnSeparator": ";"}}}` and
    /// `{"from.file.columnseparator": ";"}` are equivalent. Unrecognized
    /// keys and ill-typed values are reported as WARNINGs and skipped.
    pub fn from_json(value: &Value, diags: &mut Diagnostics) -> Self {
        let mut config = Self::default();
        let Value::Object(_) = value else {
            diags.warning("qualifier object is not a JSON object; using defaults");
            return config;
        };

        let mut flat = Vec::new();
        flatten(value, String::new(), &mut flat);

        for (path, leaf) in flat {
            match path.as_str() {
                "from.file.columnseparator" => match leaf.as_str() {
                    Some(s) if s.len() == 1 => config.separator = Some(s.as_bytes()[0]),
                    _ => diags.warning(format!(
                        "qualifier {path} must be a single-character string"
                    )),
                },
                "from.file.header" => match leaf {
                    Value::Bool(b) => {
                        config.header = if *b {
                            HeaderRule::Present
                        } else {
                            HeaderRule::Absent
                        };
                    }
                    Value::Number(n) => match n.as_i64() {
                        Some(1) => config.header = HeaderRule::Present,
                        Some(0) => config.header = HeaderRule::Absent,
                        Some(-1) => config.header = HeaderRule::Auto,
                        _ => diags.warning(format!("qualifier {path} must be -1, 0 or 1")),
                    },
                    _ => diags.warning(format!("qualifier {path} must be a boolean or -1/0/1")),
                },
                "readlines" => match leaf.as_u64() {
                    Some(n) => config.read_lines = n as usize,
                    None => {
                        diags.warning(format!("qualifier {path} must be a non-negative integer"));
                    }
                },
                "strict" => match leaf.as_bool() {
                    Some(b) => config.strict = b,
                    None => diags.warning(format!("qualifier {path} must be a boolean")),
                },
                "verbose" => match leaf.as_bool() {
                    Some(b) => config.verbose = b,
                    None => diags.warning(format!("qualifier {path} must be a boolean")),
                },
                _ => diags.warning(format!("unknown qualifier: {path}")),
            }
        }

        config
    }
}

/// Flatten a JSON value into `(lowercased.dotted.path, leaf)` pairs.
fn flatten<'v>(value: &'v Value, prefix: String, out: &mut Vec<(String, &'v Value)>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let segment = key.to_lowercase();
                let path = if prefix.is_empty() {
                    segment
                } else {
                    format!("{prefix}.{segment}")
                };
                flatten(child, path, out);
            }
        }
        leaf => out.push((prefix, leaf)),
    }
}

fn ser_separator<S: Serializer>(byte: &u8, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_char(*byte as char)
}

fn ser_opt_separator<S: Serializer>(byte: &Option<u8>, serializer: S) -> Result<S::Ok, S::Error> {
    match byte {
        Some(b) => serializer.serialize_char(*b as char),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = ScanConfig::default();
        assert_eq!(config.separator, None);
        assert_eq!(config.header, HeaderRule::Auto);
        assert_eq!(config.quote, b'"');
        assert_eq!(config.read_lines, 200);
        assert!(!config.strict);
        assert!(!config.verbose);
    }

    #[test]
    fn test_from_json_nested() {
        let value = json!({
            "from": {"file": {"columnseparator": ";", "header": 1}},
            "readlines": 50,
            "strict": true
        });
        let mut diags = Diagnostics::new(false);
        let config = ScanConfig::from_json(&value, &mut diags);

        assert_eq!(config.separator, Some(b';'));
        assert_eq!(config.header, HeaderRule::Present);
        assert_eq!(config.read_lines, 50);
        assert!(config.strict);
        assert!(diags.is_empty());
    }

    #[test]
    fn test_from_json_case_insensitive_paths() {
        let value = json!({"From": {"File": {"ColumnSeparator": "|"}}, "ReadLines": 10});
        let mut diags = Diagnostics::new(false);
        let config = ScanConfig::from_json(&value, &mut diags);

        assert_eq!(config.separator, Some(b'|'));
        assert_eq!(config.read_lines, 10);
        assert!(diags.is_empty());
    }

    #[test]
    fn test_from_json_header_encodings() {
        let mut diags = Diagnostics::new(false);

        let config = ScanConfig::from_json(&json!({"from": {"file": {"header": 0}}}), &mut diags);
        assert_eq!(config.header, HeaderRule::Absent);

        let config = ScanConfig::from_json(&json!({"from": {"file": {"header": -1}}}), &mut diags);
        assert_eq!(config.header, HeaderRule::Auto);

        let config =
            ScanConfig::from_json(&json!({"from": {"file": {"header": true}}}), &mut diags);
        assert_eq!(config.header, HeaderRule::Present);
        assert!(diags.is_empty());
    }

    #[test]
    fn test_from_json_unknown_key_warns() {
        let value = json!({"bogus": {"key": 1}, "verbose": true});
        let mut diags = Diagnostics::new(false);
        let config = ScanConfig::from_json(&value, &mut diags);

        assert!(config.verbose);
        assert_eq!(diags.len(), 1);
        assert!(diags.entries()[0].message.contains("bogus.key"));
    }

    #[test]
    fn test_from_json_bad_separator_warns() {
        let value = json!({"from": {"file": {"columnseparator": "||"}}});
        let mut diags = Diagnostics::new(false);
        let config = ScanConfig::from_json(&value, &mut diags);

        assert_eq!(config.separator, None);
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn test_serialization_shape() {
        let config = ScanConfig {
            separator: Some(b'\t'),
            header: HeaderRule::Present,
            ..ScanConfig::default()
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["separator"], "\t");
        assert_eq!(json["header"], "present");
        assert_eq!(json["quote"], "\"");
        assert_eq!(json["readLines"], 200);
    }
}
