//! Scan results: column descriptors and the per-scan report.

use crate::config::ScanConfig;
use crate::diagnostics::Diagnostic;
use crate::emitter;
use crate::error::{Result, ScanError};
use crate::field_type::Type;
use serde::Serialize;

/// Summary statistics over a distribution of non-negative integers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistStats {
    /// Arithmetic mean.
    pub avg: f64,
    /// Smallest observed value.
    pub min: u64,
    /// Largest observed value.
    pub max: u64,
    /// Population standard deviation.
    pub std_dev: f64,
}

/// Descriptor for one inferred column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnInfo {
    /// Column name from the header; empty when the file has none.
    pub name: String,
    /// Observations delivered to this column position, nulls included.
    pub count: u64,
    /// Fraction of observations that were null, in [0, 1].
    pub null_pct: f64,
    /// Raw field byte-length distribution.
    pub length: DistStats,
    /// Smallest numeric value; present only for all-numeric columns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Largest numeric value; present only for all-numeric columns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Digits-after-`.` distribution; present only for all-numeric columns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<DistStats>,
    /// Synthesized semantic type.
    #[serde(rename = "type")]
    pub ty: Type,
    /// Concrete SQL type spelling.
    pub sql_type: String,
}

/// Result of one file scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    /// The configuration echoed back with detected separator and header
    /// decision filled in.
    pub qualifiers: ScanConfig,
    /// Estimated total data rows; unset when the file size was unknown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_lines: Option<u64>,
    /// Inferred columns in left-to-right order.
    pub columns: Vec<ColumnInfo>,
    /// Diagnostics in the order produced.
    #[serde(rename = "errors")]
    pub diagnostics: Vec<Diagnostic>,
    /// The separator the scan used.
    #[serde(skip)]
    pub detected_separator: u8,
    /// Whether the first line was consumed as a header.
    #[serde(skip)]
    pub header_present: bool,
}

impl ScanResult {
    /// DDL-ready column list: `name sqlType[, name sqlType]*`, honoring the
    /// `strict` qualifier for `NOT NULL` suffixes.
    pub fn column_list(&self) -> String {
        emitter::column_list(&self.columns, self.qualifiers.strict)
    }

    /// Names-only list for load-statement target columns.
    pub fn column_names(&self) -> String {
        emitter::column_names(&self.columns)
    }

    /// Serialize the result as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ScanError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Level;

    fn sample_column() -> ColumnInfo {
        ColumnInfo {
            name: "age".to_string(),
            count: 2,
            null_pct: 0.0,
            length: DistStats {
                avg: 2.0,
                min: 2,
                max: 2,
                std_dev: 0.0,
            },
            min: Some(25.0),
            max: Some(30.0),
            scale: Some(DistStats {
                avg: 0.0,
                min: 0,
                max: 0,
                std_dev: 0.0,
            }),
            ty: Type::Integer,
            sql_type: "INT(3)".to_string(),
        }
    }

    #[test]
    fn test_json_shape() {
        let result = ScanResult {
            qualifiers: ScanConfig {
                separator: Some(b','),
                ..ScanConfig::default()
            },
            estimated_lines: Some(2),
            columns: vec![sample_column()],
            diagnostics: vec![Diagnostic {
                level: Level::Warning,
                message: "short sample".to_string(),
            }],
            detected_separator: b',',
            header_present: true,
        };

        let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
        assert_eq!(json["estimatedLines"], 2);
        assert_eq!(json["qualifiers"]["separator"], ",");
        assert_eq!(json["columns"][0]["name"], "age");
        assert_eq!(json["columns"][0]["type"], "integer");
        assert_eq!(json["columns"][0]["sqlType"], "INT(3)");
        assert_eq!(json["columns"][0]["length"]["stdDev"], 0.0);
        assert_eq!(json["errors"][0]["level"], "WARNING");
        // Skipped fields stay out of the wire shape.
        assert!(json.get("detectedSeparator").is_none());
    }

    #[test]
    fn test_estimate_omitted_when_unset() {
        let result = ScanResult {
            qualifiers: ScanConfig::default(),
            estimated_lines: None,
            columns: vec![],
            diagnostics: vec![],
            detected_separator: b',',
            header_present: false,
        };
        let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
        assert!(json.get("estimatedLines").is_none());
    }

    #[test]
    fn test_non_numeric_column_omits_numeric_stats() {
        let mut column = sample_column();
        column.min = None;
        column.max = None;
        column.scale = None;
        let json = serde_json::to_value(&column).unwrap();
        assert!(json.get("min").is_none());
        assert!(json.get("scale").is_none());
    }
}
