//! Rule-based type synthesis.
//!
//! Maps accumulated column statistics to a semantic type and a concrete
//! SQL type spelling. Rules are ordered; the first match wins. Width
//! spellings pad the observed maximum by a dispersion-based margin so that
//! rows beyond the sample have headroom.

use crate::engine::stats::ColumnStats;
use crate::field_type::Type;
use crate::metadata::{ColumnInfo, DistStats};

/// Observation floor for the 0/1 BOOLEAN rule.
const BOOLEAN_MIN_OBSERVATIONS: u64 = 50;
/// Observation floor for the small-magnitude TINYINT rule.
const TINYINT_MIN_OBSERVATIONS: u64 = 100;
/// Length threshold beyond which a column is treated as a character stream.
const STREAM_LENGTH_THRESHOLD: u64 = 10_000;

/// Synthesize the semantic type and SQL spelling for one column.
pub fn synthesize(name: &str, stats: &ColumnStats) -> (Type, String) {
    let non_null = stats.non_null();
    let all_numeric = stats.num_count == non_null;
    let lengths = stats.lengths.dist_stats();

    if all_numeric && stats.scales.max() == 0 {
        if name_suggests_identifier(name) {
            return (Type::Integer, "BIGINT".to_string());
        }
        if non_null >= BOOLEAN_MIN_OBSERVATIONS
            && stats.min == Some(0.0)
            && stats.max == Some(1.0)
        {
            return (Type::Integer, "BOOLEAN".to_string());
        }
        if non_null >= TINYINT_MIN_OBSERVATIONS
            && stats.min.is_some_and(|m| m > -100.0)
            && stats.max.is_some_and(|m| m < 100.0)
        {
            return (Type::Integer, "TINYINT".to_string());
        }
        return (Type::Integer, format!("INT({})", margin(&lengths)));
    }

    if all_numeric {
        let scales = stats.scales.dist_stats();
        return (
            Type::Number,
            format!("NUMERIC({},{})", margin(&lengths), margin(&scales)),
        );
    }

    if stats.date_count == non_null {
        return (Type::Date, "DATE".to_string());
    }
    if stats.timestamp_count == non_null {
        return (Type::Timestamp, "TIMESTAMP".to_string());
    }
    if lengths.max > STREAM_LENGTH_THRESHOLD {
        return (Type::Stream, "LONGVARCHAR".to_string());
    }

    (Type::String, format!("VARCHAR({})", margin(&lengths)))
}

/// Build the full column descriptor for one accumulator.
pub fn column_info(name: String, stats: &ColumnStats) -> ColumnInfo {
    let (ty, sql_type) = synthesize(&name, stats);
    let numeric = stats.is_numeric();
    ColumnInfo {
        name,
        count: stats.count,
        null_pct: stats.null_pct(),
        length: stats.lengths.dist_stats(),
        min: if numeric { stats.min } else { None },
        max: if numeric { stats.max } else { None },
        scale: if numeric {
            Some(stats.scales.dist_stats())
        } else {
            None
        },
        ty,
        sql_type,
    }
}

/// Width padding: the observed maximum plus three standard deviations when
/// the dispersion is material, otherwise plus one.
fn margin(d: &DistStats) -> u64 {
    let pad = if d.std_dev > 0.34 {
        (3.0 * d.std_dev).floor() as u64
    } else {
        1
    };
    d.max + pad
}

/// Case-insensitive unbounded `ID` substring check.
fn name_suggests_identifier(name: &str) -> bool {
    name.as_bytes()
        .windows(2)
        .any(|w| w.eq_ignore_ascii_case(b"id"))
}
