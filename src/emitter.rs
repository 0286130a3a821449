//! DDL-ready column list emission.

use crate::metadata::ColumnInfo;
use std::borrow::Cow;

/// Emit `name sqlType[, name sqlType]*` for the given columns.
///
/// Columns without a header name are filled in as `Column<i>` (1-based).
/// With `strict`, columns with zero observed nulls get a `NOT NULL` suffix.
pub fn column_list(columns: &[ColumnInfo], strict: bool) -> String {
    let mut parts = Vec::with_capacity(columns.len());
    for (i, column) in columns.iter().enumerate() {
        let mut part = format!("{} {}", emitted_name(column, i), column.sql_type);
        if strict && column.null_pct == 0.0 {
            part.push_str(" NOT NULL");
        }
        parts.push(part);
    }
    parts.join(", ")
}

/// Emit the names-only variant for load-statement target lists.
pub fn column_names(columns: &[ColumnInfo]) -> String {
    let names: Vec<Cow<'_, str>> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| emitted_name(c, i))
        .collect();
    names.join(", ")
}

fn emitted_name(column: &ColumnInfo, index: usize) -> Cow<'_, str> {
    if column.name.is_empty() {
        Cow::Owned(format!("Column{}", index + 1))
    } else {
        Cow::Borrowed(column.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_type::Type;
    use crate::metadata::DistStats;

    fn column(name: &str, sql_type: &str, null_pct: f64) -> ColumnInfo {
        ColumnInfo {
            name: name.to_string(),
            count: 10,
            null_pct,
            length: DistStats {
                avg: 3.0,
                min: 3,
                max: 3,
                std_dev: 0.0,
            },
            min: None,
            max: None,
            scale: None,
            ty: Type::String,
            sql_type: sql_type.to_string(),
        }
    }

    #[test]
    fn test_column_list() {
        let columns = vec![
            column("name", "VARCHAR(8)", 0.0),
            column("age", "INT(3)", 0.1),
        ];
        assert_eq!(column_list(&columns, false), "name VARCHAR(8), age INT(3)");
    }

    #[test]
    fn test_unnamed_columns_numbered_from_one() {
        let columns = vec![
            column("", "INT(2)", 0.0),
            column("", "INT(2)", 0.0),
            column("", "INT(2)", 0.0),
        ];
        assert_eq!(
            column_list(&columns, false),
            "Column1 INT(2), Column2 INT(2), Column3 INT(2)"
        );
        assert_eq!(column_names(&columns), "Column1, Column2, Column3");
    }

    #[test]
    fn test_strict_marks_never_null_columns() {
        let columns = vec![
            column("a", "VARCHAR(4)", 0.0),
            column("b", "VARCHAR(4)", 0.25),
        ];
        assert_eq!(
            column_list(&columns, true),
            "a VARCHAR(4) NOT NULL, b VARCHAR(4)"
        );
    }

    #[test]
    fn test_names_only() {
        let columns = vec![column("x", "INT(2)", 0.0), column("y", "INT(2)", 0.0)];
        assert_eq!(column_names(&columns), "x, y");
    }

    #[test]
    fn test_empty_columns() {
        assert_eq!(column_list(&[], true), "");
        assert_eq!(column_names(&[]), "");
    }
}
