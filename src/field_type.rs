use serde::Serialize;
use std::fmt;

/// Semantic type synthesized for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Type {
    /// Whole numbers only.
    Integer,
    /// Numbers with a fractional part.
    Number,
    /// Calendar date (YYYY-MM-DD).
    Date,
    /// Date with a time-of-day component.
    Timestamp,
    /// Very long text, beyond ordinary VARCHAR widths.
    Stream,
    /// Text value (fallback type).
    #[default]
    String,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Integer => write!(f, "integer"),
            Type::Number => write!(f, "number"),
            Type::Date => write!(f, "date"),
            Type::Timestamp => write!(f, "timestamp"),
            Type::Stream => write!(f, "stream"),
            Type::String => write!(f, "string"),
        }
    }
}
