//! csv-schemer: infer SQL column schemas from delimited text files
//!
//! Inspects a sample of a CSV-family file and produces a probable SQL
//! schema: column names, semantic types, and concrete SQL type spellings,
//! ready to drive table creation and bulk load.
//!
//! # Quick Start
//!
//! ```no_run
//! use csv_schemer::Scanner;
//!
//! // Create a scanner with default settings
//! let mut scanner = Scanner::new();
//!
//! // Optionally configure sampling
//! scanner.read_lines(500).strict(true);
//!
//! // Scan a file
//! let result = scanner.scan_path("data.csv").unwrap();
//!
//! println!("Separator: {}", result.detected_separator as char);
//! println!("Header: {}", result.header_present);
//! println!("{}", result.column_list());
//! ```
//!
//! # Pipeline
//!
//! A scan runs a fixed, single-threaded pipeline:
//!
//! 1. Sample nonempty trimmed lines, capturing the first as the header
//!    candidate (never counted against the `read_lines` budget).
//! 2. Pick the separator from {`,`, `;`, `|`, TAB} by dispersion scoring
//!    over quote-stripped piece counts, unless one was forced.
//! 3. Decide header presence: a candidate with any numeric-looking field
//!    is data, not a header (overridable).
//! 4. Tokenize every data line quote-aware and feed per-column
//!    accumulators: counts, null fraction, byte-length distribution,
//!    numeric min/max/scale, date and timestamp pattern matches.
//! 5. Synthesize a semantic type and SQL spelling per column and emit
//!    ordered column descriptors plus a DDL-ready column list.
//!
//! Recoverable oddities (short samples, truncated lines, fallback
//! separator, unterminated quotes) are reported through a structured
//! diagnostics list on the result, never by aborting the scan.
//!
//! # Dynamic qualifiers
//!
//! Loosely-structured configuration objects are accepted at the boundary:
//!
//! ```
//! use csv_schemer::{Diagnostics, ScanConfig, Scanner};
//!
//! let value = serde_json::json!({
//!     "From": {"File": {"ColumnSeparator": ";", "Header": 1}},
//!     "readlines": 100
//! });
//! let mut diags = Diagnostics::new(false);
//! let config = ScanConfig::from_json(&value, &mut diags);
//! let scanner = Scanner::with_config(config);
//! # let _ = scanner;
//! ```

mod config;
mod diagnostics;
mod emitter;
mod engine;
mod error;
mod field_type;
mod metadata;
mod scanner;

// Re-export public API
pub use config::{DEFAULT_READ_LINES, HeaderRule, ScanConfig};
pub use diagnostics::{Diagnostic, Diagnostics, Level};
pub use emitter::{column_list, column_names};
pub use error::{Result, ScanError};
pub use field_type::Type;
pub use metadata::{ColumnInfo, DistStats, ScanResult};
pub use scanner::{Scanner, infer_column_list};
