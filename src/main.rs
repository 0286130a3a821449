//! csv-schemer CLI - SQL schema inference for delimited files

use clap::Parser;
use csv_schemer::{Diagnostics, HeaderRule, ScanConfig, ScanResult, Scanner};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Infer SQL column schemas from delimited text files.
///
/// Detects the separator and header row, accumulates per-column statistics
/// over a sample, and emits column names with SQL type declarations.
#[derive(Parser, Debug)]
#[command(name = "csv-schemer")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input file(s) to scan
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Force a specific separator (single character, or 'tab')
    #[arg(short = 'd', long)]
    separator: Option<String>,

    /// Header handling (default: auto)
    #[arg(long, value_enum)]
    header: Option<HeaderArg>,

    /// Number of data lines to sample, 0 for the whole file (default: 200)
    #[arg(short = 'n', long)]
    read_lines: Option<usize>,

    /// Read the entire file instead of sampling
    #[arg(short = 'a', long)]
    all: bool,

    /// Emit NOT NULL for columns with zero observed nulls
    #[arg(long)]
    strict: bool,

    /// Additional qualifiers as a JSON object (nested keys, case-insensitive)
    #[arg(short = 'Q', long)]
    qualifiers: Option<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Only output the names-only column list (for load-statement targets)
    #[arg(long)]
    names_only: bool,

    /// Mirror scan diagnostics to stderr
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum HeaderArg {
    Present,
    Absent,
    Auto,
}

impl From<HeaderArg> for HeaderRule {
    fn from(arg: HeaderArg) -> Self {
        match arg {
            HeaderArg::Present => HeaderRule::Present,
            HeaderArg::Absent => HeaderRule::Absent,
            HeaderArg::Auto => HeaderRule::Auto,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Ddl,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("Error: {message}");
            return ExitCode::FAILURE;
        }
    };

    // Scans are independent; fan out across files. Each scan itself stays
    // single-threaded.
    let outputs: Vec<Result<String, String>> = args
        .files
        .par_iter()
        .map(|file| {
            scan_file(file, &args, &config)
                .map_err(|e| format!("Error processing {}: {e}", file.display()))
        })
        .collect();

    let mut exit_code = ExitCode::SUCCESS;
    for output in outputs {
        match output {
            Ok(text) => println!("{text}"),
            Err(message) => {
                eprintln!("{message}");
                exit_code = ExitCode::FAILURE;
            }
        }
    }

    exit_code
}

/// Resolve the scan configuration: JSON qualifiers first, then flags.
fn build_config(args: &Args) -> Result<ScanConfig, String> {
    let mut config = match args.qualifiers {
        Some(ref raw) => {
            let value: serde_json::Value =
                serde_json::from_str(raw).map_err(|e| format!("invalid qualifiers JSON: {e}"))?;
            // Mirror boundary warnings straight to stderr.
            let mut diags = Diagnostics::new(true);
            ScanConfig::from_json(&value, &mut diags)
        }
        None => ScanConfig::default(),
    };

    if let Some(ref separator) = args.separator {
        config.separator = Some(parse_separator(separator)?);
    }
    if let Some(header) = args.header {
        config.header = header.into();
    }
    if let Some(read_lines) = args.read_lines {
        config.read_lines = read_lines;
    }
    if args.all {
        config.read_lines = 0;
    }
    if args.strict {
        config.strict = true;
    }
    if args.verbose {
        config.verbose = true;
    }

    Ok(config)
}

fn parse_separator(raw: &str) -> Result<u8, String> {
    if raw.eq_ignore_ascii_case("tab") || raw == "\\t" {
        return Ok(b'\t');
    }
    match raw.as_bytes() {
        [b] => Ok(*b),
        _ => Err(format!(
            "separator must be a single character or 'tab', got {raw:?}"
        )),
    }
}

fn scan_file(path: &Path, args: &Args, config: &ScanConfig) -> csv_schemer::Result<String> {
    let scanner = Scanner::with_config(config.clone());
    let result = scanner.scan_path(path)?;

    if args.names_only {
        return Ok(result.column_names());
    }

    Ok(match args.format {
        OutputFormat::Text => render_text(path, &result),
        OutputFormat::Json => result.to_json()?,
        OutputFormat::Ddl => result.column_list(),
    })
}

fn render_text(path: &Path, result: &ScanResult) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    let _ = writeln!(out, "File: {}", path.display());
    let _ = writeln!(out, "  Separator: {:?}", result.detected_separator as char);
    let _ = writeln!(out, "  Header: {}", result.header_present);
    match result.estimated_lines {
        Some(n) => {
            let _ = writeln!(out, "  Estimated lines: {n}");
        }
        None => {
            let _ = writeln!(out, "  Estimated lines: unknown");
        }
    }

    let _ = writeln!(out, "  Columns:");
    for (i, column) in result.columns.iter().enumerate() {
        let name = if column.name.is_empty() {
            format!("Column{}", i + 1)
        } else {
            column.name.clone()
        };
        let _ = writeln!(
            out,
            "    {}: {} {} ({}, {:.1}% null)",
            i + 1,
            name,
            column.sql_type,
            column.ty,
            column.null_pct * 100.0
        );
    }

    if !result.diagnostics.is_empty() {
        let _ = writeln!(out, "  Diagnostics:");
        for entry in &result.diagnostics {
            let _ = writeln!(out, "    {}: {}", entry.level, entry.message);
        }
    }

    let _ = writeln!(out, "  DDL: {}", result.column_list());
    out.trim_end().to_string()
}
