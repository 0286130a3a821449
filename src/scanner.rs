//! Scanner builder and the scan pipeline.
//!
//! One scan is a pure function of (input, config): sample lines, settle the
//! separator, decide the header, tokenize, accumulate per-column statistics,
//! synthesize types, and assemble the result. No state survives a scan.

use std::any::Any;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use crate::config::{HeaderRule, ScanConfig};
use crate::diagnostics::Diagnostics;
use crate::engine::detector::detect_separator;
use crate::engine::line_source::LineSource;
use crate::engine::patterns::parse_numeric;
use crate::engine::stats::ColumnTable;
use crate::engine::synthesize::column_info;
use crate::engine::tokenizer::{tokenize, unquote};
use crate::error::{Result, ScanError};
use crate::metadata::{ColumnInfo, ScanResult};

/// Schema scanner for delimited text files.
///
/// # Example
///
/// ```no_run
/// use csv_schemer::Scanner;
///
/// let mut scanner = Scanner::new();
/// scanner.read_lines(500).strict(true);
///
/// let result = scanner.scan_path("data.csv").unwrap();
/// println!("separator: {}", result.detected_separator as char);
/// println!("{}", result.column_list());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    config: ScanConfig,
}

impl Scanner {
    /// Create a scanner with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scanner from an existing configuration.
    pub const fn with_config(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Force a specific separator (skip detection).
    pub fn separator(&mut self, separator: u8) -> &mut Self {
        self.config.separator = Some(separator);
        self
    }

    /// Set the header rule.
    pub fn header(&mut self, header: HeaderRule) -> &mut Self {
        self.config.header = header;
        self
    }

    /// Set the number of data lines to sample; 0 reads the whole file.
    pub fn read_lines(&mut self, read_lines: usize) -> &mut Self {
        self.config.read_lines = read_lines;
        self
    }

    /// Emit `NOT NULL` for columns with zero observed nulls.
    pub fn strict(&mut self, strict: bool) -> &mut Self {
        self.config.strict = strict;
        self
    }

    /// Mirror diagnostics to stderr as they are produced.
    pub fn verbose(&mut self, verbose: bool) -> &mut Self {
        self.config.verbose = verbose;
        self
    }

    /// Borrow the current configuration.
    pub const fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan a file at the given path.
    pub fn scan_path<P: AsRef<Path>>(&self, path: P) -> Result<ScanResult> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ScanError::InputMissing {
            path: path.display().to_string(),
            source,
        })?;
        let file_size = file.metadata().ok().map(|m| m.len());
        self.scan_reader(BufReader::new(file), file_size)
    }

    /// Scan in-memory data.
    pub fn scan_bytes(&self, data: &[u8]) -> Result<ScanResult> {
        self.scan_reader(Cursor::new(data), Some(data.len() as u64))
    }

    /// Scan from a buffered reader.
    ///
    /// `file_size` feeds the row-count estimate; without it, an estimate is
    /// only produced when the sample reached end of input.
    ///
    /// Unexpected failures inside the pipeline never escape as panics: they
    /// are recorded as an ERROR diagnostic and returned as
    /// [`ScanError::Internal`], with no partial result.
    pub fn scan_reader<R: BufRead>(&self, reader: R, file_size: Option<u64>) -> Result<ScanResult> {
        let mut diags = Diagnostics::new(self.config.verbose);

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.scan_inner(reader, file_size, &mut diags)
        }));

        match outcome {
            Ok(Ok(mut result)) => {
                result.diagnostics = diags.into_entries();
                Ok(result)
            }
            Ok(Err(e)) => Err(e),
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                diags.error(format!("unexpected scan failure: {message}"));
                Err(ScanError::Internal(message))
            }
        }
    }

    /// The scan pipeline proper. Diagnostics are attached by the caller.
    fn scan_inner<R: BufRead>(
        &self,
        reader: R,
        file_size: Option<u64>,
        diags: &mut Diagnostics,
    ) -> Result<ScanResult> {
        let mut source = LineSource::new(reader, self.config.read_lines);

        let Some(header_candidate) = source.next_line(diags)? else {
            return Err(ScanError::EmptyInput);
        };
        let mut data_lines = Vec::new();
        while let Some(line) = source.next_line(diags)? {
            data_lines.push(line);
        }

        if source.eof_reached()
            && self.config.read_lines > 0
            && data_lines.len() < self.config.read_lines
        {
            diags.warning(format!(
                "short sample: {} of {} requested data lines available",
                data_lines.len(),
                self.config.read_lines
            ));
        }

        let separator = match self.config.separator {
            Some(s) => s,
            None => {
                let mut sample: Vec<&str> = Vec::with_capacity(data_lines.len() + 1);
                sample.push(header_candidate.as_str());
                sample.extend(data_lines.iter().map(String::as_str));
                let detection = detect_separator(&sample);
                if detection.fallback {
                    diags.warning(
                        "no separator candidate qualified; possibly a single-column file, \
                         assuming ','",
                    );
                } else {
                    diags.info(format!(
                        "separator {:?} selected by dispersion score",
                        detection.separator as char
                    ));
                }
                detection.separator
            }
        };

        let header_present = match self.config.header {
            HeaderRule::Present => true,
            HeaderRule::Absent => false,
            HeaderRule::Auto => !tokenize(&header_candidate, separator)
                .fields
                .iter()
                .any(|f| parse_numeric(f).is_some()),
        };

        let names: Vec<String> = if header_present {
            tokenize(&header_candidate, separator)
                .fields
                .iter()
                .map(|f| unquote(f))
                .collect()
        } else {
            Vec::new()
        };

        let mut table = ColumnTable::new();
        // Sample line numbers are 1-based; the header candidate is line 1.
        if !header_present {
            observe_line(&mut table, diags, &header_candidate, separator, 1);
        }
        for (i, line) in data_lines.iter().enumerate() {
            observe_line(&mut table, diags, line, separator, i + 2);
        }

        if header_present && table.width() == 0 {
            diags.warning("header detected but no data rows sampled; no columns inferred");
        }

        let mut columns: Vec<ColumnInfo> = table
            .iter()
            .enumerate()
            .map(|(i, stats)| column_info(names.get(i).cloned().unwrap_or_default(), stats))
            .collect();

        // A nameless all-null final column is a trailing-separator artifact.
        if let Some(last) = columns.last()
            && last.name.is_empty()
            && last.null_pct == 1.0
        {
            columns.pop();
        }

        let sample_lines = source.lines_yielded() as u64;
        let estimated_lines = if source.eof_reached() {
            Some(sample_lines)
        } else {
            match file_size {
                Some(size) if source.bytes_sampled() > 0 => {
                    let ratio = size as f64 / source.bytes_sampled() as f64;
                    Some((sample_lines as f64 * ratio) as u64)
                }
                _ => {
                    diags.warning("cannot estimate row count: input size unknown");
                    None
                }
            }
        };

        let mut qualifiers = self.config.clone();
        qualifiers.separator = Some(separator);
        qualifiers.header = if header_present {
            HeaderRule::Present
        } else {
            HeaderRule::Absent
        };

        Ok(ScanResult {
            qualifiers,
            estimated_lines,
            columns,
            // Attached by scan_reader once the sink is complete.
            diagnostics: Vec::new(),
            detected_separator: separator,
            header_present,
        })
    }
}

/// Best-effort text for a caught panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Tokenize one data line and fold it into the column table.
fn observe_line(
    table: &mut ColumnTable,
    diags: &mut Diagnostics,
    line: &str,
    separator: u8,
    line_no: usize,
) {
    let tokens = tokenize(line, separator);
    if tokens.unterminated_quote {
        diags.debug(format!(
            "line {line_no}: unterminated quoted field; value ends at line end"
        ));
    }
    table.observe_fields(&tokens.fields);
}

/// Scan `path` and emit the DDL-ready column list in one call.
pub fn infer_column_list<P: AsRef<Path>>(path: P, config: ScanConfig) -> Result<String> {
    Scanner::with_config(config)
        .scan_path(path)
        .map(|r| r.column_list())
}
