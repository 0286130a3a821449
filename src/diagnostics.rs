//! Structured scan diagnostics.
//!
//! Recoverable conditions (short samples, truncated lines, fallback
//! separators) are recorded here rather than aborting the scan. The sink
//! preserves insertion order; `verbose` mirrors entries to stderr as they
//! are produced, keeping stdout free for machine-readable output.

use serde::Serialize;
use std::fmt;

/// Severity of a diagnostic entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    /// Detail useful when debugging a scan (e.g. unterminated quotes).
    Debug,
    /// Informational notes.
    Info,
    /// Recoverable problems; the scan continued.
    Warning,
    /// Fatal problems; the scan did not produce a result.
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Debug => write!(f, "DEBUG"),
            Level::Info => write!(f, "INFO"),
            Level::Warning => write!(f, "WARNING"),
            Level::Error => write!(f, "ERROR"),
        }
    }
}

/// A single diagnostic entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Severity level.
    pub level: Level,
    /// Human-readable message.
    pub message: String,
}

/// Ordered sink of diagnostics produced by one scan.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
    verbose: bool,
}

impl Diagnostics {
    /// Create a new sink. With `verbose`, entries are mirrored to stderr.
    pub const fn new(verbose: bool) -> Self {
        Self {
            entries: Vec::new(),
            verbose,
        }
    }

    /// Record an entry.
    pub fn push(&mut self, level: Level, message: impl Into<String>) {
        let message = message.into();
        if self.verbose {
            eprintln!("[{level}] {message}");
        }
        self.entries.push(Diagnostic { level, message });
    }

    /// Record a DEBUG entry.
    pub fn debug(&mut self, message: impl Into<String>) {
        self.push(Level::Debug, message);
    }

    /// Record an INFO entry.
    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Level::Info, message);
    }

    /// Record a WARNING entry.
    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(Level::Warning, message);
    }

    /// Record an ERROR entry.
    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Level::Error, message);
    }

    /// Number of entries recorded so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Borrow the recorded entries in insertion order.
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Consume the sink, yielding the entries in insertion order.
    pub fn into_entries(self) -> Vec<Diagnostic> {
        self.entries
    }
}
