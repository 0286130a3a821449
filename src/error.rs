use std::io;
use thiserror::Error;

/// Error type for schema scanning operations.
#[derive(Error, Debug)]
pub enum ScanError {
    /// Input path does not exist or is not readable.
    #[error("input missing or unreadable: {path}")]
    InputMissing {
        /// The offending path, as given by the caller.
        path: String,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Input opened but yielded zero nonempty lines.
    #[error("empty input: no nonempty lines to analyze")]
    EmptyInput,

    /// IO error while reading the sample.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Unexpected failure during statistics or synthesis.
    #[error("internal scan failure: {0}")]
    Internal(String),
}

/// Result type alias for scanning operations.
pub type Result<T> = std::result::Result<T, ScanError>;
