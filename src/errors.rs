//! Error type shared by every dictionary tool.

use std::io;
use std::path::PathBuf;

/// Errors that abort a run.
///
/// Per-line problems (malformed lines, bad numbers) never surface here; they
/// are counted in a [`ParseReport`](crate::core::report::ParseReport) instead.
#[derive(Debug, thiserror::Error)]
pub enum DictError {
    /// No input file was given.
    #[error("no input dictionary given (use --input)")]
    NoInputs,

    /// Neither a snapshot nor an export destination was given.
    #[error("nothing to write: pass --output and/or --export")]
    NoOutput,

    /// The weight list cannot be matched with the input list.
    #[error("{weights} weight(s) given for {inputs} input(s)")]
    WeightCountMismatch { inputs: usize, weights: usize },

    /// A source weight that is zero, negative, NaN or infinite.
    #[error("weight #{index} must be a positive number, got {value}")]
    InvalidWeight { index: usize, value: f64 },

    /// An input file could not be opened.
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An input file could not be decoded as UTF-8 or UTF-16 text.
    #[error("{} is not valid UTF-8/UTF-16 text", path.display())]
    Encoding { path: PathBuf },

    /// An output file could not be written.
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The JSON run report could not be serialized.
    #[error("cannot serialize run report: {0}")]
    Report(#[from] serde_json::Error),
}

pub type Result<T, E = DictError> = std::result::Result<T, E>;
