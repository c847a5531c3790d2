//! CLI-level errors: the fatal taxonomy.
//!
//! Everything here terminates the run with a non-zero exit: unreadable
//! input, unwritable output, oversized input. Lexical malformation is not
//! an error anywhere in the pipeline.

use ctok_stream::StreamError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read {path}: {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The scanner tracks positions in u32; a single input beyond that
    /// cannot be tokenized losslessly, so it is rejected up front.
    #[error("{path} is too large to tokenize ({len} bytes)")]
    InputTooLarge { path: PathBuf, len: u64 },

    #[error("failed to open {path} for write: {source}")]
    OpenOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write output: {0}")]
    WriteOutput(#[source] io::Error),

    #[error("failed to encode summary: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Stream(#[from] StreamError),
}
