//! Stream and reassembly errors.
//!
//! Only I/O can fail here: malformed records and escape sequences are
//! recovered locally by the parser and unescaper, never surfaced as
//! errors. Every variant carries the offending path so the CLI can report
//! `path: reason` and exit non-zero.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StreamError {
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read token stream: {0}")]
    ReadStream(#[source] io::Error),
}
