//! Whole-buffer input reading.
//!
//! Lexing is a pure computation over an in-memory buffer, so all input I/O
//! happens here, up front, as one blocking read per file. `-` names stdin
//! (read as binary to EOF).

use crate::error::CliError;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

/// Path spelling that means "read standard input".
pub const STDIN_PATH: &str = "-";

/// Read one input source completely into memory.
///
/// Rejects inputs at or beyond 4 GiB: token offsets are u32 and a lexeme
/// that cannot be addressed cannot be reproduced.
pub fn read_source(path: &str) -> Result<Vec<u8>, CliError> {
    let bytes = if path == STDIN_PATH {
        let mut buf = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut buf)
            .map_err(|source| CliError::ReadInput {
                path: PathBuf::from(STDIN_PATH),
                source,
            })?;
        buf
    } else {
        fs::read(path).map_err(|source| CliError::ReadInput {
            path: PathBuf::from(path),
            source,
        })?
    };

    if bytes.len() >= u32::MAX as usize {
        return Err(CliError::InputTooLarge {
            path: PathBuf::from(path),
            len: bytes.len() as u64,
        });
    }
    Ok(bytes)
}

/// The `(display_name, read_path)` pairs one run processes.
///
/// No files means stdin, labeled `stdin_name` (default `stdin`). An
/// explicit `-` in the file list also reads stdin but keeps `-` as its
/// stream label, matching what was asked for on the command line.
pub fn resolve_inputs(files: &[String], stdin_name: Option<&str>) -> Vec<(String, String)> {
    if files.is_empty() {
        let name = stdin_name.unwrap_or("stdin").to_owned();
        vec![(name, STDIN_PATH.to_owned())]
    } else {
        files.iter().map(|f| (f.clone(), f.clone())).collect()
    }
}
