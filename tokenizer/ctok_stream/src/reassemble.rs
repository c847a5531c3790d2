//! Stream replay: rebuild source files from a record stream.
//!
//! Records are demultiplexed purely by their `file` field; nothing assumes
//! same-file records are contiguous. An output handle is created lazily on
//! the first record naming a file and owned by the [`Reassembler`] for the
//! duration of one invocation; all handles flush on [`finish`] and close on
//! every exit path via Drop.
//!
//! # Path Sanitization
//!
//! File names come from the stream, which may have been produced on another
//! system or by another tool, so they are treated as untrusted display
//! strings: separators normalize to `/`, a drive-letter prefix is dropped,
//! leading slashes are stripped, remaining `:` become `_`, and `..`
//! segments are neutralized to `__`. This is a best-effort boundary
//! measure, not part of the round-trip guarantee.

use crate::error::StreamError;
use crate::record::parse_record;
use rustc_hash::FxHashMap;
use std::fs::{self, File};
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Suffix appended to every reconstructed file name.
pub const RECON_SUFFIX: &str = ".recon";

/// Normalize a stream-supplied file name into a safe relative path.
pub fn sanitize_relpath(name: &str) -> String {
    let mut s = name.replace('\\', "/");
    let bytes = s.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        s.drain(..2);
    }
    s.trim_start_matches('/').replace(':', "_").replace("..", "__")
}

struct OutputFile {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl OutputFile {
    fn append(&mut self, bytes: &[u8]) -> Result<(), StreamError> {
        self.writer
            .write_all(bytes)
            .map_err(|source| StreamError::Write {
                path: self.path.clone(),
                source,
            })
    }

    fn flush(&mut self) -> Result<(), StreamError> {
        self.writer.flush().map_err(|source| StreamError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// What one reassembly invocation produced.
#[derive(Debug, Default)]
pub struct ReassembleReport {
    /// Paths written, sorted.
    pub files: Vec<PathBuf>,
    /// Records applied (parseable lines with both fields).
    pub records: u64,
}

/// Replays records into per-file output handles.
pub struct Reassembler {
    outdir: Option<PathBuf>,
    handles: FxHashMap<String, OutputFile>,
    records: u64,
}

impl Reassembler {
    pub fn new(outdir: Option<PathBuf>) -> Self {
        Self {
            outdir,
            handles: FxHashMap::default(),
            records: 0,
        }
    }

    /// Where a stream file name lands on disk.
    ///
    /// With an outdir the sanitized relative path (subdirectories included)
    /// goes under it; without one, only the base name lands in the working
    /// directory. Both get [`RECON_SUFFIX`].
    fn output_path(&self, file: &str) -> PathBuf {
        let rel = sanitize_relpath(file);
        match &self.outdir {
            Some(dir) => dir.join(format!("{rel}{RECON_SUFFIX}")),
            None => {
                let base = rel.rsplit('/').next().unwrap_or(&rel);
                PathBuf::from(format!("{base}{RECON_SUFFIX}"))
            }
        }
    }

    fn create_output(&self, file: &str) -> Result<OutputFile, StreamError> {
        let path = self.output_path(file);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| StreamError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        let writer = File::create(&path)
            .map(BufWriter::new)
            .map_err(|source| StreamError::Create {
                path: path.clone(),
                source,
            })?;
        Ok(OutputFile { path, writer })
    }

    /// Append one record's lexeme bytes to the handle for `file`,
    /// creating it on first sighting.
    pub fn append(&mut self, file: &str, bytes: &[u8]) -> Result<(), StreamError> {
        self.records += 1;
        if let Some(handle) = self.handles.get_mut(file) {
            return handle.append(bytes);
        }
        let mut handle = self.create_output(file)?;
        handle.append(bytes)?;
        self.handles.insert(file.to_owned(), handle);
        Ok(())
    }

    /// Flush every open handle and report what was written.
    pub fn finish(mut self) -> Result<ReassembleReport, StreamError> {
        let mut files = Vec::with_capacity(self.handles.len());
        for (_, mut handle) in self.handles.drain() {
            handle.flush()?;
            files.push(handle.path);
        }
        files.sort();
        Ok(ReassembleReport {
            files,
            records: self.records,
        })
    }
}

/// Drive a whole stream through a [`Reassembler`].
///
/// Lines are read as raw bytes (lexeme escapes keep records newline-free,
/// but lexeme content may be arbitrary 8-bit data). Unparseable lines are
/// skipped; I/O failures are fatal.
pub fn reassemble<R: BufRead>(
    input: &mut R,
    outdir: Option<&Path>,
) -> Result<ReassembleReport, StreamError> {
    let mut sink = Reassembler::new(outdir.map(Path::to_path_buf));
    let mut line = Vec::new();
    loop {
        line.clear();
        let n = input
            .read_until(b'\n', &mut line)
            .map_err(StreamError::ReadStream)?;
        if n == 0 {
            break;
        }
        if let Some(rec) = parse_record(&line) {
            sink.append(&rec.file, &rec.lexeme)?;
        }
    }
    sink.finish()
}
