//! Lossless JSONL token stream codec and file reassembler.
//!
//! Serializes tokens to one structured record per line and replays such
//! streams back into byte-identical source files:
//!
//! ```text
//! tokens ──► RecordWriter ──► {"file":...,"lexeme":...} per line
//! stream ──► parse_record ──► Reassembler ──► <file>.recon
//! ```
//!
//! The escape codec keeps records line-framed while passing arbitrary
//! 8-bit lexeme bytes through losslessly; see [`escape`] for the exact
//! rules. Malformed lines and escapes degrade locally instead of failing
//! the run.

pub mod escape;

mod error;
mod reassemble;
mod record;

pub use error::StreamError;
pub use reassemble::{
    reassemble, sanitize_relpath, ReassembleReport, Reassembler, RECON_SUFFIX,
};
pub use record::{parse_record, ParsedRecord, RecordWriter};
