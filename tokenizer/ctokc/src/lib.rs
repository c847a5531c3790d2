//! ctok CLI library.
//!
//! The binary (`main.rs`) only parses arguments; everything it dispatches
//! to lives here so the drivers are testable:
//!
//! ```text
//! files/stdin ──► input::read_source ──► Scanner ──┬─► RecordWriter   (stream)
//!                                                  ├─► Metrics        (stats)
//!                                                  └─► Vocabulary     (vocab)
//! stream.jsonl ──► ctok_stream::reassemble ──► <file>.recon           (reassemble)
//! ```

pub mod commands;
pub mod input;
pub mod trace;

mod error;

pub use error::CliError;
