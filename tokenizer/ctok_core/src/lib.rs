//! Lossless byte-level tokenizer core.
//!
//! Classifies every byte of arbitrary (possibly malformed, possibly binary)
//! input into exactly one token with zero information loss: token spans
//! partition the source buffer with no gaps or overlaps, so concatenating
//! lexemes reproduces the input byte-for-byte.
//!
//! # Architecture
//!
//! ```text
//! &[u8] ──► SourceBuffer (sentinel-terminated)
//!                │
//!                ▼
//!            Cursor ──► Scanner(+ LexGrammar) ──► Token stream
//! ```
//!
//! The scanner never fails: unterminated literals truncate at end-of-buffer
//! and unclassifiable bytes become single-byte punctuator tokens. Reserved
//! words and punctuator tables are injected via [`LexGrammar`] rather than
//! hard-coded, so related lexical grammars can reuse the engine.
//!
//! This crate is standalone: no ctok_* dependencies.

mod cursor;
mod grammar;
mod scanner;
mod source_buffer;
mod token;

pub use cursor::Cursor;
pub use grammar::LexGrammar;
pub use scanner::Scanner;
pub use source_buffer::SourceBuffer;
pub use token::{Token, TokenKind, ALL_KINDS, KIND_COUNT};
