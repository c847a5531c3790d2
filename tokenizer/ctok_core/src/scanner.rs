//! Hand-written scanner producing position-stamped [`Token`]s.
//!
//! The scanner operates on a sentinel-terminated [`Cursor`] and classifies
//! every byte of the source into exactly one token, with zero heap
//! allocation. It never fails: malformed input (unterminated literals,
//! stray bytes) resolves to a token via truncation or the single-byte
//! fallback, so the token spans always partition the whole buffer.
//!
//! # Design
//!
//! Dispatch is maximal-munch with fixed precedence, one focused method per
//! rule. Each method advances the cursor; the caller derives `len` from the
//! start position. The sentinel byte (`0x00`) falls through to the
//! single-byte fallback when it appears inside the source (interior null)
//! and terminates scanning when it is the sentinel itself.

use crate::cursor::Cursor;
use crate::grammar::LexGrammar;
use crate::source_buffer::SourceBuffer;
use crate::token::{Token, TokenKind};

/// Space, tab, vertical tab, form feed. Newlines are separate tokens.
#[inline]
fn is_blank(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | 0x0B | 0x0C)
}

/// Identifier continuation byte: ASCII letter, digit, or underscore.
#[inline]
fn is_word_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Decimal digit or `'` separator.
#[inline]
fn is_digit_or_sep(b: u8) -> bool {
    b.is_ascii_digit() || b == b'\''
}

/// Hex digit or `'` separator.
#[inline]
fn is_hex_digit_or_sep(b: u8) -> bool {
    b.is_ascii_hexdigit() || b == b'\''
}

/// Pure, allocation-free scanner over one source buffer.
///
/// Yields tokens in source order via [`next_token()`](Self::next_token) or
/// the [`Iterator`] impl. The scanner holds no state beyond the cursor and
/// the line/column counters, so re-scanning the same buffer always yields
/// the identical sequence.
pub struct Scanner<'a> {
    cursor: Cursor<'a>,
    grammar: &'a LexGrammar,
    line: u32,
    col: u32,
}

impl<'a> Scanner<'a> {
    /// Create a scanner positioned at the start of `buf`.
    pub fn new(buf: &'a SourceBuffer, grammar: &'a LexGrammar) -> Self {
        Self {
            cursor: buf.cursor(),
            grammar,
            line: 1,
            col: 1,
        }
    }

    /// Produce the next token, or `None` once the source is exhausted.
    ///
    /// Every call at a non-EOF position advances the cursor by at least one
    /// byte, so tokenization always terminates.
    pub fn next_token(&mut self) -> Option<Token> {
        if self.cursor.is_eof() {
            return None;
        }
        let start = self.cursor.pos();
        let start_line = self.line;
        let start_col = self.col;

        let kind = match self.cursor.current() {
            b'\r' | b'\n' => self.newline(),
            b if is_blank(b) => self.whitespace(),
            b'#' if self.col == 1 => self.preprocessor(),
            b'/' if self.cursor.peek() == b'/' => self.line_comment(),
            b'/' if self.cursor.peek() == b'*' => self.block_comment(),
            b'"' => self.quoted(b'"', TokenKind::String),
            b'\'' => self.quoted(b'\'', TokenKind::Char),
            b'A'..=b'Z' | b'a'..=b'z' | b'_' => self.word(start),
            b'0'..=b'9' => self.number(),
            b'.' if self.cursor.peek().is_ascii_digit() => self.number(),
            _ => self.punctuator(),
        };

        let len = self.cursor.pos() - start;
        debug_assert!(len > 0, "scanner must advance at every position");

        if kind == TokenKind::Newline {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += len;
        }

        Some(Token {
            kind,
            off: start,
            line: start_line,
            col: start_col,
            len,
        })
    }

    /// `\n`, or `\r` optionally followed by `\n`, as one token.
    fn newline(&mut self) -> TokenKind {
        if self.cursor.current() == b'\r' {
            self.cursor.advance();
            if self.cursor.current() == b'\n' {
                self.cursor.advance();
            }
        } else {
            self.cursor.advance();
        }
        TokenKind::Newline
    }

    /// Maximal run of horizontal whitespace.
    fn whitespace(&mut self) -> TokenKind {
        self.cursor.eat_while(is_blank);
        TokenKind::Whitespace
    }

    /// `#` at column 1 through end-of-line, honoring `\` line continuations.
    ///
    /// A backslash immediately before the newline extends the logical line:
    /// the escaped newline (`\n`, `\r`, or `\r\n`) is consumed into the
    /// token and scanning continues on the next physical line.
    fn preprocessor(&mut self) -> TokenKind {
        self.cursor.advance(); // '#'
        loop {
            let rest = self.cursor.rest();
            let Some(i) = memchr::memchr2(b'\n', b'\r', rest) else {
                // No newline before EOF: the directive runs to end-of-buffer.
                self.cursor.advance_n(rest.len() as u32);
                break;
            };
            let nl_pos = self.cursor.pos() + i as u32;
            // nl_pos >= start + 1, so nl_pos - 1 stays inside the token.
            if self.cursor.get(nl_pos - 1) != b'\\' {
                self.cursor.advance_n(i as u32); // stop before the newline
                break;
            }
            // Continuation: consume the escaped newline and keep scanning.
            self.cursor.advance_n(i as u32);
            if self.cursor.current() == b'\r' {
                self.cursor.advance();
                if self.cursor.current() == b'\n' {
                    self.cursor.advance();
                }
            } else {
                self.cursor.advance();
            }
        }
        TokenKind::Preprocessor
    }

    /// `//` to end-of-line, terminator excluded.
    fn line_comment(&mut self) -> TokenKind {
        self.cursor.advance_n(2);
        self.cursor.eat_until_line_end();
        TokenKind::LineComment
    }

    /// `/*` to `*/` inclusive; unterminated comments take the whole
    /// remainder of the buffer (still one token, no failure).
    fn block_comment(&mut self) -> TokenKind {
        self.cursor.advance_n(2);
        let rest = self.cursor.rest();
        match memchr::memmem::find(rest, b"*/") {
            Some(i) => self.cursor.advance_n(i as u32 + 2),
            None => self.cursor.advance_n(rest.len() as u32),
        }
        TokenKind::BlockComment
    }

    /// String or char literal: `\` escapes the following byte, so an
    /// escaped delimiter does not terminate. Newlines are ordinary content.
    /// Unterminated literals take the remainder of the buffer.
    fn quoted(&mut self, delim: u8, kind: TokenKind) -> TokenKind {
        self.cursor.advance(); // opening delimiter
        loop {
            let rest = self.cursor.rest();
            let Some(i) = memchr::memchr2(delim, b'\\', rest) else {
                self.cursor.advance_n(rest.len() as u32); // unterminated
                break;
            };
            let found = rest[i];
            self.cursor.advance_n(i as u32 + 1);
            if found == delim {
                break;
            }
            // Backslash: consume the escaped byte, if the buffer has one.
            if !self.cursor.rest().is_empty() {
                self.cursor.advance();
            }
        }
        kind
    }

    /// Identifier or keyword: `[A-Za-z_][A-Za-z0-9_]*`, exact-byte keyword
    /// lookup against the grammar.
    fn word(&mut self, start: u32) -> TokenKind {
        self.cursor.eat_while(is_word_continue);
        if self.grammar.is_keyword(self.cursor.slice_from(start)) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        }
    }

    /// Numeric literal, lexically greedy, no semantic validation.
    ///
    /// `0x`/`0X` switches to hex scanning with an optional hex fraction and
    /// `p`/`P` exponent; decimal gets an optional fraction and `e`/`E`
    /// exponent. `'` separators are allowed in digit runs. A trailing run
    /// of letters/underscore is consumed as a suffix.
    fn number(&mut self) -> TokenKind {
        let first = self.cursor.current();
        if first == b'0' && matches!(self.cursor.peek(), b'x' | b'X') {
            self.cursor.advance_n(2);
            self.cursor.eat_while(is_hex_digit_or_sep);
            if self.cursor.current() == b'.' {
                self.cursor.advance();
                self.cursor.eat_while(is_hex_digit_or_sep);
            }
            if matches!(self.cursor.current(), b'p' | b'P') {
                self.exponent();
            }
        } else {
            self.cursor.eat_while(is_digit_or_sep);
            if self.cursor.current() == b'.' {
                self.cursor.advance();
                self.cursor.eat_while(is_digit_or_sep);
            }
            if matches!(self.cursor.current(), b'e' | b'E') {
                self.exponent();
            }
        }
        self.cursor
            .eat_while(|b| b.is_ascii_alphabetic() || b == b'_');
        TokenKind::Number
    }

    /// Exponent marker (already matched), optional sign, decimal digits.
    fn exponent(&mut self) {
        self.cursor.advance();
        if matches!(self.cursor.current(), b'+' | b'-') {
            self.cursor.advance();
        }
        self.cursor.eat_while(|b| b.is_ascii_digit());
    }

    /// Longest punctuator from the grammar tables, or a single byte when
    /// nothing matches (the totality fallback).
    fn punctuator(&mut self) -> TokenKind {
        let n = self.grammar.punct_len(self.cursor.rest()).unwrap_or(1);
        self.cursor.advance_n(n);
        TokenKind::Punctuator
    }
}

impl Iterator for Scanner<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}
