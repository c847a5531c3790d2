//! Token and token-kind definitions.
//!
//! A [`Token`] is a position-stamped view into the source buffer: the lexeme
//! itself is never copied, it is recovered by slicing the source at
//! `off..off + len`. Tokens for one buffer are produced in increasing `off`
//! order, non-overlapping, and gapless: every byte of the source belongs to
//! exactly one token.

/// Classification of a lexed byte span.
///
/// The set is closed and mutually exclusive by construction of the scanner's
/// dispatch order. Discriminants index the per-kind count array in the
/// metrics aggregator, so they must stay dense and start at zero.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Run of spaces, tabs, vertical tabs, or form feeds (no newlines).
    Whitespace = 0,
    /// `\n`, `\r`, or `\r\n` consumed as one token.
    Newline,
    /// `//` to end-of-line, terminator excluded.
    LineComment,
    /// `/*` to `*/` inclusive; unterminated comments run to end-of-buffer.
    BlockComment,
    /// `#` at column 1 to end-of-line, backslash continuations included.
    Preprocessor,
    Identifier,
    /// Identifier whose exact bytes match the grammar's reserved-word set.
    Keyword,
    Number,
    /// `"..."` literal, escape-aware, possibly unterminated.
    String,
    /// `'...'` literal, escape-aware, possibly unterminated.
    Char,
    /// Operator or punctuation, including the single-byte fallback for
    /// bytes no other rule claims.
    Punctuator,
}

/// Number of token kinds. Sized for direct array indexing by discriminant.
pub const KIND_COUNT: usize = 11;

/// All kinds in discriminant order.
pub const ALL_KINDS: [TokenKind; KIND_COUNT] = [
    TokenKind::Whitespace,
    TokenKind::Newline,
    TokenKind::LineComment,
    TokenKind::BlockComment,
    TokenKind::Preprocessor,
    TokenKind::Identifier,
    TokenKind::Keyword,
    TokenKind::Number,
    TokenKind::String,
    TokenKind::Char,
    TokenKind::Punctuator,
];

impl TokenKind {
    /// Stable wire name used in the stream record `kind` field.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Whitespace => "WS",
            TokenKind::Newline => "NEWLINE",
            TokenKind::LineComment => "LINE_COMMENT",
            TokenKind::BlockComment => "BLOCK_COMMENT",
            TokenKind::Preprocessor => "PREPROC",
            TokenKind::Identifier => "IDENT",
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::Char => "CHAR",
            TokenKind::Punctuator => "PUNCT",
        }
    }

    /// Inverse of [`name()`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        ALL_KINDS.iter().copied().find(|k| k.name() == name)
    }

    /// Line and block comments.
    pub fn is_comment(self) -> bool {
        matches!(self, TokenKind::LineComment | TokenKind::BlockComment)
    }

    /// Whitespace runs and newlines.
    pub fn is_space(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Newline)
    }

    /// Identifiers and keywords, the kinds the vocabulary counts.
    pub fn is_word(self) -> bool {
        matches!(self, TokenKind::Identifier | TokenKind::Keyword)
    }
}

/// One lexed token: classification plus source position.
///
/// `off` is a 0-based byte offset into the source buffer. `line` and `col`
/// are 1-based; `col` resets to 1 after every [`TokenKind::Newline`] token
/// and otherwise advances by the token's byte length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub off: u32,
    pub line: u32,
    pub col: u32,
    pub len: u32,
}

/// Size assertion: Token is stamped on every byte span of every input, keep
/// it small. u8 discriminant + 4x u32 => 20 bytes with padding.
const _: () = assert!(std::mem::size_of::<Token>() <= 20);

impl Token {
    /// The exact raw byte span this token covers in `source`.
    pub fn lexeme_in<'s>(&self, source: &'s [u8]) -> &'s [u8] {
        &source[self.off as usize..(self.off + self.len) as usize]
    }

    /// End offset (exclusive) of this token's span.
    pub fn end(&self) -> u32 {
        self.off + self.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_is_one_byte() {
        assert_eq!(std::mem::size_of::<TokenKind>(), 1);
    }

    #[test]
    fn discriminants_are_dense_from_zero() {
        for (i, kind) in ALL_KINDS.iter().enumerate() {
            assert_eq!(*kind as usize, i);
        }
    }

    #[test]
    fn wire_names_round_trip() {
        for kind in ALL_KINDS {
            assert_eq!(TokenKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(TokenKind::from_name("META"), None);
        assert_eq!(TokenKind::from_name(""), None);
    }

    #[test]
    fn wire_names_match_stream_format() {
        assert_eq!(TokenKind::Whitespace.name(), "WS");
        assert_eq!(TokenKind::Preprocessor.name(), "PREPROC");
        assert_eq!(TokenKind::Identifier.name(), "IDENT");
        assert_eq!(TokenKind::Punctuator.name(), "PUNCT");
    }

    #[test]
    fn class_predicates() {
        assert!(TokenKind::LineComment.is_comment());
        assert!(TokenKind::BlockComment.is_comment());
        assert!(!TokenKind::Preprocessor.is_comment());
        assert!(TokenKind::Whitespace.is_space());
        assert!(TokenKind::Newline.is_space());
        assert!(!TokenKind::String.is_space());
        assert!(TokenKind::Identifier.is_word());
        assert!(TokenKind::Keyword.is_word());
        assert!(!TokenKind::Number.is_word());
    }

    #[test]
    fn lexeme_in_slices_exact_span() {
        let source = b"int x;";
        let tok = Token {
            kind: TokenKind::Identifier,
            off: 4,
            line: 1,
            col: 5,
            len: 1,
        };
        assert_eq!(tok.lexeme_in(source), b"x");
        assert_eq!(tok.end(), 5);
    }
}
