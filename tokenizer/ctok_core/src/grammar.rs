//! Lexical grammar configuration: reserved words and punctuator tables.
//!
//! The scanner takes these as an immutable value injected at construction
//! instead of hard-coding them, so related lexical grammars (C dialects,
//! C-like DSLs) reuse the same engine. [`LexGrammar::c11()`] is the stock
//! configuration.
//!
//! Punctuator matching is longest-prefix: the 3-byte table is tried first,
//! then the 2-byte table, then single-byte membership. Ties always go to
//! the longest available match (maximal munch).

use rustc_hash::FxHashSet;

/// C11 reserved words, matched case-sensitively against exact bytes.
const C11_KEYWORDS: &[&str] = &[
    "auto", "break", "case", "char", "const", "continue", "default", "do",
    "double", "else", "enum", "extern", "float", "for", "goto", "if",
    "inline", "int", "long", "register", "restrict", "return", "short",
    "signed", "sizeof", "static", "struct", "switch", "typedef", "union",
    "unsigned", "void", "volatile", "while", "_Alignas", "_Alignof",
    "_Atomic", "_Bool", "_Complex", "_Generic", "_Imaginary", "_Noreturn",
    "_Static_assert", "_Thread_local",
];

/// Three-byte operators.
const C_PUNCT3: &[[u8; 3]] = &[*b"<<=", *b">>=", *b"..."];

/// Two-byte operators. Includes a few C++ digraphs (`::`, `.*`, `##`) the
/// token stream should keep whole when they appear in headers.
const C_PUNCT2: &[[u8; 2]] = &[
    *b"->", *b"++", *b"--", *b"<<", *b">>", *b"<=", *b">=", *b"==", *b"!=",
    *b"&&", *b"||", *b"+=", *b"-=", *b"*=", *b"/=", *b"%=", *b"&=", *b"|=",
    *b"^=", *b"::", *b".*", *b"##",
];

/// Single punctuation characters.
const C_PUNCT1: &[u8] = b"{}[]()#;,:?~!%^&*-+=|<>./";

/// Immutable lexical grammar: reserved-word set plus punctuator tables.
#[derive(Clone, Debug)]
pub struct LexGrammar {
    keywords: FxHashSet<Box<[u8]>>,
    punct3: Vec<[u8; 3]>,
    punct2: Vec<[u8; 2]>,
    punct1: [bool; 256],
}

impl LexGrammar {
    /// Build a grammar from explicit tables.
    pub fn new(
        keywords: &[&str],
        punct3: &[[u8; 3]],
        punct2: &[[u8; 2]],
        punct1: &[u8],
    ) -> Self {
        let mut singles = [false; 256];
        for &b in punct1 {
            singles[b as usize] = true;
        }
        Self {
            keywords: keywords
                .iter()
                .map(|k| k.as_bytes().to_vec().into_boxed_slice())
                .collect(),
            punct3: punct3.to_vec(),
            punct2: punct2.to_vec(),
            punct1: singles,
        }
    }

    /// The stock C11 grammar.
    pub fn c11() -> Self {
        Self::new(C11_KEYWORDS, C_PUNCT3, C_PUNCT2, C_PUNCT1)
    }

    /// Exact-byte, case-sensitive reserved-word membership.
    #[inline]
    pub fn is_keyword(&self, lexeme: &[u8]) -> bool {
        self.keywords.contains(lexeme)
    }

    /// Longest punctuator match at the head of `rest`, in bytes.
    ///
    /// Returns `None` when the leading byte starts no table entry; the
    /// scanner then falls back to a single-byte token to preserve totality.
    pub fn punct_len(&self, rest: &[u8]) -> Option<u32> {
        if rest.len() >= 3 && self.punct3.iter().any(|p| p == &rest[..3]) {
            return Some(3);
        }
        if rest.len() >= 2 && self.punct2.iter().any(|p| p == &rest[..2]) {
            return Some(2);
        }
        if !rest.is_empty() && self.punct1[rest[0] as usize] {
            return Some(1);
        }
        None
    }
}

impl Default for LexGrammar {
    fn default() -> Self {
        Self::c11()
    }
}
