//! Token record writer and parser.
//!
//! One record per token, one line per record:
//!
//! ```text
//! {"file":"a.c","off":0,"line":1,"col":1,"kind":"KEYWORD","lexeme":"int"}
//! ```
//!
//! Concatenating `lexeme` values for a given `file`, in emission order,
//! reproduces that file's exact bytes. Both string fields go through the
//! escape codec; numeric fields are plain decimal.
//!
//! The parser extracts only `file` and `lexeme`: records are consumed
//! independently and reassembly needs nothing else. Lines missing either
//! field parse to `None` and are skipped by the caller.

use crate::escape::{escape_into, unescape};
use ctok_core::Token;
use std::io::{self, Write};

/// Streams token records to a writer, reusing one scratch buffer so a
/// record write is a single `write_all` per line.
pub struct RecordWriter<W: Write> {
    out: W,
    scratch: Vec<u8>,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            scratch: Vec::with_capacity(256),
        }
    }

    /// Serialize one token as a record line.
    pub fn write(&mut self, file: &str, token: &Token, lexeme: &[u8]) -> io::Result<()> {
        self.scratch.clear();
        self.scratch.extend_from_slice(b"{\"file\":\"");
        escape_into(file.as_bytes(), &mut self.scratch);
        self.scratch.extend_from_slice(b"\",");
        write!(
            self.scratch,
            "\"off\":{},\"line\":{},\"col\":{},\"kind\":\"{}\",\"lexeme\":\"",
            token.off,
            token.line,
            token.col,
            token.kind.name()
        )?;
        escape_into(lexeme, &mut self.scratch);
        self.scratch.extend_from_slice(b"\"}\n");
        self.out.write_all(&self.scratch)
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

/// The two fields reassembly needs, unescaped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedRecord {
    pub file: String,
    pub lexeme: Vec<u8>,
}

/// Offset of the closing unescaped quote in `s`, if any.
fn string_end(s: &[u8]) -> Option<usize> {
    let mut i = 0;
    while i < s.len() {
        match s[i] {
            b'\\' => i += 2,
            b'"' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// Parse one record line. Returns `None` for lines that do not carry both
/// a `file` and a `lexeme` field (malformed or foreign lines are skipped,
/// never fatal).
pub fn parse_record(line: &[u8]) -> Option<ParsedRecord> {
    const FILE_KEY: &[u8] = b"\"file\":\"";
    const LEXEME_KEY: &[u8] = b"\"lexeme\":\"";

    let file_start = memchr::memmem::find(line, FILE_KEY)? + FILE_KEY.len();
    let file_end = file_start + string_end(&line[file_start..])?;

    let lex_search = &line[file_end..];
    let lex_start = file_end + memchr::memmem::find(lex_search, LEXEME_KEY)? + LEXEME_KEY.len();
    let lex_end = lex_start + string_end(&line[lex_start..])?;

    let file_bytes = unescape(&line[file_start..file_end]);
    Some(ParsedRecord {
        file: String::from_utf8_lossy(&file_bytes).into_owned(),
        lexeme: unescape(&line[lex_start..lex_end]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctok_core::{LexGrammar, Scanner, SourceBuffer};
    use pretty_assertions::assert_eq;

    fn stream(file: &str, source: &[u8]) -> Vec<u8> {
        let buf = SourceBuffer::new(source);
        let grammar = LexGrammar::c11();
        let mut writer = RecordWriter::new(Vec::new());
        let mut scanner = Scanner::new(&buf, &grammar);
        while let Some(tok) = scanner.next_token() {
            writer.write(file, &tok, tok.lexeme_in(source)).unwrap();
        }
        writer.finish().unwrap()
    }

    fn parse_lines(stream: &[u8]) -> Vec<ParsedRecord> {
        stream
            .split(|&b| b == b'\n')
            .filter(|l| !l.is_empty())
            .filter_map(parse_record)
            .collect()
    }

    #[test]
    fn record_line_shape() {
        let out = stream("a.c", b"int");
        assert_eq!(
            out,
            b"{\"file\":\"a.c\",\"off\":0,\"line\":1,\"col\":1,\"kind\":\"KEYWORD\",\"lexeme\":\"int\"}\n".to_vec()
        );
    }

    #[test]
    fn one_record_per_token() {
        let out = stream("a.c", b"int x = 1;\n");
        assert_eq!(out.iter().filter(|&&b| b == b'\n').count(), 9);
    }

    #[test]
    fn parse_extracts_file_and_lexeme() {
        let rec = parse_record(
            b"{\"file\":\"dir/a.c\",\"off\":4,\"line\":2,\"col\":1,\"kind\":\"WS\",\"lexeme\":\" \\t\"}",
        )
        .unwrap();
        assert_eq!(rec.file, "dir/a.c");
        assert_eq!(rec.lexeme, b" \t".to_vec());
    }

    #[test]
    fn parse_handles_escaped_quotes_in_lexeme() {
        let rec = parse_record(
            b"{\"file\":\"a.c\",\"off\":0,\"line\":1,\"col\":1,\"kind\":\"STRING\",\"lexeme\":\"\\\"hi\\\"\"}",
        )
        .unwrap();
        assert_eq!(rec.lexeme, b"\"hi\"".to_vec());
    }

    #[test]
    fn file_names_with_quotes_round_trip() {
        let hostile = "we\"ird\\name.c";
        let out = stream(hostile, b"x");
        let recs = parse_lines(&out);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].file, hostile);
        assert_eq!(recs[0].lexeme, b"x".to_vec());
    }

    #[test]
    fn lines_without_fields_are_skipped() {
        assert_eq!(parse_record(b""), None);
        assert_eq!(parse_record(b"{}"), None);
        assert_eq!(parse_record(b"{\"file\":\"a.c\"}"), None);
        assert_eq!(parse_record(b"{\"lexeme\":\"x\"}"), None);
        assert_eq!(parse_record(b"not json at all"), None);
    }

    #[test]
    fn unterminated_field_is_skipped() {
        assert_eq!(parse_record(b"{\"file\":\"a.c"), None);
    }

    fn concat_lexemes(stream_bytes: &[u8]) -> Vec<u8> {
        parse_lines(stream_bytes)
            .into_iter()
            .flat_map(|r| r.lexeme)
            .collect()
    }

    // === Round-trip: deserialize(serialize(lex(B))) == B ===

    #[test]
    fn round_trip_simple_source() {
        let src = b"int main(void) {\n\treturn 0; /* ok */\n}\n";
        assert_eq!(concat_lexemes(&stream("m.c", src)), src.to_vec());
    }

    #[test]
    fn round_trip_empty_buffer() {
        assert_eq!(concat_lexemes(&stream("e.c", b"")), Vec::<u8>::new());
    }

    #[test]
    fn round_trip_single_byte() {
        for b in [0x00u8, b'\n', b'"', b'\\', 0x7F, 0xFF] {
            assert_eq!(concat_lexemes(&stream("s.c", &[b])), vec![b], "byte {b:#04x}");
        }
    }

    #[test]
    fn round_trip_unterminated_block_comment() {
        let src = b"/* oops";
        assert_eq!(concat_lexemes(&stream("u.c", src)), src.to_vec());
    }

    #[test]
    fn round_trip_embedded_nul_in_string_lexeme() {
        let src = b"\"a\0b\"\n";
        assert_eq!(concat_lexemes(&stream("n.c", src)), src.to_vec());
    }

    mod proptest_roundtrip {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn round_trip_arbitrary_bytes(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
                let out = stream("fuzz.c", &bytes);
                prop_assert_eq!(concat_lexemes(&out), bytes);
            }

            #[test]
            fn round_trip_c_like_bytes(
                bytes in proptest::collection::vec(
                    prop_oneof![
                        Just(b'a'), Just(b'0'), Just(b'"'), Just(b'\''), Just(b'\\'),
                        Just(b'/'), Just(b'*'), Just(b'#'), Just(b'\n'), Just(b'\r'),
                        Just(b' '), Just(b'\t'), Just(b'\0'), Just(0xFFu8),
                    ],
                    0..256,
                )
            ) {
                let out = stream("fuzz.c", &bytes);
                prop_assert_eq!(concat_lexemes(&out), bytes);
            }
        }
    }
}
