//! Identifier/keyword vocabulary: a content-addressed counting map.
//!
//! Keys are the exact lexeme bytes of Identifier and Keyword tokens,
//! compared byte-for-byte (case-sensitive). Entries are created on first
//! sighting and only ever incremented during a run. Enumeration order is
//! unspecified; sorting is a presentation concern downstream.

use rustc_hash::FxHashMap;
use std::io::{self, Write};

/// Counting map over exact lexeme bytes.
///
/// One instance is owned per run (or per worker shard in a parallel run;
/// shards are then [`merge`](Self::merge)d by the driver).
#[derive(Clone, Debug, Default)]
pub struct Vocabulary {
    entries: FxHashMap<Box<[u8]>, u64>,
}

impl Vocabulary {
    /// Get-or-create the entry for `lexeme` and increment its count.
    ///
    /// Allocates only on first sighting of a given byte string.
    pub fn record(&mut self, lexeme: &[u8]) {
        match self.entries.get_mut(lexeme) {
            Some(count) => *count += 1,
            None => {
                self.entries.insert(lexeme.into(), 1);
            }
        }
    }

    /// Current count for `lexeme`, zero if never seen.
    pub fn count(&self, lexeme: &[u8]) -> u64 {
        self.entries.get(lexeme).copied().unwrap_or(0)
    }

    /// Number of distinct entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fold another shard into this one, summing counts per entry.
    pub fn merge(&mut self, other: Vocabulary) {
        for (lexeme, count) in other.entries {
            *self.entries.entry(lexeme).or_insert(0) += count;
        }
    }

    /// Entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], u64)> {
        self.entries.iter().map(|(k, &v)| (k.as_ref(), v))
    }

    /// Write the `<lexeme>\t<count>` TSV dump, one entry per line,
    /// unspecified order.
    ///
    /// Identifier bytes are ASCII by construction of the scanner, so the
    /// output is valid UTF-8, but the writer does not rely on that.
    pub fn write_tsv<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for (lexeme, count) in &self.entries {
            out.write_all(lexeme)?;
            writeln!(out, "\t{count}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn first_sighting_creates_then_increments() {
        let mut v = Vocabulary::default();
        assert_eq!(v.count(b"int"), 0);
        v.record(b"int");
        assert_eq!(v.count(b"int"), 1);
        v.record(b"int");
        v.record(b"int");
        assert_eq!(v.count(b"int"), 3);
        assert_eq!(v.len(), 1);
    }

    #[test]
    fn keys_compare_exact_bytes() {
        let mut v = Vocabulary::default();
        v.record(b"Foo");
        v.record(b"foo");
        assert_eq!(v.len(), 2);
        assert_eq!(v.count(b"Foo"), 1);
        assert_eq!(v.count(b"foo"), 1);
    }

    #[test]
    fn merge_sums_counts() {
        let mut a = Vocabulary::default();
        a.record(b"x");
        a.record(b"y");
        let mut b = Vocabulary::default();
        b.record(b"y");
        b.record(b"z");
        a.merge(b);
        assert_eq!(a.count(b"x"), 1);
        assert_eq!(a.count(b"y"), 2);
        assert_eq!(a.count(b"z"), 1);
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn merging_a_clone_doubles_exactly() {
        let mut v = Vocabulary::default();
        for _ in 0..3 {
            v.record(b"int");
        }
        v.record(b"x");
        let shard = v.clone();
        v.merge(shard);
        assert_eq!(v.count(b"int"), 6);
        assert_eq!(v.count(b"x"), 2);
        assert_eq!(v.len(), 2);
    }

    #[test]
    fn tsv_lines_carry_counts() {
        let mut v = Vocabulary::default();
        v.record(b"main");
        v.record(b"main");
        v.record(b"argc");
        let mut out = Vec::new();
        v.write_tsv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines: Vec<&str> = text.lines().collect();
        lines.sort_unstable();
        assert_eq!(lines, vec!["argc\t1", "main\t2"]);
    }
}
