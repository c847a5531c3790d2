//! Per-file token metrics and the run-wide aggregate.
//!
//! One [`Metrics`] instance is filled per file and folded into
//! [`CorpusTotals`] by the driving process. Instances are plain values:
//! workers in a parallel run each own a private one and the driver merges
//! them, which is the only synchronization point the design needs.

use ctok_core::{TokenKind, ALL_KINDS, KIND_COUNT};
use serde::Serialize;
use std::collections::BTreeMap;

/// Token counts and byte totals for one file (or one merge of files).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Metrics {
    counts: [u64; KIND_COUNT],
    pub tokens_total: u64,
    /// Sum of token lexeme lengths. Equals the file's byte length by the
    /// total-coverage invariant.
    pub bytes_total: u64,
    /// Bytes inside line and block comments.
    pub bytes_comments: u64,
    /// Bytes inside whitespace runs and newline tokens.
    pub bytes_whitespace: u64,
    /// Number of newline tokens.
    pub newlines: u64,
}

impl Metrics {
    /// Account for one emitted token.
    pub fn record(&mut self, kind: TokenKind, len: u32) {
        let len = u64::from(len);
        self.counts[kind as usize] += 1;
        self.tokens_total += 1;
        self.bytes_total += len;
        if kind.is_comment() {
            self.bytes_comments += len;
        }
        if kind.is_space() {
            self.bytes_whitespace += len;
        }
        if kind == TokenKind::Newline {
            self.newlines += 1;
        }
    }

    /// Occurrence count for one kind.
    pub fn count(&self, kind: TokenKind) -> u64 {
        self.counts[kind as usize]
    }

    /// Fold `other` into `self`. Commutative and associative, so shard
    /// merge order does not matter.
    pub fn merge(&mut self, other: &Metrics) {
        for i in 0..KIND_COUNT {
            self.counts[i] += other.counts[i];
        }
        self.tokens_total += other.tokens_total;
        self.bytes_total += other.bytes_total;
        self.bytes_comments += other.bytes_comments;
        self.bytes_whitespace += other.bytes_whitespace;
        self.newlines += other.newlines;
    }
}

/// Run-wide aggregate: merged metrics plus the number of files folded in.
#[derive(Clone, Debug, Default)]
pub struct CorpusTotals {
    pub files: u64,
    pub metrics: Metrics,
}

impl CorpusTotals {
    /// Fold one file's metrics into the running total.
    pub fn add_file(&mut self, metrics: &Metrics) {
        self.files += 1;
        self.metrics.merge(metrics);
    }

    /// The serializable stats summary emitted at the end of a run.
    pub fn summary(&self) -> Summary {
        Summary {
            files: self.files,
            tokens: self.metrics.tokens_total,
            bytes: self.metrics.bytes_total,
            lines: self.metrics.newlines,
            bytes_comments: self.metrics.bytes_comments,
            bytes_whitespace: self.metrics.bytes_whitespace,
            kinds: ALL_KINDS
                .iter()
                .map(|&k| (k.name(), self.metrics.count(k)))
                .collect(),
        }
    }
}

/// JSON view of [`CorpusTotals`]. Field order matches the stream format
/// docs; `kinds` key order is unspecified.
#[derive(Debug, Serialize)]
pub struct Summary {
    pub files: u64,
    pub tokens: u64,
    pub bytes: u64,
    pub lines: u64,
    pub bytes_comments: u64,
    pub bytes_whitespace: u64,
    pub kinds: BTreeMap<&'static str, u64>,
}
