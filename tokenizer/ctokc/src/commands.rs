//! Subcommand drivers.
//!
//! Each driver reads whole input buffers, runs the scanner, and feeds the
//! per-token side effects the mode asks for: record emission (`stream`),
//! metrics (`stats`), vocabulary (`vocab`). Files are independent, so
//! `stats` and `vocab` fan out across a rayon pool with one private
//! `Metrics`/`Vocabulary` per worker; the driving thread is the only
//! writer at the merge step. `stream` stays sequential: record order is
//! part of the output contract.

use crate::error::CliError;
use crate::input::{read_source, resolve_inputs, STDIN_PATH};
use ctok_core::{LexGrammar, Scanner, SourceBuffer};
use ctok_corpus::{CorpusTotals, Metrics, Vocabulary};
use ctok_stream::{reassemble, RecordWriter};
use rayon::prelude::*;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Open the `--out` destination; `-` or absent means stdout.
fn open_output(path: Option<&str>) -> Result<Box<dyn Write>, CliError> {
    match path {
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
        Some(p) if p == STDIN_PATH => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
        Some(p) => {
            let file = File::create(p).map_err(|source| CliError::OpenOutput {
                path: PathBuf::from(p),
                source,
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
    }
}

fn scan_metrics(source: &[u8], grammar: &LexGrammar) -> Metrics {
    let buf = SourceBuffer::new(source);
    let mut metrics = Metrics::default();
    for tok in Scanner::new(&buf, grammar) {
        metrics.record(tok.kind, tok.len);
    }
    metrics
}

fn scan_vocab(source: &[u8], grammar: &LexGrammar) -> (Metrics, Vocabulary) {
    let buf = SourceBuffer::new(source);
    let mut metrics = Metrics::default();
    let mut vocab = Vocabulary::default();
    for tok in Scanner::new(&buf, grammar) {
        metrics.record(tok.kind, tok.len);
        if tok.kind.is_word() {
            vocab.record(tok.lexeme_in(source));
        }
    }
    (metrics, vocab)
}

/// `ctok stream`: every token of every input as one JSONL record, in
/// input order, files back-to-back.
pub fn run_stream(
    files: &[String],
    stdin_name: Option<&str>,
    out: Option<&str>,
) -> Result<(), CliError> {
    let grammar = LexGrammar::c11();
    let mut writer = RecordWriter::new(open_output(out)?);
    let mut totals = CorpusTotals::default();

    for (name, path) in resolve_inputs(files, stdin_name) {
        let source = read_source(&path)?;
        let buf = SourceBuffer::new(&source);
        let mut metrics = Metrics::default();
        let mut scanner = Scanner::new(&buf, &grammar);
        while let Some(tok) = scanner.next_token() {
            writer
                .write(&name, &tok, tok.lexeme_in(&source))
                .map_err(CliError::WriteOutput)?;
            metrics.record(tok.kind, tok.len);
        }
        debug!(
            file = %name,
            tokens = metrics.tokens_total,
            bytes = metrics.bytes_total,
            "streamed"
        );
        totals.add_file(&metrics);
    }

    writer.finish().map_err(CliError::WriteOutput)?;
    info!(
        files = totals.files,
        tokens = totals.metrics.tokens_total,
        "stream complete"
    );
    Ok(())
}

/// `ctok stats`: fold per-file metrics into one summary object.
pub fn run_stats(files: &[String], out: Option<&str>) -> Result<(), CliError> {
    let grammar = LexGrammar::c11();
    let per_file: Vec<Metrics> = resolve_inputs(files, None)
        .par_iter()
        .map(|(name, path)| {
            let source = read_source(path)?;
            let metrics = scan_metrics(&source, &grammar);
            debug!(file = %name, tokens = metrics.tokens_total, "scanned");
            Ok(metrics)
        })
        .collect::<Result<_, CliError>>()?;

    let mut totals = CorpusTotals::default();
    for metrics in &per_file {
        totals.add_file(metrics);
    }

    let mut out = open_output(out)?;
    serde_json::to_writer(&mut out, &totals.summary())?;
    out.write_all(b"\n").map_err(CliError::WriteOutput)?;
    out.flush().map_err(CliError::WriteOutput)?;
    info!(files = totals.files, "stats complete");
    Ok(())
}

/// `ctok vocab`: merged identifier/keyword frequencies as TSV.
pub fn run_vocab(files: &[String], out: Option<&str>) -> Result<(), CliError> {
    let grammar = LexGrammar::c11();
    let shards: Vec<(Metrics, Vocabulary)> = resolve_inputs(files, None)
        .par_iter()
        .map(|(name, path)| {
            let source = read_source(path)?;
            let shard = scan_vocab(&source, &grammar);
            debug!(file = %name, tokens = shard.0.tokens_total, "scanned");
            Ok(shard)
        })
        .collect::<Result<_, CliError>>()?;

    let mut vocab = Vocabulary::default();
    let mut files_seen = 0u64;
    for (_, shard) in shards {
        vocab.merge(shard);
        files_seen += 1;
    }

    let mut out = open_output(out)?;
    vocab.write_tsv(&mut out).map_err(CliError::WriteOutput)?;
    out.flush().map_err(CliError::WriteOutput)?;
    info!(files = files_seen, entries = vocab.len(), "vocab complete");
    Ok(())
}

/// `ctok reassemble`: replay a record stream into `.recon` files.
pub fn run_reassemble(in_path: &str, outdir: Option<&str>) -> Result<(), CliError> {
    let report = if in_path == STDIN_PATH {
        reassemble(&mut io::stdin().lock(), outdir.map(Path::new))?
    } else {
        let file = File::open(in_path).map_err(|source| CliError::ReadInput {
            path: PathBuf::from(in_path),
            source,
        })?;
        reassemble(&mut BufReader::new(file), outdir.map(Path::new))?
    };
    info!(
        files = report.files.len(),
        records = report.records,
        "reassembled"
    );
    Ok(())
}
