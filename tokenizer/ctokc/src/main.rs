//! ctok - lossless C token stream toolkit.

use ctokc::commands::{run_reassemble, run_stats, run_stream, run_vocab};
use ctokc::CliError;

fn main() {
    ctokc::trace::init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(2);
    }

    match args[1].as_str() {
        "stream" => {
            let mut out: Option<String> = None;
            let mut stdin_name: Option<String> = None;
            let mut i = 2;
            while i < args.len() {
                match args[i].as_str() {
                    "--out" if i + 1 < args.len() => {
                        out = Some(args[i + 1].clone());
                        i += 2;
                    }
                    "--stdin" if i + 1 < args.len() => {
                        stdin_name = Some(args[i + 1].clone());
                        i += 2;
                    }
                    s if s.starts_with('-') && s != "-" => unknown_option(s),
                    _ => break,
                }
            }
            check(run_stream(&args[i..], stdin_name.as_deref(), out.as_deref()));
        }
        "stats" => {
            let (out, i) = parse_out_flag(&args);
            check(run_stats(&args[i..], out.as_deref()));
        }
        "vocab" => {
            let (out, i) = parse_out_flag(&args);
            check(run_vocab(&args[i..], out.as_deref()));
        }
        "reassemble" => {
            let mut in_path: Option<String> = None;
            let mut outdir: Option<String> = None;
            let mut i = 2;
            while i < args.len() {
                match args[i].as_str() {
                    "--in" if i + 1 < args.len() => {
                        in_path = Some(args[i + 1].clone());
                        i += 2;
                    }
                    "--outdir" if i + 1 < args.len() => {
                        outdir = Some(args[i + 1].clone());
                        i += 2;
                    }
                    s if s.starts_with('-') && s != "-" => unknown_option(s),
                    s => {
                        eprintln!("error: unexpected argument '{s}' (stream input is --in)");
                        print_usage();
                        std::process::exit(2);
                    }
                }
            }
            let Some(in_path) = in_path else {
                eprintln!("error: reassemble requires --in STREAM.jsonl");
                print_usage();
                std::process::exit(2);
            };
            check(run_reassemble(&in_path, outdir.as_deref()));
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("ctok {}", env!("CARGO_PKG_VERSION"));
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(2);
        }
    }
}

/// Shared `--out` handling for stats/vocab. Returns the flag value and the
/// index where the file list starts.
fn parse_out_flag(args: &[String]) -> (Option<String>, usize) {
    let mut out: Option<String> = None;
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--out" if i + 1 < args.len() => {
                out = Some(args[i + 1].clone());
                i += 2;
            }
            s if s.starts_with('-') && s != "-" => unknown_option(s),
            _ => break,
        }
    }
    (out, i)
}

fn unknown_option(opt: &str) -> ! {
    eprintln!("Unknown option: {opt}");
    eprintln!();
    print_usage();
    std::process::exit(2);
}

fn check(result: Result<(), CliError>) {
    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn print_usage() {
    println!("ctok - lossless C token stream toolkit");
    println!();
    println!("Usage: ctok <command> [options]");
    println!();
    println!("Commands:");
    println!("  stream [--out OUT.jsonl] [--stdin NAME] [files...]");
    println!("                       Tokenize files to a per-token JSONL stream (lossless)");
    println!("  stats  [--out OUT.json] [files...]");
    println!("                       Emit JSON with counts per token kind and byte totals");
    println!("  vocab  [--out OUT.tsv] [files...]");
    println!("                       Emit TSV of identifier/keyword frequencies");
    println!("  reassemble --in STREAM.jsonl [--outdir DIR]");
    println!("                       Rebuild original files from a stream");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("With no files, stream/stats/vocab read stdin (binary); NAME labels the");
    println!("stdin records (default: stdin). `-` also names stdin, for inputs and --in.");
    println!("`--out -` or no --out writes to stdout. Reconstructed files are written");
    println!("as <name>.recon under DIR (default: base names in the working directory).");
    println!();
    println!("Examples:");
    println!("  ctok stream src/*.c --out corpus.jsonl");
    println!("  ctok stats src/*.c");
    println!("  ctok vocab --out vocab.tsv src/*.c");
    println!("  ctok reassemble --in corpus.jsonl --outdir recon/");
    println!("  cat prog.c | ctok stream --stdin prog.c");
}
