//! CLI layer: argument parsing, logging setup, and the tokenize command.

pub mod args;

pub use args::Cli;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser;
use ignore::WalkBuilder;
use tracing::debug;

use crate::error::TokenizeError;
use crate::walk::Tokenizer;
use crate::Token;

// ─── Main entry point ───────────────────────────────────────────────

pub fn run() {
    let cli = Cli::parse();

    let log_level = match cli.log_level.as_str() {
        "error" => tracing::Level::ERROR,
        "info" => tracing::Level::INFO,
        "debug" => tracing::Level::DEBUG,
        "trace" => tracing::Level::TRACE,
        _ => tracing::Level::WARN,
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = cmd_tokenize(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

// ─── Tokenize command ───────────────────────────────────────────────

fn cmd_tokenize(args: Cli) -> Result<(), TokenizeError> {
    let start = Instant::now();

    let input = Path::new(&args.path);
    if !input.exists() {
        return Err(TokenizeError::InputNotFound(args.path.clone()));
    }

    let registry_path = PathBuf::from(&args.registry);
    if registry_path.exists() {
        println!(">> Loading existing vocabulary into RAM...");
    }
    let mut tokenizer = Tokenizer::open(&registry_path)?;
    let known_before = tokenizer.registry().len();

    let single_file = input.is_file();
    let files: Vec<PathBuf> = if single_file {
        vec![input.to_path_buf()]
    } else {
        collect_files(input, &args)
    };

    let mut total_tokens = 0usize;
    let mut total_bytes = 0usize;
    let mut read_errors = 0usize;

    for file in &files {
        let source = match fs::read(file) {
            Ok(s) => s,
            Err(e) if !single_file => {
                eprintln!("[tokenize] Skipping {}: {}", file.display(), e);
                read_errors += 1;
                continue;
            }
            Err(e) => {
                return Err(TokenizeError::SourceRead {
                    path: file.display().to_string(),
                    source: e,
                });
            }
        };
        let tokens = tokenizer.tokenize(&source)?;
        debug!(file = %file.display(), tokens = tokens.len(), "tokenized");

        match args.dump.as_deref() {
            Some("text") => dump_text(&tokens, &source),
            Some("json") => dump_json(&tokens, &source),
            _ => {}
        }

        total_tokens += tokens.len();
        total_bytes += source.len();
    }

    let new_words = tokenizer.registry().len() - known_before;
    eprintln!(
        "[tokenize] {} tokens from {} file(s) ({} bytes), {} new vocabulary entries in {:.3}s",
        total_tokens,
        files.len() - read_errors,
        total_bytes,
        new_words,
        start.elapsed().as_secs_f64()
    );
    println!(">> Tokenization Complete.");
    Ok(())
}

/// Walk a directory for files matching the extension filter, gitignore-aware.
/// Sequential by design: all files share one model and one registry.
fn collect_files(root: &Path, args: &Cli) -> Vec<PathBuf> {
    let extensions: Vec<String> = args
        .ext
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();

    let mut builder = WalkBuilder::new(root);
    builder.hidden(!args.hidden);
    builder.git_ignore(!args.no_ignore);
    builder.git_global(!args.no_ignore);
    builder.git_exclude(!args.no_ignore);

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in builder.build().flatten() {
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let ext_match = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| extensions.iter().any(|x| x.eq_ignore_ascii_case(e)));
        if ext_match {
            files.push(entry.into_path());
        }
    }
    // Deterministic order keeps the registry's first-observation order stable.
    files.sort();
    files
}

// ─── Dump formats ───────────────────────────────────────────────────

fn flags_of(t: &Token) -> String {
    let mut flags = String::new();
    if t.pre_space {
        flags.push('s');
    }
    if t.pre_break {
        flags.push('b');
    }
    if t.has_joiner {
        flags.push('j');
    }
    if let Some(sigil) = t.absorbed {
        flags.push(sigil.as_byte() as char);
    }
    flags
}

fn dump_text(tokens: &[Token], source: &[u8]) {
    for t in tokens {
        println!(
            "{:>8} {:>5}  {:<8} {:<11} d{} {:<4} {}",
            t.offset,
            t.length,
            t.kind.as_str(),
            t.casing.as_str(),
            t.depth,
            flags_of(t),
            String::from_utf8_lossy(t.text(source))
        );
    }
}

fn dump_json(tokens: &[Token], source: &[u8]) {
    for t in tokens {
        let record = serde_json::json!({
            "root_id": t.root_id,
            "offset": t.offset,
            "length": t.length,
            "kind": t.kind.as_str(),
            "casing": t.casing.as_str(),
            "pre_space": t.pre_space,
            "pre_break": t.pre_break,
            "has_joiner": t.has_joiner,
            "depth": t.depth,
            "absorbed": t.absorbed.map(|s| s.to_string()),
            "text": String::from_utf8_lossy(t.text(source)),
        });
        println!("{}", record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Casing, Sigil, TokenKind};

    fn sample_token() -> Token {
        Token {
            root_id: 1,
            offset: 4,
            length: 2,
            kind: TokenKind::Word,
            casing: Casing::Lower,
            pre_space: true,
            pre_break: false,
            has_joiner: true,
            depth: 2,
            absorbed: Some(Sigil::Semi),
        }
    }

    #[test]
    fn test_flags_string() {
        assert_eq!(flags_of(&sample_token()), "sj;");
        let mut bare = sample_token();
        bare.pre_space = false;
        bare.has_joiner = false;
        bare.absorbed = None;
        assert_eq!(flags_of(&bare), "");
    }

    #[test]
    fn test_collect_files_filters_by_extension() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("a.c"), "int x;").unwrap();
        std::fs::write(tmp.path().join("b.h"), "int y;").unwrap();
        std::fs::write(tmp.path().join("c.txt"), "nope").unwrap();

        let cli = Cli::try_parse_from(["srctok", tmp.path().to_str().unwrap()]).unwrap();
        let files = collect_files(tmp.path(), &cli);
        let names: Vec<String> = files
            .iter()
            .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.c", "b.h"]);
    }

    #[test]
    fn test_collect_files_is_sorted() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("z.c"), "").unwrap();
        std::fs::write(tmp.path().join("a.c"), "").unwrap();
        std::fs::write(tmp.path().join("m.c"), "").unwrap();

        let cli = Cli::try_parse_from(["srctok", tmp.path().to_str().unwrap()]).unwrap();
        let files = collect_files(tmp.path(), &cli);
        let mut sorted = files.clone();
        sorted.sort();
        assert_eq!(files, sorted);
    }
}
