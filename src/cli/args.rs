//! CLI argument definitions.

use clap::Parser;

/// Syntax-aware source code tokenizer with entropy-based identifier
/// splitting and a persistent vocabulary
#[derive(Parser, Debug)]
#[command(name = "srctok", version, about, after_help = "\
Tokenizes C source into atomic tokens: identifiers are split on underscores,\n\
camel-case boundaries, and statistically surprising character transitions.\n\
Every distinct token id is appended to the vocabulary registry across runs.")]
pub struct Cli {
    /// Source file to tokenize, or a directory to tokenize recursively
    pub path: String,

    /// Vocabulary registry file (created if absent)
    #[arg(short, long, default_value = "nset_vocab.bin")]
    pub registry: String,

    /// File extensions to tokenize when PATH is a directory (comma-separated)
    #[arg(short, long, default_value = "c,h")]
    pub ext: String,

    /// Write the token stream to stdout (json is one object per line)
    #[arg(long, value_parser = ["text", "json"])]
    pub dump: Option<String>,

    /// Include hidden files when PATH is a directory
    #[arg(long)]
    pub hidden: bool,

    /// Also tokenize .gitignore'd files when PATH is a directory
    #[arg(long)]
    pub no_ignore: bool,

    /// Diagnostic verbosity (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_is_required() {
        assert!(Cli::try_parse_from(["srctok"]).is_err());
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["srctok", "main.c"]).unwrap();
        assert_eq!(cli.path, "main.c");
        assert_eq!(cli.registry, "nset_vocab.bin");
        assert_eq!(cli.ext, "c,h");
        assert_eq!(cli.dump, None);
        assert!(!cli.hidden);
    }

    #[test]
    fn test_dump_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["srctok", "main.c", "--dump", "xml"]).is_err());
        let cli = Cli::try_parse_from(["srctok", "main.c", "--dump", "json"]).unwrap();
        assert_eq!(cli.dump.as_deref(), Some("json"));
    }
}
