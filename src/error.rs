//! Unified error type for the tokenizer.

use thiserror::Error;

/// All errors that can abort tokenization.
///
/// Registry append failures are deliberately NOT here: they are soft,
/// reported through the logging layer, and never abort a file.
#[derive(Error, Debug)]
pub enum TokenizeError {
    /// I/O error (file read/write)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input path does not exist
    #[error("Input path does not exist: {0}")]
    InputNotFound(String),

    /// Source file could not be read
    #[error("Cannot read source file '{path}': {source}")]
    SourceRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Vocabulary registry log could not be opened
    #[error("Cannot open vocabulary registry '{path}': {source}")]
    RegistryOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The C grammar failed to load into the parser
    #[error("Failed to load grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    /// The parser returned no tree at all
    #[error("Parser produced no syntax tree")]
    Parse,
}
