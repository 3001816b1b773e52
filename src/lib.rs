//! # srctok — Syntax-Aware Source Code Tokenizer
//!
//! Produces fixed-width atomic tokens from C source, splitting identifiers
//! along structural boundaries (underscore, camel-case) and statistically
//! surprising character transitions learned online by a bigram model.
//! Every distinct token id ever observed is accumulated in a persistent
//! vocabulary registry that survives across runs.
//!
//! ## Library usage
//!
//! This crate is primarily a CLI tool, but the core types and the full
//! pipeline are exposed as a library for benchmarking and integration
//! testing:
//!
//! ```no_run
//! use srctok::{Registry, Tokenizer};
//!
//! let mut tokenizer = Tokenizer::new(Registry::ephemeral()).unwrap();
//! let tokens = tokenizer.tokenize(b"int my_var;").unwrap();
//! assert_eq!(tokens.len(), 3); // "int", "my", "var"
//! ```

use serde::{Deserialize, Serialize};

pub mod arena;
pub mod cli;
pub mod entropy;
pub mod error;
pub mod registry;
pub mod segment;
pub mod vocab;
pub mod walk;

pub use arena::Arena;
pub use entropy::BigramModel;
pub use error::TokenizeError;
pub use registry::Registry;
pub use walk::Tokenizer;

// ─── Core public types ───────────────────────────────────────────────

/// What kind of span a token covers.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// An identifier fragment, keyword, operator, or other plain span.
    Word,
    /// A fragment carved out of a string / comment / preprocessor blob.
    Fragment,
    /// A span whose first byte is an ASCII digit.
    Number,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Word => "word",
            Self::Fragment => "fragment",
            Self::Number => "number",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Letter-case shape of a token's bytes.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Casing {
    /// No uppercase ASCII letters.
    Lower,
    /// Exactly one uppercase letter, and it is the first byte.
    Capitalized,
    /// Every byte is an uppercase ASCII letter.
    Upper,
    /// Anything else.
    Mixed,
}

impl Casing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lower => "lower",
            Self::Capitalized => "capitalized",
            Self::Upper => "upper",
            Self::Mixed => "mixed",
        }
    }
}

impl std::fmt::Display for Casing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A trailing punctuation byte folded into the preceding token's metadata.
///
/// At most one sigil is absorbed per token (the first absorbable byte after
/// the span wins), which is why this is an `Option<Sigil>` on [`Token`]
/// rather than five independent bits.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sigil {
    Semi,
    Comma,
    OpenParen,
    Star,
    CloseParen,
}

impl Sigil {
    /// The punctuation byte this sigil stands for.
    pub fn as_byte(&self) -> u8 {
        match self {
            Self::Semi => b';',
            Self::Comma => b',',
            Self::OpenParen => b'(',
            Self::Star => b'*',
            Self::CloseParen => b')',
        }
    }

    /// Classify an absorbable punctuation byte.
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            b';' => Some(Self::Semi),
            b',' => Some(Self::Comma),
            b'(' => Some(Self::OpenParen),
            b'*' => Some(Self::Star),
            b')' => Some(Self::CloseParen),
            _ => None,
        }
    }
}

impl std::fmt::Display for Sigil {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_byte() as char)
    }
}

/// One atomic token: a span of the source plus its classification metadata.
///
/// Tokens reference the source by offset and never own text; the source
/// buffer must be kept alive to slice [`Token::text`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// FNV-1a hash of the case-folded span bytes.
    pub root_id: u32,
    /// Byte offset of the span in the source buffer.
    pub offset: u32,
    /// Byte length of the span.
    pub length: u16,
    pub kind: TokenKind,
    pub casing: Casing,
    /// At least one space (not newline) immediately precedes the span.
    pub pre_space: bool,
    /// A newline immediately precedes the span.
    pub pre_break: bool,
    /// The span was followed by an underscore joining it to the next fragment.
    pub has_joiner: bool,
    /// Syntactic nesting depth modulo 8 at which the leaf was found.
    pub depth: u8,
    /// Punctuation byte absorbed from after the span, if any.
    pub absorbed: Option<Sigil>,
}

impl Token {
    /// Build a token over `bytes` at `offset`, hashing and classifying casing.
    pub fn spanned(
        bytes: &[u8],
        offset: u32,
        kind: TokenKind,
        depth: u8,
        pre_space: bool,
        pre_break: bool,
    ) -> Self {
        Token {
            root_id: fold_hash(bytes),
            offset,
            length: bytes.len().min(u16::MAX as usize) as u16,
            kind,
            casing: casing_of(bytes),
            pre_space,
            pre_break,
            has_joiner: false,
            depth,
            absorbed: None,
        }
    }

    /// The span's bytes in `source`.
    pub fn text<'a>(&self, source: &'a [u8]) -> &'a [u8] {
        let start = self.offset as usize;
        &source[start..start + self.length as usize]
    }
}

// ─── Hash and casing ─────────────────────────────────────────────────

/// Lowercase ASCII `A`–`Z`; every other byte passes through.
#[inline]
pub fn case_fold(b: u8) -> u8 {
    if b.is_ascii_uppercase() { b + 32 } else { b }
}

/// Stable 32-bit FNV-1a hash of the case-folded bytes.
///
/// Two spellings of the same word hash identically:
///
/// ```
/// use srctok::fold_hash;
///
/// assert_eq!(fold_hash(b"Tree"), fold_hash(b"tree"));
/// assert_eq!(fold_hash(b""), 0x811c9dc5);
/// ```
pub fn fold_hash(bytes: &[u8]) -> u32 {
    let mut h: u32 = 0x811c_9dc5;
    for &b in bytes {
        h = (h ^ case_fold(b) as u32).wrapping_mul(0x0100_0193);
    }
    h
}

/// Classify the case shape of a span.
pub fn casing_of(bytes: &[u8]) -> Casing {
    let uppers = bytes.iter().filter(|b| b.is_ascii_uppercase()).count();
    if uppers == 0 {
        Casing::Lower
    } else if uppers == bytes.len() {
        Casing::Upper
    } else if uppers == 1 && bytes[0].is_ascii_uppercase() {
        Casing::Capitalized
    } else {
        Casing::Mixed
    }
}


// ─── Property-based tests (proptest) ─────────────────────────────────

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Hashing ignores ASCII case entirely.
        #[test]
        fn hash_matches_lowercased(input in "[ -~]{0,64}") {
            prop_assert_eq!(
                fold_hash(input.as_bytes()),
                fold_hash(input.to_ascii_lowercase().as_bytes())
            );
        }

        /// The hash is a pure function of its input.
        #[test]
        fn hash_is_deterministic(input in proptest::collection::vec(any::<u8>(), 0..128)) {
            prop_assert_eq!(fold_hash(&input), fold_hash(&input));
        }

        /// Exactly one casing class applies to any non-empty ASCII span,
        /// and it agrees with the uppercase-count rules.
        #[test]
        fn casing_agrees_with_count_rules(input in "[a-zA-Z0-9]{1,32}") {
            let bytes = input.as_bytes();
            let uppers = bytes.iter().filter(|b| b.is_ascii_uppercase()).count();
            let expected = if uppers == 0 {
                Casing::Lower
            } else if uppers == bytes.len() {
                Casing::Upper
            } else if uppers == 1 && bytes[0].is_ascii_uppercase() {
                Casing::Capitalized
            } else {
                Casing::Mixed
            };
            prop_assert_eq!(casing_of(bytes), expected);
        }

        /// Case-folding is idempotent byte-wise.
        #[test]
        fn case_fold_idempotent(b in any::<u8>()) {
            prop_assert_eq!(case_fold(case_fold(b)), case_fold(b));
        }
    }
}
