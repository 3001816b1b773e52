//! Locked vocabulary: reserved words that bypass segmentation.

use crate::case_fold;
use crate::entropy::BigramModel;

/// Words longer than this are never locked.
const MAX_LOCKED_LEN: usize = 64;

/// Passes over the locked words when seeding a fresh model.
const PRETRAIN_PASSES: usize = 20;

/// Reserved identifiers: C keywords, common libc names, fixed-width integer
/// stems, and parsing-domain nouns. Sorted, lowercase, underscore-free
/// (membership is a byte-wise binary search on the case-folded input).
pub const LOCKED_WORDS: &[&str] = &[
    "alias", "arena", "auto", "bool", "break", "buffer", "calloc", "case", "char",
    "child", "const", "continue", "count", "cursor", "data", "default",
    "depth", "do", "double", "else", "entropy", "enum", "exit", "extern",
    "false", "fclose", "field", "file", "float", "fopen", "for", "fprintf",
    "fread", "free", "fwrite", "getchar", "goto", "hash", "if", "index",
    "inline", "int", "int16", "int32", "int64", "int8", "intmax", "intptr",
    "leaf", "length", "long", "main", "malloc", "memcmp", "memcpy",
    "memmove", "memset", "model", "node", "null", "offset", "parent",
    "parser", "printf", "ptrdiff", "putchar", "puts", "realloc", "register",
    "restrict", "return", "root", "scanf", "short", "signed", "size",
    "sizeof", "snprintf", "source", "sprintf", "ssize", "state", "static",
    "stderr", "stdin", "stdout", "strcat", "strchr", "strcmp", "strcpy",
    "string", "strlen", "strncmp", "strncpy", "strstr", "struct", "switch",
    "symbol", "table", "text", "token", "tree", "true", "type", "typedef",
    "uint16", "uint32", "uint64", "uint8", "uintmax", "uintptr", "union",
    "unsigned", "value", "variable", "vocab", "void", "volatile", "wchar",
    "while", "word",
];

/// Case-insensitive membership test against [`LOCKED_WORDS`].
///
/// The input is case-folded into a fixed stack buffer; spans of 64 bytes or
/// more are rejected outright.
pub fn is_locked(word: &[u8]) -> bool {
    if word.is_empty() || word.len() >= MAX_LOCKED_LEN {
        return false;
    }
    let mut buf = [0u8; MAX_LOCKED_LEN];
    for (dst, &b) in buf.iter_mut().zip(word) {
        *dst = case_fold(b);
    }
    let folded = &buf[..word.len()];
    LOCKED_WORDS
        .binary_search_by(|w| w.as_bytes().cmp(folded))
        .is_ok()
}

/// Seed a fresh model with the locked-vocabulary concatenation so ordinary
/// transitions are already unsurprising when the first real identifier
/// arrives. The words are joined into one string and trained 20 times, so
/// word-boundary pairs count as normal alongside in-word pairs.
pub fn pretrain(model: &mut BigramModel) {
    let concat = LOCKED_WORDS.concat();
    for _ in 0..PRETRAIN_PASSES {
        model.train(concat.as_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locked_words_sorted_and_unique() {
        for pair in LOCKED_WORDS.windows(2) {
            assert!(
                pair[0].as_bytes() < pair[1].as_bytes(),
                "'{}' must sort before '{}'",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_locked_words_are_lowercase_without_underscores() {
        for word in LOCKED_WORDS {
            assert!(
                word.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()),
                "'{}' is not plain lowercase",
                word
            );
        }
    }

    #[test]
    fn test_keywords_are_locked() {
        assert!(is_locked(b"int"));
        assert!(is_locked(b"while"));
        assert!(is_locked(b"sizeof"));
        assert!(is_locked(b"tree"));
        assert!(is_locked(b"cursor"));
    }

    #[test]
    fn test_membership_is_case_insensitive() {
        assert!(is_locked(b"INT"));
        assert!(is_locked(b"Int"));
        assert!(is_locked(b"SiZeOf"));
    }

    #[test]
    fn test_ordinary_identifiers_are_not_locked() {
        assert!(!is_locked(b"myvariable"));
        assert!(!is_locked(b"xyz"));
        assert!(!is_locked(b"contextswitch"));
        assert!(!is_locked(b""));
    }

    #[test]
    fn test_overlong_words_rejected() {
        let long = vec![b'a'; 64];
        assert!(!is_locked(&long));
        let just_under = vec![b'a'; 63];
        assert!(!is_locked(&just_under));
    }

    #[test]
    fn test_pretrain_seeds_common_transitions() {
        let mut model = BigramModel::new();
        pretrain(&mut model);
        // "in" occurs in int, inline, index, continue, ...
        assert!(model.total(b'i') >= 5);
        assert!(model.surprise(b'i', b'n') < 5.0);
        assert!(model.surprise(b'r', b'e') < 5.0);
    }

    #[test]
    fn test_pretrain_runs_twenty_passes() {
        let mut model = BigramModel::new();
        pretrain(&mut model);
        // "do" and "double" each contribute one d→o pair per pass.
        assert!(model.count(b'd', b'o') >= 40);
    }

    #[test]
    fn test_pretrain_covers_word_boundaries() {
        let mut model = BigramModel::new();
        pretrain(&mut model);
        // s→a occurs in no single word; it is the "alias"/"arena" seam of
        // the concatenation, once per pass.
        assert_eq!(model.count(b's', b'a'), 20);
    }
}
