//! Identifier segmenter: structural and entropy-driven splitting.

use crate::entropy::BigramModel;
use crate::vocab;
use crate::{Casing, Token, TokenKind};

/// Surprise above this many bits marks a candidate split point.
const SURPRISE_THRESHOLD: f32 = 5.0;

/// An entropy split needs at least this much on the left...
const SPLIT_LEFT_MIN: usize = 4;

/// ...and this much remaining on the right, unless the left is locked.
const SPLIT_RIGHT_MIN: usize = 3;

/// Split one identifier span into word tokens.
///
/// Locked words are emitted whole with canonical lower casing. Everything
/// else is trained into the model, then cut at underscores (always),
/// camel-case transitions (always), and surprising bigrams (guarded by the
/// fragment-length minimums). The first emitted token inherits the
/// preceding-whitespace flags; underscores set the joiner bit on the token
/// they follow and are never part of any span.
pub fn segment_identifier(
    model: &mut BigramModel,
    bytes: &[u8],
    offset: u32,
    depth: u8,
    pre_space: bool,
    pre_break: bool,
) -> Vec<Token> {
    if vocab::is_locked(bytes) {
        let mut token = Token::spanned(bytes, offset, TokenKind::Word, depth, pre_space, pre_break);
        token.casing = Casing::Lower;
        model.train(bytes);
        return vec![token];
    }
    model.train(bytes);

    let len = bytes.len();
    let mut out: Vec<Token> = Vec::new();
    let mut start = 0usize;

    for i in 0..len {
        if bytes[i] == b'_' {
            if i > start {
                emit(&mut out, bytes, offset, start, i, depth, pre_space, pre_break);
            }
            if let Some(last) = out.last_mut() {
                last.has_joiner = true;
            }
            start = i + 1;
            continue;
        }
        if i + 1 < len {
            let (a, b) = (bytes[i], bytes[i + 1]);
            let camel = a.is_ascii_lowercase() && b.is_ascii_uppercase();
            let split = camel
                || (model.surprise(a, b) > SURPRISE_THRESHOLD && {
                    let left = &bytes[start..=i];
                    let right_len = len - i - 1;
                    vocab::is_locked(left)
                        || (left.len() >= SPLIT_LEFT_MIN && right_len >= SPLIT_RIGHT_MIN)
                });
            if split {
                emit(&mut out, bytes, offset, start, i + 1, depth, pre_space, pre_break);
                start = i + 1;
            }
        }
    }
    if start < len {
        emit(&mut out, bytes, offset, start, len, depth, pre_space, pre_break);
    }
    out
}

/// Append the word token for `bytes[from..to]`.
fn emit(
    out: &mut Vec<Token>,
    bytes: &[u8],
    offset: u32,
    from: usize,
    to: usize,
    depth: u8,
    pre_space: bool,
    pre_break: bool,
) {
    let first = out.is_empty();
    out.push(Token::spanned(
        &bytes[from..to],
        offset + from as u32,
        TokenKind::Word,
        depth,
        first && pre_space,
        first && pre_break,
    ));
}
