//! Bounded append-only token buffer with the trailing-symbol absorption rule.

use crate::registry::Registry;
use crate::{Sigil, Token};

/// Ordered token storage for one file's tokenization.
///
/// Capacity equals the source byte length, which pushes cannot exceed by
/// construction; anything beyond it is dropped and counted.
pub struct Arena {
    tokens: Vec<Token>,
    capacity: usize,
    dropped: usize,
}

impl Arena {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tokens: Vec::new(),
            capacity,
            dropped: 0,
        }
    }

    /// Push one token: absorb the first meaningful punctuation byte after
    /// its span into the metadata, record the id with the registry, append.
    ///
    /// Returns the absorbed byte's offset (if any) so the traversal can drop
    /// exactly that leaf when it reaches it.
    pub fn push(&mut self, mut token: Token, source: &[u8], registry: &mut Registry) -> Option<usize> {
        if self.tokens.len() >= self.capacity {
            self.dropped += 1;
            return None;
        }
        let end = token.offset as usize + token.length as usize;
        let absorbed = next_sigil(source, end);
        token.absorbed = absorbed.map(|(sigil, _)| sigil);
        registry.register(token.root_id, token.text(source));
        self.tokens.push(token);
        absorbed.map(|(_, at)| at)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens silently dropped after the arena filled.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

/// Skip whitespace from `at`; classify the next byte if it is absorbable.
fn next_sigil(source: &[u8], mut at: usize) -> Option<(Sigil, usize)> {
    while at < source.len() && source[at].is_ascii_whitespace() {
        at += 1;
    }
    if at >= source.len() {
        return None;
    }
    Sigil::from_byte(source[at]).map(|sigil| (sigil, at))
}
