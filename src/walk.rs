//! Traversal driver: walks parse-tree leaves in source order and dispatches
//! token emission.

use std::path::Path;

use tracing::warn;
use tree_sitter::{Parser, Tree};

use crate::arena::Arena;
use crate::entropy::BigramModel;
use crate::error::TokenizeError;
use crate::registry::Registry;
use crate::segment::segment_identifier;
use crate::vocab;
use crate::{Token, TokenKind};

/// A leaf longer than this that is not a locked word is fragmented as a blob.
const MACRO_BLOB_LEN: usize = 32;

/// The full tokenization pipeline: parser, online bigram model, and
/// persistent registry, owned together so their lifetimes are explicit.
///
/// One `Tokenizer` serves any number of files in sequence; the model and the
/// registry accumulate across them by design. Dropping it closes the
/// registry log.
pub struct Tokenizer {
    parser: Parser,
    model: BigramModel,
    registry: Registry,
}

impl Tokenizer {
    /// Build a tokenizer around an already-opened registry. The model is
    /// pre-trained on the locked vocabulary.
    pub fn new(registry: Registry) -> Result<Self, TokenizeError> {
        let mut parser = Parser::new();
        parser.set_language(&tree_sitter_c::LANGUAGE.into())?;
        let mut model = BigramModel::new();
        vocab::pretrain(&mut model);
        Ok(Self {
            parser,
            model,
            registry,
        })
    }

    /// Convenience: open (or create) the registry log at `path` first.
    pub fn open(registry_path: &Path) -> Result<Self, TokenizeError> {
        Self::new(Registry::open(registry_path)?)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn model_mut(&mut self) -> &mut BigramModel {
        &mut self.model
    }

    /// Tokenize one source buffer into atomic tokens.
    pub fn tokenize(&mut self, source: &[u8]) -> Result<Vec<Token>, TokenizeError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or(TokenizeError::Parse)?;
        let mut run = FileRun {
            source,
            arena: Arena::with_capacity(source.len()),
            model: &mut self.model,
            registry: &mut self.registry,
            eaten: None,
        };
        run.walk(&tree);
        if run.arena.dropped() > 0 {
            warn!(dropped = run.arena.dropped(), "token arena reached capacity");
        }
        Ok(run.arena.into_tokens())
    }
}

/// Nodes whose whole span is treated as one opaque blob leaf: preprocessor
/// directives, string literals, and comments. The grammar parses their
/// interiors, but tokenization wants them as free-form bytes.
fn is_opaque(kind: &str) -> bool {
    kind.starts_with("preproc") || kind.contains("string") || kind == "comment"
}

/// Blob fragments break on whitespace and ASCII punctuation.
fn is_fragment_break(b: u8) -> bool {
    b.is_ascii_whitespace() || b.is_ascii_punctuation()
}

/// Classify the byte immediately before `offset`: (pre_space, pre_break).
fn space_class(source: &[u8], offset: usize) -> (bool, bool) {
    if offset == 0 {
        return (false, false);
    }
    match source[offset - 1] {
        b'\n' => (false, true),
        b if b.is_ascii_whitespace() => (true, false),
        _ => (false, false),
    }
}

/// Per-file traversal state.
struct FileRun<'a> {
    source: &'a [u8],
    arena: Arena,
    model: &'a mut BigramModel,
    registry: &'a mut Registry,
    /// Offset of the byte absorbed by the most recently pushed token; the
    /// leaf starting exactly there is dropped.
    eaten: Option<usize>,
}

impl FileRun<'_> {
    /// Visit every leaf (and opaque subtree) in source order, tracking depth.
    fn walk(&mut self, tree: &Tree) {
        let mut cursor = tree.walk();
        let mut depth: usize = 0;
        loop {
            let node = cursor.node();
            let opaque = is_opaque(node.kind());
            if opaque || node.child_count() == 0 {
                self.leaf(node.kind(), node.start_byte(), node.end_byte(), depth, opaque);
            } else if cursor.goto_first_child() {
                depth += 1;
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return;
                }
                depth -= 1;
            }
        }
    }

    fn leaf(&mut self, kind: &str, start: usize, end: usize, depth: usize, opaque: bool) {
        let end = end.min(self.source.len());
        if end <= start {
            return;
        }
        if self.eaten == Some(start) {
            self.eaten = None;
            return;
        }
        let depth = (depth % 8) as u8;
        let bytes = &self.source[start..end];

        if !opaque && kind.contains("identifier") {
            let (pre_space, pre_break) = space_class(self.source, start);
            for token in
                segment_identifier(self.model, bytes, start as u32, depth, pre_space, pre_break)
            {
                self.eaten = self.arena.push(token, self.source, self.registry);
            }
        } else if opaque || (bytes.len() > MACRO_BLOB_LEN && !vocab::is_locked(bytes)) {
            self.blob(start, end, depth);
        } else {
            let (pre_space, pre_break) = space_class(self.source, start);
            let kind = if bytes[0].is_ascii_digit() {
                TokenKind::Number
            } else {
                TokenKind::Word
            };
            let token = Token::spanned(bytes, start as u32, kind, depth, pre_space, pre_break);
            self.eaten = self.arena.push(token, self.source, self.registry);
        }
    }

    /// Fragment an opaque or over-long span on whitespace/punctuation runs.
    fn blob(&mut self, start: usize, end: usize, depth: u8) {
        let mut i = start;
        while i < end {
            if is_fragment_break(self.source[i]) {
                i += 1;
                continue;
            }
            let from = i;
            while i < end && !is_fragment_break(self.source[i]) {
                i += 1;
            }
            let bytes = &self.source[from..i];
            let (pre_space, pre_break) = space_class(self.source, from);
            let token = Token::spanned(
                bytes,
                from as u32,
                TokenKind::Fragment,
                depth,
                pre_space,
                pre_break,
            );
            self.eaten = self.arena.push(token, self.source, self.registry);
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
#[path = "walk_tests.rs"]
mod tests;
