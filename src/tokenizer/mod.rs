use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::scope::Scope;

mod bolt;

pub use bolt::{BoltTokenizer, scopes};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Byte span within the source (start inclusive, end exclusive, 0-based)
    pub span: Range<usize>,
    /// Lexical classification of the span
    pub scope: Scope,
}

impl Token {
    pub fn new(span: Range<usize>, scope: impl Into<Scope>) -> Self {
        Self {
            span,
            scope: scope.into(),
        }
    }
}

/// Something that splits source text into scope-tagged spans.
///
/// The returned tokens must cover the whole source, in order, with no gaps and no
/// overlaps. Each call starts over from the beginning of `source`, so callers simply
/// tokenize again whenever the text changes.
pub trait Tokenizer: Send + Sync {
    fn tokenize<'s>(&self, source: &'s str) -> Box<dyn Iterator<Item = Token> + 's>;
}

/// Emits the whole source as a single unscoped token
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTokenizer;

impl Tokenizer for PlainTokenizer {
    fn tokenize<'s>(&self, source: &'s str) -> Box<dyn Iterator<Item = Token> + 's> {
        let token = (!source.is_empty()).then(|| Token::new(0..source.len(), Scope::default()));
        Box::new(token.into_iter())
    }
}
