//! Lexical classification for the Bolt language.
//!
//! Only lexical categories are produced: keywords, identifiers, literals, comments,
//! operators and punctuation. Bytes the language does not know are `invalid.illegal`.

use crate::scope::Scope;
use crate::tokenizer::{Token, Tokenizer};

/// Scope names emitted by [`BoltTokenizer`]
pub mod scopes {
    pub const WHITESPACE: &str = "";
    pub const KEYWORD: &str = "keyword";
    pub const CONSTANT: &str = "keyword.constant";
    pub const IDENTIFIER: &str = "variable.other";
    pub const NUMBER: &str = "number";
    pub const STRING: &str = "string";
    pub const UNTERMINATED_STRING: &str = "invalid.broken";
    pub const COMMENT: &str = "string.comment";
    pub const OPERATOR: &str = "operator";
    pub const CURLY: &str = "brackethighlighter.curly";
    pub const ROUND: &str = "brackethighlighter.round";
    pub const DELIMITER: &str = "delimiter";
    pub const ILLEGAL: &str = "invalid.illegal";
}

const KEYWORDS: [&str; 5] = ["let", "fn", "if", "else", "return"];
const CONSTANTS: [&str; 3] = ["true", "false", "null"];

#[derive(Debug, Default, Clone, Copy)]
pub struct BoltTokenizer;

impl Tokenizer for BoltTokenizer {
    fn tokenize<'s>(&self, source: &'s str) -> Box<dyn Iterator<Item = Token> + 's> {
        Box::new(BoltTokens { source, pos: 0 })
    }
}

/// Lazy token stream over one source string
#[derive(Debug, Clone)]
struct BoltTokens<'s> {
    source: &'s str,
    pos: usize,
}

/// Byte length of the longest prefix made of chars satisfying `pred`
fn take_while(s: &str, pred: impl Fn(char) -> bool) -> usize {
    s.find(|c| !pred(c)).unwrap_or(s.len())
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn classify_word(word: &str) -> &'static str {
    if KEYWORDS.contains(&word) {
        scopes::KEYWORD
    } else if CONSTANTS.contains(&word) {
        scopes::CONSTANT
    } else {
        scopes::IDENTIFIER
    }
}

impl Iterator for BoltTokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.source[self.pos..];
        let c = rest.chars().next()?;

        let (len, scope) = match c {
            c if c.is_whitespace() => (take_while(rest, char::is_whitespace), scopes::WHITESPACE),
            // Comments run up to, not including, the newline
            '/' if rest.starts_with("//") => (rest.find('\n').unwrap_or(rest.len()), scopes::COMMENT),
            '"' => match rest[1..].find('"') {
                Some(end) => (end + 2, scopes::STRING),
                None => (rest.len(), scopes::UNTERMINATED_STRING),
            },
            c if is_word_char(c) => {
                let len = take_while(rest, is_word_char);
                (len, classify_word(&rest[..len]))
            }
            c if c.is_ascii_digit() => (
                take_while(rest, |c| c.is_ascii_digit() || c == '.'),
                scopes::NUMBER,
            ),
            '=' | '!' | '<' | '>' => {
                let len = if rest[1..].starts_with('=') { 2 } else { 1 };
                (len, scopes::OPERATOR)
            }
            '+' | '-' | '*' | '/' => (1, scopes::OPERATOR),
            '{' | '}' => (1, scopes::CURLY),
            '(' | ')' => (1, scopes::ROUND),
            ',' | ';' => (1, scopes::DELIMITER),
            c => (c.len_utf8(), scopes::ILLEGAL),
        };

        let start = self.pos;
        self.pos += len;
        Some(Token::new(start..self.pos, Scope::new(scope)))
    }
}
