//! Tokens produced by the rule lexer.

use crate::media::TagName;

/// A single lexeme together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // Keywords
    Exclude,
    Include,
    Is,
    Has,
    Between,
    And,

    Tag(TagName),
    /// Contents of a double-quoted string, escapes already resolved.
    Str(String),

    LParen,
    RParen,
}

impl TokenKind {
    /// Short human description used in syntax errors.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Exclude => "`exclude`".to_string(),
            TokenKind::Include => "`include`".to_string(),
            TokenKind::Is => "`is`".to_string(),
            TokenKind::Has => "`has`".to_string(),
            TokenKind::Between => "`between`".to_string(),
            TokenKind::And => "`and`".to_string(),
            TokenKind::Tag(name) => format!("tag `{}`", name.as_str()),
            TokenKind::Str(s) => format!("string \"{s}\""),
            TokenKind::LParen => "`(`".to_string(),
            TokenKind::RParen => "`)`".to_string(),
        }
    }
}

/// Byte range in the source plus the 1-based line it starts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize) -> Self {
        Self { start, end, line }
    }
}
