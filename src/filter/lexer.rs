use std::iter::Peekable;
use std::str::CharIndices;

use crate::media::TagName;

use super::error::LexError;
use super::token::{Span, Token, TokenKind};

/// Turns rule text into tokens.
///
/// Lexing never stops early: an unrecognized character is recorded and
/// skipped, and scanning carries on so every problem in the file can be
/// reported at once.
pub struct Lexer<'a> {
    src: &'a str,
    chars: Peekable<CharIndices<'a>>,
    line: usize,
    errors: Vec<LexError>,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            chars: src.char_indices().peekable(),
            line: 1,
            errors: Vec::new(),
        }
    }

    /// Scan the whole input, returning the tokens and any lexical errors.
    pub fn tokenize(mut self) -> (Vec<Token>, Vec<LexError>) {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
        (tokens, self.errors)
    }

    fn next_token(&mut self) -> Option<Token> {
        loop {
            let (start, c) = self.chars.next()?;
            match c {
                '\n' => self.line += 1,
                c if c.is_whitespace() => {}
                '(' => return Some(self.token(TokenKind::LParen, start, start + 1)),
                ')' => return Some(self.token(TokenKind::RParen, start, start + 1)),
                '"' => {
                    if let Some(token) = self.string(start) {
                        return Some(token);
                    }
                }
                c if c.is_alphabetic() => {
                    if let Some(token) = self.word(start, c) {
                        return Some(token);
                    }
                }
                other => self.error(format!("unexpected character `{other}`")),
            }
        }
    }

    fn token(&self, kind: TokenKind, start: usize, end: usize) -> Token {
        Token {
            kind,
            span: Span::new(start, end, self.line),
        }
    }

    fn error(&mut self, message: String) {
        self.errors.push(LexError {
            line: self.line,
            message,
        });
    }

    fn string(&mut self, start: usize) -> Option<Token> {
        let line = self.line;
        let mut value = String::new();

        while let Some((i, c)) = self.chars.next() {
            match c {
                '"' => {
                    return Some(Token {
                        kind: TokenKind::Str(value),
                        span: Span::new(start, i + 1, line),
                    });
                }
                '\\' => match self.chars.next() {
                    Some((_, escaped)) => {
                        if escaped == '\n' {
                            self.line += 1;
                        }
                        value.push(escaped);
                    }
                    None => break,
                },
                '\n' => {
                    self.line += 1;
                    value.push(c);
                }
                _ => value.push(c),
            }
        }

        self.errors.push(LexError {
            line,
            message: "unterminated string".to_string(),
        });
        None
    }

    fn word(&mut self, start: usize, first: char) -> Option<Token> {
        let mut end = start + first.len_utf8();
        while let Some(&(i, c)) = self.chars.peek() {
            if !c.is_alphanumeric() && c != '_' {
                break;
            }
            end = i + c.len_utf8();
            self.chars.next();
        }

        let word = &self.src[start..end];
        match keyword(word) {
            Some(kind) => Some(self.token(kind, start, end)),
            None => {
                self.error(format!("unknown word `{word}`"));
                None
            }
        }
    }
}

fn keyword(word: &str) -> Option<TokenKind> {
    let kind = match word.to_lowercase().as_str() {
        "exclude" => TokenKind::Exclude,
        "include" => TokenKind::Include,
        "is" => TokenKind::Is,
        "has" => TokenKind::Has,
        "between" => TokenKind::Between,
        "and" => TokenKind::And,
        other => TokenKind::Tag(TagName::parse(other)?),
    };
    Some(kind)
}

/// Convenience wrapper around [`Lexer::tokenize`].
pub fn tokenize(src: &str) -> (Vec<Token>, Vec<LexError>) {
    Lexer::new(src).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        let (tokens, errors) = tokenize(src);
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn recognizes_keywords_tags_and_strings() {
        assert_eq!(
            kinds(r#"exclude(artist is "Foo")"#),
            vec![
                TokenKind::Exclude,
                TokenKind::LParen,
                TokenKind::Tag(TagName::Artist),
                TokenKind::Is,
                TokenKind::Str("Foo".to_string()),
                TokenKind::RParen,
            ]
        );
    }

    #[test]
    fn keywords_are_case_insensitive_and_comments_is_a_synonym() {
        assert_eq!(
            kinds(r#"EXCLUDE Comments HAS "x""#),
            vec![
                TokenKind::Exclude,
                TokenKind::Tag(TagName::Comment),
                TokenKind::Has,
                TokenKind::Str("x".to_string()),
            ]
        );
    }

    #[test]
    fn backslash_escapes_the_next_character() {
        assert_eq!(
            kinds(r#""say \"hi\" \\ ok""#),
            vec![TokenKind::Str(r#"say "hi" \ ok"#.to_string())]
        );
    }

    #[test]
    fn tracks_lines_across_newlines() {
        let (tokens, _) = tokenize("exclude\n(\n\n  year");
        let lines: Vec<usize> = tokens.iter().map(|t| t.span.line).collect();
        assert_eq!(lines, vec![1, 2, 4]);
    }

    #[test]
    fn illegal_character_is_skipped_and_reported() {
        let (tokens, errors) = tokenize("exclude ( # )");
        assert_eq!(
            tokens.into_iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![TokenKind::Exclude, TokenKind::LParen, TokenKind::RParen]
        );
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line, 1);
    }

    #[test]
    fn every_bad_character_is_reported() {
        let (_, errors) = tokenize("exclude ( @\n% )");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[1].line, 2);
    }

    #[test]
    fn unknown_word_and_unterminated_string_are_errors() {
        let (_, errors) = tokenize("title is \"abc");
        assert_eq!(errors.len(), 2);
        assert!(errors[0].message.contains("title"));
        assert!(errors[1].message.contains("unterminated"));
    }
}
