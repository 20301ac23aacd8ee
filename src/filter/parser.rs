use crate::media::TagName;

use super::ast::{ComparisonOp, Expression};
use super::error::CompileError;
use super::token::{Token, TokenKind};

type ParseResult<T> = Result<T, CompileError>;

/// Recursive-descent parser over a token stream.
///
/// ```text
/// rules      := "exclude" "(" expression+ ")" [ "include" "(" expression+ ")" ]
/// expression := simple { "(" expression+ ")" }
/// simple     := TAG "is" STRING | TAG "has" STRING | TAG "between" STRING "and" STRING
/// ```
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Parse a complete rule file into its top-level OR group.
    pub fn parse_rules(mut self) -> ParseResult<Expression> {
        self.expect(&TokenKind::Exclude)?;
        let excluded = self.parenthesized_list()?;

        let top = if self.eat(&TokenKind::Include) {
            let included = self.parenthesized_list()?;
            // Dropped when an exclude rule matches and no include rule does.
            Expression::or(vec![Expression::and(vec![
                Expression::any_of(excluded),
                Expression::or(included).inverted(),
            ])])
        } else {
            Expression::or(excluded)
        };

        if let Some(token) = self.peek() {
            return Err(CompileError::syntax(
                token.span.line,
                format!("unexpected {} after the rule list", token.kind.describe()),
            ));
        }
        Ok(top)
    }

    fn parenthesized_list(&mut self) -> ParseResult<Vec<Expression>> {
        self.expect(&TokenKind::LParen)?;
        let list = self.expression_list()?;
        self.expect(&TokenKind::RParen)?;
        Ok(list)
    }

    /// One or more expressions, stopping before the closing parenthesis.
    fn expression_list(&mut self) -> ParseResult<Vec<Expression>> {
        let mut list = vec![self.expression()?];
        while !matches!(self.peek_kind(), Some(TokenKind::RParen) | None) {
            list.push(self.expression()?);
        }
        Ok(list)
    }

    fn expression(&mut self) -> ParseResult<Expression> {
        let mut expr = self.simple()?;
        while self.peek_kind() == Some(&TokenKind::LParen) {
            let nested = self.parenthesized_list()?;
            expr = Expression::and(vec![expr, Expression::any_of(nested)]);
        }
        Ok(expr)
    }

    fn simple(&mut self) -> ParseResult<Expression> {
        let line = self.line();
        let tag = match self.advance() {
            Some(Token {
                kind: TokenKind::Tag(tag),
                ..
            }) => tag,
            Some(other) => {
                return Err(CompileError::syntax(
                    other.span.line,
                    format!("expected a tag name, found {}", other.kind.describe()),
                ));
            }
            None => return Err(CompileError::syntax(line, "expected a tag name")),
        };

        let line = self.line();
        let op = match self.advance().map(|t| t.kind) {
            Some(TokenKind::Is) => ComparisonOp::Is(self.string()?),
            Some(TokenKind::Has) => ComparisonOp::Has(self.string()?),
            Some(TokenKind::Between) => {
                if !tag.is_date_like() {
                    return Err(CompileError::syntax(
                        line,
                        format!("`between` needs a date or year tag, not `{}`", tag.as_str()),
                    ));
                }
                let low = self.string()?;
                self.expect(&TokenKind::And)?;
                let high = self.string()?;
                ComparisonOp::Between(low, high)
            }
            Some(other) => {
                return Err(CompileError::syntax(
                    line,
                    format!("expected `is`, `has` or `between`, found {}", other.describe()),
                ));
            }
            None => {
                return Err(CompileError::syntax(
                    line,
                    format!("missing operator after tag `{}`", tag.as_str()),
                ));
            }
        };

        Ok(Expression::comparison(tag, op))
    }

    fn string(&mut self) -> ParseResult<String> {
        let line = self.line();
        match self.advance() {
            Some(Token {
                kind: TokenKind::Str(s),
                ..
            }) => Ok(s),
            Some(other) => Err(CompileError::syntax(
                other.span.line,
                format!("expected a quoted string, found {}", other.kind.describe()),
            )),
            None => Err(CompileError::syntax(line, "expected a quoted string")),
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> ParseResult<()> {
        let line = self.line();
        match self.advance() {
            Some(token) if &token.kind == kind => Ok(()),
            Some(token) => Err(CompileError::syntax(
                token.span.line,
                format!("expected {}, found {}", kind.describe(), token.kind.describe()),
            )),
            None => Err(CompileError::syntax(
                line,
                format!("expected {}, found end of input", kind.describe()),
            )),
        }
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek_kind() == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    /// Line of the next token, or of the last one once input is exhausted.
    fn line(&self) -> usize {
        self.peek()
            .or_else(|| self.tokens.last())
            .map(|t| t.span.line)
            .unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::lexer::tokenize;

    fn parse(src: &str) -> ParseResult<Expression> {
        let (tokens, errors) = tokenize(src);
        assert!(errors.is_empty());
        Parser::new(tokens).parse_rules()
    }

    fn is(tag: TagName, v: &str) -> Expression {
        Expression::comparison(tag, ComparisonOp::Is(v.to_string()))
    }

    #[test]
    fn nested_list_builds_and_with_inner_or() {
        let expr =
            parse(r#"exclude(artist is "Foo" (album has "Live") genre is "Jazz")"#).unwrap();
        assert_eq!(
            expr,
            Expression::or(vec![
                Expression::and(vec![
                    is(TagName::Artist, "Foo"),
                    Expression::comparison(TagName::Album, ComparisonOp::Has("Live".into())),
                ]),
                is(TagName::Genre, "Jazz"),
            ])
        );
    }

    #[test]
    fn single_rule_still_yields_top_level_or_group() {
        let expr = parse(r#"exclude(genre is "Jazz")"#).unwrap();
        assert_eq!(expr, Expression::or(vec![is(TagName::Genre, "Jazz")]));
    }

    #[test]
    fn nested_list_with_several_entries_is_an_or() {
        let expr = parse(r#"exclude(artist is "A" (album is "B" album is "C"))"#).unwrap();
        assert_eq!(
            expr,
            Expression::or(vec![Expression::and(vec![
                is(TagName::Artist, "A"),
                Expression::or(vec![is(TagName::Album, "B"), is(TagName::Album, "C")]),
            ])])
        );
    }

    #[test]
    fn chained_nesting_nests_to_the_left() {
        let expr = parse(r#"exclude(artist is "A" (album is "B") (genre is "C"))"#).unwrap();
        assert_eq!(
            expr,
            Expression::or(vec![Expression::and(vec![
                Expression::and(vec![is(TagName::Artist, "A"), is(TagName::Album, "B")]),
                is(TagName::Genre, "C"),
            ])])
        );
    }

    #[test]
    fn between_keeps_endpoints_as_written() {
        let expr = parse(r#"exclude(year between "2000" and "1990")"#).unwrap();
        assert_eq!(
            expr,
            Expression::or(vec![Expression::comparison(
                TagName::Year,
                ComparisonOp::Between("2000".into(), "1990".into()),
            )])
        );
    }

    #[test]
    fn include_block_becomes_inverted_group() {
        let expr = parse(r#"exclude(genre is "Jazz") include(artist is "Miles")"#).unwrap();
        let Expression::Group(top) = expr else {
            panic!("expected group");
        };
        let Expression::Group(and) = &top.children[0] else {
            panic!("expected and group");
        };
        let Expression::Group(include) = &and.children[1] else {
            panic!("expected include group");
        };
        assert!(include.invert);
        assert_eq!(include.children, vec![is(TagName::Artist, "Miles")]);
    }

    #[test]
    fn between_on_non_date_tag_is_rejected() {
        let err = parse(r#"exclude(artist between "1" and "2")"#).unwrap_err();
        assert!(matches!(err, CompileError::Syntax { line: 1, .. }));
    }

    #[test]
    fn malformed_input_is_a_syntax_error() {
        for src in [
            "",
            "exclude",
            "exclude()",
            r#"exclude(artist "x")"#,
            r#"exclude(artist is "x""#,
            r#"exclude(artist is "x") artist"#,
            r#"(artist is "x")"#,
            r#"exclude(year between "1" "2")"#,
        ] {
            assert!(
                matches!(parse(src), Err(CompileError::Syntax { .. })),
                "accepted: {src:?}"
            );
        }
    }

    #[test]
    fn syntax_error_reports_line() {
        let err = parse("exclude(\n  artist is \"x\"\n  album \"y\")").unwrap_err();
        assert_eq!(err, CompileError::syntax(3, "expected `is`, `has` or `between`, found string \"y\""));
    }
}
