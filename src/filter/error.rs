//! Error types for the rule compiler.

use std::path::PathBuf;
use thiserror::Error;

/// A character or word the lexer could not turn into a token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct LexError {
    pub line: usize,
    pub message: String,
}

/// Why a rule text failed to compile.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// One or more lexemes were unrecognized. All of them are reported.
    #[error("{} lexical error(s), first at {}", .0.len(), first_lex_error(.0))]
    Lexical(Vec<LexError>),

    /// The token stream does not follow the rule grammar.
    #[error("syntax error on line {line}: {message}")]
    Syntax { line: usize, message: String },
}

fn first_lex_error(errors: &[LexError]) -> String {
    errors
        .first()
        .map(ToString::to_string)
        .unwrap_or_else(|| "<unknown>".to_string())
}

impl CompileError {
    pub fn syntax(line: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            message: message.into(),
        }
    }
}

/// Errors loading a rule file from disk.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("cannot read exclusion rules from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error in {path}: {source}")]
    Compile {
        path: PathBuf,
        #[source]
        source: CompileError,
    },
}
