//! Exclusion rule compiler and evaluator.
//!
//! Rule files use a small language:
//!
//! ```text
//! exclude(
//!     artist is "Foo" (album has "Live")
//!     genre is "Jazz"
//!     year between "1990" and "1999"
//! )
//! include(artist is "Miles Davis")
//! ```
//!
//! A list after an expression narrows it (`artist is "Foo" AND (album has
//! "Live")`); siblings in a list are alternatives. The optional `include`
//! block rescues files an exclude rule would otherwise drop.

mod ast;
mod error;
mod eval;
mod lexer;
mod parser;
mod token;

use std::path::Path;

pub use ast::Expression;
pub use error::{CompileError, FilterError};
pub use eval::evaluate;

/// Compile rule text into its top-level expression.
pub fn compile(source: &str) -> Result<Expression, CompileError> {
    let (tokens, errors) = lexer::tokenize(source);
    if !errors.is_empty() {
        return Err(CompileError::Lexical(errors));
    }
    parser::Parser::new(tokens).parse_rules()
}

/// Read and compile a rule file.
pub fn load(path: &Path) -> Result<Expression, FilterError> {
    let source = std::fs::read_to_string(path).map_err(|source| FilterError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    compile(&source).map_err(|source| FilterError::Compile {
        path: path.to_path_buf(),
        source,
    })
}
