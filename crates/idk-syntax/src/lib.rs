//! ```
//! use idk_syntax::{parse_source, ast::Type};
//!
//! let program = parse_source("int x = 5; string s = \"hi\";").unwrap();
//! let first = program.declarations().next().unwrap();
//! assert_eq!(first.declared_type, Type::Int);
//! assert_eq!(first.to_string(), "VARIABLE 'x' => 5 ;");
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

pub use error::{Error, InvalidTokenSequence, LexError, ParseError};
pub use lexer::{Lexer, tokenize};
pub use parser::{Parser, Recovered, parse, parse_recovering};
pub use token::{Token, TokenKind, TokenSequence};

use ast::Program;

pub fn parse_source(source: &str) -> Result<Program, Error> {
    let tokens = tokenize(source)?;
    Ok(parse(&tokens)?)
}

/// Lex errors still stop immediately.
pub fn parse_source_recovering(source: &str) -> Result<Program, Error> {
    let tokens = tokenize(source)?;
    parse_recovering(&tokens).into_result()
}
