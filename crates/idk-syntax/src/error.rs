use miette::Diagnostic;
use thiserror::Error;

use crate::ast::{LiteralKind, Type};
use crate::token::TokenKind;

#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum LexError {
    #[error("invalid character '{ch}'")]
    #[diagnostic(code(idk::lex::invalid_character))]
    InvalidCharacter {
        ch: char,
        #[label("not part of any token")]
        offset: usize,
    },

    #[error("unterminated string literal")]
    #[diagnostic(
        code(idk::lex::unterminated_string),
        help("add a closing '\"' before the end of the file")
    )]
    UnterminatedString {
        #[label("string starts here")]
        offset: usize,
    },

    #[error("malformed numeric literal '{lexeme}'")]
    #[diagnostic(
        code(idk::lex::malformed_number),
        help("a number may contain at most one '.'")
    )]
    MalformedNumber {
        lexeme: String,
        #[label("more than one '.'")]
        offset: usize,
    },
}

impl LexError {
    pub fn offset(&self) -> usize {
        match self {
            LexError::InvalidCharacter { offset, .. }
            | LexError::UnterminatedString { offset }
            | LexError::MalformedNumber { offset, .. } => *offset,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ParseError {
    #[error("unexpected {found} at top level")]
    #[diagnostic(
        code(idk::parse::unexpected_token),
        help("a statement starts with one of the types int, float, bool or string")
    )]
    UnexpectedToken {
        found: TokenKind,
        #[label("expected a declaration")]
        offset: usize,
    },

    #[error("expected an identifier, found {found}")]
    #[diagnostic(code(idk::parse::expected_identifier))]
    ExpectedIdentifier {
        found: TokenKind,
        #[label("variable name expected here")]
        offset: usize,
    },

    #[error("expected '=', found {found}")]
    #[diagnostic(code(idk::parse::expected_equals))]
    ExpectedEquals {
        found: TokenKind,
        #[label("'=' expected here")]
        offset: usize,
    },

    #[error("expected ';' at the end of the statement, found {found}")]
    #[diagnostic(code(idk::parse::expected_semicolon))]
    ExpectedSemicolon {
        found: TokenKind,
        #[label("';' expected here")]
        offset: usize,
    },

    #[error("invalid expression: {found} is not a literal")]
    #[diagnostic(
        code(idk::parse::invalid_expression),
        help("initializers are number, boolean or string literals")
    )]
    InvalidExpression {
        found: TokenKind,
        #[label("literal expected here")]
        offset: usize,
    },

    #[error("type mismatch: cannot initialize '{declared_type}' with {literal_kind}")]
    #[diagnostic(
        code(idk::parse::type_mismatch),
        help("literals are never converted; write a literal of the declared type")
    )]
    TypeMismatch {
        declared_type: Type,
        literal_kind: LiteralKind,
        #[label("literal of another type")]
        offset: usize,
    },
}

impl ParseError {
    pub fn offset(&self) -> usize {
        match self {
            ParseError::UnexpectedToken { offset, .. }
            | ParseError::ExpectedIdentifier { offset, .. }
            | ParseError::ExpectedEquals { offset, .. }
            | ParseError::ExpectedSemicolon { offset, .. }
            | ParseError::InvalidExpression { offset, .. }
            | ParseError::TypeMismatch { offset, .. } => *offset,
        }
    }
}

/// Rejected by [`TokenSequence::try_from`](crate::token::TokenSequence).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Diagnostic)]
pub enum InvalidTokenSequence {
    #[error("token sequence does not end with end of input")]
    #[diagnostic(code(idk::tokens::missing_eof))]
    MissingEof,

    #[error("token sequence contains more than one end of input")]
    #[diagnostic(code(idk::tokens::duplicate_eof))]
    DuplicateEof,
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error("found {} errors while parsing", .errors.len())]
    #[diagnostic(code(idk::parse::recovered))]
    Recovered {
        #[related]
        errors: Vec<ParseError>,
    },
}
