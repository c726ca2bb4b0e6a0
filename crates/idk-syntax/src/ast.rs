use std::fmt;

use itertools::Itertools;

use crate::token::TokenKind;

/// A declarable type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Int,
    Float,
    Boolean,
    String,
}

impl Type {
    pub fn from_keyword(kind: TokenKind) -> Option<Type> {
        match kind {
            TokenKind::Int => Some(Type::Int),
            TokenKind::Float => Some(Type::Float),
            TokenKind::Boolean => Some(Type::Boolean),
            TokenKind::String => Some(Type::String),
            _ => None,
        }
    }

    /// Whether a literal of `kind` may initialize a variable of this type.
    ///
    /// Matching is strict: an integer literal does not initialize a `float`.
    pub fn accepts(self, kind: LiteralKind) -> bool {
        matches!(
            (self, kind),
            (Type::Int, LiteralKind::IntNumber)
                | (Type::Float, LiteralKind::FloatNumber)
                | (Type::Boolean, LiteralKind::Boolean)
                | (Type::String, LiteralKind::String)
        )
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Type::Int => "int",
            Type::Float => "float",
            Type::Boolean => "bool",
            Type::String => "string",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericKind {
    Int,
    Float,
}

/// What kind of literal an initializer is, for type checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    IntNumber,
    FloatNumber,
    Boolean,
    String,
}

impl fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LiteralKind::IntNumber => "an integer literal",
            LiteralKind::FloatNumber => "a float literal",
            LiteralKind::Boolean => "a boolean literal",
            LiteralKind::String => "a string literal",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// Numeric value kept as source text, e.g. `3.14`.
    NumericLiteral { kind: NumericKind, text: String },
    BooleanLiteral(bool),
    StringLiteral(String),
}

impl Expression {
    pub fn literal_kind(&self) -> LiteralKind {
        match self {
            Expression::NumericLiteral {
                kind: NumericKind::Int,
                ..
            } => LiteralKind::IntNumber,
            Expression::NumericLiteral {
                kind: NumericKind::Float,
                ..
            } => LiteralKind::FloatNumber,
            Expression::BooleanLiteral(_) => LiteralKind::Boolean,
            Expression::StringLiteral(_) => LiteralKind::String,
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::NumericLiteral { text, .. } => f.write_str(text),
            Expression::BooleanLiteral(value) => write!(f, "{value}"),
            Expression::StringLiteral(value) => write!(f, "\"{value}\""),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDeclaration {
    pub declared_type: Type,
    pub name: String,
    pub initializer: Expression,
}

impl fmt::Display for VariableDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VARIABLE '{}' => {} ;", self.name, self.initializer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    VariableDeclaration(VariableDeclaration),
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::VariableDeclaration(decl) => fmt::Display::fmt(decl, f),
        }
    }
}

/// Top-level statements in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }

    pub fn declarations(&self) -> impl Iterator<Item = &VariableDeclaration> {
        self.statements.iter().map(|stmt| match stmt {
            Statement::VariableDeclaration(decl) => decl,
        })
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.statements.iter().format("\n"))
    }
}
