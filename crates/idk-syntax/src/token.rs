use std::fmt;

use itertools::Itertools;

use crate::error::InvalidTokenSequence;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    Def,
    Return,
    If,
    Elif,
    Else,

    // Types
    Int,
    Float,
    Boolean,
    String,

    True,
    False,

    Identifier,
    IntNumber,
    FloatNumber,
    StringLiteral,

    // Special characters
    Parenthesis,
    CurlyBraces,
    Brackets,
    EqualSign,
    Colon,
    Semicolon,
    Comma,

    // Operators
    Plus,
    Minus,
    Times,
    Divides,
    Mod,

    Eof,
}

/// Reserved words, checked once after an identifier has been scanned.
pub const KEYWORDS: [(&str, TokenKind); 11] = [
    ("def", TokenKind::Def),
    ("return", TokenKind::Return),
    ("if", TokenKind::If),
    ("elif", TokenKind::Elif),
    ("else", TokenKind::Else),
    ("int", TokenKind::Int),
    ("float", TokenKind::Float),
    ("bool", TokenKind::Boolean),
    ("string", TokenKind::String),
    ("true", TokenKind::True),
    ("false", TokenKind::False),
];

impl TokenKind {
    pub fn keyword(text: &str) -> Option<TokenKind> {
        KEYWORDS
            .iter()
            .find(|(word, _)| *word == text)
            .map(|(_, kind)| *kind)
    }

    pub fn punctuation(ch: char) -> Option<TokenKind> {
        let kind = match ch {
            '(' | ')' => TokenKind::Parenthesis,
            '{' | '}' => TokenKind::CurlyBraces,
            '[' | ']' => TokenKind::Brackets,
            '=' => TokenKind::EqualSign,
            ':' => TokenKind::Colon,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Times,
            '/' => TokenKind::Divides,
            '%' => TokenKind::Mod,
            _ => return None,
        };
        Some(kind)
    }

    /// `int`, `float`, `bool` and `string`: the tokens that open a declaration.
    pub fn is_type_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Int | TokenKind::Float | TokenKind::Boolean | TokenKind::String
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Def => "'def'",
            TokenKind::Return => "'return'",
            TokenKind::If => "'if'",
            TokenKind::Elif => "'elif'",
            TokenKind::Else => "'else'",
            TokenKind::Int => "'int'",
            TokenKind::Float => "'float'",
            TokenKind::Boolean => "'bool'",
            TokenKind::String => "'string'",
            TokenKind::True => "'true'",
            TokenKind::False => "'false'",
            TokenKind::Identifier => "identifier",
            TokenKind::IntNumber => "integer literal",
            TokenKind::FloatNumber => "float literal",
            TokenKind::StringLiteral => "string literal",
            TokenKind::Parenthesis => "parenthesis",
            TokenKind::CurlyBraces => "curly brace",
            TokenKind::Brackets => "bracket",
            TokenKind::EqualSign => "'='",
            TokenKind::Colon => "':'",
            TokenKind::Semicolon => "';'",
            TokenKind::Comma => "','",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Times => "'*'",
            TokenKind::Divides => "'/'",
            TokenKind::Mod => "'%'",
            TokenKind::Eof => "end of input",
        };
        f.write_str(text)
    }
}

/// A classified slice of source text.
///
/// Literal values are kept as text; turning `"3.14"` into a number is left to
/// whoever consumes the token. String literals store the characters between
/// the quotes, verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    /// Byte offset of the token's first character in the source.
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, offset: usize) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            offset,
        }
    }

    pub fn eof(offset: usize) -> Self {
        Token::new(TokenKind::Eof, "", offset)
    }

    /// Number of source bytes covered by the token, quotes included.
    pub fn len_in_source(&self) -> usize {
        match self.kind {
            TokenKind::StringLiteral => self.lexeme.len() + 2,
            _ => self.lexeme.len(),
        }
    }
}

/// Writes source text that tokenizes back to a token of the same kind.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::StringLiteral => write!(f, "\"{}\"", self.lexeme),
            _ => f.write_str(&self.lexeme),
        }
    }
}

/// Output of the lexer: every token of a source, in order, with exactly one
/// trailing [`TokenKind::Eof`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSequence {
    tokens: Vec<Token>,
}

impl TokenSequence {
    /// Only the lexer builds sequences unchecked; it appends `Eof` itself.
    pub(crate) fn from_lexer(tokens: Vec<Token>) -> Self {
        debug_assert!(Self::check(&tokens).is_ok());
        TokenSequence { tokens }
    }

    fn check(tokens: &[Token]) -> Result<(), InvalidTokenSequence> {
        let eofs = tokens.iter().filter(|t| t.kind == TokenKind::Eof).count();
        match tokens.last() {
            Some(last) if last.kind == TokenKind::Eof && eofs == 1 => Ok(()),
            Some(_) if eofs > 1 => Err(InvalidTokenSequence::DuplicateEof),
            _ => Err(InvalidTokenSequence::MissingEof),
        }
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Always false: a sequence holds at least its `Eof`.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn eof(&self) -> &Token {
        &self.tokens[self.tokens.len() - 1]
    }

    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|t| t.kind).collect()
    }
}

impl TryFrom<Vec<Token>> for TokenSequence {
    type Error = InvalidTokenSequence;

    fn try_from(tokens: Vec<Token>) -> Result<Self, Self::Error> {
        Self::check(&tokens)?;
        Ok(TokenSequence { tokens })
    }
}

impl<'a> IntoIterator for &'a TokenSequence {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl fmt::Display for TokenSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines = self
            .tokens
            .iter()
            .map(|t| format!("{:>5}  {:<16} {}", t.offset, format!("{:?}", t.kind), t));
        write!(f, "{}", lines.format("\n"))
    }
}
