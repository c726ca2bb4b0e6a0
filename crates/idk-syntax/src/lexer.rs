use std::iter::Peekable;
use std::str::CharIndices;

use tracing::{debug, trace};

use crate::error::LexError;
use crate::token::{Token, TokenKind, TokenSequence};

/// Whitespace-only or empty input yields a sequence holding just `Eof`.
pub fn tokenize(source: &str) -> Result<TokenSequence, LexError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();

    loop {
        let token = lexer.next_token().inspect_err(|err| {
            debug!(error = %err, offset = err.offset(), "tokenize failed");
        })?;
        trace!(kind = ?token.kind, lexeme = %token.lexeme, offset = token.offset, "token");
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            break;
        }
    }

    debug!(count = tokens.len(), bytes = source.len(), "tokenized source");
    Ok(TokenSequence::from_lexer(tokens))
}

pub struct Lexer<'src> {
    source: &'src str,
    chars: Peekable<CharIndices<'src>>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Lexer {
            source,
            chars: source.char_indices().peekable(),
        }
    }

    /// Scans the next token. Once input is exhausted every call returns `Eof`.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        let Some(&(start, ch)) = self.chars.peek() else {
            return Ok(Token::eof(self.source.len()));
        };

        match ch {
            c if c.is_alphabetic() || c == '_' => Ok(self.identifier(start)),
            c if c.is_ascii_digit() => self.number(start),
            '"' => self.string(start),
            c => match TokenKind::punctuation(c) {
                Some(kind) => {
                    self.chars.next();
                    Ok(Token::new(kind, c.to_string(), start))
                }
                None => Err(LexError::InvalidCharacter {
                    ch: c,
                    offset: start,
                }),
            },
        }
    }

    fn skip_whitespace(&mut self) {
        while self
            .chars
            .next_if(|&(_, c)| matches!(c, ' ' | '\t' | '\n' | '\r'))
            .is_some()
        {}
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> usize {
        while self.chars.next_if(|&(_, c)| pred(c)).is_some() {}
        self.chars.peek().map_or(self.source.len(), |&(i, _)| i)
    }

    fn identifier(&mut self, start: usize) -> Token {
        let end = self.eat_while(|c| c.is_alphanumeric() || c == '_');
        let text = &self.source[start..end];
        let kind = TokenKind::keyword(text).unwrap_or(TokenKind::Identifier);
        Token::new(kind, text, start)
    }

    fn number(&mut self, start: usize) -> Result<Token, LexError> {
        let end = self.eat_while(|c| c.is_ascii_digit() || c == '.');
        let text = &self.source[start..end];
        let kind = match text.matches('.').count() {
            0 => TokenKind::IntNumber,
            1 => TokenKind::FloatNumber,
            _ => {
                return Err(LexError::MalformedNumber {
                    lexeme: text.to_string(),
                    offset: start,
                });
            }
        };
        Ok(Token::new(kind, text, start))
    }

    fn string(&mut self, start: usize) -> Result<Token, LexError> {
        // opening quote
        self.chars.next();
        let content_start = start + 1;
        let content_end = self.eat_while(|c| c != '"');

        if self.chars.next().is_none() {
            return Err(LexError::UnterminatedString { offset: start });
        }

        Ok(Token::new(
            TokenKind::StringLiteral,
            &self.source[content_start..content_end],
            start,
        ))
    }
}
