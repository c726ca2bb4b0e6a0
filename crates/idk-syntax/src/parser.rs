//! ```text
//! program     = { declaration } Eof
//! declaration = type identifier "=" expression ";"
//! type        = "int" | "float" | "bool" | "string"
//! expression  = IntNumber | FloatNumber | "true" | "false" | StringLiteral
//! ```

use tracing::{debug, trace};

use crate::ast::{Expression, NumericKind, Program, Statement, Type, VariableDeclaration};
use crate::error::{Error, ParseError};
use crate::token::{Token, TokenKind, TokenSequence};

pub fn parse(tokens: &TokenSequence) -> Result<Program, ParseError> {
    Parser::new(tokens).parse_program()
}

/// Parses every declaration it can, collecting errors instead of stopping.
pub fn parse_recovering(tokens: &TokenSequence) -> Recovered {
    Parser::new(tokens).parse_program_recovering()
}

/// Result of [`parse_recovering`]: the declarations that parsed, and the
/// errors for the ones that did not, both in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recovered {
    pub program: Program,
    pub errors: Vec<ParseError>,
}

impl Recovered {
    /// The program if nothing went wrong; a single error as itself, several
    /// as [`Error::Recovered`].
    pub fn into_result(self) -> Result<Program, Error> {
        match <[ParseError; 1]>::try_from(self.errors) {
            Ok([err]) => Err(err.into()),
            Err(errors) if errors.is_empty() => Ok(self.program),
            Err(errors) => Err(Error::Recovered { errors }),
        }
    }
}

pub struct Parser<'t> {
    tokens: &'t [Token],
    position: usize,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t TokenSequence) -> Self {
        Parser {
            tokens: tokens.as_slice(),
            position: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// The token under the cursor. Never reads past the final `Eof`.
    fn peek(&self) -> &'t Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.position.min(last)]
    }

    fn at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn advance(&mut self) -> &'t Token {
        let token = self.peek();
        if token.kind != TokenKind::Eof {
            self.position += 1;
        }
        token
    }

    fn expect(
        &mut self,
        kind: TokenKind,
        err: impl FnOnce(TokenKind, usize) -> ParseError,
    ) -> Result<&'t Token, ParseError> {
        let token = self.peek();
        if token.kind == kind {
            Ok(self.advance())
        } else {
            Err(err(token.kind, token.offset))
        }
    }

    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();
        while !self.at_end() {
            program.statements.push(self.parse_statement()?);
        }
        Ok(program)
    }

    pub fn parse_program_recovering(&mut self) -> Recovered {
        let mut recovered = Recovered::default();
        while !self.at_end() {
            match self.parse_statement() {
                Ok(statement) => recovered.program.statements.push(statement),
                Err(err) => {
                    debug!(error = %err, offset = err.offset(), "recovering from parse error");
                    recovered.errors.push(err);
                    self.synchronize();
                }
            }
        }
        recovered
    }

    /// Skips to just past the next `;`, or to `Eof`.
    fn synchronize(&mut self) {
        while !self.at_end() {
            if self.advance().kind == TokenKind::Semicolon {
                return;
            }
        }
    }

    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        let token = self.peek();
        trace!(kind = ?token.kind, offset = token.offset, "parse_statement");
        if token.kind.is_type_keyword() {
            return Ok(Statement::VariableDeclaration(
                self.parse_variable_declaration()?,
            ));
        }
        Err(ParseError::UnexpectedToken {
            found: token.kind,
            offset: token.offset,
        })
    }

    pub fn parse_variable_declaration(&mut self) -> Result<VariableDeclaration, ParseError> {
        let declared_type = self.parse_type()?;
        let name = self.parse_identifier()?;
        self.expect(TokenKind::EqualSign, |found, offset| {
            ParseError::ExpectedEquals { found, offset }
        })?;

        let offset = self.peek().offset;
        let initializer = self.parse_expression()?;
        let literal_kind = initializer.literal_kind();
        if !declared_type.accepts(literal_kind) {
            return Err(ParseError::TypeMismatch {
                declared_type,
                literal_kind,
                offset,
            });
        }

        self.expect(TokenKind::Semicolon, |found, offset| {
            ParseError::ExpectedSemicolon { found, offset }
        })?;

        debug!(%declared_type, %name, %initializer, "parsed variable declaration");
        Ok(VariableDeclaration {
            declared_type,
            name,
            initializer,
        })
    }

    fn parse_type(&mut self) -> Result<Type, ParseError> {
        let token = self.peek();
        match Type::from_keyword(token.kind) {
            Some(ty) => {
                self.advance();
                Ok(ty)
            }
            None => Err(ParseError::UnexpectedToken {
                found: token.kind,
                offset: token.offset,
            }),
        }
    }

    fn parse_identifier(&mut self) -> Result<String, ParseError> {
        let token = self.expect(TokenKind::Identifier, |found, offset| {
            ParseError::ExpectedIdentifier { found, offset }
        })?;
        Ok(token.lexeme.clone())
    }

    /// Parses an initializer. Only literals are accepted for now; operator
    /// expressions would start here.
    pub fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        let token = self.peek();
        trace!(kind = ?token.kind, offset = token.offset, "parse_expression");
        let expression = match token.kind {
            TokenKind::IntNumber => Expression::NumericLiteral {
                kind: NumericKind::Int,
                text: token.lexeme.clone(),
            },
            TokenKind::FloatNumber => Expression::NumericLiteral {
                kind: NumericKind::Float,
                text: token.lexeme.clone(),
            },
            TokenKind::True => Expression::BooleanLiteral(true),
            TokenKind::False => Expression::BooleanLiteral(false),
            TokenKind::StringLiteral => Expression::StringLiteral(token.lexeme.clone()),
            found => {
                return Err(ParseError::InvalidExpression {
                    found,
                    offset: token.offset,
                });
            }
        };
        self.advance();
        Ok(expression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn parse_str(source: &str) -> Result<Program, ParseError> {
        parse(&tokenize(source).unwrap())
    }

    fn decl(declared_type: Type, name: &str, initializer: Expression) -> Statement {
        Statement::VariableDeclaration(VariableDeclaration {
            declared_type,
            name: name.to_string(),
            initializer,
        })
    }

    fn number(kind: NumericKind, text: &str) -> Expression {
        Expression::NumericLiteral {
            kind,
            text: text.to_string(),
        }
    }

    #[test]
    fn int_declaration() {
        let program = parse_str("int x = 5;").unwrap();
        assert_eq!(
            program.statements,
            vec![decl(Type::Int, "x", number(NumericKind::Int, "5"))]
        );
    }

    #[test]
    fn every_type_with_its_literal() {
        let source = r#"
            int a = 1;
            float b = 2.5;
            bool c = true;
            bool d = false;
            string e = "hello world";
        "#;
        let program = parse_str(source).unwrap();
        assert_eq!(
            program.statements,
            vec![
                decl(Type::Int, "a", number(NumericKind::Int, "1")),
                decl(Type::Float, "b", number(NumericKind::Float, "2.5")),
                decl(Type::Boolean, "c", Expression::BooleanLiteral(true)),
                decl(Type::Boolean, "d", Expression::BooleanLiteral(false)),
                decl(
                    Type::String,
                    "e",
                    Expression::StringLiteral("hello world".into())
                ),
            ]
        );
    }

    #[test]
    fn empty_input_is_empty_program() {
        assert!(parse_str("").unwrap().is_empty());
        assert!(parse_str("  \n").unwrap().is_empty());
    }

    #[test]
    fn int_literal_does_not_initialize_float() {
        assert_eq!(
            parse_str("float x = 5;"),
            Err(ParseError::TypeMismatch {
                declared_type: Type::Float,
                literal_kind: crate::ast::LiteralKind::IntNumber,
                offset: 10,
            })
        );
        assert!(matches!(
            parse_str("int x = 5.0;"),
            Err(ParseError::TypeMismatch { .. })
        ));
        assert!(matches!(
            parse_str("string s = true;"),
            Err(ParseError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn missing_semicolon() {
        assert_eq!(
            parse_str("int x = 5"),
            Err(ParseError::ExpectedSemicolon {
                found: TokenKind::Eof,
                offset: 9,
            })
        );
        assert_eq!(
            parse_str("int x = 5 int y = 6;"),
            Err(ParseError::ExpectedSemicolon {
                found: TokenKind::Int,
                offset: 10,
            })
        );
    }

    #[test]
    fn missing_identifier_and_equals() {
        assert_eq!(
            parse_str("int = 5;"),
            Err(ParseError::ExpectedIdentifier {
                found: TokenKind::EqualSign,
                offset: 4,
            })
        );
        assert_eq!(
            parse_str("int float = 5;"),
            Err(ParseError::ExpectedIdentifier {
                found: TokenKind::Float,
                offset: 4,
            })
        );
        assert_eq!(
            parse_str("int x 5;"),
            Err(ParseError::ExpectedEquals {
                found: TokenKind::IntNumber,
                offset: 6,
            })
        );
    }

    #[test]
    fn non_literal_initializer() {
        assert_eq!(
            parse_str("int x = y;"),
            Err(ParseError::InvalidExpression {
                found: TokenKind::Identifier,
                offset: 8,
            })
        );
        assert_eq!(
            parse_str("int x = -5;"),
            Err(ParseError::InvalidExpression {
                found: TokenKind::Minus,
                offset: 8,
            })
        );
        assert_eq!(
            parse_str("int x ="),
            Err(ParseError::InvalidExpression {
                found: TokenKind::Eof,
                offset: 7,
            })
        );
    }

    #[test]
    fn top_level_tokens_other_than_types_are_rejected() {
        assert_eq!(
            parse_str("x = 5;"),
            Err(ParseError::UnexpectedToken {
                found: TokenKind::Identifier,
                offset: 0,
            })
        );
        assert_eq!(
            parse_str("int a = 1; def"),
            Err(ParseError::UnexpectedToken {
                found: TokenKind::Def,
                offset: 11,
            })
        );
        assert!(matches!(
            parse_str(";"),
            Err(ParseError::UnexpectedToken {
                found: TokenKind::Semicolon,
                ..
            })
        ));
    }

    #[test]
    fn cursor_stops_on_eof() {
        let tokens = tokenize("int x = 5;").unwrap();
        let mut parser = Parser::new(&tokens);
        parser.parse_program().unwrap();
        assert_eq!(parser.position(), tokens.len() - 1);

        // advancing at the end never moves past Eof
        assert_eq!(parser.advance().kind, TokenKind::Eof);
        assert_eq!(parser.position(), tokens.len() - 1);
    }

    #[test]
    fn each_rule_consumes_what_it_matched() {
        let tokens = tokenize("bool flag = true; 1.5").unwrap();
        let mut parser = Parser::new(&tokens);
        parser.parse_variable_declaration().unwrap();
        assert_eq!(parser.position(), 5);
        parser.parse_expression().unwrap();
        assert_eq!(parser.position(), 6);
    }

    #[test]
    fn recovery_collects_every_error() {
        let source = "int a = 1; int b 2; x; float c = 3.0; string d = 4; bool e = false;";
        let tokens = tokenize(source).unwrap();
        let recovered = parse_recovering(&tokens);

        let names: Vec<_> = recovered
            .program
            .declarations()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names, vec!["a", "c", "e"]);

        assert_eq!(recovered.errors.len(), 3);
        assert!(matches!(
            recovered.errors[0],
            ParseError::ExpectedEquals { .. }
        ));
        assert!(matches!(
            recovered.errors[1],
            ParseError::UnexpectedToken { .. }
        ));
        assert!(matches!(
            recovered.errors[2],
            ParseError::TypeMismatch { .. }
        ));
        assert!(!recovered.errors.is_empty());
    }

    #[test]
    fn recovery_stops_at_eof() {
        let tokens = tokenize("int a = 1; int b =").unwrap();
        let recovered = parse_recovering(&tokens);
        assert_eq!(recovered.program.len(), 1);
        assert_eq!(
            recovered.errors,
            vec![ParseError::InvalidExpression {
                found: TokenKind::Eof,
                offset: 18,
            }]
        );
    }

    #[test]
    fn recovery_on_valid_input_matches_parse() {
        let tokens = tokenize("int a = 1; string s = \"x\";").unwrap();
        let recovered = parse_recovering(&tokens);
        assert!(recovered.errors.is_empty());
        assert_eq!(Ok(recovered.program), parse(&tokens));
    }
}
