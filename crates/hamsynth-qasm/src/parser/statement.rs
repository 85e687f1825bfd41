//! Statement parsing.

use super::Parser;
use crate::ast::{GateCall, QubitRef, Statement};
use crate::error::{ParseError, ParseResult};
use crate::lexer::Token;

impl Parser {
    /// Parse a statement.
    pub(super) fn parse_statement(&mut self) -> ParseResult<Statement> {
        let line = self.line();
        let token = self
            .peek()
            .cloned()
            .ok_or_else(|| ParseError::UnexpectedEof("statement".into()))?;

        match token {
            Token::Include => self.parse_include(),
            Token::Qreg => self.parse_qasm2_decl(true),
            Token::Creg => self.parse_qasm2_decl(false),
            Token::Qubit => self.parse_qasm3_decl(true),
            Token::Bit => self.parse_qasm3_decl(false),
            Token::Barrier => self.parse_barrier(),
            Token::Measure | Token::Reset | Token::If => {
                self.skip_statement()?;
                Ok(Statement::Unsupported(token.to_string()))
            }
            Token::Gate => {
                self.skip_block()?;
                Ok(Statement::Unsupported("gate definition".into()))
            }
            Token::Identifier(_) => self.parse_identifier_statement(),
            _ => Err(ParseError::UnexpectedToken {
                line,
                expected: "statement".into(),
                found: token.to_string(),
            }),
        }
    }

    fn parse_include(&mut self) -> ParseResult<Statement> {
        self.expect(Token::Include)?;
        let line = self.line();
        let path = match self.advance() {
            Some(Token::StringLiteral(s)) => s,
            Some(other) => {
                return Err(ParseError::UnexpectedToken {
                    line,
                    expected: "string literal".into(),
                    found: other.to_string(),
                });
            }
            None => return Err(ParseError::UnexpectedEof("include path".into())),
        };
        self.expect(Token::Semicolon)?;
        Ok(Statement::Include(path))
    }

    /// `qreg name[n];` / `creg name[n];`
    fn parse_qasm2_decl(&mut self, quantum: bool) -> ParseResult<Statement> {
        self.advance();
        let name = self.parse_identifier()?;
        self.expect(Token::LBracket)?;
        let size = self.parse_u32_literal()?;
        self.expect(Token::RBracket)?;
        self.expect(Token::Semicolon)?;
        Ok(declaration(quantum, name, size))
    }

    /// `qubit[n] name;` / `bit name;`
    fn parse_qasm3_decl(&mut self, quantum: bool) -> ParseResult<Statement> {
        self.advance();
        let size = if self.consume(&Token::LBracket) {
            let size = self.parse_u32_literal()?;
            self.expect(Token::RBracket)?;
            size
        } else {
            1
        };
        let name = self.parse_identifier()?;
        self.expect(Token::Semicolon)?;
        Ok(declaration(quantum, name, size))
    }

    fn parse_barrier(&mut self) -> ParseResult<Statement> {
        self.expect(Token::Barrier)?;
        let qubits = if self.check(&Token::Semicolon) {
            vec![]
        } else {
            self.parse_qubit_list()?
        };
        self.expect(Token::Semicolon)?;
        Ok(Statement::Barrier { qubits })
    }

    /// Gate calls, `gphase`, and QASM 3 `c = measure q;` assignments.
    fn parse_identifier_statement(&mut self) -> ParseResult<Statement> {
        let name = self.parse_identifier()?;

        if self.check(&Token::Eq) || self.check(&Token::LBracket) {
            self.skip_statement()?;
            return Ok(Statement::Unsupported(format!("assignment to '{name}'")));
        }

        let params = if self.check(&Token::LParen) {
            self.parse_paren_expressions()?
        } else {
            vec![]
        };

        if name == "gphase" {
            self.expect(Token::Semicolon)?;
            let got = params.len();
            let mut params = params.into_iter();
            return match (params.next(), got) {
                (Some(theta), 1) => Ok(Statement::GlobalPhase(theta)),
                _ => Err(ParseError::WrongParameterCount {
                    gate: name,
                    expected: 1,
                    got,
                }),
            };
        }

        let qubits = self.parse_qubit_list()?;
        self.expect(Token::Semicolon)?;
        Ok(Statement::Gate(GateCall {
            name,
            params,
            qubits,
        }))
    }

    fn parse_qubit_list(&mut self) -> ParseResult<Vec<QubitRef>> {
        let mut refs = vec![self.parse_qubit_ref()?];
        while self.consume(&Token::Comma) {
            refs.push(self.parse_qubit_ref()?);
        }
        Ok(refs)
    }

    fn parse_qubit_ref(&mut self) -> ParseResult<QubitRef> {
        let register = self.parse_identifier()?;
        if self.consume(&Token::LBracket) {
            let index = self.parse_u32_literal()?;
            self.expect(Token::RBracket)?;
            Ok(QubitRef::single(register, index))
        } else {
            Ok(QubitRef::register(register))
        }
    }

    /// Skip up to and including the next `;`.
    fn skip_statement(&mut self) -> ParseResult<()> {
        while let Some(token) = self.advance() {
            if token == Token::Semicolon {
                return Ok(());
            }
        }
        Err(ParseError::UnexpectedEof("';'".into()))
    }

    /// Skip a `{ ... }` block including nested braces.
    fn skip_block(&mut self) -> ParseResult<()> {
        while !self.check(&Token::LBrace) {
            if self.advance().is_none() {
                return Err(ParseError::UnexpectedEof("'{'".into()));
            }
        }
        let mut depth = 0usize;
        while let Some(token) = self.advance() {
            match token {
                Token::LBrace => depth += 1,
                Token::RBrace => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                _ => {}
            }
        }
        Err(ParseError::UnexpectedEof("'}'".into()))
    }
}

fn declaration(quantum: bool, name: String, size: u32) -> Statement {
    if quantum {
        Statement::QubitDecl { name, size }
    } else {
        Statement::BitDecl { name, size }
    }
}
