//! Expression parsing implementation
//!
//! One method per precedence level, lowest first:
//!
//! ```text
//! condition ::= expr (("and" | "or") expr)*
//! expr      ::= simple [rel_op simple]
//! simple    ::= term (("+" | "-") term)*
//! term      ::= factor (("*" | "/" | "%") factor)*
//! factor    ::= primary ("^" primary)*
//! primary   ::= "(" condition ")" | id | number
//! ```
//!
//! Relational operators do not chain. Every binary level is left-associative,
//! `^` included.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::{ArithOp, RelOp, Symbol, TokenKind};
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse an and/or chain of expressions
    pub(crate) fn parse_condition(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_expression()?;

        while let TokenKind::LogicalOp(op) = self.peek_kind() {
            let loc = self.current_location();
            self.advance();
            let right = self.parse_expression()?;
            left = AstNode::internal(Label::Logical(op), vec![left, right], loc);
        }

        Ok(left)
    }

    /// Parse expression (relational level)
    pub(crate) fn parse_expression(&mut self) -> Result<AstNode, ParseError> {
        let left = self.parse_simple()?;

        let op = match self.peek_kind() {
            TokenKind::RelOp(RelOp::Lt) => BinOp::Lt,
            TokenKind::RelOp(RelOp::Le) => BinOp::Le,
            TokenKind::RelOp(RelOp::Gt) => BinOp::Gt,
            TokenKind::RelOp(RelOp::Ge) => BinOp::Ge,
            TokenKind::RelOp(RelOp::NotEq) => BinOp::Ne,
            TokenKind::Equality => BinOp::Eq,
            _ => return Ok(left),
        };

        let loc = self.current_location();
        self.advance();
        let right = self.parse_simple()?;
        Ok(AstNode::internal(Label::Binary(op), vec![left, right], loc))
    }

    /// Parse additive expression (+ -)
    fn parse_simple(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_term()?;

        loop {
            let op = match self.peek_kind() {
                TokenKind::ArithOp(ArithOp::Plus) => BinOp::Add,
                TokenKind::ArithOp(ArithOp::Minus) => BinOp::Sub,
                _ => break,
            };
            let loc = self.current_location();
            self.advance();
            let right = self.parse_term()?;
            left = AstNode::internal(Label::Binary(op), vec![left, right], loc);
        }

        Ok(left)
    }

    /// Parse multiplicative expression (* / %)
    fn parse_term(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_factor()?;

        loop {
            let op = match self.peek_kind() {
                TokenKind::ArithOp(ArithOp::Star) => BinOp::Mul,
                TokenKind::ArithOp(ArithOp::Slash) => BinOp::Div,
                TokenKind::ArithOp(ArithOp::Percent) => BinOp::Mod,
                _ => break,
            };
            let loc = self.current_location();
            self.advance();
            let right = self.parse_factor()?;
            left = AstNode::internal(Label::Binary(op), vec![left, right], loc);
        }

        Ok(left)
    }

    /// Parse power expression (^)
    fn parse_factor(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_primary()?;

        while self.check(TokenKind::ArithOp(ArithOp::Caret)) {
            let loc = self.current_location();
            self.advance();
            let right = self.parse_primary()?;
            left = AstNode::internal(Label::Binary(BinOp::Pow), vec![left, right], loc);
        }

        Ok(left)
    }

    /// Parse primary expression (literals, identifiers, parenthesized)
    fn parse_primary(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.current_location();

        match self.peek_kind() {
            TokenKind::Ident => self.expect_identifier(),
            TokenKind::IntLiteral(n) => {
                self.advance();
                Ok(AstNode::leaf(Leaf::Int(n), loc))
            }
            TokenKind::FloatLiteral(x) => {
                self.advance();
                Ok(AstNode::leaf(Leaf::Float(x), loc))
            }
            TokenKind::Symbol(Symbol::LParen) => {
                self.advance();
                let expr = self.parse_condition()?;
                self.expect_rparen("after expression")?;
                Ok(expr)
            }
            _ => Err(self.error_here("Expected expression")),
        }
    }
}
