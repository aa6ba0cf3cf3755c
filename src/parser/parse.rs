//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the error type, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: the `main` block and variable declarations
//! - `statements`: statements (`if`, `while`, `do`, `cin`, `cout`, assignments)
//! - `expressions`: expressions with one function per precedence level
//!
//! # Error policy
//!
//! The first grammar mismatch aborts the parse. There is no resynchronisation:
//! a [`ParseError`] means no tree was produced for this run.

use crate::parser::ast::*;
use crate::parser::lexer::{Keyword, Lexer, Symbol, Token, TokenKind};
use thiserror::Error;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Syntax error at line {}, column {}: {message}", .location.line, .location.column)]
pub struct ParseError {
    pub message: String,
    pub location: SourceLocation,
}

/// Parse a full token stream into the `main` tree.
pub fn parse(tokens: Vec<Token>) -> Result<AstNode, ParseError> {
    Parser::from_tokens(tokens).parse_program()
}

/// Recursive descent parser for minic
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
}

impl Parser {
    /// Lex `source` and prepare a parser over its tokens
    pub fn new(source: &str) -> Self {
        Self::from_tokens(Lexer::new(source).tokenize())
    }

    /// Build a parser over an existing token stream.
    ///
    /// Comments are dropped, and so are error tokens: those are reported as
    /// lexical diagnostics by whoever produced the stream.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        let mut tokens: Vec<Token> = tokens
            .into_iter()
            .filter(|t| !matches!(t.kind, TokenKind::Comment | TokenKind::Error(_)))
            .collect();

        if tokens.last().map_or(true, |t| t.kind != TokenKind::Eof) {
            let location = tokens.last().map(|t| t.location).unwrap_or_default();
            tokens.push(Token::new(TokenKind::Eof, "", location));
        }

        Self {
            tokens,
            position: 0,
        }
    }

    // ===== Helper methods =====

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub(crate) fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    pub(crate) fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.position + n)
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.position.saturating_sub(1)]
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    pub(crate) fn check_symbol(&self, symbol: Symbol) -> bool {
        self.check(TokenKind::Symbol(symbol))
    }

    pub(crate) fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn match_symbol(&mut self, symbol: Symbol) -> bool {
        self.match_kind(TokenKind::Symbol(symbol))
    }

    /// Error pointing at the current token
    pub(crate) fn error_here(&self, message: &str) -> ParseError {
        ParseError {
            message: format!("{}, found {}", message, self.peek()),
            location: self.current_location(),
        }
    }

    pub(crate) fn expect_kind(&mut self, kind: TokenKind, message: &str) -> Result<(), ParseError> {
        if self.match_kind(kind) {
            Ok(())
        } else {
            Err(self.error_here(message))
        }
    }

    pub(crate) fn expect_keyword(&mut self, keyword: Keyword, ctx: &str) -> Result<(), ParseError> {
        let name = format!("{:?}", keyword).to_lowercase();
        self.expect_kind(
            TokenKind::Keyword(keyword),
            &format!("Expected '{name}' {ctx}"),
        )
    }

    pub(crate) fn expect_lbrace(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_kind(
            TokenKind::Symbol(Symbol::LBrace),
            &format!("Expected '{{' {ctx}"),
        )
    }

    pub(crate) fn expect_rbrace(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_kind(
            TokenKind::Symbol(Symbol::RBrace),
            &format!("Expected '}}' {ctx}"),
        )
    }

    pub(crate) fn expect_rparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_kind(
            TokenKind::Symbol(Symbol::RParen),
            &format!("Expected ')' {ctx}"),
        )
    }

    pub(crate) fn expect_semicolon(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_kind(
            TokenKind::Symbol(Symbol::Semicolon),
            &format!("Expected ';' {ctx}"),
        )
    }

    /// Consume an identifier and return it as a leaf node
    pub(crate) fn expect_identifier(&mut self) -> Result<AstNode, ParseError> {
        if self.check(TokenKind::Ident) {
            let token = self.advance();
            Ok(AstNode::ident(token.lexeme.clone(), token.location))
        } else {
            Err(self.error_here("Expected identifier"))
        }
    }
}
