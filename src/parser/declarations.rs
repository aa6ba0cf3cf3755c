//! Declaration parsing implementation
//!
//! This module handles the program entry point and variable declarations:
//!
//! - Program: `main { ... }`
//! - Declarations: `int a, b;` and `float x = expr;`
//!
//! # Grammar
//!
//! ```text
//! program          ::= "main" "{" declaration_list "}"
//! declaration_list ::= (variable_decl | statement)*
//! variable_decl    ::= type id ("," id)* ";"
//!                    | type id "=" expr ";"
//! type             ::= "int" | "integer" | "float" | "double"
//!                    | "char" | "string" | "boolean"
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::{Keyword, Symbol, TokenKind};
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse the whole program: the `main` block and nothing after it
    pub fn parse_program(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.current_location();

        self.expect_keyword(Keyword::Main, "at start of program")?;
        self.expect_lbrace("after 'main'")?;

        let mut items = Vec::new();
        while !self.check_symbol(Symbol::RBrace) && !self.is_at_end() {
            if self.declared_type().is_some() {
                items.push(self.parse_variable_declaration()?);
            } else {
                items.push(self.parse_statement()?);
            }
        }

        self.expect_rbrace("to close 'main'")?;

        if !self.is_at_end() {
            return Err(self.error_here("Expected end of file after 'main' block"));
        }

        Ok(AstNode::internal(Label::Main, items, loc))
    }

    /// The type named by the current token, if it is a type keyword
    pub(crate) fn declared_type(&self) -> Option<Type> {
        match self.peek_kind() {
            TokenKind::Keyword(keyword) => keyword.as_type(),
            _ => None,
        }
    }

    /// Parse `type id, id;` or `type id = expr;`
    pub(crate) fn parse_variable_declaration(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.current_location();
        let ty = self
            .declared_type()
            .ok_or_else(|| self.error_here("Expected type name"))?;
        self.advance();

        let first = self.expect_identifier()?;

        if self.check(TokenKind::Assign) {
            let assign_loc = self.current_location();
            self.advance();
            let init = self.parse_expression()?;
            self.expect_semicolon("after initializer")?;
            let assign = AstNode::internal(Label::Assign, vec![first, init], assign_loc);
            return Ok(AstNode::internal(Label::Decl(ty), vec![assign], loc));
        }

        let mut names = vec![first];
        while self.match_symbol(Symbol::Comma) {
            names.push(self.expect_identifier()?);
        }
        self.expect_semicolon("after declaration")?;

        Ok(AstNode::internal(Label::Decl(ty), names, loc))
    }
}
