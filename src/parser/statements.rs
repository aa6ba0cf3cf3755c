//! Statement parsing implementation
//!
//! This module handles parsing of all statement forms:
//!
//! - Control flow: `if`/`else`, `while`, `do ... while`
//! - I/O: `cin id;` and `cout expr;`
//! - Assignment `id = expr;` and increment `id++;` / `id--;`
//! - Logical statements: `expr and expr`, `expr or expr`
//!
//! # Grammar
//!
//! ```text
//! statement  ::= if_stmt | while_stmt | do_while | logical_stmt
//!              | cin_stmt | cout_stmt | assignment | increment
//! if_stmt    ::= "if" condition block ["else" block]
//! while_stmt ::= "while" condition [block]
//! do_while   ::= "do" block "while" condition [";"]
//! assignment ::= id ("=" | "==") expr ";"
//! increment  ::= id ("++" | "--") ";"
//! block      ::= "{" statement* "}"
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::{ArithOp, Keyword, Symbol, TokenKind};
use crate::parser::parse::{ParseError, Parser};
use log::warn;

impl Parser {
    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<AstNode, ParseError> {
        match self.peek_kind() {
            TokenKind::Keyword(Keyword::If) => self.parse_if_statement(),
            TokenKind::Keyword(Keyword::While) => self.parse_while_statement(),
            TokenKind::Keyword(Keyword::Do) => self.parse_do_while_statement(),
            TokenKind::Keyword(Keyword::Cin) => self.parse_cin_statement(),
            TokenKind::Keyword(Keyword::Cout) => self.parse_cout_statement(),
            TokenKind::Keyword(keyword) if keyword.as_type().is_some() => Err(
                self.error_here("Declarations are only allowed directly inside 'main'"),
            ),
            TokenKind::Ident => match self.peek_ahead(1).map(|t| t.kind) {
                Some(TokenKind::Assign) | Some(TokenKind::Equality) => self.parse_assignment(),
                Some(TokenKind::ArithOp(ArithOp::PlusPlus))
                | Some(TokenKind::ArithOp(ArithOp::MinusMinus)) => self.parse_increment(),
                _ => self.parse_logical_statement(),
            },
            _ => self.parse_logical_statement(),
        }
    }

    /// Parse `{ statement* }` into a node with the given label
    pub(crate) fn parse_block(&mut self, label: Label, ctx: &str) -> Result<AstNode, ParseError> {
        let loc = self.current_location();
        self.expect_lbrace(ctx)?;

        let mut statements = Vec::new();
        while !self.check_symbol(Symbol::RBrace) && !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        self.expect_rbrace("after block")?;
        Ok(AstNode::internal(label, statements, loc))
    }

    /// Parse if statement. The condition may be parenthesized or bare.
    fn parse_if_statement(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.current_location();
        self.advance(); // consume 'if'

        let condition = self.parse_condition()?;
        let then_block = self.parse_block(Label::Block, "after 'if' condition")?;
        let mut children = vec![condition, then_block];

        if self.match_kind(TokenKind::Keyword(Keyword::Else)) {
            children.push(self.parse_block(Label::Else, "after 'else'")?);
        }

        Ok(AstNode::internal(Label::If, children, loc))
    }

    /// Parse while statement; the body is optional
    fn parse_while_statement(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.current_location();
        self.advance(); // consume 'while'

        let condition = self.parse_condition()?;
        let mut children = vec![condition];
        if self.check_symbol(Symbol::LBrace) {
            children.push(self.parse_block(Label::Block, "after 'while' condition")?);
        }

        Ok(AstNode::internal(Label::While, children, loc))
    }

    /// Parse do-while: `do { ... } while cond`
    fn parse_do_while_statement(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.current_location();
        self.advance(); // consume 'do'

        let body = self.parse_block(Label::Block, "after 'do'")?;
        self.expect_keyword(Keyword::While, "after 'do' block")?;
        let condition = self.parse_condition()?;
        self.match_symbol(Symbol::Semicolon);

        Ok(AstNode::internal(Label::Do, vec![body, condition], loc))
    }

    fn parse_cin_statement(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.current_location();
        self.advance(); // consume 'cin'

        let target = self.expect_identifier()?;
        self.expect_semicolon("after 'cin' target")?;

        Ok(AstNode::internal(Label::Cin, vec![target], loc))
    }

    fn parse_cout_statement(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.current_location();
        self.advance(); // consume 'cout'

        let expr = self.parse_expression()?;
        self.expect_semicolon("after 'cout' expression")?;

        Ok(AstNode::internal(Label::Cout, vec![expr], loc))
    }

    /// Parse `id = expr;`. `id == expr;` is accepted with the same meaning.
    fn parse_assignment(&mut self) -> Result<AstNode, ParseError> {
        let target = self.expect_identifier()?;
        let op = self.advance();
        let loc = op.location;

        if op.kind == TokenKind::Equality {
            warn!(
                "line {}: '==' used as assignment to '{}'",
                loc.line,
                target.display_label()
            );
        }

        let value = self.parse_expression()?;
        self.expect_semicolon("after assignment")?;

        Ok(AstNode::internal(Label::Assign, vec![target, value], loc))
    }

    /// Parse `id++;` / `id--;` as `id = id + 1` / `id = id - 1`
    fn parse_increment(&mut self) -> Result<AstNode, ParseError> {
        let target = self.expect_identifier()?;
        let op_token = self.advance();
        let loc = op_token.location;
        let op = if op_token.kind == TokenKind::ArithOp(ArithOp::PlusPlus) {
            BinOp::Add
        } else {
            BinOp::Sub
        };
        self.expect_semicolon("after increment")?;

        let one = AstNode::leaf(Leaf::Int(1), loc);
        let sum = AstNode::internal(Label::Binary(op), vec![target.clone(), one], loc);
        Ok(AstNode::internal(Label::Assign, vec![target, sum], loc))
    }

    /// Parse a statement made of an and/or expression
    fn parse_logical_statement(&mut self) -> Result<AstNode, ParseError> {
        let start = self.error_here("Expected statement");

        let expr = self.parse_condition()?;
        if !matches!(expr.label(), Some(Label::Logical(_))) {
            return Err(start);
        }
        self.match_symbol(Symbol::Semicolon);

        Ok(expr)
    }
}
