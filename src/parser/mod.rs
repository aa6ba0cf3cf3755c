//! minic source code parser
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST), split into `declarations`,
//!   `statements` and `expressions`
//! - [`ast`]: AST node definitions
//!
//! # Language
//!
//! A program is a single `main { ... }` block holding declarations and
//! statements:
//! - Types: `int` (alias `integer`), `float`, `double`, `char`, `string`, `boolean`
//! - Statements: assignment, `++`/`--`, `if`/`else`, `while`, `do ... while`,
//!   `cin`, `cout`, and/or statements
//! - Expressions: `+ - * / % ^`, relational operators, `and`/`or`
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with one function per precedence level.
//! No external parser generator dependencies.

pub mod ast;
mod declarations;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;
