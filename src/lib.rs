//! # Introduction
//!
//! minic is the front end of a small C-like teaching language. It turns
//! source text into classified tokens, builds an abstract syntax tree under
//! a fixed precedence grammar, and type checks the tree against a symbol
//! table, producing an annotated tree and a symbol report.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → AST → Analyzer → (Symbols, Annotated tree)
//! ```
//!
//! 1. [`parser`]: tokenises the source and builds an AST. The first syntax
//!    error aborts the run.
//! 2. [`semantic`]: walks the AST once, filling a fresh
//!    [`semantic::symbols::SymbolTable`] and folding constants through the
//!    typed operator table in [`semantic::ops`].
//! 3. [`pipeline`]: drives the stages and streams every diagnostic to a sink.
//! 4. [`report`]: token report, symbol table report and JSON tree documents.
//! 5. [`config`]: artifact locations.
//! 6. [`ui`]: ratatui results browser; not part of the stable library API.
//!
//! ## Language
//!
//! ```text
//! main {
//!     int a, b;
//!     a = 3;
//!     b = a + 2;
//!     if (a < b) { cout b; }
//! }
//! ```
//!
//! Types: `int` (`integer`), `float`, `double`, `char`, `string`, `boolean`.
//! Types must match exactly, except that `float` widens to `double`; float
//! literals are `float`, so they can initialize a `double`.
//! Control flow: `if/else`, `while`, `do ... while`.
//! I/O: `cin`, `cout`.

pub mod config;
pub mod parser;
pub mod pipeline;
pub mod report;
pub mod semantic;
pub mod ui;

pub use pipeline::{compile, compile_with_sink, Compilation, Diagnostic, Stage};
