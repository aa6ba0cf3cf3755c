//! Compilation pipeline
//!
//! ```text
//! source → Lexer → tokens → Parser → AST → Analyzer → (symbols, annotated tree)
//! ```
//!
//! Lexical and semantic problems are collected and the run continues. A
//! syntax error stops the run: no tree is produced and analysis is skipped.
//! Every diagnostic is handed to the caller's sink as soon as it is found.

use crate::parser::ast::AstNode;
use crate::parser::lexer::{LexError, Lexer, Token};
use crate::parser::parse::{ParseError, Parser};
use crate::semantic::analyzer::{Analysis, Analyzer};
use crate::semantic::errors::SemanticError;
use crate::semantic::tree::TreeNode;
use log::{debug, info};
use thiserror::Error;

/// Any problem reported during a run
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Diagnostic {
    #[error(transparent)]
    Lexical(#[from] LexError),
    #[error(transparent)]
    Syntax(#[from] ParseError),
    #[error(transparent)]
    Semantic(#[from] SemanticError),
}

impl Diagnostic {
    pub fn line(&self) -> usize {
        match self {
            Diagnostic::Lexical(err) => err.location.line,
            Diagnostic::Syntax(err) => err.location.line,
            Diagnostic::Semantic(err) => err.line(),
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            Diagnostic::Lexical(_) => Stage::Lex,
            Diagnostic::Syntax(_) => Stage::Parse,
            Diagnostic::Semantic(_) => Stage::Check,
        }
    }
}

/// How far a run goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Lex,
    Parse,
    Check,
}

/// Everything one run produced
#[derive(Debug)]
pub struct Compilation {
    /// Full token stream, error tokens and the end marker included
    pub tokens: Vec<Token>,
    /// `None` when parsing failed or was not requested
    pub ast: Option<AstNode>,
    pub analysis: Option<Analysis>,
    /// All diagnostics in the order they were reported
    pub diagnostics: Vec<Diagnostic>,
}

impl Compilation {
    pub fn syntax_error(&self) -> Option<&ParseError> {
        self.diagnostics.iter().find_map(|d| match d {
            Diagnostic::Syntax(err) => Some(err),
            _ => None,
        })
    }

    pub fn lexical_errors(&self) -> impl Iterator<Item = &LexError> {
        self.diagnostics.iter().filter_map(|d| match d {
            Diagnostic::Lexical(err) => Some(err),
            _ => None,
        })
    }

    pub fn semantic_errors(&self) -> &[SemanticError] {
        match &self.analysis {
            Some(analysis) => &analysis.diagnostics,
            None => &[],
        }
    }

    /// Untyped tree document of the AST
    pub fn syntax_tree(&self) -> Option<TreeNode> {
        self.ast.as_ref().map(TreeNode::from)
    }

    /// True when every requested stage finished without diagnostics
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Run every stage on `source`
pub fn compile(source: &str) -> Compilation {
    compile_with_sink(source, Stage::Check, |_| {})
}

/// Run up to `stage`, passing each diagnostic to `sink` as it is found
pub fn compile_with_sink<F>(source: &str, stage: Stage, mut sink: F) -> Compilation
where
    F: FnMut(&Diagnostic),
{
    let mut diagnostics = Vec::new();
    let mut emit = |diagnostic: Diagnostic, diagnostics: &mut Vec<Diagnostic>| {
        sink(&diagnostic);
        diagnostics.push(diagnostic);
    };

    info!("lexing {} bytes", source.len());
    let tokens = Lexer::new(source).tokenize();
    for error in tokens.iter().filter_map(Token::as_error) {
        emit(Diagnostic::Lexical(error), &mut diagnostics);
    }
    debug!("{} tokens", tokens.len());

    let mut compilation = Compilation {
        tokens,
        ast: None,
        analysis: None,
        diagnostics: Vec::new(),
    };

    if stage >= Stage::Parse {
        info!("parsing");
        match Parser::from_tokens(compilation.tokens.clone()).parse_program() {
            Ok(ast) => compilation.ast = Some(ast),
            Err(err) => emit(Diagnostic::Syntax(err), &mut diagnostics),
        }
    }

    if stage >= Stage::Check {
        if let Some(ast) = compilation.ast.as_ref() {
            info!("checking");
            let analysis = Analyzer::with_sink(|err: &SemanticError| {
                emit(Diagnostic::Semantic(err.clone()), &mut diagnostics)
            })
            .analyze(ast);
            compilation.analysis = Some(analysis);
        }
    }

    compilation.diagnostics = diagnostics;
    compilation
}
