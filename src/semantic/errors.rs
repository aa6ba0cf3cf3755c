// Semantic error types

use crate::parser::ast::Type;
use thiserror::Error;

/// Non-fatal problems found while checking a program.
///
/// Each one is recorded and the walk carries on; only the offending subtree
/// is marked as unresolved.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SemanticError {
    #[error("Semantic error at line {line}: variable '{name}' is not declared")]
    UndeclaredVariable { name: String, line: usize },

    #[error(
        "Semantic error at line {line}: variable '{name}' redeclared as {found}, \
         it was declared as {declared} at line {declared_line}"
    )]
    TypeConflict {
        name: String,
        declared: Type,
        found: Type,
        declared_line: usize,
        line: usize,
    },

    #[error("Semantic error at line {line}: type mismatch in '{construct}': expected {expected}, found {found}")]
    TypeMismatch {
        construct: String,
        expected: String,
        found: String,
        line: usize,
    },

    #[error("Semantic error at line {line}: condition of '{construct}' must be boolean, found {found}")]
    ConditionTypeError {
        construct: String,
        found: Type,
        line: usize,
    },

    #[error("Semantic error at line {line}: unexpected '{label}' node")]
    UnknownConstruct { label: String, line: usize },
}

impl SemanticError {
    pub fn line(&self) -> usize {
        match self {
            SemanticError::UndeclaredVariable { line, .. }
            | SemanticError::TypeConflict { line, .. }
            | SemanticError::TypeMismatch { line, .. }
            | SemanticError::ConditionTypeError { line, .. }
            | SemanticError::UnknownConstruct { line, .. } => *line,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            SemanticError::UndeclaredVariable { .. } => "UndeclaredVariable",
            SemanticError::TypeConflict { .. } => "TypeConflict",
            SemanticError::TypeMismatch { .. } => "TypeMismatch",
            SemanticError::ConditionTypeError { .. } => "ConditionTypeError",
            SemanticError::UnknownConstruct { .. } => "UnknownConstruct",
        }
    }
}
