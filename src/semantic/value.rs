//! Constant values tracked by the analyzer
//!
//! The analyzer folds constants as it walks the tree, so every typed node
//! may carry a [`Value`]. A value is `None` whenever it cannot be known
//! statically: a variable read by `cin`, a declared but unassigned variable,
//! division by zero, or an overflowing operation.

use crate::parser::ast::Type;
use serde::Serialize;
use std::fmt;

/// Compile-time constant
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Value {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Convert into the representation used by a variable of type `ty`.
    ///
    /// Numeric values convert between `int` and `float`/`double` (floats
    /// truncate toward zero). Everything else has no conversion.
    pub fn coerce_to(self, ty: Type) -> Option<Value> {
        match (self, ty) {
            (Value::Int(n), Type::Int) => Some(Value::Int(n)),
            (Value::Int(n), Type::Float | Type::Double) => Some(Value::Float(n as f64)),
            (Value::Float(x), Type::Float | Type::Double) => Some(Value::Float(x)),
            (Value::Float(x), Type::Int) if x.is_finite() => Some(Value::Int(x.trunc() as i64)),
            (Value::Bool(b), Type::Boolean) => Some(Value::Bool(b)),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Result of checking an expression: its type and, when known, its value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Typed {
    pub ty: Type,
    pub value: Option<Value>,
}

impl Typed {
    pub fn new(ty: Type, value: Option<Value>) -> Self {
        Self { ty, value }
    }

    /// The poisoned result
    pub fn error() -> Self {
        Self {
            ty: Type::Error,
            value: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.ty.is_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_numeric() {
        assert_eq!(Value::Int(3).coerce_to(Type::Float), Some(Value::Float(3.0)));
        assert_eq!(Value::Float(2.9).coerce_to(Type::Int), Some(Value::Int(2)));
        assert_eq!(Value::Float(-2.9).coerce_to(Type::Int), Some(Value::Int(-2)));
        assert_eq!(Value::Float(1.5).coerce_to(Type::Double), Some(Value::Float(1.5)));
    }

    #[test]
    fn test_coerce_without_conversion() {
        assert_eq!(Value::Bool(true).coerce_to(Type::Int), None);
        assert_eq!(Value::Int(1).coerce_to(Type::Boolean), None);
        assert_eq!(Value::Float(f64::NAN).coerce_to(Type::Int), None);
        assert_eq!(Value::Int(1).coerce_to(Type::String), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Float(5.0).to_string(), "5.0");
        assert_eq!(Value::Bool(false).to_string(), "false");
    }
}
