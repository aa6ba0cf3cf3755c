//! Typed operator dispatch
//!
//! Operators are resolved through an explicit table keyed by
//! `(operator, operand type)`. A missing entry means the operator is not
//! defined for that type. Numeric semantics:
//!
//! - `int`: 64-bit checked arithmetic. `/` truncates toward zero and `%`
//!   takes the sign of the dividend. Division by zero, overflow and negative
//!   exponents produce no value.
//! - `float`/`double`: IEEE arithmetic (mixed operands are checked as
//!   `double`); division or modulo by zero produces
//!   no value.
//! - Ordering is defined for numeric, `char` and `string` operands;
//!   `boolean` only supports `==` and `!=`.

use crate::parser::ast::{BinOp, Type};
use crate::semantic::value::{Typed, Value};
use std::cmp::Ordering;

type IntKernel = fn(i64, i64) -> Option<i64>;
type FloatKernel = fn(f64, f64) -> Option<f64>;

fn int_kernel(op: BinOp) -> Option<IntKernel> {
    let kernel: IntKernel = match op {
        BinOp::Add => i64::checked_add,
        BinOp::Sub => i64::checked_sub,
        BinOp::Mul => i64::checked_mul,
        BinOp::Div => i64::checked_div,
        BinOp::Mod => i64::checked_rem,
        BinOp::Pow => |base, exp| u32::try_from(exp).ok().and_then(|e| base.checked_pow(e)),
        _ => return None,
    };
    Some(kernel)
}

fn float_kernel(op: BinOp) -> Option<FloatKernel> {
    let kernel: FloatKernel = match op {
        BinOp::Add => |a, b| Some(a + b),
        BinOp::Sub => |a, b| Some(a - b),
        BinOp::Mul => |a, b| Some(a * b),
        BinOp::Div => |a, b| (b != 0.0).then(|| a / b),
        BinOp::Mod => |a, b| (b != 0.0).then(|| a % b),
        BinOp::Pow => |a, b| Some(a.powf(b)),
        _ => return None,
    };
    Some(kernel)
}

fn comparison(op: BinOp, ordering: Ordering) -> bool {
    match op {
        BinOp::Lt => ordering == Ordering::Less,
        BinOp::Le => ordering != Ordering::Greater,
        BinOp::Gt => ordering == Ordering::Greater,
        BinOp::Ge => ordering != Ordering::Less,
        BinOp::Eq => ordering == Ordering::Equal,
        BinOp::Ne => ordering != Ordering::Equal,
        _ => false,
    }
}

/// Result type of `op` over two operands of type `ty`, if defined
pub fn result_type(op: BinOp, ty: Type) -> Option<Type> {
    match (op.is_arithmetic(), ty) {
        (_, Type::Error) => None,
        (true, ty) if ty.is_numeric() => Some(ty),
        (true, _) => None,
        (false, Type::Boolean) => matches!(op, BinOp::Eq | BinOp::Ne).then_some(Type::Boolean),
        (false, _) => Some(Type::Boolean),
    }
}

/// Apply `op` to two operands that share type `ty`.
///
/// Returns `None` when the operator is undefined for `ty`. The value of the
/// result is `None` when either operand value is unknown or the kernel
/// refuses the inputs.
pub fn apply(op: BinOp, ty: Type, left: Option<Value>, right: Option<Value>) -> Option<Typed> {
    let result_ty = result_type(op, ty)?;
    let value = match (left, right) {
        (Some(l), Some(r)) => evaluate(op, l, r),
        _ => None,
    };
    Some(Typed::new(result_ty, value))
}

fn evaluate(op: BinOp, left: Value, right: Value) -> Option<Value> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => {
            if op.is_arithmetic() {
                int_kernel(op)?(a, b).map(Value::Int)
            } else {
                Some(Value::Bool(comparison(op, a.cmp(&b))))
            }
        }
        (Value::Float(a), Value::Float(b)) => {
            if op.is_arithmetic() {
                float_kernel(op)?(a, b).map(Value::Float)
            } else {
                a.partial_cmp(&b).map(|ord| Value::Bool(comparison(op, ord)))
            }
        }
        (Value::Bool(a), Value::Bool(b)) => match op {
            BinOp::Eq => Some(Value::Bool(a == b)),
            BinOp::Ne => Some(Value::Bool(a != b)),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(op: BinOp, a: i64, b: i64) -> Option<Value> {
        apply(op, Type::Int, Some(Value::Int(a)), Some(Value::Int(b)))
            .and_then(|t| t.value)
    }

    #[test]
    fn test_integer_arithmetic() {
        assert_eq!(int(BinOp::Add, 3, 2), Some(Value::Int(5)));
        assert_eq!(int(BinOp::Div, 7, 2), Some(Value::Int(3)));
        assert_eq!(int(BinOp::Div, -7, 2), Some(Value::Int(-3)));
        assert_eq!(int(BinOp::Mod, -7, 3), Some(Value::Int(-1)));
        assert_eq!(int(BinOp::Pow, 2, 10), Some(Value::Int(1024)));
    }

    #[test]
    fn test_integer_edge_cases_have_no_value() {
        assert_eq!(int(BinOp::Div, 1, 0), None);
        assert_eq!(int(BinOp::Mod, 1, 0), None);
        assert_eq!(int(BinOp::Pow, 2, -1), None);
        assert_eq!(int(BinOp::Add, i64::MAX, 1), None);

        // the type is still known
        let typed = apply(BinOp::Div, Type::Int, Some(Value::Int(1)), Some(Value::Int(0))).unwrap();
        assert_eq!(typed.ty, Type::Int);
    }

    #[test]
    fn test_float_arithmetic() {
        let typed = apply(
            BinOp::Div,
            Type::Double,
            Some(Value::Float(1.0)),
            Some(Value::Float(4.0)),
        )
        .unwrap();
        assert_eq!(typed, Typed::new(Type::Double, Some(Value::Float(0.25))));

        let by_zero = apply(
            BinOp::Div,
            Type::Float,
            Some(Value::Float(1.0)),
            Some(Value::Float(0.0)),
        )
        .unwrap();
        assert_eq!(by_zero.value, None);
    }

    #[test]
    fn test_comparisons_yield_boolean() {
        let typed = apply(BinOp::Le, Type::Int, Some(Value::Int(2)), Some(Value::Int(2))).unwrap();
        assert_eq!(typed, Typed::new(Type::Boolean, Some(Value::Bool(true))));

        let (t, f) = (Some(Value::Bool(true)), Some(Value::Bool(false)));
        let typed = apply(BinOp::Ne, Type::Boolean, t, f).unwrap();
        assert_eq!(typed.value, Some(Value::Bool(true)));
    }

    #[test]
    fn test_undefined_operators() {
        assert!(apply(BinOp::Add, Type::Boolean, None, None).is_none());
        assert!(apply(BinOp::Mul, Type::String, None, None).is_none());
        assert!(apply(BinOp::Lt, Type::Boolean, None, None).is_none());
        assert!(apply(BinOp::Add, Type::Error, None, None).is_none());
        assert_eq!(result_type(BinOp::Lt, Type::Char), Some(Type::Boolean));
    }

    #[test]
    fn test_unknown_operand_keeps_type() {
        let typed = apply(BinOp::Add, Type::Int, None, Some(Value::Int(1))).unwrap();
        assert_eq!(typed, Typed::new(Type::Int, None));
    }
}
