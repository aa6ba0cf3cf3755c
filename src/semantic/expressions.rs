//! Expression checking
//!
//! Every expression node comes back as an annotated tree node together with
//! its [`Typed`] result. Operands must have exactly the same type. When an
//! operand is already unresolved the parent is marked unresolved without a
//! new diagnostic, so one mistake is reported once.
//!
//! All methods are implemented as `pub(crate)` methods on the [`Analyzer`] struct.

use crate::parser::ast::*;
use crate::semantic::analyzer::Analyzer;
use crate::semantic::errors::SemanticError;
use crate::semantic::ops;
use crate::semantic::tree::TreeNode;
use crate::semantic::value::{Typed, Value};
use log::trace;

impl Analyzer<'_> {
    pub(crate) fn check_expression(&mut self, node: &AstNode) -> (TreeNode, Typed) {
        let line = node.location().line;

        let (label, children) = match node {
            AstNode::Leaf { leaf, .. } => {
                let typed = self.check_leaf(leaf, line);
                return (TreeNode::new(leaf.to_string(), Vec::new(), line).typed(typed), typed);
            }
            AstNode::Internal {
                label, children, ..
            } => (*label, children),
        };

        let is_operator = matches!(label, Label::Binary(_) | Label::Logical(_));
        if !is_operator || !label.accepts_arity(children.len()) {
            return (self.unknown_construct(node), Typed::error());
        }

        let (left_tree, left) = self.check_expression(&children[0]);
        let (right_tree, right) = self.check_expression(&children[1]);

        let typed = match label {
            Label::Binary(op) => self.check_binary(op, left, right, line),
            Label::Logical(op) => self.check_logical(op, left, right, line),
            _ => Typed::error(),
        };

        trace!("'{}' at line {} has type {}", label, line, typed.ty);

        let tree = TreeNode::new(label.to_string(), vec![left_tree, right_tree], line).typed(typed);
        (tree, typed)
    }

    fn check_leaf(&mut self, leaf: &Leaf, line: usize) -> Typed {
        match leaf {
            Leaf::Int(n) => Typed::new(Type::Int, Some(Value::Int(*n))),
            Leaf::Float(x) => Typed::new(Type::Float, Some(Value::Float(*x))),
            Leaf::Ident(name) => match self.symbols.mark_use(name, line) {
                Ok(symbol) => Typed::new(symbol.ty, symbol.value),
                Err(err) => {
                    self.report(err);
                    Typed::error()
                }
            },
        }
    }

    fn check_binary(&mut self, op: BinOp, left: Typed, right: Typed, line: usize) -> Typed {
        if left.is_error() || right.is_error() {
            return Typed::error();
        }

        let Some(ty) = left.ty.unify(right.ty) else {
            self.report(SemanticError::TypeMismatch {
                construct: op.symbol().to_string(),
                expected: left.ty.to_string(),
                found: right.ty.to_string(),
                line,
            });
            return Typed::error();
        };

        match ops::apply(op, ty, left.value, right.value) {
            Some(typed) => typed,
            None => {
                let expected = if op.is_arithmetic() {
                    "numeric operands"
                } else {
                    "comparable operands"
                };
                self.report(SemanticError::TypeMismatch {
                    construct: op.symbol().to_string(),
                    expected: expected.to_string(),
                    found: ty.to_string(),
                    line,
                });
                Typed::error()
            }
        }
    }

    fn check_logical(&mut self, op: LogicalOp, left: Typed, right: Typed, line: usize) -> Typed {
        if left.is_error() || right.is_error() {
            return Typed::error();
        }

        let offending = [left.ty, right.ty].into_iter().find(|ty| *ty != Type::Boolean);
        if let Some(found) = offending {
            self.report(SemanticError::TypeMismatch {
                construct: op.symbol().to_string(),
                expected: Type::Boolean.to_string(),
                found: found.to_string(),
                line,
            });
            return Typed::error();
        }

        let left_value = left.value.and_then(|v| v.as_bool());
        let right_value = right.value.and_then(|v| v.as_bool());
        let value = match (left_value, right_value) {
            (Some(l), Some(r)) => Some(Value::Bool(match op {
                LogicalOp::And => l && r,
                LogicalOp::Or => l || r,
            })),
            // a known left operand can decide the result alone
            (Some(false), None) if op == LogicalOp::And => Some(Value::Bool(false)),
            (Some(true), None) if op == LogicalOp::Or => Some(Value::Bool(true)),
            _ => None,
        };

        Typed::new(Type::Boolean, value)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::Type;
    use crate::parser::parse::Parser;
    use crate::semantic::analyzer::{analyze, Analysis};
    use crate::semantic::errors::SemanticError;
    use crate::semantic::value::Value;

    fn run(source: &str) -> Analysis {
        let ast = Parser::new(source).parse_program().unwrap();
        analyze(&ast)
    }

    #[test]
    fn test_constant_folding() {
        let analysis = run("main { int x; x = (2 + 3) * 4 ^ 2 - 10 / 3; }");
        assert!(analysis.is_clean());
        // 5 * 16 - 3
        assert_eq!(analysis.symbols.get("x").unwrap().value, Some(Value::Int(77)));
    }

    #[test]
    fn test_poison_does_not_cascade() {
        let analysis = run("main { int a; float f; a = 1; f = 2.0; cout (a + f) * 2 + a; }");
        assert_eq!(analysis.diagnostics.len(), 1);

        let cout = analysis.tree.find("cout").unwrap();
        assert_eq!(cout.children[0].ty, Some(Type::Error));
    }

    #[test]
    fn test_undeclared_in_expression() {
        let analysis = run("main { int a; a = b + 1; }");
        assert!(matches!(
            analysis.diagnostics.as_slice(),
            [SemanticError::UndeclaredVariable { name, .. }] if name == "b"
        ));
        // the unresolved right side is not reported again by the assignment
        assert_eq!(analysis.symbols.get("a").unwrap().value, None);
    }

    #[test]
    fn test_arithmetic_on_boolean_rejected() {
        let analysis = run("main { int a; boolean t; a = 1; cout (a < 2) + (a < 3); }");
        assert_eq!(analysis.diagnostics.len(), 1);
        assert!(analysis.diagnostics[0].to_string().contains("numeric operands"));
    }

    #[test]
    fn test_logical_operators() {
        let analysis = run("main { int a; a = 5; a > 1 and a < 10; a > 1 or a; }");

        assert_eq!(analysis.diagnostics.len(), 1);
        assert!(matches!(
            &analysis.diagnostics[0],
            SemanticError::TypeMismatch { construct, found, .. }
                if construct == "or" && found == "int"
        ));

        let and = analysis.tree.find("and").unwrap();
        assert_eq!(and.ty, Some(Type::Boolean));
        assert_eq!(and.value, Some(Value::Bool(true)));
    }

    #[test]
    fn test_division_by_zero_has_unknown_value() {
        let analysis = run("main { int a; a = 1 / 0; }");
        assert!(analysis.is_clean());
        let a = analysis.symbols.get("a").unwrap();
        assert_eq!(a.value, None);
        assert_eq!(analysis.tree.find("/").unwrap().ty, Some(Type::Int));
    }
}
