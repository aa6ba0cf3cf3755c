//! Statement checking
//!
//! Statements produce annotated tree nodes but no type of their own, except
//! assignments, which carry the declared type and the stored value.
//!
//! - Declarations enter each name into the symbol table; an initializer is
//!   checked like an assignment.
//! - Assignments look up the target, check the right-hand side, and store
//!   the value even when the types disagree (the mismatch is reported).
//! - `if`, `while` and `do` require a boolean condition; their bodies are
//!   checked regardless.
//! - `cin` requires a declared target and makes its value unknown.
//!
//! All methods are implemented as `pub(crate)` methods on the [`Analyzer`] struct.

use crate::parser::ast::*;
use crate::semantic::analyzer::Analyzer;
use crate::semantic::errors::SemanticError;
use crate::semantic::tree::TreeNode;
use crate::semantic::value::Typed;
use log::trace;

impl Analyzer<'_> {
    pub(crate) fn check_statement(&mut self, node: &AstNode) -> TreeNode {
        let (label, children, location) = match node {
            AstNode::Internal {
                label,
                children,
                location,
            } => (*label, children.as_slice(), *location),
            AstNode::Leaf { .. } => return self.check_expression(node).0,
        };

        trace!("statement '{}' at line {}", label, location.line);

        if !label.accepts_arity(children.len()) {
            return self.unknown_construct(node);
        }

        match label {
            Label::Main | Label::Block | Label::Else => {
                let children = children.iter().map(|c| self.check_statement(c)).collect();
                TreeNode::new(label.to_string(), children, location.line)
            }
            Label::Decl(ty) => self.check_declaration(ty, children, location),
            Label::Assign => self.check_assignment(node),
            Label::If | Label::While => {
                let mut out = vec![self.check_condition(label, &children[0])];
                out.extend(children[1..].iter().map(|c| self.check_statement(c)));
                TreeNode::new(label.to_string(), out, location.line)
            }
            Label::Do => {
                let body = self.check_statement(&children[0]);
                let condition = self.check_condition(label, &children[1]);
                TreeNode::new(label.to_string(), vec![body, condition], location.line)
            }
            Label::Cin => self.check_cin(node, &children[0]),
            Label::Cout => {
                let (expr, _) = self.check_expression(&children[0]);
                TreeNode::new(label.to_string(), vec![expr], location.line)
            }
            Label::Binary(_) | Label::Logical(_) => self.check_expression(node).0,
        }
    }

    fn check_declaration(
        &mut self,
        ty: Type,
        declarators: &[AstNode],
        location: SourceLocation,
    ) -> TreeNode {
        let mut out = Vec::with_capacity(declarators.len());

        for declarator in declarators {
            // the identifier's line, not the `=` of an initializer
            let (name, line, initialized) = match declarator {
                AstNode::Leaf {
                    leaf: Leaf::Ident(name),
                    location,
                } => (name.as_str(), location.line, false),
                AstNode::Internal {
                    label: Label::Assign,
                    children,
                    ..
                } if children.len() == 2 => match children[0].as_ident() {
                    Some(name) => (name, children[0].location().line, true),
                    None => {
                        out.push(self.unknown_construct(declarator));
                        continue;
                    }
                },
                _ => {
                    out.push(self.unknown_construct(declarator));
                    continue;
                }
            };

            let declared = match self.symbols.declare(name, ty, line) {
                Ok(symbol) => Typed::new(symbol.ty, symbol.value),
                Err(err) => {
                    self.report(err);
                    out.push(TreeNode::from(declarator).poisoned());
                    continue;
                }
            };

            if initialized {
                out.push(self.check_assignment(declarator));
            } else {
                out.push(TreeNode::new(name, Vec::new(), line).typed(declared));
            }
        }

        TreeNode::new(Label::Decl(ty).to_string(), out, location.line)
    }

    /// Check `target = expr`
    pub(crate) fn check_assignment(&mut self, node: &AstNode) -> TreeNode {
        let children = node.children();
        let line = node.location().line;

        let Some(name) = children.first().and_then(AstNode::as_ident) else {
            return self.unknown_construct(node);
        };

        let declared = match self.symbols.lookup(name, line) {
            Ok(symbol) => symbol.ty,
            Err(err) => {
                self.report(err);
                return TreeNode::from(node).poisoned();
            }
        };

        let (rhs_tree, rhs) = self.check_expression(&children[1]);

        let stored = if rhs.is_error() {
            None
        } else if rhs.ty == declared {
            rhs.value
        } else {
            if !rhs.ty.widens_to(declared) {
                self.report(SemanticError::TypeMismatch {
                    construct: format!("{} =", name),
                    expected: declared.to_string(),
                    found: rhs.ty.to_string(),
                    line,
                });
            }
            rhs.value.and_then(|v| v.coerce_to(declared))
        };

        // The lookup above guarantees the entry exists
        if let Err(err) = self.symbols.assign(name, stored, line) {
            self.report(err);
        }

        let result = Typed::new(declared, stored);
        let target = TreeNode::new(name, Vec::new(), children[0].location().line).typed(result);
        TreeNode::new(Label::Assign.to_string(), vec![target, rhs_tree], line).typed(result)
    }

    fn check_condition(&mut self, construct: Label, condition: &AstNode) -> TreeNode {
        let (tree, typed) = self.check_expression(condition);

        if !typed.is_error() && typed.ty != Type::Boolean {
            self.report(SemanticError::ConditionTypeError {
                construct: construct.to_string(),
                found: typed.ty,
                line: condition.location().line,
            });
        }

        tree
    }

    fn check_cin(&mut self, node: &AstNode, target: &AstNode) -> TreeNode {
        let line = node.location().line;
        let Some(name) = target.as_ident() else {
            return self.unknown_construct(node);
        };

        let target_tree = match self.symbols.assign(name, None, line) {
            Ok(symbol) => TreeNode::new(name, Vec::new(), line).typed(Typed::new(symbol.ty, None)),
            Err(err) => {
                self.report(err);
                TreeNode::new(name, Vec::new(), line).poisoned()
            }
        };

        TreeNode::new(Label::Cin.to_string(), vec![target_tree], line)
    }
}
