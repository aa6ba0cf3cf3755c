// AST (Abstract Syntax Tree) definitions for the minic front end

use serde::Serialize;
use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Static types of the language.
///
/// `Error` never comes out of a declaration; the analyzer uses it to mark a
/// poisoned subtree so that later comparisons against it stay silent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Type {
    Int,
    Float,
    Double,
    Char,
    String,
    Boolean,
    Error,
}

impl Type {
    pub fn name(&self) -> &'static str {
        match self {
            Type::Int => "int",
            Type::Float => "float",
            Type::Double => "double",
            Type::Char => "char",
            Type::String => "string",
            Type::Boolean => "boolean",
            Type::Error => "error",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Type::Error)
    }

    /// Types with arithmetic defined on them
    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Int | Type::Float | Type::Double)
    }

    /// Whether a value of this type may be used where `target` is expected
    /// without a diagnostic. Only `float` widens, to `double`.
    pub fn widens_to(&self, target: Type) -> bool {
        *self == target || (*self == Type::Float && target == Type::Double)
    }

    /// Common operand type of a binary operator, if the two types agree
    pub fn unify(self, other: Type) -> Option<Type> {
        if self.widens_to(other) {
            Some(other)
        } else if other.widens_to(self) {
            Some(self)
        } else {
            None
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    // Relational / equality
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl BinOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Pow => "^",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
        }
    }

    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Mod | BinOp::Pow
        )
    }

    pub fn is_relational(&self) -> bool {
        !self.is_arithmetic()
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// `and` / `or`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            LogicalOp::And => "and",
            LogicalOp::Or => "or",
        }
    }
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Label of an internal node: a keyword, an operator, or a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Main,
    Decl(Type),
    Assign,
    If,
    Else,
    Block,
    While,
    Do,
    Cin,
    Cout,
    Binary(BinOp),
    Logical(LogicalOp),
}

impl Label {
    /// Allowed child count as `(min, max)`; `None` means unbounded.
    pub fn arity(&self) -> (usize, Option<usize>) {
        match self {
            Label::Main | Label::Block | Label::Else => (0, None),
            Label::Decl(_) => (1, None),
            Label::If => (2, Some(3)),
            Label::While => (1, Some(2)),
            Label::Cin | Label::Cout => (1, Some(1)),
            Label::Assign | Label::Do | Label::Binary(_) | Label::Logical(_) => (2, Some(2)),
        }
    }

    pub fn accepts_arity(&self, count: usize) -> bool {
        let (min, max) = self.arity();
        count >= min && max.map_or(true, |max| count <= max)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Main => f.write_str("main"),
            Label::Decl(ty) => write!(f, "{}", ty),
            Label::Assign => f.write_str("="),
            Label::If => f.write_str("if"),
            Label::Else => f.write_str("else"),
            Label::Block => f.write_str("block"),
            Label::While => f.write_str("while"),
            Label::Do => f.write_str("do"),
            Label::Cin => f.write_str("cin"),
            Label::Cout => f.write_str("cout"),
            Label::Binary(op) => write!(f, "{}", op),
            Label::Logical(op) => write!(f, "{}", op),
        }
    }
}

/// Leaf payload: an identifier or a numeric literal
#[derive(Debug, Clone, PartialEq)]
pub enum Leaf {
    Ident(String),
    Int(i64),
    Float(f64),
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leaf::Ident(name) => f.write_str(name),
            Leaf::Int(n) => write!(f, "{}", n),
            // Debug keeps the trailing ".0" on whole floats
            Leaf::Float(x) => write!(f, "{:?}", x),
        }
    }
}

/// AST nodes: every node is either a leaf or a labelled internal node.
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    Leaf {
        leaf: Leaf,
        location: SourceLocation,
    },
    Internal {
        label: Label,
        children: Vec<AstNode>,
        location: SourceLocation,
    },
}

impl AstNode {
    pub fn leaf(leaf: Leaf, location: SourceLocation) -> Self {
        AstNode::Leaf { leaf, location }
    }

    pub fn ident(name: impl Into<String>, location: SourceLocation) -> Self {
        AstNode::Leaf {
            leaf: Leaf::Ident(name.into()),
            location,
        }
    }

    pub fn internal(label: Label, children: Vec<AstNode>, location: SourceLocation) -> Self {
        AstNode::Internal {
            label,
            children,
            location,
        }
    }

    /// Get the source location of this node
    pub fn location(&self) -> SourceLocation {
        match self {
            AstNode::Leaf { location, .. } => *location,
            AstNode::Internal { location, .. } => *location,
        }
    }

    pub fn label(&self) -> Option<Label> {
        match self {
            AstNode::Internal { label, .. } => Some(*label),
            AstNode::Leaf { .. } => None,
        }
    }

    pub fn children(&self) -> &[AstNode] {
        match self {
            AstNode::Internal { children, .. } => children,
            AstNode::Leaf { .. } => &[],
        }
    }

    /// Identifier name if this node is an identifier leaf
    pub fn as_ident(&self) -> Option<&str> {
        match self {
            AstNode::Leaf {
                leaf: Leaf::Ident(name),
                ..
            } => Some(name),
            _ => None,
        }
    }

    /// Text shown for this node in tree documents
    pub fn display_label(&self) -> String {
        match self {
            AstNode::Leaf { leaf, .. } => leaf.to_string(),
            AstNode::Internal { label, .. } => label.to_string(),
        }
    }

    /// Number of leaves in the subtree
    pub fn leaf_count(&self) -> usize {
        match self {
            AstNode::Leaf { .. } => 1,
            AstNode::Internal { children, .. } => children.iter().map(AstNode::leaf_count).sum(),
        }
    }

    /// Check every internal node's child count against its label, and that
    /// assignment and `cin` targets are identifiers.
    pub fn is_well_formed(&self) -> bool {
        match self {
            AstNode::Leaf { .. } => true,
            AstNode::Internal {
                label, children, ..
            } => {
                if !label.accepts_arity(children.len()) {
                    return false;
                }
                let target_ok = match label {
                    Label::Assign | Label::Cin => children[0].as_ident().is_some(),
                    _ => true,
                };
                target_ok && children.iter().all(AstNode::is_well_formed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_arity() {
        assert!(Label::If.accepts_arity(2));
        assert!(Label::If.accepts_arity(3));
        assert!(!Label::If.accepts_arity(4));
        assert!(!Label::Binary(BinOp::Add).accepts_arity(1));
        assert!(Label::Main.accepts_arity(0));
        assert!(!Label::Decl(Type::Int).accepts_arity(0));
    }

    #[test]
    fn test_type_unify() {
        assert_eq!(Type::Float.unify(Type::Double), Some(Type::Double));
        assert_eq!(Type::Double.unify(Type::Float), Some(Type::Double));
        assert_eq!(Type::Int.unify(Type::Int), Some(Type::Int));
        assert_eq!(Type::Int.unify(Type::Float), None);
        assert!(!Type::Double.widens_to(Type::Float));
    }

    #[test]
    fn test_well_formed_rejects_literal_assignment_target() {
        let loc = SourceLocation::new(1, 1);
        let node = AstNode::internal(
            Label::Assign,
            vec![
                AstNode::leaf(Leaf::Int(1), loc),
                AstNode::leaf(Leaf::Int(2), loc),
            ],
            loc,
        );
        assert!(!node.is_well_formed());
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(Label::Decl(Type::Boolean).to_string(), "boolean");
        assert_eq!(Label::Binary(BinOp::Le).to_string(), "<=");
        assert_eq!(Leaf::Float(2.0).to_string(), "2.0");
    }
}
