//! Tree documents
//!
//! [`TreeNode`] is the serialized shape shared by the syntax tree and the
//! annotated tree: `{label, children, type?, value?}`. The syntax tree is a
//! plain conversion of the AST; the analyzer builds the annotated one.

use crate::parser::ast::{AstNode, Type};
use crate::semantic::value::{Typed, Value};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode {
    pub label: String,
    pub children: Vec<TreeNode>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<Type>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip)]
    pub line: usize,
}

impl TreeNode {
    pub fn new(label: impl Into<String>, children: Vec<TreeNode>, line: usize) -> Self {
        Self {
            label: label.into(),
            children,
            ty: None,
            value: None,
            line,
        }
    }

    /// Attach a type and value
    pub fn typed(mut self, typed: Typed) -> Self {
        self.ty = Some(typed.ty);
        self.value = typed.value;
        self
    }

    /// Mark as unresolved
    pub fn poisoned(self) -> Self {
        self.typed(Typed::error())
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Pretty-printed JSON document
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// First node in pre-order with the given label
    pub fn find(&self, label: &str) -> Option<&TreeNode> {
        if self.label == label {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(label))
    }

    /// Count nodes in the subtree
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(TreeNode::size).sum::<usize>()
    }
}

impl From<&AstNode> for TreeNode {
    fn from(node: &AstNode) -> Self {
        TreeNode::new(
            node.display_label(),
            node.children().iter().map(TreeNode::from).collect(),
            node.location().line,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::{BinOp, Label, Leaf, SourceLocation};

    fn sample() -> AstNode {
        let loc = SourceLocation::new(2, 5);
        AstNode::internal(
            Label::Binary(BinOp::Add),
            vec![
                AstNode::ident("a", loc),
                AstNode::leaf(Leaf::Float(2.0), loc),
            ],
            loc,
        )
    }

    #[test]
    fn test_untyped_conversion() {
        let tree = TreeNode::from(&sample());
        assert_eq!(tree.label, "+");
        assert_eq!(tree.children[1].label, "2.0");
        assert_eq!(tree.line, 2);
        assert_eq!(tree.size(), 3);

        let json = tree.to_json().unwrap();
        assert!(!json.contains("\"type\""));
        assert!(!json.contains("\"line\""));
    }

    #[test]
    fn test_typed_serialization() {
        let tree =
            TreeNode::new("x", Vec::new(), 1).typed(Typed::new(Type::Int, Some(Value::Int(4))));
        let json: serde_json::Value = serde_json::from_str(&tree.to_json().unwrap()).unwrap();

        assert_eq!(json["type"], "int");
        assert_eq!(json["value"], 4);
        assert_eq!(json["children"], serde_json::json!([]));
    }

    #[test]
    fn test_poisoned_has_no_value() {
        let tree = TreeNode::new("+", Vec::new(), 1).poisoned();
        let json = tree.to_json().unwrap();
        assert!(json.contains("\"error\""));
        assert!(!json.contains("\"value\""));
    }

    #[test]
    fn test_find() {
        let tree = TreeNode::from(&sample());
        assert!(tree.find("a").is_some());
        assert!(tree.find("while").is_none());
    }
}
