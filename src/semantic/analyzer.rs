// Semantic analysis engine

use crate::parser::ast::AstNode;
use crate::semantic::errors::SemanticError;
use crate::semantic::symbols::SymbolTable;
use crate::semantic::tree::TreeNode;
use log::debug;

/// Callback receiving each diagnostic as soon as it is found
pub type DiagnosticSink<'a> = Box<dyn FnMut(&SemanticError) + 'a>;

/// Output of one analysis run
#[derive(Debug)]
pub struct Analysis {
    /// Annotated copy of the AST
    pub tree: TreeNode,
    pub symbols: SymbolTable,
    /// Diagnostics in the order they were found
    pub diagnostics: Vec<SemanticError>,
}

impl Analysis {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Walks an AST once, filling the symbol table and building the annotated
/// tree. All state is owned by the analyzer and handed out by [`Analyzer::analyze`].
pub struct Analyzer<'a> {
    pub(crate) symbols: SymbolTable,
    diagnostics: Vec<SemanticError>,
    sink: Option<DiagnosticSink<'a>>,
}

impl<'a> Analyzer<'a> {
    pub fn new() -> Self {
        Self {
            symbols: SymbolTable::new(),
            diagnostics: Vec::new(),
            sink: None,
        }
    }

    /// Analyzer that also forwards every diagnostic to `sink`
    pub fn with_sink(sink: impl FnMut(&SemanticError) + 'a) -> Self {
        Self {
            sink: Some(Box::new(sink)),
            ..Self::new()
        }
    }

    pub fn analyze(mut self, program: &AstNode) -> Analysis {
        let tree = self.check_statement(program);

        debug!(
            "analysis finished: {} symbols, {} diagnostics",
            self.symbols.len(),
            self.diagnostics.len()
        );

        Analysis {
            tree,
            symbols: self.symbols,
            diagnostics: self.diagnostics,
        }
    }

    /// Record a diagnostic and pass it to the sink
    pub(crate) fn report(&mut self, error: SemanticError) {
        debug!("{}", error);
        if let Some(sink) = self.sink.as_mut() {
            sink(&error);
        }
        self.diagnostics.push(error);
    }

    /// Report a node the walk has no rule for and return it unresolved
    pub(crate) fn unknown_construct(&mut self, node: &AstNode) -> TreeNode {
        self.report(SemanticError::UnknownConstruct {
            label: node.display_label(),
            line: node.location().line,
        });
        TreeNode::from(node).poisoned()
    }
}

impl Default for Analyzer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Analyze `program` with a fresh symbol table
pub fn analyze(program: &AstNode) -> Analysis {
    Analyzer::new().analyze(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::Type;
    use crate::parser::parse::Parser;
    use crate::semantic::value::Value;

    fn run(source: &str) -> Analysis {
        let ast = Parser::new(source).parse_program().unwrap();
        analyze(&ast)
    }

    #[test]
    fn test_clean_program() {
        let analysis = run("main { int a, b; a = 3; b = a + 2; if (a < b) { cout b; } }");

        assert!(analysis.is_clean(), "{:?}", analysis.diagnostics);
        let a = analysis.symbols.get("a").unwrap();
        let b = analysis.symbols.get("b").unwrap();
        assert_eq!((a.ty, a.register), (Type::Int, 0));
        assert_eq!((b.ty, b.register), (Type::Int, 1));
        assert_eq!(b.value, Some(Value::Int(5)));

        let condition = &analysis.tree.find("if").unwrap().children[0];
        assert_eq!(condition.ty, Some(Type::Boolean));
        assert_eq!(condition.value, Some(Value::Bool(true)));
    }

    #[test]
    fn test_operand_mismatch_reported_once() {
        let analysis = run("main { int a; float b; a = 1; b = a + 2.0; }");

        assert_eq!(analysis.diagnostics.len(), 1);
        assert!(matches!(
            &analysis.diagnostics[0],
            SemanticError::TypeMismatch { construct, .. } if construct == "+"
        ));
        let b = analysis.symbols.get("b").unwrap();
        assert!(b.lines.contains(&1));
        assert_eq!(b.value, None);
    }

    #[test]
    fn test_sink_sees_diagnostics_in_order() {
        let mut seen = Vec::new();
        let ast = Parser::new("main {\n cin x;\n y = 1;\n}").parse_program().unwrap();
        let analysis = Analyzer::with_sink(|e: &SemanticError| seen.push(e.line())).analyze(&ast);

        assert_eq!(analysis.diagnostics.len(), 2);
        assert_eq!(seen, vec![2, 3]);
    }

    #[test]
    fn test_unknown_construct_in_expression_position() {
        use crate::parser::ast::{Label, Leaf, SourceLocation};

        let loc = SourceLocation::new(1, 1);
        let stray = AstNode::internal(Label::Cout, vec![AstNode::leaf(Leaf::Int(1), loc)], loc);
        let program = AstNode::internal(
            Label::Main,
            vec![AstNode::internal(
                Label::Do,
                vec![AstNode::internal(Label::Block, vec![], loc), stray],
                loc,
            )],
            loc,
        );

        let analysis = analyze(&program);
        assert_eq!(analysis.diagnostics.len(), 1);
        assert_eq!(analysis.diagnostics[0].kind_name(), "UnknownConstruct");
    }
}
