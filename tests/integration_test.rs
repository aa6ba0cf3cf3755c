// Integration tests for the minic front end

use std::fs;
use std::path::PathBuf;

use minic::config::Config;
use minic::parser::ast::{Label, Type};
use minic::parser::lexer::{LexErrorKind, Lexer, TokenKind};
use minic::parser::parse::Parser;
use minic::pipeline::{compile, compile_with_sink, Diagnostic, Stage};
use minic::report;
use minic::semantic::errors::SemanticError;
use minic::semantic::value::Value;

fn demo(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos").join(name);
    fs::read_to_string(&path).expect("demo file missing")
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("minic-{}-{}", name, std::process::id()));
    fs::create_dir_all(&dir).expect("cannot create scratch dir");
    dir
}

#[test]
fn test_valid_program_parses_well_formed() {
    let source = "main { int a, b; a = 3; b = a + 2; if (a < b) { cout b; } }";
    let ast = Parser::new(source).parse_program().expect("Parsing failed");

    assert_eq!(ast.label(), Some(Label::Main));
    assert!(ast.is_well_formed());
    assert_eq!(ast.leaf_count(), 10);
}

#[test]
fn test_demo_program_parses_well_formed() {
    let ast = Parser::new(&demo("sample.mc"))
        .parse_program()
        .expect("Parsing failed");

    assert!(ast.is_well_formed());
}

#[test]
fn test_syntax_error_reports_offending_line() {
    let source = "main {\n    int a;\n    a = ;\n}\n";
    let err = Parser::new(source).parse_program().unwrap_err();
    assert_eq!(err.location.line, 3);

    let source = "main {\n    int a;\n    a = 1\n    cout a;\n}\n";
    let err = Parser::new(source).parse_program().unwrap_err();
    assert_eq!(err.location.line, 4);
}

#[test]
fn test_syntax_error_stops_the_run() {
    let compilation = compile("main {\n    cin x;\n    if { }\n}");

    assert!(compilation.ast.is_none());
    assert!(compilation.analysis.is_none());
    assert_eq!(compilation.diagnostics.len(), 1);
    assert_eq!(compilation.syntax_error().map(|e| e.location.line), Some(3));
}

#[test]
fn test_lexing_is_deterministic() {
    let source = demo("errors.mc");
    let first = Lexer::new(&source).tokenize();
    let second = Lexer::new(&source).tokenize();

    assert_eq!(first, second);
}

#[test]
fn test_lexing_consumes_every_character() {
    let source = demo("sample.mc");
    let tokens = Lexer::new(&source).tokenize();

    let consumed: String = tokens.iter().map(|t| t.lexeme.as_str()).collect();
    let expected: String = source.chars().filter(|c| !c.is_whitespace()).collect();
    let consumed: String = consumed.chars().filter(|c| !c.is_whitespace()).collect();
    assert_eq!(consumed, expected);
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
}

#[test]
fn test_same_type_redeclaration_keeps_register() {
    let compilation = compile("main {\n    int x;\n    float y;\n    int x;\n}");

    assert!(compilation.is_clean(), "{:?}", compilation.diagnostics);
    let symbols = &compilation.analysis.as_ref().unwrap().symbols;
    let x = symbols.get("x").unwrap();
    assert_eq!(x.register, 0);
    assert_eq!(x.lines.iter().copied().collect::<Vec<_>>(), vec![2, 4]);
}

#[test]
fn test_conflicting_redeclaration_names_original_line() {
    let compilation = compile("main {\n    int x;\n    float x;\n}");

    match compilation.semantic_errors() {
        [SemanticError::TypeConflict {
            declared_line,
            line,
            declared,
            found,
            ..
        }] => {
            assert_eq!((*declared_line, *line), (2, 3));
            assert_eq!((*declared, *found), (Type::Int, Type::Float));
        }
        other => panic!("expected one TypeConflict, got {:?}", other),
    }
}

#[test]
fn test_cin_requires_declaration() {
    let before = compile("main { cin x; int x; }");
    assert!(matches!(
        before.semantic_errors(),
        [SemanticError::UndeclaredVariable { name, .. }] if name == "x"
    ));

    let after = compile("main { int x; cin x; }");
    assert!(after.is_clean(), "{:?}", after.diagnostics);
}

#[test]
fn test_clean_example() {
    let compilation = compile("main { int a, b; a = 3; b = a + 2; if (a < b) { cout b; } }");
    assert!(compilation.is_clean(), "{:?}", compilation.diagnostics);

    let analysis = compilation.analysis.unwrap();
    let a = analysis.symbols.get("a").unwrap();
    let b = analysis.symbols.get("b").unwrap();
    assert_eq!((a.ty, a.register), (Type::Int, 0));
    assert_eq!((b.ty, b.register), (Type::Int, 1));

    let condition = &analysis.tree.find("if").unwrap().children[0];
    assert_eq!(condition.ty, Some(Type::Boolean));
}

#[test]
fn test_operand_mismatch_example() {
    let compilation = compile("main { int a; float b; a = 1; b = a + 2.0; }");

    let errors = compilation.semantic_errors();
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        &errors[0],
        SemanticError::TypeMismatch { construct, .. } if construct == "+"
    ));

    let analysis = compilation.analysis.as_ref().unwrap();
    assert_eq!(analysis.symbols.get("a").unwrap().value, Some(Value::Int(1)));
}

#[test]
fn test_operand_mismatch_still_records_assignment() {
    let source = "main {\n    int a;\n    float b;\n    a = 1;\n    b = a + 2.0;\n    cout b;\n}";
    let compilation = compile(source);

    assert_eq!(compilation.semantic_errors().len(), 1);
    assert_eq!(compilation.semantic_errors()[0].line(), 5);

    let b = compilation.analysis.as_ref().unwrap().symbols.get("b").unwrap();
    assert_eq!(b.lines.iter().copied().collect::<Vec<_>>(), vec![3, 5, 6]);
    assert_eq!(b.value, None);
}

#[test]
fn test_unterminated_comment_is_one_error() {
    let tokens = Lexer::new("main { int a; }\n/* never closed\nint b;\n").tokenize();

    let errors: Vec<_> = tokens.iter().filter(|t| t.is_error()).collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, TokenKind::Error(LexErrorKind::UnterminatedComment));
    assert_eq!(errors[0].location.line, 2);

    // nothing after the comment opener is tokenized
    let opener = tokens.iter().position(|t| t.is_error()).unwrap();
    assert_eq!(tokens.len(), opener + 2);
    assert_eq!(tokens[opener + 1].kind, TokenKind::Eof);
}

#[test]
fn test_trailing_dot_is_error_token() {
    let tokens = Lexer::new("3.").tokenize();

    assert_eq!(tokens[0].kind, TokenKind::Error(LexErrorKind::MalformedNumber));
    assert_eq!(tokens[0].lexeme, "3.");
}

#[test]
fn test_sample_demo_is_clean() {
    let compilation = compile(&demo("sample.mc"));

    assert!(compilation.is_clean(), "{:?}", compilation.diagnostics);
    assert!(compilation.analysis.unwrap().symbols.len() >= 3);
}

#[test]
fn test_error_demo_reports_every_stage_in_order() {
    let mut streamed = Vec::new();
    let compilation = compile_with_sink(&demo("errors.mc"), Stage::Check, |d| {
        streamed.push(d.clone())
    });

    assert_eq!(streamed, compilation.diagnostics);
    assert!(compilation.syntax_error().is_none());
    assert_eq!(compilation.lexical_errors().count(), 2);

    let kinds: Vec<&str> = compilation
        .semantic_errors()
        .iter()
        .map(SemanticError::kind_name)
        .collect();
    assert_eq!(
        kinds,
        vec![
            "TypeMismatch",
            "TypeConflict",
            "UndeclaredVariable",
            "ConditionTypeError"
        ]
    );

    // lexical problems come first, whatever their line
    assert!(matches!(compilation.diagnostics[0], Diagnostic::Lexical(_)));
    assert!(matches!(compilation.diagnostics[1], Diagnostic::Lexical(_)));
}

#[test]
fn test_lex_stage_skips_parsing() {
    let compilation = compile_with_sink("main { a = ; }", Stage::Lex, |_| {});

    assert!(compilation.ast.is_none());
    assert!(compilation.is_clean());
}

#[test]
fn test_artifacts_written() {
    let dir = scratch_dir("artifacts");
    let config = Config::default().with_output_dir(&dir);
    let compilation = compile("main { int a; a = 2 * 3; }");

    let written = report::write_artifacts(&config, &compilation).expect("writing failed");
    assert_eq!(written.len(), 4);

    let tokens = fs::read_to_string(config.tokens_path()).unwrap();
    assert!(tokens.starts_with("RESERVED_WORD: main (line 1, column 1)"));

    let annotated: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(config.annotated_path()).unwrap()).unwrap();
    assert_eq!(annotated["label"], "main");

    let symbols = fs::read_to_string(config.symbols_path()).unwrap();
    assert!(symbols.lines().any(|l| l.starts_with("a ") && l.contains('6')));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_artifacts_truncated_after_syntax_error() {
    let dir = scratch_dir("truncated");
    let config = Config::default().with_output_dir(&dir);

    report::write_artifacts(&config, &compile("main { int a; }")).unwrap();
    assert!(!fs::read_to_string(config.symbols_path()).unwrap().is_empty());

    report::write_artifacts(&config, &compile("main { int a }")).unwrap();
    assert!(fs::read_to_string(config.tree_path()).unwrap().is_empty());
    assert!(fs::read_to_string(config.symbols_path()).unwrap().is_empty());
    assert!(!fs::read_to_string(config.tokens_path()).unwrap().is_empty());

    fs::remove_dir_all(&dir).ok();
}
