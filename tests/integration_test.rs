// Integration tests for the parser

use cjit::diagnostics::{DiagnosticKind, FatalError, MAX_DIAGNOSTICS};
use cjit::parse_source;
use cjit::parser::ast::{AstNode, BinOp, LiteralType};
use cjit::parser::pretty::to_sexpr;
use cjit::table::DeclarationKind;
use test_log::test;

fn sexprs(source: &str) -> Vec<String> {
    let parsed = parse_source(source, "test.cj").expect("Parsing failed");
    let program = parsed.program;
    assert!(
        program.diagnostics.is_empty(),
        "Unexpected diagnostics: {:?}",
        program.diagnostics
    );
    program
        .statements
        .iter()
        .map(|&id| to_sexpr(&program.arena, id))
        .collect()
}

#[test]
fn test_multiplication_binds_tighter() {
    let parsed = parse_source("1+2*3;", "test.cj").unwrap();
    let program = parsed.program;
    let root = program.entry().unwrap();

    let AstNode::Binary {
        op: BinOp::Add,
        left,
        right,
        ..
    } = &program.arena[root]
    else {
        panic!("Expected '+' at the root, got {:?}", program.arena[root]);
    };
    assert!(matches!(&program.arena[*left], AstNode::Literal { raw, .. } if raw == "1"));
    assert!(matches!(
        &program.arena[*right],
        AstNode::Binary { op: BinOp::Mul, .. }
    ));
    assert_eq!(to_sexpr(&program.arena, root), "(+ 1 (* 2 3))");
}

#[test]
fn test_parentheses_group() {
    assert_eq!(sexprs("(1+2)*3;"), vec!["(* (+ 1 2) 3)"]);
}

#[test]
fn test_same_precedence_nests_left() {
    assert_eq!(sexprs("1-2-3;"), vec!["(- (- 1 2) 3)"]);
    assert_eq!(sexprs("1-2+3;"), vec!["(+ (- 1 2) 3)"]);
}

#[test]
fn test_declaration_is_recorded() {
    let parsed = parse_source("int x = 5;", "test.cj").unwrap();
    let program = parsed.program;
    let root = program.entry().unwrap();

    match &program.arena[root] {
        AstNode::VariableDeclaration {
            name,
            literal_type,
            initializer,
            ..
        } => {
            assert_eq!(name, "x");
            assert_eq!(*literal_type, LiteralType::Int);
            assert!(matches!(
                &program.arena[*initializer],
                AstNode::Literal { raw, .. } if raw == "5"
            ));
        }
        other => panic!("Expected variable declaration, got {:?}", other),
    }

    let declaration = program.declarations.find("x").expect("x should be declared");
    assert_eq!(declaration.kind, DeclarationKind::Variable);
    assert_eq!(declaration.literal_type, LiteralType::Int);
    assert_eq!(program.symbols.find("x"), Some(&root));
}

#[test]
fn test_program_of_statements() {
    let source = r#"
        int a = 1;
        float b = 2.5 * (3 + 4);
        a = 10 / 2;
        int c = a = 7;
    "#;

    assert_eq!(
        sexprs(source),
        vec![
            "(decl int a 1)",
            "(decl float b (* 2.5 (+ 3 4)))",
            "(= a (/ 10 2))",
            "(decl int c (= a 7))",
        ]
    );
}

#[test]
fn test_arena_children_precede_parents() {
    let parsed = parse_source("int x = (1 + 2) * (3 - 4) / 5;", "test.cj").unwrap();
    let arena = &parsed.program.arena;

    for (id, node) in arena.iter() {
        for child in node.children() {
            assert!(child < id, "{} references later node {}", id, child);
        }
    }
}

#[test]
fn test_recovery_continues_with_next_statement() {
    let source = "int a = ;\nint b = 2;\n)\nfloat c = 1.0;";
    let parsed = parse_source(source, "test.cj").unwrap();
    let program = parsed.program;

    assert_eq!(program.diagnostics.len(), 2);
    assert!(program
        .diagnostics
        .iter()
        .all(|d| d.kind == DiagnosticKind::Syntax));
    assert_eq!(program.diagnostics[0].line(), 1);
    assert_eq!(program.diagnostics[1].line(), 3);

    assert_eq!(program.statements.len(), 2);
    assert!(program.symbols.contains_key("b"));
    assert!(program.symbols.contains_key("c"));
}

#[test]
fn test_too_many_errors_halts() {
    let source = ")".repeat(MAX_DIAGNOSTICS + 1);

    match parse_source(&source, "test.cj") {
        Err(FatalError::TooManyDiagnostics {
            diagnostics,
            overflow,
        }) => {
            assert_eq!(diagnostics.len(), MAX_DIAGNOSTICS);
            assert_eq!(diagnostics[0].column(), 1);
            assert_eq!(overflow.message, "Expected expression, found ')'");
        }
        other => panic!("Expected the run to halt, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_exactly_max_errors_is_not_fatal() {
    let source = ")".repeat(MAX_DIAGNOSTICS);
    let parsed = parse_source(&source, "test.cj").unwrap();

    assert_eq!(parsed.program.diagnostics.len(), MAX_DIAGNOSTICS);
}

#[test]
fn test_lexical_errors_do_not_stop_parsing() {
    let parsed = parse_source("int x = 1 @ ;", "test.cj").unwrap();

    assert_eq!(parsed.lexical_diagnostics.len(), 1);
    assert_eq!(parsed.lexical_diagnostics[0].kind, DiagnosticKind::Lexical);
    assert!(parsed.program.diagnostics.is_empty());
    assert!(parsed.program.declarations.contains_key("x"));
}
