//! Tree shape tests: node structure, tokens kept on nodes, and the
//! debug rendering contract.

mod common;

use axis::{Expr, Literal, Stmt, TokenKind, parse_str};
use common::debug;

// -----------------------------------------------------------
// Node structure.
// -----------------------------------------------------------

#[test]
fn binary_node_keeps_operator_token() {
    let program = parse_str("1 +\n2;").unwrap();
    let Stmt::Expression { expression, token } = &program.statements[0];
    assert_eq!(token.kind, TokenKind::Number);
    assert_eq!(token.lexeme(), "1");

    let Expr::Binary {
        left,
        operator,
        right,
    } = expression
    else {
        panic!("expected binary, got {expression:?}");
    };
    assert_eq!(operator.kind, TokenKind::Plus);
    assert_eq!(operator.line, 1);
    assert!(matches!(
        **left,
        Expr::Literal {
            value: Literal::Number(n),
            ..
        } if n == 1.0
    ));
    assert!(matches!(
        **right,
        Expr::Literal { token, .. } if token.line == 2
    ));
}

#[test]
fn logical_node_for_and_or() {
    let program = parse_str("True and False;").unwrap();
    let Stmt::Expression { expression, .. } = &program.statements[0];
    assert!(matches!(
        expression,
        Expr::Logical { operator, .. } if operator.kind == TokenKind::And
    ));
}

#[test]
fn grouping_keeps_open_paren() {
    let program = parse_str("(\"x\");").unwrap();
    let Stmt::Expression { expression, .. } = &program.statements[0];
    let Expr::Grouping { expression, paren } = expression else {
        panic!("expected grouping");
    };
    assert_eq!(paren.kind, TokenKind::LeftParen);
    assert!(matches!(
        **expression,
        Expr::Literal {
            value: Literal::String("x"),
            ..
        }
    ));
}

#[test]
fn class_statement_token_is_first_expression_token() {
    let program = parse_str("class 5;").unwrap();
    let Stmt::Expression { token, .. } = &program.statements[0];
    assert_eq!(token.lexeme(), "5");
}

#[test]
fn statements_keep_source_order() {
    let program = parse_str("3; 1; 2;").unwrap();
    let firsts: Vec<_> = program
        .statements
        .iter()
        .map(|Stmt::Expression { token, .. }| token.lexeme())
        .collect();
    assert_eq!(firsts, vec!["3", "1", "2"]);
}

// -----------------------------------------------------------
// Rendering.
// -----------------------------------------------------------

#[test]
fn rendering_is_idempotent() {
    let program = parse_str("(1 + 2) * -3; \"s\" == None;").unwrap();
    let first = program.debug();
    let second = program.debug();
    assert_eq!(first, second);
    assert_eq!(first, program.to_string());
}

#[test]
fn statement_and_expression_render_independently() {
    let program = parse_str("!True;").unwrap();
    let Stmt::Expression { expression, .. } = &program.statements[0];
    assert_eq!(expression.debug(), "(! true)");
    assert_eq!(program.statements[0].debug(), "(! true);");
}

#[test]
fn program_joins_with_newlines() {
    assert_eq!(debug("1;2;3;"), "1;\n2;\n3;");
}

#[test]
fn empty_program_renders_empty() {
    assert_eq!(debug(""), "");
    assert_eq!(debug("// only a comment"), "");
}

#[test]
fn trees_compare_structurally() {
    let a = parse_str("1 + 2;").unwrap();
    let b = parse_str("1 + 2;").unwrap();
    assert_eq!(a, b);
}
