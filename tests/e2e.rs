//! End-to-end tests over whole programs: golden debug output and
//! diagnostics for mixed valid and invalid input.

mod common;

use axis::{Lexer, Parser, format, parse_str, tokenize};
use common::parse_capturing;

const PROGRAM: &str = "\
// arithmetic
1 + 2 * 3;
(1 + 2) * 3;

// comparisons and logic
1 < 2 == True;
\"axis\" != None or -4 >= 2;
class 10 / 5;
";

#[test]
fn golden_debug_output() {
    let program = parse_str(PROGRAM).unwrap();
    assert_eq!(
        program.debug(),
        "(+ 1 (* 2 3));\n\
         (* (group (+ 1 2)) 3);\n\
         (== (< 1 2) true);\n\
         (or (!= \"axis\" null) (>= (- 4) 2));\n\
         (/ 10 5);"
    );
}

#[test]
fn golden_formatted_output() {
    let program = parse_str(PROGRAM).unwrap();
    assert_eq!(
        format(&program),
        "1 + 2 * 3;\n\
         (1 + 2) * 3;\n\
         1 < 2 == True;\n\
         \"axis\" != None or -4 >= 2;\n\
         10 / 5;\n"
    );
}

#[test]
fn token_count_matches_program() {
    let tokens = tokenize(PROGRAM).unwrap();
    let semicolons = tokens
        .iter()
        .filter(|t| t.kind == axis::TokenKind::Semicolon)
        .count();
    assert_eq!(semicolons, 5);
    assert_eq!(tokens.last().map(|t| t.line), Some(9));
}

#[test]
fn mixed_errors_partial_program() {
    let source = "\
1 + 2;
3 * ;
\"unterminated
";
    let parsed = parse_capturing(source);
    assert!(parsed.had_error);
    assert_eq!(parsed.debug, "(+ 1 2);");
    assert_eq!(parsed.reported, vec![
        (2, "Expect expression.".to_string()),
        (4, "Unterminated string.".to_string()),
    ]);
}

#[test]
fn recovery_across_many_statements() {
    let source = "1; 2 +; 3; (4; 5; @ 6; 7 8; 9;";
    let parsed = parse_capturing(source);
    assert_eq!(parsed.debug, "1;\n3;\n5;\n6;\n9;");
    let messages: Vec<_> = parsed.reported.iter().map(|(_, m)| m.as_str()).collect();
    assert_eq!(messages, vec![
        "Expect expression.",
        "Expect ')' after expression.",
        "Unexpected character: '@'",
        "Expect ';' after expression.",
    ]);
}

#[test]
fn lexer_and_parser_callbacks_are_separate() {
    let mut lex_errors = Vec::new();
    let mut parse_errors = Vec::new();
    {
        let lexer = Lexer::with_error_handler("$;", |line, msg| {
            lex_errors.push((line, msg.to_string()));
        });
        let mut parser = Parser::with_error_handler(lexer, |line, msg| {
            parse_errors.push((line, msg.to_string()));
        });
        parser.parse_program();
        assert!(parser.had_error());
    }
    assert_eq!(lex_errors, vec![(1, "Unexpected character: '$'".to_string())]);
    assert_eq!(parse_errors, vec![
        (1, "Unexpected character: '$'".to_string()),
        (1, "Expect expression.".to_string()),
    ]);
}
