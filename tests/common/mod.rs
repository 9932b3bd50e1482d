#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use axis::{Lexer, Parser, format, parse_str};

/// Result of a parse with every reported diagnostic captured.
pub struct Parsed {
    pub debug: String,
    pub statements: usize,
    pub had_error: bool,
    pub reported: Vec<(usize, String)>,
}

pub fn parse_capturing(input: &str) -> Parsed {
    let reported = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&reported);
    let mut parser = Parser::with_error_handler(Lexer::new(input), move |line, msg| {
        sink.borrow_mut().push((line, msg.to_string()));
    });
    let program = parser.parse_program();
    let had_error = parser.had_error();
    let reported = reported.borrow().clone();
    Parsed {
        debug: program.debug(),
        statements: program.statements.len(),
        had_error,
        reported,
    }
}

/// Debug rendering of a source that must parse cleanly.
pub fn debug(input: &str) -> String {
    parse_str(input)
        .unwrap_or_else(|errs| panic!("parse failed for {input:?}: {errs:?}"))
        .debug()
}

/// Helper: format a parsed program, parse it back, assert the trees
/// render identically.
pub fn assert_format_roundtrip(input: &str) {
    let original = parse_str(input).expect("parse failed");
    let formatted = format(&original);
    let reparsed = parse_str(&formatted).unwrap_or_else(|e| {
        panic!(
            "failed to re-parse formatted output: {e:?}\n\
             --- formatted ---\n{formatted}"
        )
    });
    assert_eq!(
        original.debug(),
        reparsed.debug(),
        "tree mismatch\n--- formatted ---\n{formatted}"
    );
}
