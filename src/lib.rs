//! Front-end for the Axis experimental language: a pull-based lexer,
//! a recursive-descent parser with panic-mode error recovery, and the
//! syntax tree it produces.
//!
//! # Quick start
//!
//! ## Parse and print the tree
//!
//! ```
//! use axis::parse_str;
//!
//! let program = parse_str("1 + 2 * 3;").unwrap();
//! assert_eq!(program.debug(), "(+ 1 (* 2 3));");
//! ```
//!
//! ## Keep going past errors
//!
//! ```
//! use axis::{Lexer, Parser};
//!
//! let mut messages = Vec::new();
//! let rendered = {
//!     let mut parser = Parser::with_error_handler(Lexer::new("1 + ; 2;"), |line, msg| {
//!         messages.push(format!("[line {line}] {msg}"));
//!     });
//!     let program = parser.parse_program();
//!     assert!(parser.had_error());
//!     program.debug()
//! };
//! assert_eq!(rendered, "2;");
//! assert_eq!(messages, ["[line 1] Expect expression."]);
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod ast;
pub mod chars;
pub mod formatter;
pub mod keywords;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::{Expr, Literal, Program, Stmt};
pub use formatter::format;
pub use lexer::{LexError, LexErrorKind, Lexer, Tokens, tokenize};
pub use parser::{MAX_NESTING, ParseError, ParseErrorKind, Parser};
pub use token::{Span, Token, TokenKind};

/// Callback receiving `(line, message)` for each reported error.
pub type ErrorHandler<'a> = Box<dyn FnMut(usize, &str) + 'a>;

/// Unified error type covering both lexing and parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A lexer error.
    #[error("{0}")]
    Lex(#[from] LexError),
    /// A parser error.
    #[error("{0}")]
    Parse(#[from] ParseError),
}

impl Error {
    /// Line the error was reported on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Lex(e) => e.line,
            Self::Parse(e) => e.line,
        }
    }

    /// The bare diagnostic message, without location.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Lex(e) => e.kind.to_string(),
            Self::Parse(e) => e.kind.to_string(),
        }
    }
}

/// Lex and parse a source string in one step.
///
/// Diagnostics are collected instead of printed. If any error was
/// reported the partial program is discarded and every error is
/// returned.
pub fn parse_str(input: &str) -> Result<Program<'_>, Vec<Error>> {
    let mut parser = Parser::with_error_handler(Lexer::new(input), |_, _| {});
    let program = parser.parse_program();
    if parser.had_error() {
        Err(parser.into_errors())
    } else {
        Ok(program)
    }
}
