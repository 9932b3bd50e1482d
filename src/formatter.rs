//! Pretty-printer that serializes a syntax tree back into source text.
//!
//! One statement per line, single spaces around binary and logical
//! operators, parentheses only where the tree has a grouping, and
//! literals exactly as they were written.

use crate::ast::{Expr, Program, Stmt};

/// Format a `Program` as canonical source.
///
/// Parsing the output again yields a tree with the same debug
/// rendering.
#[must_use]
pub fn format(program: &Program<'_>) -> String {
    let mut out = String::new();
    for stmt in &program.statements {
        format_stmt(&mut out, stmt);
    }
    out
}

fn format_stmt(out: &mut String, stmt: &Stmt<'_>) {
    match stmt {
        Stmt::Expression { expression, .. } => {
            format_expr(out, expression);
            out.push_str(";\n");
        }
    }
}

fn format_expr(out: &mut String, expr: &Expr<'_>) {
    match expr {
        Expr::Literal { token, .. } => out.push_str(token.lexeme()),
        Expr::Grouping { expression, .. } => {
            out.push('(');
            format_expr(out, expression);
            out.push(')');
        }
        Expr::Unary { operator, right } => {
            out.push_str(operator.lexeme());
            format_expr(out, right);
        }
        Expr::Binary {
            left,
            operator,
            right,
        }
        | Expr::Logical {
            left,
            operator,
            right,
        } => {
            format_expr(out, left);
            out.push(' ');
            out.push_str(operator.lexeme());
            out.push(' ');
            format_expr(out, right);
        }
    }
}
