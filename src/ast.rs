//! Syntax tree produced by the parser.
//!
//! Nodes are built bottom-up and never mutated afterwards. Each node
//! owns its children; the whole tree is owned by the [`Program`].
//!
//! `Display` on every node yields the canonical debug rendering:
//! literals as their JSON value, `(group e)` for groupings, and
//! `(op operands...)` for operators.

use std::fmt;

use crate::token::Token;

/// Scalar value of a literal expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal<'src> {
    Number(f64),
    /// String contents without the surrounding quotes. No escapes are
    /// decoded.
    String(&'src str),
    Bool(bool),
    Nil,
}

impl fmt::Display for Literal<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write_number(f, *n),
            Self::String(s) => {
                let quoted = serde_json::to_string(s).map_err(|_| fmt::Error)?;
                f.write_str(&quoted)
            }
            Self::Bool(b) => write!(f, "{b}"),
            Self::Nil => f.write_str("null"),
        }
    }
}

/// Write `n` the way a JSON serializer prints numbers: plain decimal
/// for exponents in `[-7, 21)`, `d.ddde±x` outside it, and `null` for
/// values that are not finite.
fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if !n.is_finite() {
        return f.write_str("null");
    }
    if n < 0.0 {
        f.write_str("-")?;
    }

    // `{:e}` yields the shortest round-tripping digits.
    let sci = format!("{:e}", n.abs());
    let (mantissa, exp) = sci.split_once('e').ok_or(fmt::Error)?;
    let exp: i32 = exp.parse().map_err(|_| fmt::Error)?;
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let count = i32::try_from(digits.len()).map_err(|_| fmt::Error)?;
    // Position of the decimal point relative to the first digit.
    let point = exp + 1;

    if count <= point && point <= 21 {
        f.write_str(&digits)?;
        f.write_str(&"0".repeat(usize::try_from(point - count).unwrap_or(0)))
    } else if 0 < point && point <= 21 {
        let split = usize::try_from(point).map_err(|_| fmt::Error)?;
        write!(f, "{}.{}", &digits[..split], &digits[split..])
    } else if -6 < point && point <= 0 {
        f.write_str("0.")?;
        f.write_str(&"0".repeat(usize::try_from(-point).unwrap_or(0)))?;
        f.write_str(&digits)
    } else {
        let (first, rest) = digits.split_at(1);
        f.write_str(first)?;
        if !rest.is_empty() {
            write!(f, ".{rest}")?;
        }
        let sign = if exp < 0 { '-' } else { '+' };
        write!(f, "e{sign}{}", exp.unsigned_abs())
    }
}

/// Expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr<'src> {
    Literal {
        value: Literal<'src>,
        token: Token<'src>,
    },
    Grouping {
        expression: Box<Self>,
        /// The opening `(`.
        paren: Token<'src>,
    },
    Unary {
        operator: Token<'src>,
        right: Box<Self>,
    },
    Binary {
        left: Box<Self>,
        operator: Token<'src>,
        right: Box<Self>,
    },
    /// `and` / `or`. Short-circuiting is left to later stages.
    Logical {
        left: Box<Self>,
        operator: Token<'src>,
        right: Box<Self>,
    },
}

impl<'src> Expr<'src> {
    #[must_use]
    pub const fn literal(value: Literal<'src>, token: Token<'src>) -> Self {
        Self::Literal { value, token }
    }

    #[must_use]
    pub fn grouping(expression: Self, paren: Token<'src>) -> Self {
        Self::Grouping {
            expression: Box::new(expression),
            paren,
        }
    }

    #[must_use]
    pub fn unary(operator: Token<'src>, right: Self) -> Self {
        Self::Unary {
            operator,
            right: Box::new(right),
        }
    }

    #[must_use]
    pub fn binary(left: Self, operator: Token<'src>, right: Self) -> Self {
        Self::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    #[must_use]
    pub fn logical(left: Self, operator: Token<'src>, right: Self) -> Self {
        Self::Logical {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    /// Canonical debug rendering.
    #[must_use]
    pub fn debug(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Expr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal { value, .. } => write!(f, "{value}"),
            Self::Grouping { expression, .. } => write!(f, "(group {expression})"),
            Self::Unary { operator, right } => write!(f, "({} {right})", operator.lexeme()),
            Self::Binary {
                left,
                operator,
                right,
            }
            | Self::Logical {
                left,
                operator,
                right,
            } => write!(f, "({} {left} {right})", operator.lexeme()),
        }
    }
}

/// Statement node.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt<'src> {
    /// `expression ;`
    Expression {
        expression: Expr<'src>,
        /// First token of the statement.
        token: Token<'src>,
    },
}

impl Stmt<'_> {
    #[must_use]
    pub fn debug(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Stmt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expression { expression, .. } => write!(f, "{expression};"),
        }
    }
}

/// Root of the tree: statements in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program<'src> {
    pub statements: Vec<Stmt<'src>>,
}

impl<'src> Program<'src> {
    #[must_use]
    pub const fn new(statements: Vec<Stmt<'src>>) -> Self {
        Self { statements }
    }

    /// Statements rendered one per line.
    #[must_use]
    pub fn debug(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Program<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stmt) in self.statements.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{stmt}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Span, TokenKind};

    fn tok(kind: TokenKind, source: &str) -> Token<'_> {
        Token::new(kind, source, Span::new(0, source.len()), 1)
    }

    fn num(text: &str) -> Expr<'_> {
        let value = text.parse().expect("numeric literal");
        Expr::literal(Literal::Number(value), tok(TokenKind::Number, text))
    }

    #[test]
    fn literal_rendering() {
        assert_eq!(Literal::Number(1.0).to_string(), "1");
        assert_eq!(Literal::Number(2.5).to_string(), "2.5");
        assert_eq!(Literal::Number(0.0).to_string(), "0");
        assert_eq!(Literal::Number(-0.5).to_string(), "-0.5");
        assert_eq!(Literal::String("hi").to_string(), "\"hi\"");
        assert_eq!(Literal::String("a\"b").to_string(), r#""a\"b""#);
        assert_eq!(Literal::Bool(false).to_string(), "false");
        assert_eq!(Literal::Nil.to_string(), "null");
    }

    #[test]
    fn number_rendering_switches_to_exponent() {
        assert_eq!(Literal::Number(0.000_001).to_string(), "0.000001");
        assert_eq!(Literal::Number(1e-7).to_string(), "1e-7");
        assert_eq!(Literal::Number(1.5e-9).to_string(), "1.5e-9");
        assert_eq!(Literal::Number(1e20).to_string(), "100000000000000000000");
        assert_eq!(Literal::Number(1e21).to_string(), "1e+21");
        assert_eq!(Literal::Number(1.25e30).to_string(), "1.25e+30");
        assert_eq!(Literal::Number(123.456).to_string(), "123.456");
    }

    #[test]
    fn non_finite_numbers_render_as_null() {
        assert_eq!(Literal::Number(f64::INFINITY).to_string(), "null");
        assert_eq!(Literal::Number(f64::NAN).to_string(), "null");
    }

    #[test]
    fn binary_renders_post_order() {
        let expr = Expr::binary(
            num("1"),
            tok(TokenKind::Plus, "+"),
            Expr::binary(num("2"), tok(TokenKind::Star, "*"), num("3")),
        );
        assert_eq!(expr.debug(), "(+ 1 (* 2 3))");
    }

    #[test]
    fn grouping_and_unary() {
        let expr = Expr::unary(
            tok(TokenKind::Minus, "-"),
            Expr::grouping(num("4"), tok(TokenKind::LeftParen, "(")),
        );
        assert_eq!(expr.to_string(), "(- (group 4))");
    }

    #[test]
    fn program_joins_statements() {
        let program = Program::new(vec![
            Stmt::Expression {
                expression: num("1"),
                token: tok(TokenKind::Number, "1"),
            },
            Stmt::Expression {
                expression: num("2"),
                token: tok(TokenKind::Number, "2"),
            },
        ]);
        assert_eq!(program.debug(), "1;\n2;");
    }

    #[test]
    fn empty_program_renders_empty() {
        assert_eq!(Program::default().debug(), "");
    }
}
