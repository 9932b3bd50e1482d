use std::fmt;

use crate::ast::{Expr, Literal, Program, Stmt};
use crate::lexer::{LexError, Lexer};
use crate::token::{Span, Token, TokenKind};
use crate::{Error, ErrorHandler};

/// Classifies a parser error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// No expression could start at this token.
    ExpectExpression,
    /// Expression statement not terminated by `;`.
    ExpectSemicolon,
    /// Grouping not closed by `)`.
    ExpectRightParen,
    /// Number lexeme that does not parse as a decimal.
    InvalidNumber(String),
    /// Groupings or prefix operators nested past [`MAX_NESTING`].
    TooDeep,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExpectExpression => write!(f, "Expect expression."),
            Self::ExpectSemicolon => write!(f, "Expect ';' after expression."),
            Self::ExpectRightParen => write!(f, "Expect ')' after expression."),
            Self::InvalidNumber(text) => write!(f, "Invalid number literal '{text}'."),
            Self::TooDeep => write!(f, "Too much nesting."),
        }
    }
}

/// Error produced during parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("[line {line}] Error: {kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub line: usize,
}

type ParseResult<T> = Result<T, ParseError>;

/// Deepest run of nested groupings and prefix operators accepted in
/// one expression.
pub const MAX_NESTING: usize = 128;

/// Recursive-descent parser pulling tokens from a [`Lexer`].
///
/// Keeps one token of lookahead (`current`) plus the last accepted
/// token (`previous`). A grammar error abandons the current statement,
/// which is dropped from the program; parsing resumes at the next
/// statement boundary.
pub struct Parser<'src> {
    lexer: Lexer<'src>,
    current: Token<'src>,
    previous: Token<'src>,
    had_error: bool,
    panic_mode: bool,
    depth: usize,
    errors: Vec<Error>,
    on_error: Option<ErrorHandler<'src>>,
}

impl<'src> Parser<'src> {
    /// Create a parser that reports errors to stderr.
    #[must_use]
    pub fn new(lexer: Lexer<'src>) -> Self {
        Self::build(lexer, None)
    }

    /// Create a parser that reports every error to `handler` as
    /// `(line, message)`.
    #[must_use]
    pub fn with_error_handler(
        lexer: Lexer<'src>,
        handler: impl FnMut(usize, &str) + 'src,
    ) -> Self {
        Self::build(lexer, Some(Box::new(handler)))
    }

    fn build(lexer: Lexer<'src>, on_error: Option<ErrorHandler<'src>>) -> Self {
        let start = Token::new(TokenKind::Eof, lexer.source(), Span::default(), 1);
        let mut parser = Self {
            lexer,
            current: start,
            previous: start,
            had_error: false,
            panic_mode: false,
            depth: 0,
            errors: Vec::new(),
            on_error,
        };
        parser.advance();
        parser
    }

    /// Whether any scan or parse error was reported. Never cleared.
    #[must_use]
    pub const fn had_error(&self) -> bool {
        self.had_error
    }

    /// Errors reported so far, in order.
    #[must_use]
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    #[must_use]
    pub fn into_errors(self) -> Vec<Error> {
        self.errors
    }

    /// Parse statements until end of input.
    ///
    /// Always returns a program; statements that failed to parse are
    /// omitted and reflected in [`Parser::had_error`].
    pub fn parse_program(&mut self) -> Program<'src> {
        let mut statements = Vec::new();
        while !self.check(TokenKind::Eof) {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }
        tracing::debug!(
            statements = statements.len(),
            had_error = self.had_error,
            "parsed program"
        );
        Program::new(statements)
    }

    // -- Statements --

    fn declaration(&mut self) -> Option<Stmt<'src>> {
        match self.statement() {
            Ok(stmt) => Some(stmt),
            Err(err) => {
                tracing::debug!(line = err.line, error = %err.kind, "synchronizing");
                self.synchronize();
                None
            }
        }
    }

    fn statement(&mut self) -> ParseResult<Stmt<'src>> {
        if self.match_kinds(&[TokenKind::Class]) {
            return self.class_statement();
        }
        self.expression_statement()
    }

    // Class bodies are not parsed yet.
    fn class_statement(&mut self) -> ParseResult<Stmt<'src>> {
        self.expression_statement()
    }

    fn expression_statement(&mut self) -> ParseResult<Stmt<'src>> {
        let token = self.current;
        let expression = self.expression()?;
        self.consume(TokenKind::Semicolon, ParseErrorKind::ExpectSemicolon)?;
        Ok(Stmt::Expression { expression, token })
    }

    // -- Expressions, lowest precedence first --

    fn expression(&mut self) -> ParseResult<Expr<'src>> {
        self.logic_or()
    }

    fn logic_or(&mut self) -> ParseResult<Expr<'src>> {
        let mut expr = self.logic_and()?;
        while self.match_kinds(&[TokenKind::Or]) {
            let operator = self.previous;
            let right = self.logic_and()?;
            expr = Expr::logical(expr, operator, right);
        }
        Ok(expr)
    }

    fn logic_and(&mut self) -> ParseResult<Expr<'src>> {
        let mut expr = self.equality()?;
        while self.match_kinds(&[TokenKind::And]) {
            let operator = self.previous;
            let right = self.equality()?;
            expr = Expr::logical(expr, operator, right);
        }
        Ok(expr)
    }

    fn equality(&mut self) -> ParseResult<Expr<'src>> {
        self.left_assoc(
            &[TokenKind::BangEqual, TokenKind::EqualEqual],
            Self::comparison,
        )
    }

    fn comparison(&mut self) -> ParseResult<Expr<'src>> {
        self.left_assoc(
            &[
                TokenKind::Greater,
                TokenKind::GreaterEqual,
                TokenKind::Less,
                TokenKind::LessEqual,
            ],
            Self::term,
        )
    }

    fn term(&mut self) -> ParseResult<Expr<'src>> {
        self.left_assoc(&[TokenKind::Minus, TokenKind::Plus], Self::factor)
    }

    fn factor(&mut self) -> ParseResult<Expr<'src>> {
        self.left_assoc(&[TokenKind::Slash, TokenKind::Star], Self::unary)
    }

    /// One binary precedence level: `operand (op operand)*`, folded left.
    fn left_assoc(
        &mut self,
        operators: &[TokenKind],
        operand: fn(&mut Self) -> ParseResult<Expr<'src>>,
    ) -> ParseResult<Expr<'src>> {
        let mut expr = operand(self)?;
        while self.match_kinds(operators) {
            let operator = self.previous;
            let right = operand(self)?;
            expr = Expr::binary(expr, operator, right);
        }
        Ok(expr)
    }

    fn unary(&mut self) -> ParseResult<Expr<'src>> {
        if self.match_kinds(&[TokenKind::Bang, TokenKind::Minus]) {
            let operator = self.previous;
            let right = self.nested(Self::unary)?;
            return Ok(Expr::unary(operator, right));
        }
        self.primary()
    }

    fn primary(&mut self) -> ParseResult<Expr<'src>> {
        if self.match_kinds(&[TokenKind::False]) {
            return Ok(Expr::literal(Literal::Bool(false), self.previous));
        }
        if self.match_kinds(&[TokenKind::True]) {
            return Ok(Expr::literal(Literal::Bool(true), self.previous));
        }
        if self.match_kinds(&[TokenKind::None]) {
            return Ok(Expr::literal(Literal::Nil, self.previous));
        }

        if self.match_kinds(&[TokenKind::Number]) {
            let token = self.previous;
            return match token.lexeme().parse::<f64>() {
                Ok(n) => Ok(Expr::literal(Literal::Number(n), token)),
                Err(_) => Err(self.error(
                    token,
                    ParseErrorKind::InvalidNumber(token.lexeme().to_string()),
                )),
            };
        }

        if self.match_kinds(&[TokenKind::String]) {
            let token = self.previous;
            let raw = token.lexeme();
            let text = raw
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"'))
                .unwrap_or("");
            return Ok(Expr::literal(Literal::String(text), token));
        }

        if self.match_kinds(&[TokenKind::LeftParen]) {
            let paren = self.previous;
            let expr = self.nested(Self::expression)?;
            self.consume(TokenKind::RightParen, ParseErrorKind::ExpectRightParen)?;
            return Ok(Expr::grouping(expr, paren));
        }

        Err(self.error(self.current, ParseErrorKind::ExpectExpression))
    }

    /// Run `rule` one nesting level deeper, failing once the level
    /// exceeds [`MAX_NESTING`].
    fn nested(
        &mut self,
        rule: fn(&mut Self) -> ParseResult<Expr<'src>>,
    ) -> ParseResult<Expr<'src>> {
        if self.depth >= MAX_NESTING {
            return Err(self.error(self.previous, ParseErrorKind::TooDeep));
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    // -- Token helpers --

    /// Shift `current` into `previous` and pull the next non-error
    /// token. Error tokens are reported here and never reach the
    /// grammar.
    fn advance(&mut self) {
        self.previous = self.current;
        loop {
            self.current = self.lexer.scan_token();
            let Some(kind) = self.current.error_kind() else {
                break;
            };
            let line = self.current.line;
            self.report(line, &kind.to_string());
            self.errors.push(Error::Lex(LexError { kind, line }));
            self.had_error = true;
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    fn match_kinds(&mut self, kinds: &[TokenKind]) -> bool {
        if kinds.contains(&self.current.kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn consume(&mut self, kind: TokenKind, err: ParseErrorKind) -> ParseResult<()> {
        if self.check(kind) {
            self.advance();
            return Ok(());
        }
        Err(self.error(self.current, err))
    }

    // -- Error handling --

    /// Record a parse error at `token`. Only the first error before
    /// the next synchronization is reported.
    fn error(&mut self, token: Token<'src>, kind: ParseErrorKind) -> ParseError {
        let err = ParseError {
            kind,
            line: token.line,
        };
        if !self.panic_mode {
            self.panic_mode = true;
            self.report(err.line, &err.kind.to_string());
            self.errors.push(Error::Parse(err.clone()));
        }
        self.had_error = true;
        err
    }

    fn report(&mut self, line: usize, message: &str) {
        match self.on_error.as_mut() {
            Some(handler) => handler(line, message),
            None => eprintln!("[line {line}] Error: {message}"),
        }
    }

    /// Skip tokens until just after a `;` or just before a statement
    /// keyword. Always consumes at least one token unless at `Eof`.
    fn synchronize(&mut self) {
        self.panic_mode = false;

        if !self.check(TokenKind::Eof) {
            self.advance();
        }

        while !self.check(TokenKind::Eof) {
            if self.previous.kind == TokenKind::Semicolon || self.current.kind.starts_statement() {
                return;
            }
            self.advance();
        }
    }
}
