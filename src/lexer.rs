use std::fmt;

use crate::ErrorHandler;
use crate::chars::{is_alpha, is_alpha_numeric, is_digit};
use crate::keywords::keyword;
use crate::token::{Span, Token, TokenKind};

/// Classifies a lexer error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    /// End of input reached before the closing `"`.
    UnterminatedString,
    /// Character that cannot start any token.
    UnexpectedCharacter(char),
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedString => write!(f, "Unterminated string."),
            Self::UnexpectedCharacter(ch) => write!(f, "Unexpected character: '{ch}'"),
        }
    }
}

/// Error produced during lexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("[line {line}] Error: {kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub line: usize,
}

/// Scan an entire source string.
///
/// The returned tokens end with `Eof`.
///
/// # Errors
///
/// Returns `LexError` for the first unterminated string or
/// unexpected character.
pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>, LexError> {
    let mut tokens = Vec::new();
    for token in Lexer::new(input).tokens() {
        if let Some(kind) = token.error_kind() {
            return Err(LexError {
                kind,
                line: token.line,
            });
        }
        tokens.push(token);
    }
    Ok(tokens)
}

/// Pull-based scanner over one source buffer.
///
/// Each call to [`Lexer::scan_token`] produces exactly one token.
/// Scan failures become `Error` tokens; the lexer itself never fails.
/// Once the end is reached, every further call returns `Eof` again.
pub struct Lexer<'src> {
    source: &'src str,
    bytes: &'src [u8],
    start: usize,
    current: usize,
    line: usize,
    on_error: Option<ErrorHandler<'src>>,
}

impl<'src> Lexer<'src> {
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        let bytes = source.as_bytes();
        let start = if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
            3
        } else {
            0
        };
        Self {
            source,
            bytes,
            start,
            current: start,
            line: 1,
            on_error: None,
        }
    }

    /// Create a lexer that reports each error token to `handler` as
    /// `(line, message)`.
    #[must_use]
    pub fn with_error_handler(
        source: &'src str,
        handler: impl FnMut(usize, &str) + 'src,
    ) -> Self {
        let mut lexer = Self::new(source);
        lexer.on_error = Some(Box::new(handler));
        lexer
    }

    #[must_use]
    pub const fn source(&self) -> &'src str {
        self.source
    }

    /// Iterate over the remaining tokens, stopping after the first
    /// `Eof` or `Error` token.
    #[must_use]
    pub fn tokens(self) -> Tokens<'src> {
        Tokens {
            lexer: self,
            done: false,
        }
    }

    /// Scan the next token.
    pub fn scan_token(&mut self) -> Token<'src> {
        let token = self.scan();
        tracing::trace!(
            kind = %token.kind,
            lexeme = token.lexeme(),
            line = token.line,
            "scanned token"
        );
        token
    }

    fn scan(&mut self) -> Token<'src> {
        self.skip_whitespace_and_comments();
        self.start = self.current;

        let Some(c) = self.advance() else {
            return self.make_token(TokenKind::Eof);
        };

        if is_alpha(c) {
            return self.identifier();
        }
        if is_digit(c) {
            return self.number();
        }

        let kind = match c {
            b'(' => TokenKind::LeftParen,
            b')' => TokenKind::RightParen,
            b'{' => TokenKind::LeftBrace,
            b'}' => TokenKind::RightBrace,
            b',' => TokenKind::Comma,
            b'.' => TokenKind::Dot,
            b'-' => TokenKind::Minus,
            b'+' => TokenKind::Plus,
            b';' => TokenKind::Semicolon,
            b'*' => TokenKind::Star,
            // A `//` never reaches here; it was skipped as a comment.
            b'/' => TokenKind::Slash,
            b'!' => self.either(b'=', TokenKind::BangEqual, TokenKind::Bang),
            b'=' => self.either(b'=', TokenKind::EqualEqual, TokenKind::Equal),
            b'<' => self.either(b'=', TokenKind::LessEqual, TokenKind::Less),
            b'>' => self.either(b'=', TokenKind::GreaterEqual, TokenKind::Greater),
            b'"' => return self.string(),
            _ => return self.unexpected_character(),
        };

        self.make_token(kind)
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.current).copied()
    }

    fn peek_next(&self) -> Option<u8> {
        self.bytes.get(self.current + 1).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.current += 1;
        Some(c)
    }

    fn either(&mut self, expected: u8, matched: TokenKind, otherwise: TokenKind) -> TokenKind {
        if self.peek() == Some(expected) {
            self.current += 1;
            matched
        } else {
            otherwise
        }
    }

    const fn make_token(&self, kind: TokenKind) -> Token<'src> {
        Token::new(
            kind,
            self.source,
            Span::new(self.start, self.current - self.start),
            self.line,
        )
    }

    fn error_token(&mut self, kind: LexErrorKind) -> Token<'src> {
        tracing::debug!(line = self.line, error = %kind, "scan error");
        if let Some(handler) = self.on_error.as_mut() {
            handler(self.line, &kind.to_string());
        }
        Token::error(self.source, self.start, self.line, kind)
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(c) = self.peek() {
            match c {
                b' ' | b'\r' | b'\t' => {
                    self.current += 1;
                }
                b'\n' => {
                    self.line += 1;
                    self.current += 1;
                }
                b'/' if self.peek_next() == Some(b'/') => {
                    while self.peek().is_some_and(|c| c != b'\n') {
                        self.current += 1;
                    }
                }
                _ => return,
            }
        }
    }

    fn identifier(&mut self) -> Token<'src> {
        while self.peek().is_some_and(is_alpha_numeric) {
            self.current += 1;
        }

        let text = &self.source[self.start..self.current];
        self.make_token(keyword(text).unwrap_or(TokenKind::Identifier))
    }

    fn number(&mut self) -> Token<'src> {
        while self.peek().is_some_and(is_digit) {
            self.current += 1;
        }

        // A trailing `.` without a digit after it is left for the next call.
        if self.peek() == Some(b'.') && self.peek_next().is_some_and(is_digit) {
            self.current += 1;
            while self.peek().is_some_and(is_digit) {
                self.current += 1;
            }
        }

        self.make_token(TokenKind::Number)
    }

    fn string(&mut self) -> Token<'src> {
        while let Some(c) = self.peek() {
            if c == b'"' {
                break;
            }
            if c == b'\n' {
                self.line += 1;
            }
            self.current += 1;
        }

        if self.advance().is_none() {
            return self.error_token(LexErrorKind::UnterminatedString);
        }

        self.make_token(TokenKind::String)
    }

    fn unexpected_character(&mut self) -> Token<'src> {
        // Consume the whole character so spans stay on UTF-8 boundaries.
        let ch = self
            .source
            .get(self.start..)
            .and_then(|rest| rest.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        self.current = (self.start + ch.len_utf8()).min(self.bytes.len());
        self.error_token(LexErrorKind::UnexpectedCharacter(ch))
    }
}

/// Iterator returned by [`Lexer::tokens`].
pub struct Tokens<'src> {
    lexer: Lexer<'src>,
    done: bool,
}

impl<'src> Iterator for Tokens<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let token = self.lexer.scan_token();
        if matches!(token.kind, TokenKind::Eof | TokenKind::Error) {
            self.done = true;
        }
        Some(token)
    }
}
