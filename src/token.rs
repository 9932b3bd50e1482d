use std::fmt;

use crate::lexer::LexErrorKind;

/// Byte range of a token within its source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub len: usize,
}

impl Span {
    #[must_use]
    pub const fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// Offset one past the last byte.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Single-character punctuation.
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,

    // One- or two-character operators.
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    // Literals.
    Identifier,
    String,
    Number,

    // Keywords.
    And,
    Class,
    Impl,
    Import,
    New,
    Or,
    Return,
    SelfKw,
    True,
    False,
    None,

    /// Scan failure; the token carries a `LexErrorKind`.
    Error,
    /// End of input. Zero-length span.
    Eof,
}

impl TokenKind {
    /// Canonical catalog name, used when printing tokens.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::LeftParen => "LEFT_PAREN",
            Self::RightParen => "RIGHT_PAREN",
            Self::LeftBrace => "LEFT_BRACE",
            Self::RightBrace => "RIGHT_BRACE",
            Self::Comma => "COMMA",
            Self::Dot => "DOT",
            Self::Minus => "MINUS",
            Self::Plus => "PLUS",
            Self::Semicolon => "SEMICOLON",
            Self::Slash => "SLASH",
            Self::Star => "STAR",
            Self::Bang => "BANG",
            Self::BangEqual => "BANG_EQUAL",
            Self::Equal => "EQUAL",
            Self::EqualEqual => "EQUAL_EQUAL",
            Self::Greater => "GREATER",
            Self::GreaterEqual => "GREATER_EQUAL",
            Self::Less => "LESS",
            Self::LessEqual => "LESS_EQUAL",
            Self::Identifier => "IDENTIFIER",
            Self::String => "STRING",
            Self::Number => "NUMBER",
            Self::And => "AND",
            Self::Class => "CLASS",
            Self::Impl => "IMPL",
            Self::Import => "IMPORT",
            Self::New => "NEW",
            Self::Or => "OR",
            Self::Return => "RETURN",
            Self::SelfKw => "SELF",
            Self::True => "True",
            Self::False => "False",
            Self::None => "None",
            Self::Error => "ERROR",
            Self::Eof => "EOF",
        }
    }

    /// Keywords the parser resynchronizes on after an error.
    #[must_use]
    pub const fn starts_statement(self) -> bool {
        matches!(self, Self::Class | Self::Return)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single token: its kind, a span into the source it was scanned
/// from, and the line it was produced on.
///
/// Tokens borrow the source buffer instead of copying their text, so
/// they are `Copy` and cheap to pass around.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub span: Span,
    pub line: usize,
    source: &'src str,
    error: Option<LexErrorKind>,
}

impl<'src> Token<'src> {
    #[must_use]
    pub const fn new(kind: TokenKind, source: &'src str, span: Span, line: usize) -> Self {
        Self {
            kind,
            span,
            line,
            source,
            error: None,
        }
    }

    /// Build an `Error` token. The span is zero-length at `start`.
    #[must_use]
    pub const fn error(source: &'src str, start: usize, line: usize, kind: LexErrorKind) -> Self {
        Self {
            kind: TokenKind::Error,
            span: Span::new(start, 0),
            line,
            source,
            error: Some(kind),
        }
    }

    /// The source text this token denotes.
    #[must_use]
    pub fn lexeme(&self) -> &'src str {
        self.source.get(self.span.start..self.span.end()).unwrap_or("")
    }

    /// Why scanning failed, for `Error` tokens.
    #[must_use]
    pub const fn error_kind(&self) -> Option<LexErrorKind> {
        self.error
    }

    /// Diagnostic message, for `Error` tokens.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        self.error.map(|kind| kind.to_string())
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.error {
            Some(err) => write!(f, "{} (line {}): {err}", self.kind, self.line),
            None => write!(f, "{} '{}' (line {})", self.kind, self.lexeme(), self.line),
        }
    }
}

// Hand-written so the whole source buffer is never dumped.
impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dbg = f.debug_struct("Token");
        dbg.field("kind", &self.kind)
            .field("lexeme", &self.lexeme())
            .field("line", &self.line);
        if let Some(err) = self.error {
            dbg.field("error", &err);
        }
        dbg.finish()
    }
}
