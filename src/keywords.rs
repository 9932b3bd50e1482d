//! Reserved identifier spellings.

use crate::token::TokenKind;

/// Every reserved word and the token kind it scans to.
pub const KEYWORDS: [(&str, TokenKind); 11] = [
    ("and", TokenKind::And),
    ("class", TokenKind::Class),
    ("impl", TokenKind::Impl),
    ("import", TokenKind::Import),
    ("new", TokenKind::New),
    ("or", TokenKind::Or),
    ("return", TokenKind::Return),
    ("self", TokenKind::SelfKw),
    ("True", TokenKind::True),
    ("False", TokenKind::False),
    ("None", TokenKind::None),
];

/// Look up a scanned identifier. Returns `None` for ordinary
/// identifiers.
#[must_use]
pub fn keyword(text: &str) -> Option<TokenKind> {
    KEYWORDS
        .iter()
        .find(|(word, _)| *word == text)
        .map(|&(_, kind)| kind)
}
