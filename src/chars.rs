//! Byte classifiers used by the lexer.

/// ASCII decimal digit.
#[must_use]
pub const fn is_digit(c: u8) -> bool {
    c.is_ascii_digit()
}

/// ASCII letter or underscore: may start an identifier.
#[must_use]
pub const fn is_alpha(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

/// May continue an identifier.
#[must_use]
pub const fn is_alpha_numeric(c: u8) -> bool {
    is_alpha(c) || is_digit(c)
}
