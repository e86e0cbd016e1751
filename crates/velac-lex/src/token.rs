//! A token: a half-open view into the source (spec §3).
//!
//! Tokens never own storage — they borrow from the same source buffer the
//! lexer was built on, so the source must outlive every token derived from
//! it.

use std::fmt;
use std::hash::{Hash, Hasher};
use velac_util::Span;

#[derive(Clone, Copy)]
pub struct Token<'src> {
    pub text: &'src [u8],
    pub span: Span,
}

impl<'src> Token<'src> {
    pub fn new(text: &'src [u8], span: Span) -> Self {
        Self { text, span }
    }

    /// Compares this token's text against a literal string — the
    /// `token_eq_str` helper from spec §3.
    pub fn eq_str(&self, s: &str) -> bool {
        self.text == s.as_bytes()
    }

    /// A token is a number literal iff its first byte is `-` or a digit
    /// (spec §4.2: "A number token is any token whose first byte is `-`
    /// or `0`-`9`").
    pub fn is_number(&self) -> bool {
        matches!(self.text.first(), Some(b'-') | Some(b'0'..=b'9'))
    }

    pub fn as_str(&self) -> &'src str {
        std::str::from_utf8(self.text).unwrap_or("<invalid-utf8>")
    }
}

impl PartialEq for Token<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Token<'_> {}

impl Hash for Token<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({:?})", self.as_str())
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
