//! Core lexer implementation (spec §4.1).
//!
//! Delimiters (`space`, `newline`) separate tokens without producing one.
//! The punctuation `( ) , . * &` each always form their own one-byte
//! token, regardless of surrounding whitespace. Everything else extends
//! the current token until a delimiter or one of those punctuation bytes
//! is seen.

use crate::cursor::Cursor;
use crate::token::Token;
use velac_util::Span;

const PUNCTUATION: &[u8] = b"(),.*&";

pub struct Lexer<'src> {
    source: &'src [u8],
    cursor: Cursor<'src>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src [u8]) -> Self {
        Self { source, cursor: Cursor::new(source) }
    }

    fn is_delimiter(b: u8) -> bool {
        b == b' ' || b == b'\n'
    }

    fn is_punctuation(b: u8) -> bool {
        PUNCTUATION.contains(&b)
    }

    /// Returns the next token, or `None` once the cursor reaches the
    /// source's terminating NUL (spec §4.1).
    pub fn next_token(&mut self) -> Option<Token<'src>> {
        while let Some(b) = self.cursor.current() {
            if Self::is_delimiter(b) {
                self.cursor.advance();
                continue;
            }
            break;
        }

        let start = self.cursor.position();
        let line = self.cursor.line();
        let column = self.cursor.column();

        let b = self.cursor.current()?;

        if Self::is_punctuation(b) {
            self.cursor.advance();
            let span = Span::new(start, start + 1, line, column);
            return Some(Token::new(&self.source[start..start + 1], span));
        }

        while let Some(b) = self.cursor.current() {
            if Self::is_delimiter(b) || Self::is_punctuation(b) {
                break;
            }
            self.cursor.advance();
        }
        let end = self.cursor.position();
        let span = Span::new(start, end, line, column);
        Some(Token::new(&self.source[start..end], span))
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Token<'src>> {
        self.next_token()
    }
}

/// Lexes the entire source into a token vector, rejecting sources that
/// produce more than `max_tokens` tokens (spec §5 resource budgets).
pub fn tokenize(source: &str, max_tokens: usize) -> Result<Vec<Token<'_>>, crate::error::LexError> {
    let mut tokens = Vec::new();
    for token in Lexer::new(source.as_bytes()) {
        if tokens.len() >= max_tokens {
            return Err(crate::error::LexError::TokenBudgetExceeded { limit: max_tokens });
        }
        tokens.push(token);
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(src: &str) -> Vec<&str> {
        Lexer::new(src.as_bytes()).map(|t| t.as_str()).collect()
    }

    #[test]
    fn whitespace_separates_without_producing_tokens() {
        assert_eq!(lex("a   b\n\nc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn single_char_punctuation_is_always_its_own_token() {
        assert_eq!(lex("(a,b)"), vec!["(", "a", ",", "b", ")"]);
    }

    #[test]
    fn punctuation_with_no_surrounding_whitespace() {
        assert_eq!(lex("foo(a).b"), vec!["foo", "(", "a", ")", ".", "b"]);
    }

    #[test]
    fn multi_char_operators_come_out_as_one_token() {
        assert_eq!(lex("a == b"), vec!["a", "==", "b"]);
        assert_eq!(lex("a != b"), vec!["a", "!=", "b"]);
        assert_eq!(lex("a || b"), vec!["a", "||", "b"]);
    }

    #[test]
    fn ampersand_ampersand_lexes_as_two_tokens() {
        // Design quirk retained deliberately (spec §4.1, §9).
        assert_eq!(lex("a && b"), vec!["a", "&", "&", "b"]);
    }

    #[test]
    fn negative_number_is_a_single_token() {
        assert_eq!(lex("-42"), vec!["-42"]);
    }

    #[test]
    fn empty_source_yields_no_tokens() {
        assert_eq!(lex(""), Vec::<&str>::new());
    }

    #[test]
    fn stops_at_embedded_nul() {
        let src = "a b\0garbage";
        assert_eq!(lex(src), vec!["a", "b"]);
    }

    #[test]
    fn token_budget_is_enforced() {
        let err = tokenize("a b c d", 2).unwrap_err();
        assert_eq!(err, crate::error::LexError::TokenBudgetExceeded { limit: 2 });
    }

    #[test]
    fn spans_track_line_and_column() {
        let tokens: Vec<_> = Lexer::new(b"a\nbb cc").collect();
        assert_eq!(tokens[0].span.line, 1);
        assert_eq!(tokens[1].span.line, 2);
        assert_eq!(tokens[1].span.column, 1);
        assert_eq!(tokens[2].span.column, 4);
    }

    proptest::proptest! {
        #[test]
        fn lex_then_join_with_single_spaces_relexes_to_same_tokens(
            idents in proptest::collection::vec("[a-zA-Z][a-zA-Z0-9]{0,6}", 1..8)
        ) {
            let source = idents.join(" ");
            let first: Vec<&str> = Lexer::new(source.as_bytes()).map(|t| t.as_str()).collect();
            let rejoined = first.join(" ");
            let second: Vec<&str> = Lexer::new(rejoined.as_bytes()).map(|t| t.as_str()).collect();
            proptest::prop_assert_eq!(first, second);
        }
    }
}
