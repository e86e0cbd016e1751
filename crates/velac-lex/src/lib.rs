//! Lexer for the velac scripting language (spec §4.1).
//!
//! Turns a source string into a sequence of [`Token`]s, each a borrowed
//! view into the source — no token ever owns its text.

pub mod cursor;
mod error;
mod lexer;
mod token;

pub use error::LexError;
pub use lexer::{tokenize, Lexer};
pub use token::Token;
