use thiserror::Error;
use velac_util::Span;

/// Parser failures (spec §7b). The grammar is unambiguous LL(1) at every
/// level, so the only way parsing fails is running out of input or
/// finding a token the current production doesn't accept.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected end of input while parsing")]
    UnexpectedEof,

    #[error("expected {expected:?}, found {found:?}")]
    UnexpectedToken { expected: &'static str, found: String, span: Span },

    #[error("`break` outside of any enclosing `loop`")]
    BreakOutsideLoop { span: Span },

    #[error("`continue` outside of any enclosing `loop`")]
    ContinueOutsideLoop { span: Span },
}
