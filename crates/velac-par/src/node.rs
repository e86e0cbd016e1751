//! Parse-time node record (spec §3).

use velac_lex::Token;

use crate::opcode::Opcode;

/// One entry in the parser's linear output stream.
///
/// `val` plays three different roles depending on `op` — a literal value
/// (`PushConst`, post-analysis), a frame-relative offset (`PushVarAddr`,
/// post-analysis), or a label id that the linker rewrites into an
/// instruction address (`Jmp`/`Jze`/`Call`/`Label`). Keeping this as a
/// single `i32` field (rather than a tagged enum per opcode) matches the
/// original and the rest of the pipeline that resolves it in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Node<'src> {
    pub op: Opcode,
    pub token: Option<Token<'src>>,
    pub val: i32,
}

impl<'src> Node<'src> {
    pub fn new(op: Opcode, token: Option<Token<'src>>, val: i32) -> Self {
        Self { op, token, val }
    }
}
