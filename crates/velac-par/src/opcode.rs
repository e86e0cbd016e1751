//! Bytecode opcodes (spec §3).
//!
//! `Label` and `LabelFnEnd` are parse-time markers only — the emitter
//! consumes them to record addresses and reset analyzer state, but
//! neither ever reaches the linked instruction stream.

static_assertions::assert_eq_size!(Opcode, i32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Opcode {
    Null = 0,
    Nop,
    PushConst,
    PushVarAddr,
    GlobalGet,
    GlobalSet,
    Call,
    Return,
    Jmp,
    Jze,
    Or,
    And,
    Eq,
    Ne,
    Lt,
    Gt,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Svc,
    Label,
    LabelFnEnd,
}

impl Opcode {
    /// Whether this opcode's emitted form carries a trailing operand cell
    /// (spec §4.4: "`PUSH_CONST`, `PUSH_VARADDR`, `JMP`, `JZE`, `CALL` emit
    /// two cells").
    pub const fn has_operand(self) -> bool {
        matches!(
            self,
            Opcode::PushConst | Opcode::PushVarAddr | Opcode::Jmp | Opcode::Jze | Opcode::Call
        )
    }

    /// Whether this node emits no instruction at all (spec §4.4: "`LABEL`
    /// nodes emit nothing... `LABEL_FNEND` and `NOP` emit nothing").
    pub const fn emits_nothing(self) -> bool {
        matches!(self, Opcode::Label | Opcode::LabelFnEnd | Opcode::Nop)
    }
}

/// Every opcode that can legally appear in a linked memory cell — `Label`
/// and `LabelFnEnd` never reach the instruction stream (spec §3).
const CODE_OPCODES: &[Opcode] = &[
    Opcode::Null,
    Opcode::Nop,
    Opcode::PushConst,
    Opcode::PushVarAddr,
    Opcode::GlobalGet,
    Opcode::GlobalSet,
    Opcode::Call,
    Opcode::Return,
    Opcode::Jmp,
    Opcode::Jze,
    Opcode::Or,
    Opcode::And,
    Opcode::Eq,
    Opcode::Ne,
    Opcode::Lt,
    Opcode::Gt,
    Opcode::Add,
    Opcode::Sub,
    Opcode::Mul,
    Opcode::Div,
    Opcode::Mod,
    Opcode::Svc,
];

impl TryFrom<i32> for Opcode {
    type Error = i32;

    /// Decodes a raw memory cell back into an opcode (the inverse of
    /// `Opcode as i32`, used when the VM fetches `M[IP]`). Fails — rather
    /// than reinterpreting garbage the way the original's untagged union
    /// read would — when the cell doesn't hold one of the opcodes that can
    /// legally appear in linked code.
    fn try_from(raw: i32) -> Result<Self, i32> {
        CODE_OPCODES.iter().copied().find(|&op| op as i32 == raw).ok_or(raw)
    }
}
