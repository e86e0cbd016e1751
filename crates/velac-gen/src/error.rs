use thiserror::Error;

/// Emission and linking failures (spec §7d: "link error — CALL to a name
/// with no defining function"; §5: resource budgets SHOULD be checked on
/// every write).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenError {
    #[error("call to undefined function `{name}`")]
    UndefinedFunction { name: String },

    #[error("program does not fit in {limit} memory cells")]
    CodeBudgetExceeded { limit: usize },

    #[error("label {id} was never resolved to an instruction address")]
    UnresolvedLabel { id: usize },

    #[error("cell {addr} holds {raw}, which is not a valid opcode")]
    InvalidOpcode { addr: usize, raw: i32 },
}
