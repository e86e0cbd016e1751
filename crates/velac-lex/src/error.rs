use thiserror::Error;

/// Lexical errors. The original program has exactly one lexical failure
/// mode (spec §7a: "token array exhausted") — fixed-size token arrays are
/// a C-ism we don't inherit, but the budget itself is still a knob
/// `velac-drv` exposes (spec §5), so we keep it as an opt-in check.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("token budget exceeded: source produced more than {limit} tokens")]
    TokenBudgetExceeded { limit: usize },
}
