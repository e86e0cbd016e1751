//! Lowers the analyzed node stream into `Memory`'s code region (spec §4.4).

use velac_par::{find_label, LabelId, LabelTable, Node, Opcode};
use velac_util::Idx;

use crate::error::GenError;
use crate::layout::{GlobalSlot, MemoryLayout};
use crate::memory::Memory;

/// Emits `nodes` into a freshly allocated `Memory`, filling in each
/// `Label`'s `inst_index` along the way and initializing `IP`/`BP`/`SP`
/// (spec §4.4).
///
/// `nodes` must already be analyzed (`velac_sem::analyze`) — literal
/// tokens folded, variable addresses resolved to offsets — the emitter
/// itself does no resolution beyond `CALL`'s callee-name lookup.
pub fn emit<'src>(
    nodes: &[Node<'src>],
    labels: &mut LabelTable<'src>,
    layout: MemoryLayout,
) -> Result<Memory, GenError> {
    let mut mem = Memory::new(layout);
    let mut iptr = layout.glob_sz;

    for node in nodes {
        match node.op {
            Opcode::Label => {
                let id = LabelId::from_usize(node.val as usize);
                labels[id].inst_index = iptr as i32;
            }
            Opcode::LabelFnEnd | Opcode::Nop => {}
            Opcode::Call => {
                let callee = node.token.expect("Call node always carries a callee token");
                let label_id = find_label(labels, callee).ok_or_else(|| {
                    GenError::UndefinedFunction { name: callee.as_str().to_string() }
                })?;
                write_cell(&mut mem, &mut iptr, node.op as i32)?;
                write_cell(&mut mem, &mut iptr, label_id.index() as i32)?;
            }
            op if op.has_operand() => {
                write_cell(&mut mem, &mut iptr, node.op as i32)?;
                write_cell(&mut mem, &mut iptr, node.val)?;
            }
            _ => {
                write_cell(&mut mem, &mut iptr, node.op as i32)?;
            }
        }
    }

    if iptr + layout.stk_sz > layout.mem_sz {
        return Err(GenError::CodeBudgetExceeded { limit: layout.mem_sz });
    }

    mem.set_global(GlobalSlot::Ip, layout.glob_sz as i32);
    mem.set_global(GlobalSlot::Bp, iptr as i32);
    mem.set_global(GlobalSlot::Sp, (iptr + layout.stk_sz) as i32);

    Ok(mem)
}

fn write_cell(mem: &mut Memory, iptr: &mut usize, val: i32) -> Result<(), GenError> {
    if !mem.set(*iptr, val) {
        return Err(GenError::CodeBudgetExceeded { limit: mem.len() });
    }
    *iptr += 1;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use velac_lex::tokenize;
    use velac_par::Parser;

    fn emit_source(src: &str) -> Memory {
        let tokens = tokenize(src, 1 << 16).expect("lex ok");
        let mut out = Parser::new(tokens).parse_program().expect("parse ok");
        velac_sem::analyze(&mut out.nodes).expect("analyze ok");
        emit(&out.nodes, &mut out.labels, MemoryLayout::default()).expect("emit ok")
    }

    #[test]
    fn globals_are_initialized_after_emission() {
        let mem = emit_source("(42)");
        let layout = mem.layout;
        assert_eq!(mem.get_global(GlobalSlot::Ip), layout.glob_sz as i32);
        assert_eq!(mem.get_global(GlobalSlot::Bp), mem.get_global(GlobalSlot::Ip) + 2);
        assert_eq!(
            mem.get_global(GlobalSlot::Sp),
            mem.get_global(GlobalSlot::Bp) + layout.stk_sz as i32
        );
    }

    #[test]
    fn push_const_emits_opcode_then_operand_cell() {
        let mem = emit_source("(42)");
        let base = mem.layout.glob_sz;
        assert_eq!(mem.get(base), Some(Opcode::PushConst as i32));
        assert_eq!(mem.get(base + 1), Some(42));
    }

    #[test]
    fn call_to_undefined_function_is_an_error() {
        let tokens = tokenize("(missing(1))", 1 << 16).expect("lex ok");
        let mut out = Parser::new(tokens).parse_program().expect("parse ok");
        velac_sem::analyze(&mut out.nodes).expect("analyze ok");
        let err = emit(&out.nodes, &mut out.labels, MemoryLayout::default()).unwrap_err();
        assert_eq!(err, GenError::UndefinedFunction { name: "missing".to_string() });
    }

    #[test]
    fn label_nodes_emit_no_cells() {
        let mem = emit_source("(loop (break))");
        // label_start, jmp(break), jmp(loop-back), label_end -> 2 code cells
        // worth of instructions with operands = 4 cells total.
        let base = mem.layout.glob_sz;
        assert_eq!(mem.get(base), Some(Opcode::Jmp as i32));
    }
}
