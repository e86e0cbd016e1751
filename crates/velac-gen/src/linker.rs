//! Second pass rewriting label ids into instruction addresses (spec §4.5).

use velac_par::{LabelId, LabelTable, Opcode};
use velac_util::Idx;

use crate::error::GenError;
use crate::memory::Memory;

/// Walks `mem`'s code region, rewriting every `Jmp`/`Jze`/`Call` operand
/// from a label id to that label's resolved instruction address. Leaves
/// `PushConst`/`PushVarAddr` operands untouched (spec §4.5).
pub fn link(mem: &mut Memory, labels: &LabelTable<'_>) -> Result<(), GenError> {
    let mut addr = mem.layout.glob_sz;

    loop {
        let raw = mem.get(addr).expect("linker walked past the end of memory");
        if raw == Opcode::Null as i32 {
            break;
        }
        let op = Opcode::try_from(raw).map_err(|raw| GenError::InvalidOpcode { addr, raw })?;

        match op {
            Opcode::Jmp | Opcode::Jze | Opcode::Call => {
                addr += 1;
                let label_id = LabelId::from_usize(mem.get(addr).unwrap_or(0) as usize);
                let label = &labels[label_id];
                if label.inst_index < 0 {
                    return Err(GenError::UnresolvedLabel { id: label_id.index() });
                }
                mem.set(addr, label.inst_index);
                addr += 1;
            }
            Opcode::PushConst | Opcode::PushVarAddr => {
                addr += 2;
            }
            _ => {
                addr += 1;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::emit;
    use crate::layout::{GlobalSlot, MemoryLayout};
    use velac_lex::tokenize;
    use velac_par::Parser;

    fn compile(src: &str) -> Memory {
        let tokens = tokenize(src, 1 << 16).expect("lex ok");
        let mut out = Parser::new(tokens).parse_program().expect("parse ok");
        velac_sem::analyze(&mut out.nodes).expect("analyze ok");
        let mut mem = emit(&out.nodes, &mut out.labels, MemoryLayout::default()).expect("emit ok");
        link(&mut mem, &out.labels).expect("link ok");
        mem
    }

    #[test]
    fn jump_targets_become_addresses_in_the_code_region() {
        let mem = compile("(if 0 (1) else (2))");
        let base = mem.layout.glob_sz;
        let code_end = mem.get_global(GlobalSlot::Bp) as usize;
        // JZE's operand must point into [base, code_end) at an opcode cell.
        assert_eq!(mem.get(base), Some(Opcode::PushConst as i32));
        let jze_operand_addr = base + 3;
        assert_eq!(mem.get(base + 2), Some(Opcode::Jze as i32));
        let target = mem.get(jze_operand_addr).unwrap();
        assert!((base as i32..code_end as i32).contains(&target));
    }

    #[test]
    fn call_operand_resolves_to_the_callee_label_address() {
        let mem = compile("fn add(a, b) (return(a + b)) (add(1, 2))");
        let base = mem.layout.glob_sz;
        // add has 2 parameters, each a dead PushVarAddr cell pair emitted
        // ahead of the function's entry label (spec §4.2/§4.3).
        let fn_entry = base + 2 * 2;
        let call_idx = mem
            .as_slice()
            .iter()
            .position(|&cell| cell == Opcode::Call as i32)
            .expect("a call was emitted");
        let target = mem.get(call_idx + 1).unwrap();
        assert_eq!(target, fn_entry as i32);
        assert_eq!(mem.get(fn_entry), Some(Opcode::PushVarAddr as i32));
    }
}
