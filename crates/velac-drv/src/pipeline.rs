//! Orchestrates the six pipeline stages (spec §2) end to end.
//!
//! Each stage logs through `tracing` the way a production compiler driver
//! would (SPEC_FULL §6) — token/node/byte counts, nothing that changes
//! program behavior.

use velac_gen::{generate, Memory, MemoryLayout};
use velac_vm::{Syscalls, Vm};

use crate::error::DrvError;

/// Runs lex → parse → analyze → emit → link, returning the linked
/// [`Memory`] ready to execute.
pub fn compile(source: &str, layout: MemoryLayout, max_tokens: usize) -> Result<Memory, DrvError> {
    if !layout.is_sane() {
        return Err(DrvError::InvalidLayout(format!(
            "glob_sz={} stk_sz={} mem_sz={} leaves no room for code",
            layout.glob_sz, layout.stk_sz, layout.mem_sz
        )));
    }

    let tokens = velac_lex::tokenize(source, max_tokens)?;
    tracing::debug!(count = tokens.len(), "lexed tokens");

    let mut parsed = velac_par::Parser::new(tokens).parse_program()?;
    tracing::debug!(nodes = parsed.nodes.len(), labels = parsed.labels.len(), "parsed program");

    velac_sem::analyze(&mut parsed.nodes)?;
    tracing::debug!("resolved locals and folded literals");

    let mem = generate(&parsed.nodes, &mut parsed.labels, layout)?;
    tracing::debug!(cells = mem.len(), "emitted and linked bytecode");

    Ok(mem)
}

/// Runs the VM to halt over an already-compiled [`Memory`].
pub fn execute<S: Syscalls>(mem: Memory, syscalls: S) -> Result<Vm<S>, DrvError> {
    let mut vm = Vm::new(mem, syscalls);
    vm.run()?;
    Ok(vm)
}
