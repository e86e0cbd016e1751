//! Emitter and linker for the velac scripting language (spec §4.4, §4.5).
//!
//! Lowers an analyzed node stream into the single flat [`Memory`] buffer
//! the VM runs directly against — globals, code, and the activation stack
//! all share one address space (spec §3).

mod emitter;
mod error;
mod layout;
mod linker;
mod memory;

pub use emitter::emit;
pub use error::GenError;
pub use layout::{GlobalSlot, MemoryLayout, RESERVED_GLOBALS};
pub use linker::link;
pub use memory::Memory;

/// Runs the emitter then the linker in sequence — the usual way to get
/// from an analyzed node stream to a runnable [`Memory`] (spec §2, steps
/// 4-5).
pub fn generate<'src>(
    nodes: &[velac_par::Node<'src>],
    labels: &mut velac_par::LabelTable<'src>,
    layout: MemoryLayout,
) -> Result<Memory, GenError> {
    let mut mem = emit(nodes, labels, layout)?;
    link(&mut mem, labels)?;
    Ok(mem)
}
