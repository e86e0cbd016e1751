//! Fetch-decode-execute VM for the velac scripting language (spec §4.6).
//!
//! Runs directly against the flat [`velac_gen::Memory`] buffer the
//! emitter/linker produce — no further translation step. Host-visible
//! effects (`SVC`) are dispatched through the [`Syscalls`] trait rather
//! than calling `std::io` directly, so `velac-drv` can wire up real
//! stdin/stdout/sleep while tests use an in-memory double.

mod error;
mod syscalls;
mod vm;

pub use error::VmError;
pub use syscalls::{MockSyscalls, NullSyscalls, Syscalls};
pub use vm::Vm;
