//! Host call bridge (spec §4.6 "SVC (host call)"; SPEC_FULL §4.6).
//!
//! `SVC` is the one opcode with externally visible side effects. The VM
//! never calls `read`/`write`/sleep directly — it dispatches through this
//! trait, so `velac-drv` supplies the real stdin/stdout/sleep
//! implementation while tests and fuzzing supply an in-memory double.

/// Host-provided byte I/O and timing, invoked by `OP_SVC` (spec §4.6).
pub trait Syscalls {
    /// Reads one byte from standard input (`M[IO] == 0`).
    fn read_byte(&mut self) -> Result<u8, String>;

    /// Writes one byte to standard output (`M[IO] == 1`).
    fn write_byte(&mut self, byte: u8) -> Result<(), String>;

    /// Sleeps for `ms` milliseconds (`M[IO] == 2`).
    fn sleep_ms(&mut self, ms: u32);
}

/// A `Syscalls` implementation that performs no host-visible effects:
/// reads always yield `0`, writes are discarded, sleeps are skipped.
/// Useful for tests that exercise arithmetic/control-flow and don't care
/// about I/O, and for benchmarks that want to avoid real syscalls.
#[derive(Default)]
pub struct NullSyscalls;

impl Syscalls for NullSyscalls {
    fn read_byte(&mut self) -> Result<u8, String> {
        Ok(0)
    }

    fn write_byte(&mut self, _byte: u8) -> Result<(), String> {
        Ok(())
    }

    fn sleep_ms(&mut self, _ms: u32) {}
}

/// An in-memory double: replays a scripted input queue and records every
/// byte written, so tests can assert on VM-to-host I/O without touching
/// real stdin/stdout (spec §8 scenarios 1-2 drive this).
#[derive(Default)]
pub struct MockSyscalls {
    input: std::collections::VecDeque<u8>,
    pub output: Vec<u8>,
    pub slept_ms: Vec<u32>,
}

impl MockSyscalls {
    pub fn with_input(bytes: impl IntoIterator<Item = u8>) -> Self {
        Self { input: bytes.into_iter().collect(), output: Vec::new(), slept_ms: Vec::new() }
    }
}

impl Syscalls for MockSyscalls {
    fn read_byte(&mut self) -> Result<u8, String> {
        self.input.pop_front().ok_or_else(|| "no more scripted input bytes".to_string())
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), String> {
        self.output.push(byte);
        Ok(())
    }

    fn sleep_ms(&mut self, ms: u32) {
        self.slept_ms.push(ms);
    }
}
