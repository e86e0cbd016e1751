//! Real stdin/stdout/sleep implementation of `velac_vm::Syscalls`
//! (spec §1 "host syscall shims"; SPEC_FULL §4.6).
//!
//! The VM core never touches `std::io` or `std::thread` directly — only
//! this driver-side adapter does, so the interpreter crate stays testable
//! with an in-memory double (`velac_vm::MockSyscalls`).

use std::io::{Read, Write};
use std::time::Duration;

use velac_vm::Syscalls;

#[derive(Default)]
pub struct StdSyscalls {
    stdin: Option<std::io::Stdin>,
}

impl Syscalls for StdSyscalls {
    fn read_byte(&mut self) -> Result<u8, String> {
        let stdin = self.stdin.get_or_insert_with(std::io::stdin);
        let mut buf = [0u8; 1];
        match stdin.lock().read(&mut buf) {
            Ok(0) => Err("stdin: end of input".to_string()),
            Ok(_) => Ok(buf[0]),
            Err(e) => Err(e.to_string()),
        }
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), String> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&[byte]).map_err(|e| e.to_string())?;
        stdout.flush().map_err(|e| e.to_string())
    }

    fn sleep_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}
