//! Debug memory dump (spec §6: "a debug side-channel dumping memory cells
//! as decimal integers, one per line, into a file named by the host").
//!
//! Strictly observability — never consulted by the VM, opt-in via
//! `--dump-memory`.

use std::io::Write;
use std::path::Path;

use velac_gen::Memory;

use crate::error::DrvError;

pub fn write_dump(mem: &Memory, path: &Path) -> Result<(), DrvError> {
    let mut out = String::with_capacity(mem.len() * 4);
    for cell in mem.as_slice() {
        out.push_str(&cell.to_string());
        out.push('\n');
    }
    std::fs::File::create(path)
        .and_then(|mut f| f.write_all(out.as_bytes()))
        .map_err(|source| DrvError::WriteDump { path: path.to_path_buf(), source })
}
