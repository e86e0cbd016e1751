//! Top-level driver errors (spec §7; SPEC_FULL §7).
//!
//! Each pipeline phase reports through its own `thiserror` enum
//! (`LexError`, `ParseError`, `AnalyzeError`, `GenError`, `VmError`); this
//! enum only adds the driver-level failure modes that sit outside the
//! compiler proper — reading the source file, parsing a config file, the
//! out-of-scope debug dump (spec §1, §6).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DrvError {
    #[error("failed to read source file `{path}`: {source}")]
    ReadSource { path: PathBuf, #[source] source: std::io::Error },

    #[error("failed to read config file `{path}`: {source}")]
    ReadConfig { path: PathBuf, #[source] source: std::io::Error },

    #[error("failed to parse config file `{path}`: {source}")]
    ParseConfig { path: PathBuf, #[source] source: toml::de::Error },

    #[error("failed to write debug memory dump to `{path}`: {source}")]
    WriteDump { path: PathBuf, #[source] source: std::io::Error },

    #[error("invalid memory layout: {0}")]
    InvalidLayout(String),

    #[error(transparent)]
    Lex(#[from] velac_lex::LexError),

    #[error(transparent)]
    Parse(#[from] velac_par::ParseError),

    #[error(transparent)]
    Analyze(#[from] velac_sem::AnalyzeError),

    #[error(transparent)]
    Gen(#[from] velac_gen::GenError),

    #[error(transparent)]
    Vm(#[from] velac_vm::VmError),
}
