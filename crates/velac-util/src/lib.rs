//! Shared foundation types for the velac pipeline: source spans and a
//! typed index vector. Mirrors the role `faxc-util` plays for the `faxc`
//! workspace, trimmed to what a single-pass, abort-on-first-error
//! bytecode compiler actually needs — `faxc-util`'s diagnostic collector
//! and string interner exist to support `faxc`'s multi-error recovery and
//! hashed symbol tables, neither of which this pipeline has (spec §7's
//! propagation policy aborts at the first error; locals and labels are
//! resolved straight off borrowed `Token`s, see `velac-par::label`).

mod index_vec;
mod span;

pub use index_vec::{Idx, IndexVec};
pub use span::Span;
