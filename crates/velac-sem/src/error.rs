use thiserror::Error;

/// Analysis failures (spec §7c: "none in the original; implementations
/// MAY report duplicate argument names"). The original analyzer has no
/// failure path at all — it resolves whatever node stream the parser
/// handed it. We add exactly the one check the spec explicitly invites.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalyzeError {
    #[error("duplicate parameter name `{name}` in function definition")]
    DuplicateArgument { name: String },
}
