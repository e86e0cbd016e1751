//! Local-offset resolution and literal folding (spec §4.3).
//!
//! A single linear pass over the node stream produced by `velac-par`,
//! partitioned by `LabelFnEnd` markers into one local-variable scope per
//! function. Mutates `Node::val` in place: `PushConst` nodes get their
//! token's decimal value folded in, `PushVarAddr` nodes get their token
//! resolved to a frame-relative offset.

use rustc_hash::FxHashMap;
use velac_lex::Token;
use velac_par::{Node, Opcode};

use crate::error::AnalyzeError;

/// One function's local-variable scope: name -> frame offset, plus the
/// next fresh offset to hand out. Reset at every `LabelFnEnd`.
#[derive(Default)]
struct Scope<'src> {
    offsets: FxHashMap<Token<'src>, i32>,
    next_fresh: i32,
}

impl<'src> Scope<'src> {
    fn reset(&mut self) {
        self.offsets.clear();
        self.next_fresh = 0;
    }
}

/// Runs the analyzer over `nodes` in place.
///
/// `nodes` must be the exact stream `velac-par::Parser::parse_program`
/// produced — the partitioning by `LabelFnEnd` and the argument
/// pre-seeding (`val != 0` for parameter declarations, spec §4.2) are
/// both assumed here, not re-derived.
pub fn analyze<'src>(nodes: &mut [Node<'src>]) -> Result<(), AnalyzeError> {
    let mut scope = Scope::default();

    for node in nodes.iter_mut() {
        if node.op == Opcode::LabelFnEnd {
            scope.reset();
            continue;
        }
        let Some(token) = node.token else { continue };

        match node.op {
            Opcode::PushConst => {
                node.val = token_to_int(&token);
            }
            Opcode::PushVarAddr => {
                resolve_local(&mut scope, node, token)?;
            }
            _ => {}
        }
    }

    Ok(())
}

/// Resolves one `PushVarAddr` node's identifier against the current
/// function's local table (spec §4.3).
///
/// First occurrence of a name *defines* the local — there is no separate
/// declaration syntax. A pre-seeded nonzero `val` (set by the parser for
/// parameter declarations, spec §4.2) becomes that local's stored offset;
/// otherwise the next fresh non-negative slot is allocated. Either way the
/// node's own `val` is overwritten with the fresh counter's current value
/// on first occurrence — this looks like it discards the parameter's
/// negative offset, but the declaration node it's attached to is dead code
/// at runtime (`CALL` jumps straight past it to the function's `Label`),
/// so only the *stored* offset, consulted by later references, matters.
/// This is the original's behavior, preserved exactly (spec §4.3, §9
/// "first-use-defines-local").
fn resolve_local<'src>(
    scope: &mut Scope<'src>,
    node: &mut Node<'src>,
    token: Token<'src>,
) -> Result<(), AnalyzeError> {
    if let Some(&offset) = scope.offsets.get(&token) {
        if node.val != 0 {
            return Err(AnalyzeError::DuplicateArgument { name: token.as_str().to_string() });
        }
        node.val = offset;
        return Ok(());
    }

    let stored = if node.val != 0 { node.val } else { scope.next_fresh };
    scope.offsets.insert(token, stored);
    node.val = scope.next_fresh;
    scope.next_fresh += 1;
    Ok(())
}

/// Parses a token's decimal digits into an `i32` (spec §4.3, §8
/// "`token_to_int`"). Mirrors the original's `token_to_int`: an optional
/// leading `-`, then digits accumulated `ret = ret * 10 + digit`. Uses
/// wrapping arithmetic rather than the original's silent overflow UB —
/// still no panic on pathological input, matching §7's "must not corrupt
/// host memory".
fn token_to_int(token: &Token<'_>) -> i32 {
    let bytes = token.text;
    let (neg, digits) = match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        _ => (false, bytes),
    };
    let mut ret: i32 = 0;
    for &b in digits {
        if b.is_ascii_digit() {
            ret = ret.wrapping_mul(10).wrapping_add((b - b'0') as i32);
        }
    }
    if neg {
        ret.wrapping_neg()
    } else {
        ret
    }
}
