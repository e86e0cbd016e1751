//! Parser for the velac scripting language (spec §4.2).
//!
//! Turns a token stream into a flat [`Node`] stream and a [`LabelTable`],
//! recursive-descent with one function per precedence level — no AST is
//! ever materialized, matching the pipeline's linear, single-pass shape.

mod error;
mod label;
mod node;
mod opcode;
mod parser;

pub use error::ParseError;
pub use label::{find_label, Label, LabelId, LabelTable};
pub use node::Node;
pub use opcode::Opcode;
pub use parser::{ParseOutput, Parser};

#[cfg(test)]
mod tests {
    use super::*;
    use velac_lex::tokenize;

    fn parse(src: &str) -> ParseOutput<'_> {
        let tokens = tokenize(src, 1 << 16).expect("lex ok");
        Parser::new(tokens).parse_program().expect("parse ok")
    }

    fn ops(out: &ParseOutput<'_>) -> Vec<Opcode> {
        out.nodes.iter().map(|n| n.op).collect()
    }

    #[test]
    fn number_literal_emits_push_const() {
        let out = parse("(42)");
        assert_eq!(ops(&out), vec![Opcode::PushConst]);
    }

    #[test]
    fn bare_identifier_emits_addr_then_get() {
        let out = parse("(x)");
        assert_eq!(ops(&out), vec![Opcode::PushVarAddr, Opcode::GlobalGet]);
    }

    #[test]
    fn address_of_skips_the_get() {
        let out = parse("(&x)");
        assert_eq!(ops(&out), vec![Opcode::PushVarAddr]);
    }

    #[test]
    fn mul_binds_tighter_than_add() {
        let out = parse("(1 + 2 * 3)");
        assert_eq!(
            ops(&out),
            vec![
                Opcode::PushConst,
                Opcode::PushConst,
                Opcode::PushConst,
                Opcode::Mul,
                Opcode::Add,
            ]
        );
    }

    #[test]
    fn left_associative_subtraction() {
        // (1 - 2) - 3, not 1 - (2 - 3)
        let out = parse("(1 - 2 - 3)");
        assert_eq!(
            ops(&out),
            vec![
                Opcode::PushConst,
                Opcode::PushConst,
                Opcode::Sub,
                Opcode::PushConst,
                Opcode::Sub,
            ]
        );
    }

    #[test]
    fn ampersand_ampersand_is_recognised_as_logical_and() {
        let out = parse("(1 && 0)");
        assert_eq!(
            ops(&out),
            vec![Opcode::PushConst, Opcode::PushConst, Opcode::And]
        );
    }

    #[test]
    fn if_without_else_emits_single_jze_and_label() {
        let out = parse("(if 1 2)");
        assert_eq!(
            ops(&out),
            vec![Opcode::PushConst, Opcode::Jze, Opcode::PushConst, Opcode::Label]
        );
    }

    #[test]
    fn if_with_else_emits_jmp_over_else_branch() {
        let out = parse("(if 0 1 else 2)");
        assert_eq!(
            ops(&out),
            vec![
                Opcode::PushConst,
                Opcode::Jze,
                Opcode::PushConst,
                Opcode::Jmp,
                Opcode::Label,
                Opcode::PushConst,
                Opcode::Label,
            ]
        );
    }

    #[test]
    fn loop_wraps_body_with_start_and_end_labels() {
        let out = parse("(loop (break))");
        assert_eq!(
            ops(&out),
            vec![Opcode::Label, Opcode::Jmp, Opcode::Jmp, Opcode::Label]
        );
    }

    #[test]
    fn break_outside_loop_is_a_parse_error() {
        let tokens = tokenize("(break)", 1 << 16).unwrap();
        let err = Parser::new(tokens).parse_program().unwrap_err();
        assert_eq!(err, ParseError::BreakOutsideLoop { span: err_span(&err) });
    }

    #[test]
    fn continue_outside_loop_is_a_parse_error() {
        let tokens = tokenize("(continue)", 1 << 16).unwrap();
        let err = Parser::new(tokens).parse_program().unwrap_err();
        assert!(matches!(err, ParseError::ContinueOutsideLoop { .. }));
    }

    fn err_span(err: &ParseError) -> velac_util::Span {
        match err {
            ParseError::BreakOutsideLoop { span } | ParseError::ContinueOutsideLoop { span } => {
                *span
            }
            _ => velac_util::Span::DUMMY,
        }
    }

    #[test]
    fn call_to_user_function_emits_call_with_callee_token() {
        let out = parse("(add(1, 2))");
        assert_eq!(
            ops(&out),
            vec![Opcode::PushConst, Opcode::PushConst, Opcode::Call]
        );
        let callee = out.nodes.last().unwrap().token.unwrap();
        assert!(callee.eq_str("add"));
    }

    #[test]
    fn return_and_svc_are_special_cased_opcodes_not_call() {
        let out = parse("(return(1))");
        assert_eq!(ops(&out), vec![Opcode::PushConst, Opcode::Return]);

        let out = parse("(svc(1))");
        assert_eq!(ops(&out), vec![Opcode::PushConst, Opcode::Svc]);
    }

    #[test]
    fn function_definition_emits_preamble_and_fn_end_marker() {
        let out = parse("fn f() (1)");
        assert_eq!(
            ops(&out),
            vec![
                Opcode::Label,
                Opcode::PushVarAddr,
                Opcode::PushVarAddr,
                Opcode::GlobalGet,
                Opcode::PushConst,
                Opcode::Sub,
                Opcode::GlobalSet,
                Opcode::PushConst,
                Opcode::Return,
                Opcode::LabelFnEnd,
            ]
        );
    }

    #[test]
    fn function_arguments_get_reversed_negative_offsets() {
        let out = parse("fn f(a, b, c) (1)");
        let arg_nodes: Vec<_> = out
            .nodes
            .iter()
            .filter(|n| n.op == Opcode::PushVarAddr && n.token.is_some())
            .map(|n| n.val)
            .collect();
        assert_eq!(arg_nodes, vec![-6, -5, -4]);
    }

    #[test]
    fn find_label_resolves_by_callee_name() {
        let out = parse("fn f() (1) fn g() (2)");
        let f_name = velac_lex::tokenize("f", 8).unwrap()[0];
        let id = find_label(&out.labels, f_name).expect("f is defined");
        assert!(out.labels[id].token.unwrap().eq_str("f"));
    }
}
