//! Recursive-descent parser (spec §4.2).
//!
//! Produces a flat [`Node`] stream plus a [`LabelTable`] — no tree is ever
//! built. Each precedence level is a function that calls the next-tighter
//! level first and then loops consuming operators at its own level,
//! pushing the corresponding opcode node after each right operand. This
//! mirrors the original's `parse_*` cascade function-for-function.

use velac_lex::Token;
use velac_util::{Idx, Span};

use crate::label::{Label, LabelId, LabelTable};
use crate::node::Node;
use crate::opcode::Opcode;
use crate::error::ParseError;

fn label_val(id: LabelId) -> i32 {
    id.index() as i32
}

/// Sentinel inherited `break`/`continue` target used outside any `loop`
/// (spec §4.2: "outside a loop they use a sentinel id that linking will
/// reject or leave dangling"). We turn a `break`/`continue` seen with this
/// sentinel still in scope into a parse error rather than emitting a
/// dangling jump, per the spec's explicit guidance to implementations.
const NO_LOOP: i32 = -1;

pub struct Parser<'src> {
    tokens: Vec<Token<'src>>,
    pos: usize,
    nodes: Vec<Node<'src>>,
    labels: LabelTable<'src>,
}

pub struct ParseOutput<'src> {
    pub nodes: Vec<Node<'src>>,
    pub labels: LabelTable<'src>,
}

impl<'src> Parser<'src> {
    pub fn new(tokens: Vec<Token<'src>>) -> Self {
        Self { tokens, pos: 0, nodes: Vec::new(), labels: LabelTable::new() }
    }

    /// Parses the entire token stream as a sequence of top-level items
    /// (spec §4.2: "`fn name(...) body` allocates a fresh label id... Top
    /// level statements outside any `fn` are emitted directly").
    pub fn parse_program(mut self) -> Result<ParseOutput<'src>, ParseError> {
        while !self.is_at_end() {
            self.parse_fn(NO_LOOP, NO_LOOP)?;
        }
        Ok(ParseOutput { nodes: self.nodes, labels: self.labels })
    }

    // -- token stream helpers -------------------------------------------------

    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Option<Token<'src>> {
        self.tokens.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<Token<'src>> {
        self.tokens.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<Token<'src>> {
        let tok = self.peek();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn check(&self, s: &str) -> bool {
        self.peek().is_some_and(|t| t.eq_str(s))
    }

    fn check_at(&self, offset: usize, s: &str) -> bool {
        self.peek_at(offset).is_some_and(|t| t.eq_str(s))
    }

    fn expect(&mut self, s: &'static str) -> Result<Token<'src>, ParseError> {
        match self.peek() {
            Some(tok) if tok.eq_str(s) => {
                self.advance();
                Ok(tok)
            }
            Some(tok) => Err(ParseError::UnexpectedToken {
                expected: s,
                found: tok.as_str().to_string(),
                span: tok.span,
            }),
            None => Err(ParseError::UnexpectedEof),
        }
    }

    fn current_span(&self) -> Span {
        self.peek().map(|t| t.span).unwrap_or(Span::DUMMY)
    }

    fn push(&mut self, op: Opcode, token: Option<Token<'src>>, val: i32) {
        self.nodes.push(Node::new(op, token, val));
    }

    fn fresh_label(&mut self) -> LabelId {
        self.labels.push(Label::anonymous())
    }

    // -- grammar ---------------------------------------------------------------

    /// `fn name(arg1, arg2, …) body` | `expr` (spec §4.2 "Function
    /// definition").
    fn parse_fn(&mut self, lab_break: i32, lab_cont: i32) -> Result<(), ParseError> {
        if !self.check("fn") {
            return self.parse_expr(lab_break, lab_cont);
        }
        self.advance();
        let lab_fn = self.labels.push(Label::anonymous());
        let name = self.expect_ident()?;
        self.labels[lab_fn] = Label::function(name);

        self.expect("(")?;
        let mut arg_size = 0i32;
        while !self.check(")") {
            let arg_token = self.expect_ident()?;
            self.push(Opcode::PushVarAddr, Some(arg_token), 0);
            arg_size += 1;
            if self.check(",") {
                self.advance();
            }
        }
        self.expect(")")?;

        // Arguments were pushed in source order above; patch each one's
        // offset to `-4 - (n-1-i)` so argument `i` of `n` lands at
        // `BP-4`, `BP-5`, … (spec §4.2 "Argument-offset reversal").
        let first_arg_node = self.nodes.len() - arg_size as usize;
        for i in 0..arg_size {
            self.nodes[first_arg_node + i as usize].val = -4 - (arg_size - 1 - i);
        }

        self.push(Opcode::Label, None, label_val(lab_fn));

        // Callee preamble: rewrite the saved-SP slot at BP-2 to
        // `SP - arg_size`, reclaiming the space the caller used to push
        // arguments (spec §4.2, SPEC_FULL §4.2). This does NOT touch the
        // live SP register directly — it patches the slot `RETURN` will
        // later restore SP from.
        self.push(Opcode::PushVarAddr, None, -2);
        self.push(Opcode::PushVarAddr, None, -2);
        self.push(Opcode::GlobalGet, None, 0);
        self.push(Opcode::PushConst, None, arg_size);
        self.push(Opcode::Sub, None, 0);
        self.push(Opcode::GlobalSet, None, 0);

        self.parse_expr(lab_break, lab_cont)?;
        self.push(Opcode::Return, None, 0);
        self.push(Opcode::LabelFnEnd, None, 0);
        Ok(())
    }

    fn expect_ident(&mut self) -> Result<Token<'src>, ParseError> {
        match self.peek() {
            Some(tok) => {
                self.advance();
                Ok(tok)
            }
            None => Err(ParseError::UnexpectedEof),
        }
    }

    /// `"if" expr expr ("else" expr)? | "loop" expr | "break" | "continue"
    /// | assign` (spec §4.2).
    fn parse_expr(&mut self, lab_break: i32, lab_cont: i32) -> Result<(), ParseError> {
        if self.check("if") {
            self.advance();
            let lab_if = self.fresh_label();
            let lab_else = self.fresh_label();
            self.parse_expr(lab_break, lab_cont)?;
            self.push(Opcode::Jze, None, label_val(lab_if));
            self.parse_expr(lab_break, lab_cont)?;
            if self.check("else") {
                self.advance();
                self.push(Opcode::Jmp, None, label_val(lab_else));
                self.push(Opcode::Label, None, label_val(lab_if));
                self.parse_expr(lab_break, lab_cont)?;
                self.push(Opcode::Label, None, label_val(lab_else));
            } else {
                self.push(Opcode::Label, None, label_val(lab_if));
            }
            Ok(())
        } else if self.check("loop") {
            self.advance();
            let lab_start = self.fresh_label();
            let lab_end = self.fresh_label();
            self.push(Opcode::Label, None, label_val(lab_start));
            self.parse_expr(label_val(lab_end), label_val(lab_start))?;
            self.push(Opcode::Jmp, None, label_val(lab_start));
            self.push(Opcode::Label, None, label_val(lab_end));
            Ok(())
        } else if self.check("break") {
            let span = self.current_span();
            self.advance();
            if lab_break == NO_LOOP {
                return Err(ParseError::BreakOutsideLoop { span });
            }
            self.push(Opcode::Jmp, None, lab_break);
            Ok(())
        } else if self.check("continue") {
            let span = self.current_span();
            self.advance();
            if lab_cont == NO_LOOP {
                return Err(ParseError::ContinueOutsideLoop { span });
            }
            self.push(Opcode::Jmp, None, lab_cont);
            Ok(())
        } else {
            self.parse_assign(lab_break, lab_cont)
        }
    }

    /// `or ("=" or)*` — left-to-right, left operand re-evaluated each time
    /// through the generic `or` chain (spec §4.2; see SPEC_FULL §9 for the
    /// `&lhs = rhs` idiom this implies).
    fn parse_assign(&mut self, lab_break: i32, lab_cont: i32) -> Result<(), ParseError> {
        self.parse_or(lab_break, lab_cont)?;
        while self.check("=") {
            self.advance();
            self.parse_or(lab_break, lab_cont)?;
            self.push(Opcode::GlobalSet, None, 0);
        }
        Ok(())
    }

    /// `and ("||" and)*`.
    fn parse_or(&mut self, lab_break: i32, lab_cont: i32) -> Result<(), ParseError> {
        self.parse_and(lab_break, lab_cont)?;
        while self.check("||") {
            self.advance();
            self.parse_and(lab_break, lab_cont)?;
            self.push(Opcode::Or, None, 0);
        }
        Ok(())
    }

    /// `eq ("&&" eq)*` — `&&` lexes as two adjacent `&` tokens (spec §4.1),
    /// so this level looks two tokens ahead rather than checking one.
    fn parse_and(&mut self, lab_break: i32, lab_cont: i32) -> Result<(), ParseError> {
        self.parse_eq(lab_break, lab_cont)?;
        while self.check("&") && self.check_at(1, "&") {
            self.advance();
            self.advance();
            self.parse_eq(lab_break, lab_cont)?;
            self.push(Opcode::And, None, 0);
        }
        Ok(())
    }

    /// `rel (("=="|"!=") rel)*`.
    fn parse_eq(&mut self, lab_break: i32, lab_cont: i32) -> Result<(), ParseError> {
        self.parse_rel(lab_break, lab_cont)?;
        loop {
            if self.check("==") {
                self.advance();
                self.parse_rel(lab_break, lab_cont)?;
                self.push(Opcode::Eq, None, 0);
            } else if self.check("!=") {
                self.advance();
                self.parse_rel(lab_break, lab_cont)?;
                self.push(Opcode::Ne, None, 0);
            } else {
                break;
            }
        }
        Ok(())
    }

    /// `add (("<"|">") add)*`.
    fn parse_rel(&mut self, lab_break: i32, lab_cont: i32) -> Result<(), ParseError> {
        self.parse_add(lab_break, lab_cont)?;
        loop {
            if self.check("<") {
                self.advance();
                self.parse_add(lab_break, lab_cont)?;
                self.push(Opcode::Lt, None, 0);
            } else if self.check(">") {
                self.advance();
                self.parse_add(lab_break, lab_cont)?;
                self.push(Opcode::Gt, None, 0);
            } else {
                break;
            }
        }
        Ok(())
    }

    /// `mul (("+"|"-") mul)*`.
    fn parse_add(&mut self, lab_break: i32, lab_cont: i32) -> Result<(), ParseError> {
        self.parse_mul(lab_break, lab_cont)?;
        loop {
            if self.check("+") {
                self.advance();
                self.parse_mul(lab_break, lab_cont)?;
                self.push(Opcode::Add, None, 0);
            } else if self.check("-") {
                self.advance();
                self.parse_mul(lab_break, lab_cont)?;
                self.push(Opcode::Sub, None, 0);
            } else {
                break;
            }
        }
        Ok(())
    }

    /// `unary (("*"|"/"|"%") unary)*`.
    fn parse_mul(&mut self, lab_break: i32, lab_cont: i32) -> Result<(), ParseError> {
        self.parse_unary(lab_break, lab_cont)?;
        loop {
            if self.check("*") {
                self.advance();
                self.parse_unary(lab_break, lab_cont)?;
                self.push(Opcode::Mul, None, 0);
            } else if self.check("/") {
                self.advance();
                self.parse_unary(lab_break, lab_cont)?;
                self.push(Opcode::Div, None, 0);
            } else if self.check("%") {
                self.advance();
                self.parse_unary(lab_break, lab_cont)?;
                self.push(Opcode::Mod, None, 0);
            } else {
                break;
            }
        }
        Ok(())
    }

    /// `"&" IDENT | "*" postfix | postfix`.
    fn parse_unary(&mut self, lab_break: i32, lab_cont: i32) -> Result<(), ParseError> {
        if self.check("&") {
            self.advance();
            let ident = self.expect_ident()?;
            self.push(Opcode::PushVarAddr, Some(ident), 0);
            Ok(())
        } else if self.check("*") {
            self.advance();
            self.parse_postfix(lab_break, lab_cont)?;
            self.push(Opcode::GlobalGet, None, 0);
            Ok(())
        } else {
            self.parse_postfix(lab_break, lab_cont)
        }
    }

    /// `IDENT "(" primary | primary` (spec §4.2 "Calls").
    fn parse_postfix(&mut self, lab_break: i32, lab_cont: i32) -> Result<(), ParseError> {
        if self.check_at(1, "(") {
            let callee = self.peek().ok_or(ParseError::UnexpectedEof)?;
            self.advance();
            self.parse_primary(lab_break, lab_cont)?;
            if callee.eq_str("return") {
                self.push(Opcode::Return, None, 0);
            } else if callee.eq_str("svc") {
                self.push(Opcode::Svc, None, 0);
            } else {
                self.push(Opcode::Call, Some(callee), 0);
            }
            Ok(())
        } else {
            self.parse_primary(lab_break, lab_cont)
        }
    }

    /// `"(" expr ("," expr)* ")" | NUMBER | IDENT`.
    fn parse_primary(&mut self, lab_break: i32, lab_cont: i32) -> Result<(), ParseError> {
        if self.check("(") {
            self.advance();
            while !self.check(")") {
                self.parse_expr(lab_break, lab_cont)?;
                if self.check(",") {
                    self.advance();
                }
            }
            self.expect(")")?;
            Ok(())
        } else {
            let tok = self.peek().ok_or(ParseError::UnexpectedEof)?;
            if tok.is_number() {
                self.push(Opcode::PushConst, Some(tok), 0);
                self.advance();
            } else {
                self.push(Opcode::PushVarAddr, Some(tok), 0);
                self.push(Opcode::GlobalGet, None, 0);
                self.advance();
            }
            Ok(())
        }
    }
}
