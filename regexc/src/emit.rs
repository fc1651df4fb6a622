//! The C code emitter (§4.6): renders a minimized [`Dfa`] as a `void parser_name()` function
//! built from a nested `switch (state) { switch (next()) { ... } }`, grounded closely on the
//! source tool's `print_automaton_to_c_code`.
//!
//! Adjacent bytes routed to the same target state are coalesced into one `case lo ... hi:`
//! label (a GNU case-range extension), rather than emitting 256 individual cases per state.

use crate::dfa::Dfa;
use crate::error::{CompileError, CompileResult};
use std::fmt::Write as _;

/// Which of the four generated declarations (`next`, `accept`, `reject`, the parser function
/// itself) get a `static` or `extern` storage-class keyword. Bit layout mirrors the source
/// tool's `flags << 0/2/4/6` shifts: for each pair, bit 0 is `static`, bit 1 is `extern`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeclFlags(pub u32);

impl DeclFlags {
    pub const NEXT_STATIC: u32 = 1 << 0;
    pub const NEXT_EXTERN: u32 = 1 << 1;
    pub const ACCEPT_STATIC: u32 = 1 << 2;
    pub const ACCEPT_EXTERN: u32 = 1 << 3;
    pub const REJECT_STATIC: u32 = 1 << 4;
    pub const REJECT_EXTERN: u32 = 1 << 5;
    pub const PARSER_STATIC: u32 = 1 << 6;
    pub const PARSER_EXTERN: u32 = 1 << 7;

    fn modifier(self, shift: u32) -> CompileResult<&'static str> {
        let static_bit = (self.0 >> shift) & 1 != 0;
        let extern_bit = (self.0 >> (shift + 1)) & 1 != 0;
        match (static_bit, extern_bit) {
            (true, true) => Err(CompileError::internal(
                "cannot declare a generated function as both static and extern",
            )),
            (true, false) => Ok("static "),
            (false, true) => Ok("extern "),
            (false, false) => Ok(""),
        }
    }
}

/// Names and storage-class choices for the four generated declarations.
#[derive(Debug, Clone)]
pub struct EmitOptions {
    pub parser_name: String,
    pub next_name: String,
    pub accept_name: String,
    pub reject_name: String,
    pub flags: DeclFlags,
}

impl Default for EmitOptions {
    fn default() -> Self {
        EmitOptions {
            parser_name: "parse".to_string(),
            next_name: "next".to_string(),
            accept_name: "accept".to_string(),
            reject_name: "reject".to_string(),
            flags: DeclFlags::default(),
        }
    }
}

/// Renders `dfa` as a complete C function matching `opts`. Buffered into a `String`; nothing
/// is returned unless the whole function rendered without error (§7 — no partial output).
pub fn emit(dfa: &Dfa, opts: &EmitOptions) -> CompileResult<String> {
    let mut out = String::new();

    writeln!(out, "{}int {}();", opts.flags.modifier(0)?, opts.next_name).unwrap();
    writeln!(out, "{}int {}(int tag);", opts.flags.modifier(2)?, opts.accept_name).unwrap();
    writeln!(out, "{}void {}();", opts.flags.modifier(4)?, opts.reject_name).unwrap();
    writeln!(out, "{}void {}() {{", opts.flags.modifier(6)?, opts.parser_name).unwrap();
    writeln!(out, "  int state = {};", dfa.start()).unwrap();
    writeln!(out, "  while (1) {{").unwrap();
    writeln!(out, "    switch (state) {{").unwrap();

    for state in 0..dfa.num_states() {
        writeln!(out, "    case {}:", state).unwrap();
        let tag = dfa.end_tag(state);
        if tag != -1 {
            writeln!(out, "      if ({}({})) {{ return; }}", opts.accept_name, tag).unwrap();
        }
        writeln!(out, "      switch ({}()) {{", opts.next_name).unwrap();

        let mut byte = 0u32;
        while byte < 256 {
            let target = dfa.transition(state, byte as u8);
            if target == crate::dfa::NO_TRANSITION {
                byte += 1;
                continue;
            }
            let range_start = byte;
            while byte + 1 < 256 && dfa.transition(state, (byte + 1) as u8) == target {
                byte += 1;
            }
            if range_start == byte {
                writeln!(out, "      case {}:", range_start).unwrap();
            } else {
                writeln!(out, "      case {} ... {}:", range_start, byte).unwrap();
            }
            writeln!(out, "        state = {};", target).unwrap();
            writeln!(out, "        continue;").unwrap();
            byte += 1;
        }

        writeln!(out, "      default:").unwrap();
        writeln!(out, "        {}();", opts.reject_name).unwrap();
        writeln!(out, "        return;").unwrap();
        writeln!(out, "      }}").unwrap();
    }

    writeln!(out, "    }}").unwrap();
    writeln!(out, "  }}").unwrap();
    writeln!(out, "}}").unwrap();

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nfa::Nfa;
    use crate::tree::ExprTree;
    use std::rc::Rc;

    fn dfa_for(tree: ExprTree) -> Dfa {
        let nfa = Nfa::from_tree(&tree).unwrap();
        Dfa::from_nfa(&nfa).minimized()
    }

    #[test]
    fn emits_expected_shape_for_simple_pattern() {
        let tree = ExprTree::Concat(vec![Rc::new(ExprTree::Char(b'a')), Rc::new(ExprTree::Char(b'b'))]);
        let dfa = dfa_for(tree);
        let code = emit(&dfa, &EmitOptions::default()).unwrap();
        assert!(code.contains("int next();"));
        assert!(code.contains("int accept(int tag);"));
        assert!(code.contains("void reject();"));
        assert!(code.contains("void parse() {"));
        assert!(code.contains("if (accept(0)) { return; }"));
        assert!(code.contains("default:"));
    }

    #[test]
    fn coalesces_contiguous_byte_ranges() {
        let dfa = dfa_for(ExprTree::Wildcard);
        let code = emit(&dfa, &EmitOptions::default()).unwrap();
        assert!(code.contains("case 0 ... 255:"));
    }

    #[test]
    fn static_and_extern_together_is_an_internal_error() {
        let dfa = dfa_for(ExprTree::Char(b'a'));
        let opts = EmitOptions {
            flags: DeclFlags(DeclFlags::NEXT_STATIC | DeclFlags::NEXT_EXTERN),
            ..EmitOptions::default()
        };
        assert!(emit(&dfa, &opts).is_err());
    }

    #[test]
    fn declaration_modifiers_are_applied() {
        let dfa = dfa_for(ExprTree::Char(b'a'));
        let opts = EmitOptions {
            flags: DeclFlags(DeclFlags::PARSER_STATIC),
            ..EmitOptions::default()
        };
        let code = emit(&dfa, &opts).unwrap();
        assert!(code.contains("static void parse() {"));
    }
}
