//!# regexc
//!
//! `regexc` compiles a regular expression, written in a small custom syntax, into a minimized
//! DFA and then into standalone C source for a byte-at-a-time recognizer. It is a single-shot
//! translator: one regex in, one C function out, with no runtime regex engine involved and no
//! Unicode, capture groups, or anchors in scope.
//!
//! ## Usage
//!
//! ```rust
//! use regexc::tree::Definitions;
//! use regexc::{compile, CompileOptions};
//!
//! fn main() {
//!     let defs = Definitions::new();
//!     let code = compile("a(b|c)*", &defs, &CompileOptions::default()).unwrap();
//!     assert!(code.contains("void parse() {"));
//! }
//! ```
//!
//! ## Pipeline
//!
//! Compiling a pattern goes through five stages, each documented in its own module:
//!
//! 1. [`parser`] parses source text against [`tree::Definitions`] into an [`tree::ExprTree`].
//! 2. [`nfa`] builds a Thompson-construction NFA from the tree.
//! 3. [`dfa::determinize`] runs subset construction to produce a [`dfa::Dfa`].
//! 4. [`dfa::minimize`] collapses non-distinguishable states via partition refinement.
//! 5. [`emit`] renders the minimized DFA as a C function.
//!
//! [`compile`] runs all five stages end to end; callers needing the intermediate artifacts
//! (for `--debug`-style dumps, or for testing the stages against each other) call the modules
//! directly instead.

pub mod bytes;
pub mod dfa;
pub mod emit;
pub mod error;
pub mod input;
pub mod nfa;
pub mod parser;
pub mod table;
pub mod tree;

pub use dfa::Dfa;
pub use emit::{DeclFlags, EmitOptions};
pub use error::{CompileError, CompileResult};
pub use tree::{Definitions, ExprTree};

/// Options threaded through the whole pipeline: currently just the emitter's declaration
/// names and storage-class flags (§4.6), since parsing and automaton construction take no
/// configuration of their own.
pub type CompileOptions = EmitOptions;

/// Runs the full pipeline on a single pattern: parse, build the NFA, determinize, minimize,
/// emit. Equivalent to calling each stage's function in turn, for the common case where a
/// caller wants the final C source and nothing else.
pub fn compile(source: &str, defs: &Definitions, opts: &CompileOptions) -> CompileResult<String> {
    let tree = parser::parse(source, defs)?;
    log::debug!("parse complete");
    let dfa = build_minimized(std::slice::from_ref(&tree))?;
    emit::emit(&dfa, opts)
}

/// Runs the full pipeline on several patterns at once, producing a single recognizer whose
/// accepted tag (§4.3) identifies which pattern matched.
pub fn compile_union(sources: &[&str], defs: &Definitions, opts: &CompileOptions) -> CompileResult<String> {
    let trees: Vec<ExprTree> = sources.iter().map(|s| parser::parse(s, defs)).collect::<CompileResult<_>>()?;
    log::debug!("parse complete");
    let dfa = build_minimized(&trees)?;
    emit::emit(&dfa, opts)
}

/// NFA construction, determinization, and minimization, with a debug-level log line at each
/// stage boundary (§3.2) — shared by [`compile`] and [`compile_union`] so the two entry points
/// log identically.
fn build_minimized(trees: &[ExprTree]) -> CompileResult<Dfa> {
    let nfa = nfa::Nfa::from_tree_list(trees)?;
    log::debug!("NFA built with {} states", nfa.len());
    let dfa = Dfa::from_nfa(&nfa);
    log::debug!("determinization produced {} states", dfa.num_states());
    let minimized = dfa.minimized();
    log::debug!("minimization reduced {} to {} states", dfa.num_states(), minimized.num_states());
    Ok(minimized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_a_simple_pattern_end_to_end() {
        let defs = Definitions::new();
        let code = compile("a(b|c)*", &defs, &CompileOptions::default()).unwrap();
        assert!(code.contains("void parse() {"));
        assert!(code.contains("switch (next())"));
    }

    #[test]
    fn compile_union_tags_each_pattern() {
        let defs = Definitions::new();
        let code = compile_union(&["ab", "ac"], &defs, &CompileOptions::default()).unwrap();
        assert!(code.contains("accept(0)"));
        assert!(code.contains("accept(1)"));
    }

    #[test]
    fn rejects_unescaped_reserved_byte() {
        let defs = Definitions::new();
        let err = compile("a(", &defs, &CompileOptions::default()).unwrap_err();
        assert!(matches!(err, CompileError::Syntactic { .. } | CompileError::Lexical { .. }));
    }
}
