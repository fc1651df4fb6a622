//! The expression tree (ET), the parser's output and the NFA builder's input.
//!
//! Modelled as a sum type with no virtual dispatch; every traversal is an exhaustive match,
//! so the compiler flags missing arms the day a variant is added (§9).

use crate::bytes::ByteMask;
use std::rc::Rc;

/// A node of the expression tree.
///
/// `Concat`/`Alt` children are stored left-to-right in source order (§3); folding a
/// single-child `Concat`/`Alt` back down to its one child happens in the parser, not here, so
/// this type never has to special-case singleton wrappers.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprTree {
    Char(u8),
    Class(ByteMask),
    InvClass(ByteMask),
    Wildcard,
    Concat(Vec<Rc<ExprTree>>),
    Alt(Vec<Rc<ExprTree>>),
    Star(Rc<ExprTree>),
    Plus(Rc<ExprTree>),
    Opt(Rc<ExprTree>),
    /// Resolved reference to another tree. The referent is owned by a [`Definitions`]
    /// registry, not by this node (§9) — `Rc` gives cheap cloning without pretending this
    /// node owns the subtree exclusively.
    Ref(Rc<ExprTree>),
}

/// A registry of named sub-patterns a parse may resolve `{name}` references against.
///
/// Definitions may only reference definitions already present in the registry at the time
/// they themselves are registered (insertion-order acyclicity) — see the cyclic-`Ref` design
/// note (§9). This makes cycles structurally unrepresentable rather than something that must
/// be detected after the fact.
#[derive(Debug, Clone, Default)]
pub struct Definitions {
    by_name: std::collections::HashMap<Rc<str>, Rc<ExprTree>>,
}

impl Definitions {
    pub fn new() -> Self {
        Definitions::default()
    }

    /// Registers `tree` under `name`. Any `Ref`s inside `tree` must already resolve against
    /// the current contents of this registry — the caller is expected to have built `tree` via
    /// a parse that consulted [`Definitions::get`] as it went.
    pub fn define(&mut self, name: impl Into<Rc<str>>, tree: Rc<ExprTree>) {
        self.by_name.insert(name.into(), tree);
    }

    pub fn get(&self, name: &str) -> Option<Rc<ExprTree>> {
        self.by_name.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definitions_resolve_by_name() {
        let mut defs = Definitions::new();
        defs.define("digit", Rc::new(ExprTree::Char(b'5')));
        assert_eq!(defs.get("digit"), Some(Rc::new(ExprTree::Char(b'5'))));
        assert_eq!(defs.get("missing"), None);
    }
}
