//! The deterministic automaton: a dense state-transition matrix (STM) over the byte alphabet,
//! plus determinization (§4.4) and minimization (§4.5) passes that produce one.
//!
//! Unlike the NFA, whose edges are sparse, the DFA stores a full `states × 256` transition
//! table with `-1` standing in for "no transition defined" (§4.4) — both the minimizer and the
//! C emitter want O(1) lookup by `(state, byte)`, and 256 columns is cheap at this alphabet
//! size.

pub mod determinize;
pub mod minimize;

use crate::error::CompileResult;
use crate::nfa::Nfa;

/// `-1` sentinel: no transition defined for this `(state, byte)` pair, i.e. a reject.
pub const NO_TRANSITION: i32 = -1;

/// A deterministic automaton over the byte alphabet, with partial transitions.
#[derive(Debug, Clone)]
pub struct Dfa {
    num_states: usize,
    start: usize,
    /// `end_tag[s]`: the tag a match ending in state `s` should carry, or `-1` if `s` is
    /// non-accepting.
    end_tag: Vec<i32>,
    /// Flattened `num_states × 256` matrix; `stm[s * 256 + b]` is the target of state `s` on
    /// byte `b`, or [`NO_TRANSITION`].
    stm: Vec<i32>,
}

impl Dfa {
    pub(crate) fn new(num_states: usize, start: usize, end_tag: Vec<i32>, stm: Vec<i32>) -> Self {
        debug_assert_eq!(end_tag.len(), num_states);
        debug_assert_eq!(stm.len(), num_states * 256);
        Dfa {
            num_states,
            start,
            end_tag,
            stm,
        }
    }

    pub fn num_states(&self) -> usize {
        self.num_states
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end_tag(&self, state: usize) -> i32 {
        self.end_tag[state]
    }

    pub fn is_accepting(&self, state: usize) -> bool {
        self.end_tag[state] != NO_TRANSITION
    }

    pub fn transition(&self, state: usize, byte: u8) -> i32 {
        self.stm[state * 256 + byte as usize]
    }

    /// Builds a DFA recognizing the union of `trees`, each tagged in argument order, by
    /// Thompson construction followed by subset construction (§4.3, §4.4).
    pub fn from_trees(trees: &[crate::tree::ExprTree]) -> CompileResult<Self> {
        let nfa = Nfa::from_tree_list(trees)?;
        Ok(determinize::determinize(&nfa))
    }

    pub fn from_nfa(nfa: &Nfa) -> Self {
        determinize::determinize(nfa)
    }

    /// Runs `bytes` through the automaton from the start state, stopping (rejecting) the first
    /// time no transition is defined. Matches the generated C recognizer's behavior: acceptance
    /// is checked once, at EOF, against whatever state is reached (§4.6, §7 scenarios E1-E8).
    pub fn accepts(&self, bytes: &[u8]) -> bool {
        let mut state = self.start;
        for &b in bytes {
            let next = self.transition(state, b);
            if next == NO_TRANSITION {
                return false;
            }
            state = next as usize;
        }
        self.is_accepting(state)
    }

    /// Returns the minimized automaton recognizing the same language, via Moore-style
    /// partition refinement (§4.5).
    pub fn minimized(&self) -> Self {
        minimize::minimize(self)
    }
}
