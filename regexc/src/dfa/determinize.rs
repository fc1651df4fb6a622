//! Subset construction (NFA → DFA), §4.4.
//!
//! Each DFA state is a set of NFA node indices, identified by its sorted `Vec<usize>` so two
//! subsets reached by different routes collapse to the same DFA state. A subset's end tag is
//! the smallest tag carried by any of its accepting members — the earliest-declared pattern
//! wins when several patterns could match the same input, matching the union's declaration
//! order (§4.3).

use super::Dfa;
use crate::nfa::Nfa;
use std::collections::HashMap;

type StateSet = Vec<usize>;

fn epsilon_closure(nfa: &Nfa, seeds: &[usize]) -> StateSet {
    let mut seen: Vec<bool> = vec![false; nfa.nodes.len()];
    let mut stack: Vec<usize> = seeds.to_vec();
    for &s in seeds {
        seen[s] = true;
    }
    while let Some(s) = stack.pop() {
        for &(byte, to) in &nfa.nodes[s].edges {
            if byte.is_none() && !seen[to] {
                seen[to] = true;
                stack.push(to);
            }
        }
    }
    let mut set: StateSet = (0..nfa.nodes.len()).filter(|&i| seen[i]).collect();
    set.sort_unstable();
    set
}

fn mv(nfa: &Nfa, set: &[usize], byte: u8) -> StateSet {
    let mut seeds: Vec<usize> = Vec::new();
    for &s in set {
        for &(b, to) in &nfa.nodes[s].edges {
            if b == Some(byte) {
                seeds.push(to);
            }
        }
    }
    epsilon_closure(nfa, &seeds)
}

fn end_tag_of(nfa: &Nfa, set: &[usize]) -> i32 {
    set.iter()
        .map(|&s| nfa.nodes[s].end_tag)
        .filter(|&t| t != -1)
        .min()
        .unwrap_or(-1)
}

pub fn determinize(nfa: &Nfa) -> Dfa {
    let start_set = epsilon_closure(nfa, &[nfa.start]);

    let mut index_of: HashMap<StateSet, usize> = HashMap::new();
    let mut sets: Vec<StateSet> = Vec::new();
    index_of.insert(start_set.clone(), 0);
    sets.push(start_set);

    let mut worklist = vec![0usize];
    let mut stm: Vec<i32> = Vec::new();

    while let Some(idx) = worklist.pop() {
        let set = sets[idx].clone();
        let row_base = idx * 256;
        if stm.len() < row_base + 256 {
            stm.resize(row_base + 256, super::NO_TRANSITION);
        }
        for byte in 0u16..=255 {
            let target_set = mv(nfa, &set, byte as u8);
            if target_set.is_empty() {
                continue;
            }
            let target_idx = match index_of.get(&target_set) {
                Some(&i) => i,
                None => {
                    let i = sets.len();
                    index_of.insert(target_set.clone(), i);
                    sets.push(target_set);
                    worklist.push(i);
                    i
                }
            };
            stm[row_base + byte as usize] = target_idx as i32;
        }
    }

    let num_states = sets.len();
    stm.resize(num_states * 256, super::NO_TRANSITION);
    let end_tag: Vec<i32> = sets.iter().map(|set| end_tag_of(nfa, set)).collect();

    Dfa::new(num_states, 0, end_tag, stm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ExprTree;
    use std::rc::Rc;

    #[test]
    fn alternation_accepts_either_branch() {
        let tree = ExprTree::Alt(vec![Rc::new(ExprTree::Char(b'a')), Rc::new(ExprTree::Char(b'b'))]);
        let nfa = Nfa::from_tree(&tree).unwrap();
        let dfa = determinize(&nfa);
        assert!(dfa.accepts(b"a"));
        assert!(dfa.accepts(b"b"));
        assert!(!dfa.accepts(b"c"));
        assert!(!dfa.accepts(b"ab"));
    }

    #[test]
    fn star_accepts_empty_and_repeats() {
        let tree = ExprTree::Star(Rc::new(ExprTree::Char(b'x')));
        let nfa = Nfa::from_tree(&tree).unwrap();
        let dfa = determinize(&nfa);
        assert!(dfa.accepts(b""));
        assert!(dfa.accepts(b"xxxxx"));
        assert!(!dfa.accepts(b"xxy"));
    }

    #[test]
    fn earliest_pattern_wins_on_overlap() {
        let trees = vec![ExprTree::Char(b'a'), ExprTree::Char(b'a')];
        let nfa = Nfa::from_tree_list(&trees).unwrap();
        let dfa = determinize(&nfa);
        let s = dfa.transition(dfa.start(), b'a');
        assert_eq!(dfa.end_tag(s as usize), 0);
    }
}
