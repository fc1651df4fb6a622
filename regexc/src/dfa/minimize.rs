//! Moore-style partition refinement (Hopcroft's algorithm), §4.5.
//!
//! A classic total-DFA refinement assumes one accepting/non-accepting split and transitions
//! always defined. Here transitions are partial and there can be more than two "kinds" of
//! acceptance (one per end tag), so the refinement works over a virtual automaton with one
//! extra state — the dead state, index [`num_states`](Dfa::num_states) — that every missing
//! transition is redirected to and that self-loops on every byte. States are partitioned by
//! exact end tag up front (the dead state joins the non-accepting states, since it carries no
//! tag); refinement then naturally peels it away from any real trap states that happen to
//! start in the same class, because a real trap state and the dead state only collapse back
//! together if they are genuinely indistinguishable. The dead state's class is dropped from
//! the output and any transition into it becomes `-1` again.

use super::{Dfa, NO_TRANSITION};
use std::collections::HashSet;

fn step(dfa: &Dfa, dead: usize, state: usize, byte: u8) -> usize {
    if state == dead {
        return dead;
    }
    match dfa.transition(state, byte) {
        NO_TRANSITION => dead,
        t => t as usize,
    }
}

fn tag_of(dfa: &Dfa, dead: usize, state: usize) -> i32 {
    if state == dead {
        NO_TRANSITION
    } else {
        dfa.end_tag(state)
    }
}

fn initial_partition(dfa: &Dfa, dead: usize, total: usize) -> Vec<HashSet<usize>> {
    let mut by_tag: std::collections::HashMap<i32, HashSet<usize>> = std::collections::HashMap::new();
    for s in 0..total {
        by_tag.entry(tag_of(dfa, dead, s)).or_default().insert(s);
    }
    by_tag.into_values().collect()
}

fn equivalence_classes(dfa: &Dfa) -> Vec<HashSet<usize>> {
    let dead = dfa.num_states();
    let total = dead + 1;

    let mut p = initial_partition(dfa, dead, total);
    let mut w = p.clone();

    while let Some(a) = w.pop() {
        for byte in 0u16..=255 {
            let byte = byte as u8;
            let x: HashSet<usize> = (0..total).filter(|&s| a.contains(&step(dfa, dead, s, byte))).collect();
            if x.is_empty() {
                continue;
            }
            let mut next_p = Vec::with_capacity(p.len());
            for y in p.drain(..) {
                let inter: HashSet<usize> = y.intersection(&x).copied().collect();
                let diff: HashSet<usize> = y.difference(&x).copied().collect();
                if inter.is_empty() || diff.is_empty() {
                    next_p.push(y);
                    continue;
                }
                if let Some(pos) = w.iter().position(|s| *s == y) {
                    w.swap_remove(pos);
                    w.push(inter.clone());
                    w.push(diff.clone());
                } else if inter.len() <= diff.len() {
                    w.push(inter.clone());
                } else {
                    w.push(diff.clone());
                }
                next_p.push(inter);
                next_p.push(diff);
            }
            p = next_p;
        }
    }
    p
}

pub fn minimize(dfa: &Dfa) -> Dfa {
    let dead = dfa.num_states();
    let classes = equivalence_classes(dfa);

    let dead_class = classes.iter().position(|c| c.contains(&dead)).expect("dead state must be in some class");

    let mut class_of: Vec<usize> = vec![0; dead + 1];
    for (ci, class) in classes.iter().enumerate() {
        for &s in class {
            class_of[s] = ci;
        }
    }

    // The start state can be Hopcroft-indistinguishable from the dead state — e.g. `[^\x00-\xff]`
    // parses to an `InvClass` over a full `ByteMask`, whose NFA fragment has no real edges at
    // all, so every reachable DFA state rejects on every byte just like the dead state does.
    // That's not an internal error, it's the (degenerate but legal) empty language: the correct
    // minimized automaton is a single non-accepting state with no transitions.
    if class_of[dfa.start()] == dead_class {
        return Dfa::new(1, 0, vec![NO_TRANSITION], vec![NO_TRANSITION; 256]);
    }

    let mut new_index: Vec<Option<usize>> = vec![None; classes.len()];
    let mut next = 0usize;
    for ci in 0..classes.len() {
        if ci == dead_class {
            continue;
        }
        new_index[ci] = Some(next);
        next += 1;
    }
    let num_states = next;

    let old_start_class = class_of[dfa.start()];
    let start = new_index[old_start_class].expect("start state cannot collapse into the dead class");

    let mut end_tag = vec![NO_TRANSITION; num_states];
    let mut stm = vec![NO_TRANSITION; num_states * 256];

    for ci in 0..classes.len() {
        let Some(new_i) = new_index[ci] else { continue };
        let rep = *classes[ci].iter().next().unwrap();
        end_tag[new_i] = tag_of(dfa, dead, rep);
        for byte in 0u16..=255 {
            let byte = byte as u8;
            let target_class = class_of[step(dfa, dead, rep, byte)];
            stm[new_i * 256 + byte as usize] = match new_index[target_class] {
                Some(t) => t as i32,
                None => NO_TRANSITION,
            };
        }
    }

    Dfa::new(num_states, start, end_tag, stm)
}
