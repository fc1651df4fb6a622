//! End-to-end regression scenarios: regex in, minimized-DFA state count and accept/reject
//! behavior out, matching the scenarios used throughout development (§8 of the design doc).

use regexc::tree::Definitions;
use regexc::Dfa;

fn minimized_for(pattern: &str) -> Dfa {
    let defs = Definitions::new();
    let tree = regexc::parser::parse(pattern, &defs).unwrap();
    Dfa::from_trees(&[tree]).unwrap().minimized()
}

#[test]
fn e1_single_char() {
    let dfa = minimized_for("a");
    assert_eq!(dfa.num_states(), 2);
    assert!(dfa.accepts(b"a"));
    for rejected in [&b""[..], b"aa", b"b"] {
        assert!(!dfa.accepts(rejected));
    }
}

#[test]
fn e2_concat() {
    let dfa = minimized_for("ab");
    assert_eq!(dfa.num_states(), 3);
    assert!(dfa.accepts(b"ab"));
    for rejected in [&b"a"[..], b"abc"] {
        assert!(!dfa.accepts(rejected));
    }
}

#[test]
fn e3_alternation() {
    let dfa = minimized_for("a|b");
    assert_eq!(dfa.num_states(), 2);
    assert!(dfa.accepts(b"a"));
    assert!(dfa.accepts(b"b"));
    for rejected in [&b""[..], b"ab"] {
        assert!(!dfa.accepts(rejected));
    }
}

#[test]
fn e4_star() {
    let dfa = minimized_for("a*");
    assert_eq!(dfa.num_states(), 1);
    assert!(dfa.accepts(b""));
    assert!(dfa.accepts(b"a"));
    assert!(dfa.accepts(b"aaaa"));
    assert!(!dfa.accepts(b"b"));
}

#[test]
fn e5_plus() {
    let dfa = minimized_for("a+");
    assert_eq!(dfa.num_states(), 2);
    assert!(dfa.accepts(b"a"));
    assert!(dfa.accepts(b"aaa"));
    assert!(!dfa.accepts(b""));
    assert!(!dfa.accepts(b"b"));
}

#[test]
fn e6_digit_class_plus() {
    let dfa = minimized_for("[0-9]+");
    assert_eq!(dfa.num_states(), 2);
    assert!(dfa.accepts(b"0"));
    assert!(dfa.accepts(b"42"));
    assert!(dfa.accepts(b"007"));
    assert!(!dfa.accepts(b""));
    assert!(!dfa.accepts(b"1a"));
}

#[test]
fn e7_star_of_alternated_pairs() {
    let dfa = minimized_for("(ab|cd)*");
    assert_eq!(dfa.num_states(), 3);
    assert!(dfa.accepts(b""));
    assert!(dfa.accepts(b"ab"));
    assert!(dfa.accepts(b"cdab"));
    assert!(dfa.accepts(b"abcdab"));
    assert!(!dfa.accepts(b"a"));
    assert!(!dfa.accepts(b"abc"));
}

#[test]
fn e8_inverted_whitespace_class_plus() {
    let dfa = minimized_for("[^\\s]+");
    assert_eq!(dfa.num_states(), 2);
    assert!(dfa.accepts(b"x"));
    assert!(dfa.accepts(b"hello"));
    assert!(!dfa.accepts(b""));
    assert!(!dfa.accepts(b"hi there"));
}
