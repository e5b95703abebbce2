use itertools::Itertools;
use powerset_lib::{
    automaton::{
        Language, Symbol,
        nfa::{NFA, NFAEdge},
    },
    validation::same_language::{assert_same_language, same_language},
};

fn sym(c: &str) -> NFAEdge {
    NFAEdge::Symbol(c.into())
}

fn word(w: &str) -> Vec<Symbol> {
    w.chars().map(|c| Symbol::from(c.to_string())).collect_vec()
}

#[test]
fn test_nfa_to_dfa() {
    let mut nfa = NFA::new(vec!["a".into(), "b".into()], "q0");
    nfa.set_accepting("q2");

    nfa.add_transition("q0", sym("a"), "q0");
    nfa.add_transition("q0", sym("b"), "q1");

    nfa.add_transition("q1", sym("a"), "q2");
    nfa.add_transition("q2", sym("b"), "q1");

    nfa.add_transition("q1", sym("a"), "q1");
    nfa.add_transition("q1", sym("b"), "q1");

    nfa.add_transition("q2", sym("a"), "q2");
    nfa.add_transition("q2", sym("b"), "q2");

    let construction = nfa.determinize();

    assert_same_language(&nfa, &construction.dfa, 6);
}

#[test]
fn test_nfa_to_dfa_2() {
    let mut nfa = NFA::new(vec!["a".into(), "b".into()], "q0");
    nfa.set_accepting("q2");

    nfa.add_transition("q0", sym("a"), "q0");
    nfa.add_transition("q0", sym("b"), "q0");

    nfa.add_transition("q0", sym("a"), "q1");
    nfa.add_transition("q1", sym("b"), "q2");

    let construction = nfa.determinize();

    assert_same_language(&nfa, &construction.dfa, 6);
    assert!(construction.dfa.accepts(&word("bab")));
    assert!(!construction.dfa.accepts(&word("aba")));
}

#[test]
fn test_nfa_to_dfa_3() {
    // epsilon transitions out of the start state
    let mut nfa = NFA::new(vec!["a".into(), "b".into()], "q0");
    nfa.set_accepting("q4");

    nfa.add_transition("q0", sym("a"), "q1");
    nfa.add_transition("q0", NFAEdge::Epsilon, "q2");

    nfa.add_transition("q1", sym("b"), "q2");

    nfa.add_transition("q2", sym("a"), "q3");
    nfa.add_transition("q2", NFAEdge::Epsilon, "q4");

    nfa.add_transition("q3", sym("b"), "q2");

    let construction = nfa.determinize();

    assert_eq!(construction.dfa.start_subset().id(), "q0,q2,q4");
    assert!(construction.dfa.accepts(&word("")));
    assert!(construction.dfa.accepts(&word("abab")));
    assert_same_language(&nfa, &construction.dfa, 6);
}

#[test]
fn test_determinize_invariant_to_insertion_order() {
    let edges = [
        ("q0", sym("a"), "q1"),
        ("q0", NFAEdge::Epsilon, "q2"),
        ("q1", sym("b"), "q2"),
        ("q2", sym("a"), "q3"),
        ("q2", NFAEdge::Epsilon, "q4"),
        ("q3", sym("b"), "q2"),
    ];

    let mut nfa_a = NFA::new(vec!["a".into(), "b".into()], "q0");
    for state in ["q1", "q2", "q3", "q4"] {
        nfa_a.add_state(state);
    }
    for (from, edge, to) in edges.iter().cloned() {
        nfa_a.add_transition(from, edge, to);
    }
    nfa_a.set_accepting("q4");

    // states and edges in reverse order
    let mut nfa_b = NFA::new(vec!["a".into(), "b".into()], "q0");
    nfa_b.set_accepting("q4");
    for state in ["q3", "q2", "q1"] {
        nfa_b.add_state(state);
    }
    for (from, edge, to) in edges.iter().rev().cloned() {
        nfa_b.add_transition(from, edge, to);
    }

    let a = nfa_a.determinize();
    let b = nfa_b.determinize();

    assert_eq!(
        a.dfa.subsets().collect_vec(),
        b.dfa.subsets().collect_vec()
    );
    assert_eq!(a.steps, b.steps);
    assert!(same_language(&a.dfa, &b.dfa, 6));
}

#[test]
fn test_nfa_accepts() {
    let mut nfa = NFA::new(vec!["a".into(), "b".into()], "q0");
    nfa.set_accepting("q1");
    nfa.add_transition("q0", sym("a"), "q1");
    nfa.add_transition("q1", NFAEdge::Epsilon, "q0");

    assert!(nfa.accepts(&word("a")));
    assert!(nfa.accepts(&word("aaa")));
    assert!(!nfa.accepts(&word("")));
    assert!(!nfa.accepts(&word("ab")));
}

#[test]
fn test_different_languages_detected() {
    let mut only_a = NFA::new(vec!["a".into()], "q0");
    only_a.set_accepting("q1");
    only_a.add_transition("q0", sym("a"), "q1");

    let mut a_or_aa = only_a.clone();
    a_or_aa.add_transition("q1", sym("a"), "q2");
    a_or_aa.set_accepting("q2");

    assert!(same_language(&only_a, &a_or_aa, 1));
    assert!(!same_language(&only_a, &a_or_aa, 2));
    assert!(same_language(&only_a, &only_a.determinize().dfa, 4));
}
