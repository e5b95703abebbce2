use hashbrown::HashSet;
use petgraph::graph::NodeIndex;

use crate::automaton::{State, nfa::NFA, subset::Subset};

impl NFA {
    /// Calculates the epsilon closure of a set of states.
    ///
    /// The result is duplicate free and sorted by state label, which makes it
    /// directly usable as the member list of a canonical [`Subset`].
    pub fn closure_indices(&self, seed: impl IntoIterator<Item = NodeIndex>) -> Vec<NodeIndex> {
        let mut closure = HashSet::new();
        let mut stack = Vec::new();

        for state in seed {
            if closure.insert(state) {
                stack.push(state);
            }
        }

        while let Some(state) = stack.pop() {
            for target in self.epsilon_successors(state) {
                if closure.insert(target) {
                    stack.push(target);
                }
            }
        }

        let mut states: Vec<NodeIndex> = closure.into_iter().collect();
        states.sort_by(|a, b| self.state(*a).cmp(self.state(*b)));
        states
    }

    /// The epsilon closure of a set of states given by label.
    ///
    /// Labels the automaton does not know are kept in the result, they simply
    /// have no epsilon successors.
    pub fn closure<'a>(&self, seed: impl IntoIterator<Item = &'a State>) -> Subset {
        let mut unknown = Vec::new();
        let mut known = Vec::new();

        for state in seed {
            match self.index_of(state.as_str()) {
                Some(index) => known.push(index),
                None => unknown.push(state.clone()),
            }
        }

        let closure = self.closure_indices(known);

        Subset::new(
            closure
                .into_iter()
                .map(|index| self.state(index).clone())
                .chain(unknown),
        )
    }
}

#[cfg(test)]
fn chain_nfa() -> NFA {
    use crate::automaton::{Symbol, nfa::NFAEdge};

    // q0 -e-> q1 -e-> q2 -a-> q3, q2 -e-> q0
    let mut nfa = NFA::new(vec![Symbol::from("a")], "q0");
    nfa.add_transition("q0", NFAEdge::Epsilon, "q1");
    nfa.add_transition("q1", NFAEdge::Epsilon, "q2");
    nfa.add_transition("q2", NFAEdge::Epsilon, "q0");
    nfa.add_transition("q2", NFAEdge::from_marker("a"), "q3");
    nfa
}

#[test]
fn test_closure_follows_epsilon_cycles() {
    let nfa = chain_nfa();
    assert_eq!(nfa.closure(&[State::from("q1")]).id(), "q0,q1,q2");
}

#[test]
fn test_closure_ignores_symbol_edges() {
    let nfa = chain_nfa();
    assert_eq!(nfa.closure(&[State::from("q3")]).id(), "q3");
}

#[test]
fn test_closure_keeps_unknown_states() {
    let nfa = chain_nfa();
    let closure = nfa.closure(&[State::from("zz"), State::from("q2")]);
    assert_eq!(closure.id(), "q0,q1,q2,zz");
}

#[test]
fn test_closure_indices_are_sorted_by_label() {
    let nfa = chain_nfa();
    let closure = nfa.closure_indices([nfa.index_of("q2").unwrap()]);
    let labels: Vec<&str> = closure.iter().map(|&i| nfa.state(i).as_str()).collect();
    assert_eq!(labels, vec!["q0", "q1", "q2"]);
}
