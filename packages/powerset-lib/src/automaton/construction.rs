use std::collections::VecDeque;

use itertools::Itertools;
use petgraph::graph::NodeIndex;

use crate::automaton::{
    Alphabet,
    dfa::{DFA, node::DfaNode},
    nfa::NFA,
    steps::{StepRecord, StepTransition},
    subset::Subset,
};

/// The result of one subset construction run.
#[derive(Debug, Clone)]
pub struct Construction {
    pub dfa: DFA,
    pub steps: StepRecord,
}

/// Determinizes an NFA by breadth-first subset construction.
///
/// Every DFA state is the epsilon closure of a set of NFA states, named by its
/// canonical id. Starting from the closure of the NFA start state, subsets are
/// processed in the order they are discovered, and each symbol of the
/// alphabet is tried in declared order. Symbols leading to the empty subset
/// get no transition, the DFA is not completed with a trap state.
///
/// One [`crate::automaton::steps::ConstructionStep`] is recorded per subset
/// once all of its symbols were processed.
pub fn build(nfa: &NFA) -> Construction {
    let start_states = nfa.closure_indices([nfa.start()]);
    let start_node = node_for(nfa, &start_states);
    tracing::debug!("Start subset {}", start_node.data);

    let mut dfa = DFA::new(nfa.alphabet().to_vec(), start_node);
    let mut steps = StepRecord::default();

    // Pending subsets together with their NFA members.
    let mut queue: VecDeque<(NodeIndex, Vec<NodeIndex>)> = VecDeque::new();
    queue.push_back((dfa.start(), start_states));

    while let Some((current, members)) = queue.pop_front() {
        let mut transitions = Vec::with_capacity(nfa.alphabet().len());

        for symbol in nfa.alphabet() {
            let targets = members
                .iter()
                .flat_map(|&state| nfa.successors(state, symbol))
                .collect_vec();

            let next_states = nfa.closure_indices(targets);
            if next_states.is_empty() {
                continue;
            }

            let next_subset = nfa.subset_of(&next_states);
            let target = match dfa.index_of(next_subset.id()) {
                Some(target) => target,
                None => {
                    let target = dfa.add_state(node_for(nfa, &next_states));
                    tracing::debug!(
                        "Discovered subset {} via {} from {}",
                        next_subset,
                        symbol,
                        dfa.subset(current)
                    );
                    queue.push_back((target, next_states));
                    target
                }
            };

            dfa.add_transition(current, target, symbol.clone());
            transitions.push(StepTransition {
                symbol: symbol.clone(),
                target: next_subset,
            });
        }

        steps.record(
            dfa.subset(current).clone(),
            dfa.is_accepting(current),
            transitions,
        );
    }

    #[cfg(debug_assertions)]
    dfa.assert_deterministic();

    tracing::info!(
        "Subset construction finished: {} NFA states, {} DFA states, {} transitions",
        nfa.state_count(),
        dfa.state_count(),
        dfa.transition_count()
    );

    Construction { dfa, steps }
}

/// Creates the DFA node for a set of NFA states.
fn node_for(nfa: &NFA, states: &[NodeIndex]) -> DfaNode<Subset> {
    DfaNode::new(nfa.is_accepting_set(states), nfa.subset_of(states))
}
