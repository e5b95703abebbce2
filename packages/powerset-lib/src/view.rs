//! Plain data handed to graph and table renderers.
//!
//! Nothing in here draws anything. The views only decide which nodes, edges
//! and rows exist and how they are labelled.

use hashbrown::HashMap;
use itertools::Itertools;
use serde::Serialize;

use crate::{
    automaton::{
        Alphabet,
        construction::Construction,
        nfa::NFA,
        steps::ConstructionStep,
        subset::Subset,
    },
    config::ViewConfig,
    error::PlaybackError,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub accepting: bool,
    pub initial: bool,
}

/// All symbols leading from `from` to `to`, merged into one label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphView {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// Merges labelled connections into one edge per `(from, to)` pair. The merged
/// label is the sorted, comma-joined set of the individual labels. Edges are
/// ordered by the first appearance of their pair.
pub fn merge_edges(connections: impl IntoIterator<Item = (String, String, String)>) -> Vec<GraphEdge> {
    let mut pairs: Vec<(String, String)> = Vec::new();
    let mut labels: HashMap<(String, String), Vec<String>> = HashMap::new();

    for (from, to, label) in connections {
        let key = (from, to);
        match labels.get_mut(&key) {
            Some(existing) => existing.push(label),
            None => {
                pairs.push(key.clone());
                labels.insert(key, vec![label]);
            }
        }
    }

    pairs
        .into_iter()
        .map(|key| {
            let label = labels
                .remove(&key)
                .unwrap_or_default()
                .into_iter()
                .sorted()
                .dedup()
                .join(",");
            let (from, to) = key;
            GraphEdge { from, to, label }
        })
        .collect()
}

impl GraphView {
    /// One node per NFA state, one edge per connected pair of states.
    pub fn nfa(nfa: &NFA, config: &ViewConfig) -> Self {
        let nodes = nfa
            .states()
            .map(|(index, state)| GraphNode {
                id: state.to_string(),
                label: state.to_string(),
                accepting: nfa.is_accepting(index),
                initial: index == nfa.start(),
            })
            .collect();

        let edges = merge_edges(nfa.transition_groups().into_iter().flat_map(
            |(from, edge, targets)| {
                let label = edge.display_label(config.get_epsilon_label()).to_string();
                targets.into_iter().map(move |to| {
                    (
                        nfa.state(from).to_string(),
                        nfa.state(to).to_string(),
                        label.clone(),
                    )
                })
            },
        ));

        GraphView { nodes, edges }
    }

    /// The DFA as it looks after the given construction steps were revealed.
    ///
    /// Edges of a revealed step are shown even if their target subset is only
    /// revealed by a later step.
    pub fn from_steps(steps: &[ConstructionStep], start: &Subset) -> Self {
        let nodes = steps
            .iter()
            .map(|step| GraphNode {
                id: step.subset().id().to_string(),
                label: step.subset().label(),
                accepting: step.is_accepting(),
                initial: step.subset() == start,
            })
            .collect();

        let edges = merge_edges(steps.iter().flat_map(|step| {
            step.transitions().iter().map(move |t| {
                (
                    step.subset().id().to_string(),
                    t.target.id().to_string(),
                    t.symbol.to_string(),
                )
            })
        }));

        GraphView { nodes, edges }
    }

    /// The complete DFA.
    pub fn dfa(construction: &Construction) -> Self {
        GraphView::from_steps(
            construction.steps.steps(),
            construction.dfa.start_subset(),
        )
    }

    /// The DFA after the first `position` steps, `position` being a playback
    /// position in `0..=step_count`.
    pub fn dfa_up_to(construction: &Construction, position: usize) -> Result<Self, PlaybackError> {
        let steps = construction.steps.steps();
        if position > steps.len() {
            return Err(PlaybackError::OutOfRange {
                index: position,
                count: steps.len(),
            });
        }

        Ok(GraphView::from_steps(
            &steps[..position],
            construction.dfa.start_subset(),
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NfaTableRow {
    pub state: String,
    pub symbol: String,
    pub targets: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DfaTableRow {
    pub subset: String,
    pub symbol: String,
    pub target: String,
}

/// One row per `(state, symbol)` pair that has transitions, epsilon included.
pub fn nfa_table(nfa: &NFA, config: &ViewConfig) -> Vec<NfaTableRow> {
    nfa.transition_groups()
        .into_iter()
        .map(|(from, edge, targets)| NfaTableRow {
            state: nfa.state(from).to_string(),
            symbol: edge.display_label(config.get_epsilon_label()).to_string(),
            targets: targets.into_iter().map(|t| nfa.state(t)).join(", "),
        })
        .collect()
}

/// One row per subset and alphabet symbol, in discovery and alphabet order.
/// Missing transitions are shown with the configured none marker.
pub fn dfa_table(construction: &Construction, config: &ViewConfig) -> Vec<DfaTableRow> {
    let dfa = &construction.dfa;

    dfa.graph
        .node_indices()
        .cartesian_product(dfa.alphabet())
        .map(|(node, symbol)| DfaTableRow {
            subset: dfa.subset(node).label(),
            symbol: symbol.to_string(),
            target: dfa
                .successor(node, symbol)
                .map(|target| dfa.subset(target).label())
                .unwrap_or_else(|| config.get_none_marker().clone()),
        })
        .collect()
}

#[test]
fn test_merge_edges() {
    let edges = merge_edges(vec![
        ("q0".into(), "q1".into(), "b".into()),
        ("q1".into(), "q0".into(), "a".into()),
        ("q0".into(), "q1".into(), "a".into()),
        ("q0".into(), "q1".into(), "b".into()),
    ]);

    assert_eq!(
        edges,
        vec![
            GraphEdge {
                from: "q0".into(),
                to: "q1".into(),
                label: "a,b".into(),
            },
            GraphEdge {
                from: "q1".into(),
                to: "q0".into(),
                label: "a".into(),
            },
        ]
    );
}
