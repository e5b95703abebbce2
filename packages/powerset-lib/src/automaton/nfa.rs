use hashbrown::HashMap;
use itertools::Itertools;
use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};
use serde::{Deserialize, Serialize};

use crate::{
    automaton::{
        Alphabet, Language, State, Symbol,
        dfa::node::DfaNode,
        subset::Subset,
    },
    error::InputError,
};

/// The symbol that marks an epsilon transition in textual input.
pub const EPSILON_MARKER: &str = "e";
/// How epsilon is displayed, also accepted as a marker in input.
pub const EPSILON_LABEL: &str = "ε";

pub fn is_epsilon_marker(label: &str) -> bool {
    label == EPSILON_MARKER || label == EPSILON_LABEL
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NFAEdge {
    Symbol(Symbol),
    Epsilon,
}

impl NFAEdge {
    /// Reads an edge label, mapping the epsilon markers to [`NFAEdge::Epsilon`].
    pub fn from_marker(label: &str) -> Self {
        if is_epsilon_marker(label) {
            NFAEdge::Epsilon
        } else {
            NFAEdge::Symbol(Symbol::from(label))
        }
    }

    pub fn is_epsilon(&self) -> bool {
        matches!(self, NFAEdge::Epsilon)
    }

    pub fn matches(&self, symbol: &Symbol) -> bool {
        match self {
            NFAEdge::Symbol(s) => s == symbol,
            NFAEdge::Epsilon => false,
        }
    }

    /// The edge label with epsilon shown as `epsilon_label`.
    pub fn display_label<'a>(&'a self, epsilon_label: &'a str) -> &'a str {
        match self {
            NFAEdge::Symbol(s) => s.as_str(),
            NFAEdge::Epsilon => epsilon_label,
        }
    }
}

/// One `from, symbol -> to` entry of an [`NFADescription`]. The symbol uses the
/// textual convention: [`EPSILON_MARKER`] or [`EPSILON_LABEL`] mean epsilon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionDescription {
    pub from: String,
    pub symbol: String,
    pub to: Vec<String>,
}

impl TransitionDescription {
    pub fn new(from: &str, symbol: &str, to: &[&str]) -> Self {
        TransitionDescription {
            from: from.to_string(),
            symbol: symbol.to_string(),
            to: to.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// The trimmed targets, blank entries left out.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.to.iter().map(|t| t.trim()).filter(|t| !t.is_empty())
    }

    /// A transition needs a source, a symbol and at least one target.
    pub fn is_well_formed(&self) -> bool {
        !self.from.trim().is_empty()
            && !self.symbol.trim().is_empty()
            && self.targets().next().is_some()
    }
}

/// A structured NFA request as handed over by callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NFADescription {
    pub states: Vec<String>,
    pub alphabet: Vec<String>,
    pub transitions: Vec<TransitionDescription>,
    pub start: Option<String>,
    pub accepting: Vec<String>,
}

impl NFADescription {
    /// Checks the fields the construction cannot start without.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.start.as_deref().is_none_or(|s| s.trim().is_empty()) {
            return Err(InputError::MissingStart);
        }
        if self
            .alphabet
            .iter()
            .all(|s| s.trim().is_empty() || is_epsilon_marker(s.trim()))
        {
            return Err(InputError::MissingAlphabet);
        }
        if !self.transitions.iter().any(TransitionDescription::is_well_formed) {
            return Err(InputError::MissingTransitions);
        }

        Ok(())
    }
}

/// Trimmed entries of a label list, warning about blank ones.
fn non_blank<'a>(labels: &'a [String], field: &'a str) -> impl Iterator<Item = &'a str> {
    labels.iter().map(|l| l.trim()).filter(move |l| {
        if l.is_empty() {
            tracing::warn!("Skipping blank entry in {}", field);
        }
        !l.is_empty()
    })
}

/// A nondeterministic finite automaton over string labelled states.
///
/// States are nodes of `graph`, transitions are edges labelled with an
/// [`NFAEdge`]. Any state mentioned by a transition, the start or the
/// accepting set is part of the automaton, declared or not.
#[derive(Debug, Clone)]
pub struct NFA {
    pub graph: DiGraph<DfaNode<State>, NFAEdge>,
    state_map: HashMap<State, NodeIndex>,
    alphabet: Vec<Symbol>,
    start: NodeIndex,
}

impl NFA {
    /// Creates an NFA holding only its start state. Epsilon markers and
    /// duplicates are dropped from the alphabet.
    pub fn new(alphabet: Vec<Symbol>, start: impl Into<State>) -> Self {
        let alphabet = alphabet
            .into_iter()
            .filter(|symbol| {
                let epsilon = is_epsilon_marker(symbol.as_str());
                if epsilon {
                    tracing::warn!("Dropping epsilon marker {:?} from the alphabet", symbol.as_str());
                }
                !epsilon
            })
            .unique()
            .collect_vec();

        let mut graph = DiGraph::new();
        let start_state = start.into();
        let start = graph.add_node(DfaNode::non_accepting(start_state.clone()));

        let mut state_map = HashMap::new();
        state_map.insert(start_state, start);

        NFA {
            graph,
            state_map,
            alphabet,
            start,
        }
    }

    /// Builds an NFA from a caller supplied description.
    ///
    /// Fails if the start state, the alphabet or the transitions are missing.
    /// Everything else is accepted leniently: blank labels and transitions
    /// without a source, symbol or target are skipped with a warning.
    pub fn from_description(description: &NFADescription) -> Result<Self, InputError> {
        description.validate()?;

        let start = description
            .start
            .as_deref()
            .map(str::trim)
            .ok_or(InputError::MissingStart)?;

        let mut nfa = NFA::new(
            non_blank(&description.alphabet, "alphabet")
                .map(Symbol::from)
                .collect(),
            start,
        );

        for state in non_blank(&description.states, "states") {
            nfa.add_state(state);
        }

        if !description.states.iter().any(|s| s.trim() == start) {
            tracing::warn!("Start state {} is not among the declared states", start);
        }

        for transition in &description.transitions {
            if !transition.is_well_formed() {
                tracing::warn!(
                    "Skipping malformed transition {:?},{:?} -> {:?}",
                    transition.from,
                    transition.symbol,
                    transition.to
                );
                continue;
            }
            if transition.targets().count() < transition.to.len() {
                tracing::warn!(
                    "Dropping blank targets of transition {},{}",
                    transition.from,
                    transition.symbol
                );
            }

            let from = transition.from.trim();
            let edge = NFAEdge::from_marker(transition.symbol.trim());
            if let NFAEdge::Symbol(symbol) = &edge
                && !nfa.alphabet.contains(symbol)
            {
                tracing::warn!(
                    "Transition {},{} uses a symbol outside of the alphabet",
                    from,
                    symbol
                );
            }

            for target in transition.targets() {
                nfa.add_transition(from, edge.clone(), target);
            }
        }

        for state in non_blank(&description.accepting, "accepting states") {
            nfa.set_accepting(state);
        }

        Ok(nfa)
    }

    /// Returns the node of the given state, adding the state if it is new.
    pub fn add_state(&mut self, state: impl Into<State>) -> NodeIndex {
        let state = state.into();
        if let Some(&index) = self.state_map.get(&state) {
            return index;
        }

        let index = self.graph.add_node(DfaNode::non_accepting(state.clone()));
        self.state_map.insert(state, index);
        index
    }

    pub fn set_accepting(&mut self, state: impl Into<State>) {
        let index = self.add_state(state);
        self.graph[index].accepting = true;
    }

    /// Adds a transition, creating unknown states on the way. Returns false if
    /// the transition was already present.
    pub fn add_transition(
        &mut self,
        from: impl Into<State>,
        edge: NFAEdge,
        to: impl Into<State>,
    ) -> bool {
        let from = self.add_state(from);
        let to = self.add_state(to);

        if self
            .graph
            .edges_connecting(from, to)
            .any(|e| *e.weight() == edge)
        {
            return false;
        }

        self.graph.add_edge(from, to, edge);
        true
    }

    pub fn start(&self) -> NodeIndex {
        self.start
    }

    pub fn start_state(&self) -> &State {
        self.state(self.start)
    }

    pub fn state(&self, node: NodeIndex) -> &State {
        self.graph[node].data()
    }

    pub fn index_of(&self, state: &str) -> Option<NodeIndex> {
        self.state_map.get(state).copied()
    }

    pub fn state_count(&self) -> usize {
        self.graph.node_count()
    }

    /// All states in the order they were added, start state first.
    pub fn states(&self) -> impl Iterator<Item = (NodeIndex, &State)> {
        self.graph
            .node_indices()
            .map(move |index| (index, self.state(index)))
    }

    pub fn is_accepting(&self, state: NodeIndex) -> bool {
        self.graph[state].accepting
    }

    /// Checks if a set of states contains an accepting state.
    pub fn is_accepting_set(&self, states: &[NodeIndex]) -> bool {
        states.iter().any(|&x| self.is_accepting(x))
    }

    /// Targets of all `symbol` transitions leaving `state`.
    pub fn successors<'a>(
        &'a self,
        state: NodeIndex,
        symbol: &'a Symbol,
    ) -> impl Iterator<Item = NodeIndex> + 'a {
        self.graph
            .edges_directed(state, Direction::Outgoing)
            .filter(move |edge| edge.weight().matches(symbol))
            .map(|edge| edge.target())
    }

    /// Targets of all epsilon transitions leaving `state`.
    pub fn epsilon_successors(&self, state: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph
            .edges_directed(state, Direction::Outgoing)
            .filter(|edge| edge.weight().is_epsilon())
            .map(|edge| edge.target())
    }

    /// The transition relation grouped by `(source, edge label)`. Sources come
    /// in the order they first appear, and so do the labels of one source.
    /// Targets keep their insertion order.
    pub fn transition_groups(&self) -> Vec<(NodeIndex, &NFAEdge, Vec<NodeIndex>)> {
        let mut groups: Vec<(NodeIndex, &NFAEdge, Vec<NodeIndex>)> = Vec::new();
        let mut positions: HashMap<(NodeIndex, &NFAEdge), usize> = HashMap::new();

        let mut sources: HashMap<NodeIndex, usize> = HashMap::new();

        for edge in self.graph.edge_references() {
            let rank = sources.len();
            sources.entry(edge.source()).or_insert(rank);

            let key = (edge.source(), edge.weight());
            match positions.get(&key).copied() {
                Some(position) => groups[position].2.push(edge.target()),
                None => {
                    positions.insert(key, groups.len());
                    groups.push((edge.source(), edge.weight(), vec![edge.target()]));
                }
            }
        }

        groups.sort_by_key(|(source, _, _)| sources[source]);
        groups
    }

    /// Creates the subset made up of the given states.
    pub fn subset_of(&self, states: &[NodeIndex]) -> Subset {
        Subset::new(states.iter().map(|&index| self.state(index).clone()))
    }

    /// Determinizes the NFA, see [`crate::automaton::construction::build`].
    pub fn determinize(&self) -> crate::automaton::construction::Construction {
        crate::automaton::construction::build(self)
    }
}

impl Alphabet for NFA {
    fn alphabet(&self) -> &[Symbol] {
        self.alphabet.as_slice()
    }
}

impl Language for NFA {
    fn accepts<'a>(&self, input: impl IntoIterator<Item = &'a Symbol>) -> bool {
        let mut current_states = self.closure_indices([self.start]);

        for symbol in input {
            let next_states = current_states
                .iter()
                .flat_map(|&state| self.successors(state, symbol))
                .collect_vec();

            if next_states.is_empty() {
                return false;
            }

            current_states = self.closure_indices(next_states);
        }

        self.is_accepting_set(&current_states)
    }
}

#[cfg(test)]
fn description() -> NFADescription {
    NFADescription {
        states: vec!["q0".into(), "q1".into()],
        alphabet: vec!["a".into(), "b".into()],
        transitions: vec![
            TransitionDescription::new("q0", "a", &["q1"]),
            TransitionDescription::new("q1", "e", &["q0"]),
        ],
        start: Some("q0".into()),
        accepting: vec!["q1".into()],
    }
}

#[test]
fn test_missing_fields() {
    let mut d = description();
    d.start = None;
    assert_eq!(NFA::from_description(&d).unwrap_err(), InputError::MissingStart);

    let mut d = description();
    d.start = Some("  ".into());
    assert_eq!(NFA::from_description(&d).unwrap_err(), InputError::MissingStart);

    let mut d = description();
    d.alphabet = vec!["e".into()];
    assert_eq!(NFA::from_description(&d).unwrap_err(), InputError::MissingAlphabet);

    let mut d = description();
    d.transitions.clear();
    assert_eq!(NFA::from_description(&d).unwrap_err(), InputError::MissingTransitions);

    let mut d = description();
    d.transitions = vec![
        TransitionDescription::new("q0", "a", &[]),
        TransitionDescription::new("q0", "a", &["", "  "]),
        TransitionDescription::new(" ", "a", &["q1"]),
        TransitionDescription::new("q0", "", &["q1"]),
    ];
    assert_eq!(NFA::from_description(&d).unwrap_err(), InputError::MissingTransitions);

    let mut d = description();
    d.alphabet = vec!["".into(), " ".into()];
    assert_eq!(NFA::from_description(&d).unwrap_err(), InputError::MissingAlphabet);
}

#[test]
fn test_blank_labels_are_skipped() {
    let mut d = description();
    d.states.push(" ".into());
    d.alphabet.push("".into());
    d.accepting.push("".into());
    d.transitions = vec![
        TransitionDescription::new("q0", "a", &["", " q1 "]),
        TransitionDescription::new("q1", "b", &[]),
        TransitionDescription::new("", "b", &["q0"]),
    ];

    let nfa = NFA::from_description(&d).unwrap();
    assert_eq!(nfa.state_count(), 2);
    assert!(nfa.index_of("").is_none());
    assert_eq!(nfa.alphabet(), &[Symbol::from("a"), Symbol::from("b")]);
    assert_eq!(nfa.graph.edge_count(), 1);

    let construction = nfa.determinize();
    assert!(construction.dfa.subsets().all(|s| !s.is_empty()));
    assert_eq!(
        construction.dfa.subsets().map(|s| s.id()).collect_vec(),
        vec!["q0", "q1"]
    );
}

#[test]
fn test_lenient_states() {
    let mut d = description();
    d.start = Some("s".into());
    d.transitions.push(TransitionDescription::new("q1", "b", &["ghost"]));
    d.accepting.push("other".into());

    let nfa = NFA::from_description(&d).unwrap();
    assert_eq!(nfa.start_state().as_str(), "s");
    assert!(nfa.index_of("ghost").is_some());
    assert!(nfa.is_accepting(nfa.index_of("other").unwrap()));
    assert_eq!(nfa.state_count(), 5);
}

#[test]
fn test_epsilon_marker_is_not_a_symbol() {
    let mut d = description();
    d.alphabet.push("e".into());
    d.alphabet.push("a".into());

    let nfa = NFA::from_description(&d).unwrap();
    assert_eq!(nfa.alphabet(), &[Symbol::from("a"), Symbol::from("b")]);
    let q1 = nfa.index_of("q1").unwrap();
    assert_eq!(
        nfa.epsilon_successors(q1).collect_vec(),
        vec![nfa.index_of("q0").unwrap()]
    );
}

#[test]
fn test_duplicate_transitions_are_ignored() {
    let mut nfa = NFA::new(vec![Symbol::from("a")], "q0");
    assert!(nfa.add_transition("q0", NFAEdge::from_marker("a"), "q1"));
    assert!(!nfa.add_transition("q0", NFAEdge::from_marker("a"), "q1"));
    assert!(nfa.add_transition("q0", NFAEdge::from_marker("e"), "q1"));
    assert_eq!(nfa.graph.edge_count(), 2);
}

#[test]
fn test_transition_groups_are_grouped_by_source() {
    let mut nfa = NFA::new(vec![Symbol::from("a"), Symbol::from("b")], "q0");
    nfa.add_transition("q0", NFAEdge::from_marker("a"), "q1");
    nfa.add_transition("q1", NFAEdge::from_marker("a"), "q0");
    nfa.add_transition("q0", NFAEdge::from_marker("b"), "q0");

    let rows = nfa
        .transition_groups()
        .into_iter()
        .map(|(from, edge, _)| format!("{} {}", nfa.state(from), edge.display_label(EPSILON_LABEL)))
        .collect_vec();

    assert_eq!(rows, vec!["q0 a", "q0 b", "q1 a"]);
}

#[test]
fn test_transition_groups_keep_first_appearance_order() {
    let mut nfa = NFA::new(vec![Symbol::from("a"), Symbol::from("b")], "q0");
    nfa.add_transition("q1", NFAEdge::from_marker("b"), "q0");
    nfa.add_transition("q0", NFAEdge::from_marker("a"), "q0");
    nfa.add_transition("q1", NFAEdge::from_marker("b"), "q1");

    let groups = nfa
        .transition_groups()
        .into_iter()
        .map(|(from, edge, to)| {
            (
                nfa.state(from).to_string(),
                edge.display_label(EPSILON_LABEL).to_string(),
                to.into_iter().map(|t| nfa.state(t).to_string()).collect_vec(),
            )
        })
        .collect_vec();

    assert_eq!(
        groups,
        vec![
            ("q1".to_string(), "b".to_string(), vec!["q0".to_string(), "q1".to_string()]),
            ("q0".to_string(), "a".to_string(), vec!["q0".to_string()]),
        ]
    );
}
