use hashbrown::HashMap;
use itertools::Itertools;
use node::DfaNode;
use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};

use crate::automaton::{Alphabet, Language, Symbol, subset::Subset};

pub mod node;

/// A deterministic automaton whose states are subsets of NFA states.
///
/// Node indices follow the order in which subsets were discovered, so the
/// start subset is always node 0. The automaton is partial: a state has no
/// edge for a symbol that leads to the empty subset.
#[derive(Debug, Clone)]
pub struct DFA {
    pub graph: DiGraph<DfaNode<Subset>, Symbol>,
    subset_map: HashMap<Subset, NodeIndex>,
    alphabet: Vec<Symbol>,
    start: NodeIndex,
}

impl DFA {
    pub(crate) fn new(alphabet: Vec<Symbol>, start: DfaNode<Subset>) -> Self {
        let mut graph = DiGraph::new();
        let mut subset_map = HashMap::new();

        let subset = start.data.clone();
        let start = graph.add_node(start);
        subset_map.insert(subset, start);

        DFA {
            graph,
            subset_map,
            alphabet,
            start,
        }
    }

    pub(crate) fn add_state(&mut self, node: DfaNode<Subset>) -> NodeIndex {
        debug_assert!(!self.subset_map.contains_key(&node.data));

        let subset = node.data.clone();
        let index = self.graph.add_node(node);
        self.subset_map.insert(subset, index);
        index
    }

    pub(crate) fn add_transition(&mut self, from: NodeIndex, to: NodeIndex, symbol: Symbol) {
        self.graph.add_edge(from, to, symbol);
    }

    pub fn start(&self) -> NodeIndex {
        self.start
    }

    pub fn start_subset(&self) -> &Subset {
        self.subset(self.start)
    }

    pub fn subset(&self, node: NodeIndex) -> &Subset {
        self.graph[node].data()
    }

    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.subset_map.get(id).copied()
    }

    pub fn state_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn transition_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All subsets in discovery order.
    pub fn subsets(&self) -> impl Iterator<Item = &Subset> {
        self.graph.node_indices().map(move |index| self.subset(index))
    }

    pub fn is_accepting(&self, node: NodeIndex) -> bool {
        self.graph[node].accepting
    }

    pub fn is_accepting_subset(&self, id: &str) -> bool {
        self.index_of(id)
            .is_some_and(|index| self.is_accepting(index))
    }

    pub fn successor(&self, node: NodeIndex, symbol: &Symbol) -> Option<NodeIndex> {
        self.graph
            .edges_directed(node, Direction::Outgoing)
            .find(|edge| edge.weight() == symbol)
            .map(|edge| edge.target())
    }

    /// The subset reached from subset `from` on `symbol`, if any.
    pub fn transition(&self, from: &str, symbol: &str) -> Option<&Subset> {
        let from = self.index_of(from)?;
        let symbol = Symbol::from(symbol);
        self.successor(from, &symbol)
            .map(|target| self.subset(target))
    }

    /// Assert that the DFA is deterministic.
    /// This means that every state has at most one transition per letter and
    /// only uses letters of the alphabet.
    ///
    /// If the DFA is not deterministic, this function will panic.
    pub fn assert_deterministic(&self) {
        for state in self.graph.node_indices() {
            let letters = self
                .graph
                .edges_directed(state, Direction::Outgoing)
                .map(|edge| edge.weight())
                .collect_vec();

            for &letter in &letters {
                assert!(
                    self.alphabet.contains(letter),
                    "DFA state {} uses letter {} outside of its alphabet",
                    self.subset(state),
                    letter
                );
            }

            assert!(
                letters.iter().all_unique(),
                "DFA is not deterministic. State {} has several transitions for one letter",
                self.subset(state)
            );
        }
    }
}

impl Alphabet for DFA {
    fn alphabet(&self) -> &[Symbol] {
        self.alphabet.as_slice()
    }
}

impl Language for DFA {
    fn accepts<'a>(&self, input: impl IntoIterator<Item = &'a Symbol>) -> bool {
        let mut current = self.start;

        for symbol in input {
            match self.successor(current, symbol) {
                Some(next) => current = next,
                None => return false,
            }
        }

        self.is_accepting(current)
    }
}
