use std::fmt::Debug;

/// A node of an automaton graph.
/// It carries the node's label data of type `T` and whether the node is
/// accepting. NFA nodes carry a [`crate::automaton::State`], DFA nodes carry
/// the [`crate::automaton::subset::Subset`] they stand for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DfaNode<T: Debug + Clone> {
    pub accepting: bool,
    pub data: T,
}

impl<T: Debug + Clone> DfaNode<T> {
    pub fn new(accepting: bool, data: T) -> Self {
        DfaNode { accepting, data }
    }

    pub fn non_accepting(data: T) -> Self {
        DfaNode::new(false, data)
    }

    pub fn data(&self) -> &T {
        &self.data
    }
}
