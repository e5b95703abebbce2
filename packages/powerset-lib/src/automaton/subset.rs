use std::{
    borrow::Borrow,
    cmp::Ordering,
    fmt::Display,
    hash::{Hash, Hasher},
};

use itertools::Itertools;
use serde::{Serialize, Serializer};

use crate::automaton::State;

/// Separator between member labels in a canonical subset id.
pub const SUBSET_SEPARATOR: &str = ",";

/// Builds the canonical id of a set of states: the member labels sorted
/// lexicographically, deduplicated and joined by [`SUBSET_SEPARATOR`].
///
/// Every lookup and equality check on subsets goes through this id, so two
/// sets of states name the same DFA state exactly when their ids match.
pub fn canonical_id<'a>(states: impl IntoIterator<Item = &'a State>) -> String {
    states
        .into_iter()
        .map(State::as_str)
        .sorted()
        .dedup()
        .join(SUBSET_SEPARATOR)
}

/// A set of NFA states, identified by its canonical id. Subsets are used as
/// the states of the constructed DFA.
#[derive(Debug, Clone)]
pub struct Subset {
    id: String,
    states: Vec<State>,
}

impl Subset {
    pub fn new(states: impl IntoIterator<Item = State>) -> Self {
        let states = states.into_iter().sorted().dedup().collect_vec();
        let id = canonical_id(&states);

        Subset { id, states }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The id wrapped in braces, as shown on DFA nodes and table rows.
    pub fn label(&self) -> String {
        format!("{{{}}}", self.id)
    }

    /// Member states in canonical order.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn contains(&self, state: &str) -> bool {
        self.states
            .binary_search_by(|s| s.as_str().cmp(state))
            .is_ok()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for Subset {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Subset::new(iter.into_iter().map(State::from))
    }
}

impl PartialEq for Subset {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Subset {}

impl Hash for Subset {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Subset {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Subset {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl Borrow<str> for Subset {
    fn borrow(&self) -> &str {
        &self.id
    }
}

impl Display for Subset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl Serialize for Subset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.id)
    }
}

#[test]
fn test_canonical_id_is_order_independent() {
    let a = [State::from("q2"), State::from("q0"), State::from("q1")];
    let b = [State::from("q1"), State::from("q2"), State::from("q0")];
    assert_eq!(canonical_id(&a), "q0,q1,q2");
    assert_eq!(canonical_id(&a), canonical_id(&b));
}

#[test]
fn test_canonical_id_deduplicates() {
    let states = [State::from("b"), State::from("a"), State::from("b")];
    assert_eq!(canonical_id(&states), "a,b");
}

#[test]
fn test_canonical_id_empty() {
    assert_eq!(canonical_id(&[]), "");
}

#[test]
fn test_subset_equality_uses_id() {
    let a: Subset = ["q3", "q1"].into_iter().collect();
    let b: Subset = ["q1", "q3", "q1"].into_iter().collect();
    assert_eq!(a, b);
    assert_eq!(a.id(), "q1,q3");
    assert_eq!(a.label(), "{q1,q3}");
    assert_eq!(a.len(), 2);
    assert!(a.contains("q3"));
    assert!(!a.contains("q2"));
}
