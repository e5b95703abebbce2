use serde::Serialize;

use crate::{
    automaton::{Symbol, subset::Subset},
    error::PlaybackError,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepTransition {
    pub symbol: Symbol,
    pub target: Subset,
}

/// One step of a subset construction: a discovered subset together with all
/// of its outgoing transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstructionStep {
    subset: Subset,
    accepting: bool,
    transitions: Vec<StepTransition>,
}

impl ConstructionStep {
    pub fn subset(&self) -> &Subset {
        &self.subset
    }

    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    /// Outgoing transitions in alphabet order. Symbols leading to the empty
    /// subset are absent.
    pub fn transitions(&self) -> &[StepTransition] {
        &self.transitions
    }

    pub fn target(&self, symbol: &str) -> Option<&Subset> {
        self.transitions
            .iter()
            .find(|t| t.symbol.as_str() == symbol)
            .map(|t| &t.target)
    }
}

/// The steps of one subset construction in discovery order.
///
/// The record is immutable once the construction finished. It holds no
/// playback position, see [`crate::playback::Playback`] for that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StepRecord {
    steps: Vec<ConstructionStep>,
}

impl StepRecord {
    /// Appends the step of a fully processed subset.
    pub(crate) fn record(
        &mut self,
        subset: Subset,
        accepting: bool,
        transitions: Vec<StepTransition>,
    ) {
        self.steps.push(ConstructionStep {
            subset,
            accepting,
            transitions,
        });
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn step_at(&self, index: usize) -> Result<&ConstructionStep, PlaybackError> {
        self.steps.get(index).ok_or(PlaybackError::OutOfRange {
            index,
            count: self.steps.len(),
        })
    }

    pub fn steps(&self) -> &[ConstructionStep] {
        &self.steps
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConstructionStep> {
        self.steps.iter()
    }
}

#[test]
fn test_step_at_out_of_range() {
    let mut record = StepRecord::default();
    record.record(["q0"].into_iter().collect(), false, vec![]);

    assert_eq!(record.step_count(), 1);
    assert_eq!(record.step_at(0).unwrap().subset().id(), "q0");
    assert_eq!(
        record.step_at(1),
        Err(PlaybackError::OutOfRange { index: 1, count: 1 })
    );
}

#[test]
fn test_step_target_lookup() {
    let target: Subset = ["q1", "q0"].into_iter().collect();
    let mut record = StepRecord::default();
    record.record(
        ["q0"].into_iter().collect(),
        false,
        vec![StepTransition {
            symbol: Symbol::from("a"),
            target: target.clone(),
        }],
    );

    let step = record.step_at(0).unwrap();
    assert_eq!(step.target("a"), Some(&target));
    assert_eq!(step.target("b"), None);
}
