use std::fmt::Display;

use crate::automaton::steps::{ConstructionStep, StepRecord};

/// A caller-owned position in a [`StepRecord`].
///
/// The position counts how many steps have been revealed and always stays in
/// `0..=step_count`. Advancing reveals the step at the current position,
/// retreating hides the last revealed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Playback {
    position: usize,
    step_count: usize,
}

impl Playback {
    pub fn new(record: &StepRecord) -> Self {
        Playback {
            position: 0,
            step_count: record.step_count(),
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn is_at_start(&self) -> bool {
        self.position == 0
    }

    pub fn is_at_end(&self) -> bool {
        self.position == self.step_count
    }

    /// Moves one step forward. Returns the index of the newly revealed step,
    /// or `None` if all steps are already revealed.
    pub fn advance(&mut self) -> Option<usize> {
        if self.is_at_end() {
            return None;
        }

        self.position += 1;
        Some(self.position - 1)
    }

    /// Moves one step back. Returns the index of the step that got hidden, or
    /// `None` if nothing is revealed.
    pub fn retreat(&mut self) -> Option<usize> {
        if self.is_at_start() {
            return None;
        }

        self.position -= 1;
        Some(self.position)
    }

    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// The steps revealed so far.
    pub fn revealed<'a>(&self, record: &'a StepRecord) -> &'a [ConstructionStep] {
        let steps = record.steps();
        &steps[..self.position.min(steps.len())]
    }
}

impl Display for Playback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Step {} of {}", self.position, self.step_count)
    }
}

#[cfg(test)]
fn record(count: usize) -> StepRecord {
    use crate::automaton::subset::Subset;

    let mut record = StepRecord::default();
    for i in 0..count {
        let subset: Subset = [format!("q{}", i).as_str()].into_iter().collect();
        record.record(subset, false, vec![]);
    }
    record
}

#[test]
fn test_playback_bounds() {
    let record = record(2);
    let mut playback = Playback::new(&record);

    assert!(playback.is_at_start());
    assert_eq!(playback.retreat(), None);
    assert_eq!(playback.advance(), Some(0));
    assert_eq!(playback.advance(), Some(1));
    assert!(playback.is_at_end());
    assert_eq!(playback.advance(), None);
    assert_eq!(playback.position(), 2);
    assert_eq!(playback.to_string(), "Step 2 of 2");

    assert_eq!(playback.retreat(), Some(1));
    assert_eq!(playback.revealed(&record).len(), 1);
    assert_eq!(playback.revealed(&record)[0].subset().id(), "q0");

    playback.reset();
    assert_eq!(playback.position(), 0);
    assert!(playback.revealed(&record).is_empty());
}

#[test]
fn test_playback_empty_record() {
    let record = StepRecord::default();
    let mut playback = Playback::new(&record);
    assert!(playback.is_at_start() && playback.is_at_end());
    assert_eq!(playback.advance(), None);
    assert_eq!(playback.to_string(), "Step 0 of 0");
}
