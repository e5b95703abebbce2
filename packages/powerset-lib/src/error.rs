use thiserror::Error;

/// Raised before construction starts when the automaton description lacks one
/// of its required parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("no start state given")]
    MissingStart,

    #[error("no alphabet given")]
    MissingAlphabet,

    #[error("no transitions given")]
    MissingTransitions,
}

/// Raised when a caller addresses a construction step that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlaybackError {
    #[error("step {index} is out of range, the construction has {count} steps")]
    OutOfRange { index: usize, count: usize },
}
