use itertools::Itertools;

use crate::automaton::{Language, Symbol};

/// All words over `alphabet` of exactly `length` symbols.
fn words_of_length(alphabet: &[Symbol], length: usize) -> Box<dyn Iterator<Item = Vec<&Symbol>> + '_> {
    if length == 0 {
        return Box::new(std::iter::once(vec![]));
    }

    Box::new(
        std::iter::repeat_n(alphabet.iter(), length).multi_cartesian_product(),
    )
}

/// Searches for a word of at most `max_length` symbols that is accepted by
/// exactly one of the two automata. Words are drawn from the alphabet of `a`.
pub fn find_difference(
    a: &impl Language,
    b: &impl Language,
    max_length: usize,
) -> Option<Vec<Symbol>> {
    (0..=max_length)
        .flat_map(|length| words_of_length(a.alphabet(), length))
        .find(|word| a.accepts(word.iter().copied()) != b.accepts(word.iter().copied()))
        .map(|word| word.into_iter().cloned().collect())
}

/// Checks that both automata agree on all words of at most `max_length`
/// symbols.
pub fn same_language(a: &impl Language, b: &impl Language, max_length: usize) -> bool {
    find_difference(a, b, max_length).is_none()
}

pub fn assert_same_language(a: &impl Language, b: &impl Language, max_length: usize) {
    if let Some(word) = find_difference(a, b, max_length) {
        panic!(
            "Automata disagree on word {:?}: {} vs {}",
            word.iter().map(Symbol::as_str).join(""),
            a.accepts(&word),
            b.accepts(&word)
        );
    }
}
