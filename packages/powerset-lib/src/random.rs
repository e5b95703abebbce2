use rand::Rng;

use crate::automaton::{
    Symbol,
    nfa::{NFA, NFAEdge},
};

/// Shape of the NFAs produced by [`random_nfa`].
#[derive(Debug, Clone, Copy)]
pub struct RandomNFAParams {
    pub state_count: usize,
    pub alphabet_size: usize,
    /// Chance of a transition between two states for one symbol.
    pub transition_probability: f64,
    /// Chance of an epsilon transition between two states.
    pub epsilon_probability: f64,
    /// Chance of a state being accepting.
    pub accepting_probability: f64,
}

impl Default for RandomNFAParams {
    fn default() -> Self {
        RandomNFAParams {
            state_count: 5,
            alphabet_size: 2,
            transition_probability: 0.2,
            epsilon_probability: 0.1,
            accepting_probability: 0.3,
        }
    }
}

/// Generates an NFA with states `q0..` over the letters `a..`, start state
/// `q0`.
pub fn random_nfa(rng: &mut impl Rng, params: &RandomNFAParams) -> NFA {
    let alphabet: Vec<Symbol> = (0..params.alphabet_size)
        .map(|i| Symbol::new(letter(i)))
        .collect();

    let mut nfa = NFA::new(alphabet.clone(), "q0");
    let states: Vec<String> = (0..params.state_count.max(1))
        .map(|i| format!("q{}", i))
        .collect();

    for state in &states {
        nfa.add_state(state.as_str());
        if rng.gen_bool(params.accepting_probability) {
            nfa.set_accepting(state.as_str());
        }
    }

    for from in &states {
        for to in &states {
            for symbol in &alphabet {
                if rng.gen_bool(params.transition_probability) {
                    nfa.add_transition(from.as_str(), NFAEdge::Symbol(symbol.clone()), to.as_str());
                }
            }

            if rng.gen_bool(params.epsilon_probability) {
                nfa.add_transition(from.as_str(), NFAEdge::Epsilon, to.as_str());
            }
        }
    }

    nfa
}

/// Letters `a` to `z` without the epsilon marker, then `s25`, `s26`, ...
fn letter(index: usize) -> String {
    const LETTERS: &str = "abcdfghijklmnopqrstuvwxyz";
    LETTERS
        .chars()
        .nth(index)
        .map(|c| c.to_string())
        .unwrap_or_else(|| format!("s{}", index))
}

#[test]
fn test_random_nfa_is_reproducible() {
    use rand::{SeedableRng, rngs::StdRng};

    use crate::automaton::Alphabet;

    let params = RandomNFAParams::default();
    let a = random_nfa(&mut StdRng::seed_from_u64(7), &params);
    let b = random_nfa(&mut StdRng::seed_from_u64(7), &params);

    assert_eq!(a.state_count(), params.state_count);
    assert_eq!(a.graph.edge_count(), b.graph.edge_count());
    assert!(a.alphabet().iter().all(|s| s.as_str() != "e"));
}
