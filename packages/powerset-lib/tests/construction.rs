use hashbrown::HashSet;
use itertools::Itertools;
use petgraph::visit::Bfs;
use powerset_lib::{
    automaton::{
        Alphabet, Language, Symbol,
        construction::Construction,
        nfa::{NFA, NFADescription, TransitionDescription},
        subset::canonical_id,
    },
    presets::Preset,
    random::{RandomNFAParams, random_nfa},
    validation::same_language::assert_same_language,
};
use rand::{SeedableRng, rngs::StdRng};

fn build(description: &NFADescription) -> (NFA, Construction) {
    let nfa = NFA::from_description(description).unwrap();
    let construction = nfa.determinize();
    (nfa, construction)
}

fn subset_ids(construction: &Construction) -> Vec<String> {
    construction
        .dfa
        .subsets()
        .map(|s| s.id().to_string())
        .collect_vec()
}

fn symbols(word: &str) -> Vec<Symbol> {
    word.chars().map(|c| c.to_string().into()).collect_vec()
}

#[test]
fn test_contains_ab() {
    let (nfa, construction) = build(&Preset::ContainsAb.form().parse().description);
    let dfa = &construction.dfa;

    assert_eq!(dfa.start_subset().id(), "q0");
    assert_eq!(
        subset_ids(&construction),
        vec!["q0", "q0,q1", "q0,q1,q2", "q0,q3"]
    );
    assert_eq!(dfa.transition_count(), 8);

    // the first subset holding q3 is reached by a word ending in "ab"
    let after_a = dfa.transition("q0", "a").unwrap();
    let after_aa = dfa.transition(after_a.id(), "a").unwrap();
    let after_aab = dfa.transition(after_aa.id(), "b").unwrap();
    assert_eq!(after_aab.id(), "q0,q3");
    assert!(after_aab.contains("q3"));
    assert!(dfa.is_accepting_subset("q0,q3"));
    assert!(!dfa.is_accepting_subset("q0,q1,q2"));

    assert!(dfa.accepts(&symbols("aab")));
    assert!(dfa.accepts(&symbols("aabbb")));
    assert!(!dfa.accepts(&symbols("ab")));

    assert_same_language(&nfa, dfa, 7);
}

#[test]
fn test_epsilon_loop() {
    let (nfa, construction) = build(&Preset::EpsilonLoop.form().parse().description);
    let dfa = &construction.dfa;

    assert_eq!(dfa.start_subset().id(), "q0,q1");
    assert!(dfa.start_subset().contains("q1"));
    assert!(dfa.is_accepting(dfa.start()));
    assert_eq!(
        subset_ids(&construction),
        vec!["q0,q1", "q0,q1,q2", "q0,q1,q3", "q0,q1,q2,q3"]
    );
    assert!(dfa.graph.node_indices().all(|n| dfa.is_accepting(n)));
    assert_eq!(
        dfa.transition("q0,q1,q2,q3", "a").map(|s| s.id()),
        Some("q0,q1,q2,q3")
    );

    assert!(dfa.accepts(&symbols("")));
    assert!(dfa.accepts(&symbols("abba")));
    assert_same_language(&nfa, dfa, 6);
}

#[test]
fn test_missing_transition_stays_missing() {
    let description = NFADescription {
        states: vec!["q0".into(), "q1".into()],
        alphabet: vec!["a".into(), "b".into()],
        transitions: vec![TransitionDescription::new("q0", "a", &["q1"])],
        start: Some("q0".into()),
        accepting: vec!["q1".into()],
    };
    let (_, construction) = build(&description);
    let dfa = &construction.dfa;

    assert_eq!(subset_ids(&construction), vec!["q0", "q1"]);
    assert_eq!(dfa.transition("q0", "a").map(|s| s.id()), Some("q1"));
    assert_eq!(dfa.transition("q0", "b"), None);
    assert_eq!(dfa.transition("q1", "a"), None);
    assert_eq!(dfa.transition_count(), 1);

    let step = construction.steps.step_at(1).unwrap();
    assert!(step.transitions().is_empty());
    assert!(step.is_accepting());
}

#[test]
fn test_unreachable_state_never_appears() {
    let description = NFADescription {
        states: vec!["q0".into(), "q1".into(), "q2".into()],
        alphabet: vec!["a".into()],
        transitions: vec![
            TransitionDescription::new("q0", "a", &["q1"]),
            TransitionDescription::new("q1", "a", &["q0", "q1"]),
            TransitionDescription::new("q2", "a", &["q0"]),
            TransitionDescription::new("q2", "e", &["q1"]),
        ],
        start: Some("q0".into()),
        accepting: vec!["q2".into()],
    };
    let (_, construction) = build(&description);

    assert!(construction.dfa.subsets().all(|s| !s.contains("q2")));
    assert!(construction.steps.iter().all(|step| !step.subset().contains("q2")));
    assert!(!construction.dfa.graph.node_indices().any(|n| construction.dfa.is_accepting(n)));
}

#[test]
fn test_undeclared_start_state() {
    let description = NFADescription {
        states: vec!["q1".into()],
        alphabet: vec!["a".into()],
        transitions: vec![TransitionDescription::new("s", "a", &["q1", "ghost"])],
        start: Some("s".into()),
        accepting: vec!["ghost".into()],
    };
    let (_, construction) = build(&description);

    assert_eq!(subset_ids(&construction), vec!["s", "ghost,q1"]);
    assert!(construction.dfa.is_accepting_subset("ghost,q1"));
}

#[test]
fn test_alphabet_order_drives_discovery() {
    let transitions = vec![
        TransitionDescription::new("q0", "a", &["qa"]),
        TransitionDescription::new("q0", "b", &["qb"]),
    ];
    let ab = NFADescription {
        alphabet: vec!["a".into(), "b".into()],
        transitions: transitions.clone(),
        start: Some("q0".into()),
        ..Default::default()
    };
    let ba = NFADescription {
        alphabet: vec!["b".into(), "a".into()],
        transitions,
        start: Some("q0".into()),
        ..Default::default()
    };

    assert_eq!(subset_ids(&build(&ab).1), vec!["q0", "qa", "qb"]);
    assert_eq!(subset_ids(&build(&ba).1), vec!["q0", "qb", "qa"]);
}

fn random_constructions() -> Vec<(NFA, Construction)> {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let params = [
        RandomNFAParams::default(),
        RandomNFAParams {
            state_count: 7,
            alphabet_size: 3,
            transition_probability: 0.15,
            epsilon_probability: 0.15,
            accepting_probability: 0.2,
        },
        RandomNFAParams {
            state_count: 4,
            alphabet_size: 2,
            transition_probability: 0.4,
            epsilon_probability: 0.0,
            accepting_probability: 0.5,
        },
    ];

    params
        .iter()
        .flat_map(|p| (0..10).map(|_| random_nfa(&mut rng, p)).collect_vec())
        .map(|nfa| {
            let construction = nfa.determinize();
            (nfa, construction)
        })
        .collect()
}

#[test]
fn test_construction_is_deterministic() {
    for (nfa, construction) in random_constructions() {
        let again = nfa.determinize();
        assert_eq!(subset_ids(&construction), subset_ids(&again));
        assert_eq!(construction.steps, again.steps);
    }
}

#[test]
fn test_steps_match_dfa() {
    for (nfa, construction) in random_constructions() {
        let dfa = &construction.dfa;
        assert_eq!(construction.steps.step_count(), dfa.state_count());

        for (index, subset) in dfa.subsets().enumerate() {
            let step = construction.steps.step_at(index).unwrap();
            assert_eq!(step.subset(), subset);
            assert_eq!(step.is_accepting(), dfa.is_accepting_subset(subset.id()));

            for symbol in nfa.alphabet() {
                assert_eq!(
                    dfa.transition(subset.id(), symbol.as_str()),
                    step.target(symbol.as_str())
                );
            }
        }
    }
}

#[test]
fn test_subsets_are_canonical_and_unique() {
    for (nfa, construction) in random_constructions() {
        let mut seen = HashSet::new();

        for subset in construction.dfa.subsets() {
            assert!(!subset.is_empty());
            assert_eq!(subset.id(), canonical_id(subset.states()));
            assert!(seen.insert(subset.states().to_vec()));
            // every DFA state is closed under epsilon
            assert_eq!(&nfa.closure(subset.states()), subset);
        }
    }
}

#[test]
fn test_all_subsets_reachable() {
    for (_, construction) in random_constructions() {
        let dfa = &construction.dfa;
        let mut bfs = Bfs::new(&dfa.graph, dfa.start());
        let mut reached = 0;
        while bfs.next(&dfa.graph).is_some() {
            reached += 1;
        }
        assert_eq!(reached, dfa.state_count());
    }
}

#[test]
fn test_random_same_language() {
    for (nfa, construction) in random_constructions() {
        assert_same_language(&nfa, &construction.dfa, 5);
    }
}

#[test]
fn test_closure_of_start_is_start_subset() {
    for (nfa, construction) in random_constructions() {
        assert_eq!(
            &nfa.closure([nfa.start_state()]),
            construction.dfa.start_subset()
        );
    }
}
