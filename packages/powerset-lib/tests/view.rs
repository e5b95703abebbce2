use powerset_lib::{
    automaton::{
        construction::Construction,
        nfa::{NFA, NFADescription, TransitionDescription},
    },
    config::ViewConfig,
    error::PlaybackError,
    playback::Playback,
    presets::Preset,
    view::{DfaTableRow, GraphEdge, GraphView, NfaTableRow, dfa_table, nfa_table},
};

fn preset(preset: Preset) -> (NFA, Construction) {
    let nfa = NFA::from_description(&preset.form().parse().description).unwrap();
    let construction = nfa.determinize();
    (nfa, construction)
}

fn edge(from: &str, to: &str, label: &str) -> GraphEdge {
    GraphEdge {
        from: from.into(),
        to: to.into(),
        label: label.into(),
    }
}

#[test]
fn test_nfa_view_merges_edges() {
    let (nfa, _) = preset(Preset::EpsilonLoop);
    let view = GraphView::nfa(&nfa, &ViewConfig::default());

    assert_eq!(view.nodes.len(), 4);
    assert!(view.nodes[0].initial);
    assert!(view.nodes.iter().filter(|n| n.initial).count() == 1);
    assert_eq!(
        view.nodes.iter().filter(|n| n.accepting).map(|n| n.id.as_str()).collect::<Vec<_>>(),
        vec!["q0", "q1"]
    );

    assert_eq!(
        view.edges,
        vec![
            edge("q0", "q1", "ε"),
            edge("q1", "q1", "a,b"),
            edge("q1", "q2", "a"),
            edge("q1", "q3", "b"),
            edge("q2", "q2", "a,b"),
            edge("q2", "q0", "ε"),
            edge("q3", "q3", "a,b"),
            edge("q3", "q0", "ε"),
        ]
    );
}

#[test]
fn test_nfa_view_custom_epsilon_label() {
    let (nfa, _) = preset(Preset::EpsilonLoop);
    let config = ViewConfig::default().with_epsilon_label("eps".to_string());
    let view = GraphView::nfa(&nfa, &config);

    assert_eq!(view.edges[0], edge("q0", "q1", "eps"));
}

#[test]
fn test_dfa_view() {
    let (_, construction) = preset(Preset::EpsilonLoop);
    let view = GraphView::dfa(&construction);

    assert_eq!(
        view.nodes.iter().map(|n| n.label.as_str()).collect::<Vec<_>>(),
        vec!["{q0,q1}", "{q0,q1,q2}", "{q0,q1,q3}", "{q0,q1,q2,q3}"]
    );
    assert!(view.nodes[0].initial);
    assert!(view.nodes.iter().all(|n| n.accepting));

    assert_eq!(view.edges.len(), 7);
    assert_eq!(
        view.edges.last(),
        Some(&edge("q0,q1,q2,q3", "q0,q1,q2,q3", "a,b"))
    );
}

#[test]
fn test_dfa_up_to() {
    let (_, construction) = preset(Preset::ContainsAb);

    let empty = GraphView::dfa_up_to(&construction, 0).unwrap();
    assert_eq!(empty, GraphView::default());

    let first = GraphView::dfa_up_to(&construction, 1).unwrap();
    assert_eq!(first.nodes.len(), 1);
    assert_eq!(
        first.edges,
        vec![edge("q0", "q0,q1", "a"), edge("q0", "q0", "b")]
    );

    let full = GraphView::dfa_up_to(&construction, 4).unwrap();
    assert_eq!(full, GraphView::dfa(&construction));

    assert_eq!(
        GraphView::dfa_up_to(&construction, 5),
        Err(PlaybackError::OutOfRange { index: 5, count: 4 })
    );
}

#[test]
fn test_playback_walk() {
    let (_, construction) = preset(Preset::ContainsAb);
    let mut playback = Playback::new(&construction.steps);

    let mut revealed = vec![];
    while let Some(index) = playback.advance() {
        let step = construction.steps.step_at(index).unwrap();
        revealed.push(step.subset().id().to_string());

        let view = GraphView::dfa_up_to(&construction, playback.position()).unwrap();
        assert_eq!(view.nodes.len(), playback.position());
    }

    assert_eq!(revealed, vec!["q0", "q0,q1", "q0,q1,q2", "q0,q3"]);
    assert_eq!(playback.to_string(), "Step 4 of 4");

    assert_eq!(playback.retreat(), Some(3));
    assert_eq!(playback.revealed(&construction.steps).len(), 3);

    assert_eq!(
        construction.steps.step_at(4),
        Err(PlaybackError::OutOfRange { index: 4, count: 4 })
    );
}

#[test]
fn test_nfa_table() {
    let (nfa, _) = preset(Preset::EpsilonLoop);
    let rows = nfa_table(&nfa, &ViewConfig::default());

    assert_eq!(rows.len(), 9);
    assert_eq!(
        rows[0],
        NfaTableRow {
            state: "q0".into(),
            symbol: "ε".into(),
            targets: "q1".into(),
        }
    );
    assert_eq!(
        rows[1],
        NfaTableRow {
            state: "q1".into(),
            symbol: "a".into(),
            targets: "q1, q2".into(),
        }
    );
}

#[test]
fn test_dfa_table_none_marker() {
    let description = NFADescription {
        states: vec!["q0".into(), "q1".into()],
        alphabet: vec!["a".into(), "b".into()],
        transitions: vec![TransitionDescription::new("q0", "a", &["q1"])],
        start: Some("q0".into()),
        accepting: vec!["q1".into()],
    };
    let construction = NFA::from_description(&description).unwrap().determinize();

    let row = |subset: &str, symbol: &str, target: &str| DfaTableRow {
        subset: subset.into(),
        symbol: symbol.into(),
        target: target.into(),
    };

    assert_eq!(
        dfa_table(&construction, &ViewConfig::default()),
        vec![
            row("{q0}", "a", "{q1}"),
            row("{q0}", "b", "-"),
            row("{q1}", "a", "-"),
            row("{q1}", "b", "-"),
        ]
    );

    let config = ViewConfig::default().with_none_marker("∅".to_string());
    assert_eq!(dfa_table(&construction, &config)[1].target, "∅");
}

#[test]
fn test_dfa_table_complete() {
    let (_, construction) = preset(Preset::ContainsAb);
    let rows = dfa_table(&construction, &ViewConfig::default());

    assert_eq!(rows.len(), 8);
    assert!(rows.iter().all(|r| r.target != "-"));
    assert_eq!(rows[5].subset, "{q0,q1,q2}");
    assert_eq!(rows[5].target, "{q0,q3}");
}
