//! Parsing of the textual form in which automata are entered.
//!
//! A form consists of comma separated lists for the states, the alphabet and
//! the accepting states, a start state, and one transition per line:
//! ```text
//! states      q0,q1,q2
//! alphabet    a,b
//! transitions q0,a=q0,q1
//!             q0,e=q2
//! start       q0
//! accepting   q2
//! ```
//!
//! The symbol `e` marks an epsilon transition. Transition lines that do not
//! consist of exactly one `state,symbol` pair followed by `=` and at least one
//! target are skipped.

use std::path::Path;

use anyhow::Context;
use nom::{
    Parser,
    bytes::complete::{tag, take_while},
    combinator::all_consuming,
    error::ParseError,
};
use serde::{Deserialize, Serialize};

use crate::automaton::nfa::{NFADescription, TransitionDescription, is_epsilon_marker};

/// A single list entry, trimmed. Blank entries yield `None`.
fn item<'a, E: ParseError<&'a str>>(input: &'a str) -> nom::IResult<&'a str, Option<&'a str>, E> {
    let (input, raw) = take_while(|c: char| c != ',' && c != '=')(input)?;
    let trimmed = raw.trim();
    Ok((input, (!trimmed.is_empty()).then_some(trimmed)))
}

/// A non-blank list entry.
fn label<'a, E: ParseError<&'a str>>(input: &'a str) -> nom::IResult<&'a str, &'a str, E> {
    let (rest, item) = item(input)?;
    match item {
        Some(label) => Ok((rest, label)),
        None => Err(nom::Err::Error(E::from_error_kind(
            input,
            nom::error::ErrorKind::Verify,
        ))),
    }
}

// E.g., q0, q1 ,q2
fn list<'a, E: ParseError<&'a str>>(input: &'a str) -> nom::IResult<&'a str, Vec<&'a str>, E> {
    let (input, items) = nom::multi::separated_list1(tag(","), item).parse(input)?;
    Ok((input, items.into_iter().flatten().collect()))
}

#[test]
fn test_list_1() {
    let (_, items) = list::<nom::error::Error<&str>>(" q0, q1 ,q2").unwrap();
    assert_eq!(items, vec!["q0", "q1", "q2"]);
}

#[test]
fn test_list_2() {
    let (_, items) = list::<nom::error::Error<&str>>("a,, ,b").unwrap();
    assert_eq!(items, vec!["a", "b"]);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionLine<'a> {
    pub state: &'a str,
    pub symbol: &'a str,
    pub targets: Vec<&'a str>,
}

// E.g., q0,a=q0,q1
fn transition<'a, E: ParseError<&'a str>>(
    input: &'a str,
) -> nom::IResult<&'a str, TransitionLine<'a>, E> {
    let (input, state) = label(input)?;
    let (input, _) = tag(",")(input)?;
    let (input, symbol) = label(input)?;
    let (input, _) = tag("=")(input)?;
    let (input, targets) = list(input)?;

    if targets.is_empty() {
        return Err(nom::Err::Error(E::from_error_kind(
            input,
            nom::error::ErrorKind::Verify,
        )));
    }

    Ok((
        input,
        TransitionLine {
            state,
            symbol,
            targets,
        },
    ))
}

/// Parses one complete transition line.
pub fn transition_line(line: &str) -> Option<TransitionLine<'_>> {
    all_consuming(transition::<nom::error::Error<&str>>)
        .parse(line)
        .ok()
        .map(|(_, t)| t)
}

#[test]
fn test_transition_1() {
    let t = transition_line("q0,a=q0,q1").unwrap();
    assert_eq!(t.state, "q0");
    assert_eq!(t.symbol, "a");
    assert_eq!(t.targets, vec!["q0", "q1"]);
}

#[test]
fn test_transition_2() {
    let t = transition_line("  q2 , e = q0 ").unwrap();
    assert_eq!(t.state, "q2");
    assert_eq!(t.symbol, "e");
    assert_eq!(t.targets, vec!["q0"]);
}

#[test]
fn test_transition_malformed() {
    assert_eq!(transition_line("q0=q1"), None);
    assert_eq!(transition_line("q0,a,b=q1"), None);
    assert_eq!(transition_line("q0,a=q1=q2"), None);
    assert_eq!(transition_line("q0,a="), None);
    assert_eq!(transition_line("q0,a= , "), None);
    assert_eq!(transition_line(",a=q1"), None);
    assert_eq!(transition_line("q0,a"), None);
}

/// A transition line that was dropped while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLine {
    /// 1-based line number within the transitions field.
    pub line: usize,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTransitions {
    pub transitions: Vec<TransitionDescription>,
    /// Every non-epsilon symbol used, in order of first use.
    pub symbols: Vec<String>,
    pub skipped: Vec<SkippedLine>,
}

/// Parses the transitions field line by line, skipping malformed lines.
pub fn parse_transitions(input: &str) -> ParsedTransitions {
    let mut parsed = ParsedTransitions::default();

    for (number, line) in input.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        match transition_line(line) {
            Some(t) => {
                if !is_epsilon_marker(t.symbol) && !parsed.symbols.iter().any(|s| s == t.symbol) {
                    parsed.symbols.push(t.symbol.to_string());
                }
                parsed.transitions.push(TransitionDescription::new(
                    t.state,
                    t.symbol,
                    &t.targets,
                ));
            }
            None => {
                tracing::warn!("Skipping malformed transition line {}: {:?}", number + 1, line);
                parsed.skipped.push(SkippedLine {
                    line: number + 1,
                    content: line.to_string(),
                });
            }
        }
    }

    parsed
}

#[test]
fn test_parse_transitions() {
    let parsed = parse_transitions("q0,a=q1\n\nbroken\nq1,e=q0\nq1,b=q1,q0\n");
    assert_eq!(parsed.transitions.len(), 3);
    assert_eq!(parsed.symbols, vec!["a", "b"]);
    assert_eq!(
        parsed.skipped,
        vec![SkippedLine {
            line: 3,
            content: "broken".to_string(),
        }]
    );
    assert_eq!(
        parsed.transitions[1].symbol,
        crate::automaton::nfa::EPSILON_MARKER
    );
}

/// Splits a comma separated field into its trimmed, non-blank entries.
pub fn parse_list(input: &str) -> Vec<String> {
    input
        .lines()
        .flat_map(|line| {
            list::<nom::error::Error<&str>>(line)
                .map(|(_, items)| items)
                .unwrap_or_default()
        })
        .map(str::to_string)
        .collect()
}

/// The automaton as entered into a form, every field as raw text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormInput {
    pub states: String,
    pub alphabet: String,
    pub transitions: String,
    pub start: String,
    pub accepting: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedForm {
    pub description: NFADescription,
    pub skipped: Vec<SkippedLine>,
}

impl FormInput {
    /// Reads a form from a `.json` file or, for any other extension, TOML.
    pub fn from_file<P: AsRef<Path>>(file_path: P) -> anyhow::Result<Self> {
        let path = file_path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            serde_json::from_str(&content)
                .with_context(|| format!("failed to parse {} as JSON", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("failed to parse {} as TOML", path.display()))
        }
    }

    /// Turns the raw fields into a structured description. Missing fields are
    /// left empty, [`crate::automaton::nfa::NFA::from_description`] reports them.
    pub fn parse(&self) -> ParsedForm {
        let transitions = parse_transitions(&self.transitions);
        let start = self.start.trim();

        ParsedForm {
            description: NFADescription {
                states: parse_list(&self.states),
                alphabet: parse_list(&self.alphabet),
                transitions: transitions.transitions,
                start: (!start.is_empty()).then(|| start.to_string()),
                accepting: parse_list(&self.accepting),
            },
            skipped: transitions.skipped,
        }
    }
}

#[test]
fn test_form_parse() {
    let form = FormInput {
        states: "q0, q1".into(),
        alphabet: "a".into(),
        transitions: "q0,a=q1\nq1,a".into(),
        start: " q0 ".into(),
        accepting: "".into(),
    };

    let parsed = form.parse();
    assert_eq!(parsed.description.states, vec!["q0", "q1"]);
    assert_eq!(parsed.description.start.as_deref(), Some("q0"));
    assert!(parsed.description.accepting.is_empty());
    assert_eq!(parsed.description.transitions.len(), 1);
    assert_eq!(parsed.skipped.len(), 1);
}

#[test]
fn test_form_missing_start() {
    let form = FormInput {
        start: "   ".into(),
        ..Default::default()
    };
    assert_eq!(form.parse().description.start, None);
}
