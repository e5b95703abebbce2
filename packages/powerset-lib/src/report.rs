use serde::Serialize;

use crate::{
    automaton::{construction::Construction, nfa::NFA, steps::StepRecord},
    config::ViewConfig,
    parse::SkippedLine,
    view::{DfaTableRow, GraphView, NfaTableRow, dfa_table, nfa_table},
};

/// Everything a front end shows after one construction run.
#[derive(Debug, Clone, Serialize)]
pub struct Report<'a> {
    pub nfa: GraphView,
    pub dfa: GraphView,
    pub nfa_table: Vec<NfaTableRow>,
    pub dfa_table: Vec<DfaTableRow>,
    pub steps: &'a StepRecord,
    pub skipped: &'a [SkippedLine],
}

impl<'a> Report<'a> {
    pub fn new(
        nfa: &NFA,
        construction: &'a Construction,
        skipped: &'a [SkippedLine],
        config: &ViewConfig,
    ) -> Self {
        Report {
            nfa: GraphView::nfa(nfa, config),
            dfa: GraphView::dfa(construction),
            nfa_table: nfa_table(nfa, config),
            dfa_table: dfa_table(construction, config),
            steps: &construction.steps,
            skipped,
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
