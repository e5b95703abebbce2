use colored::Colorize;
use powerset_lib::{
    automaton::steps::StepRecord,
    playback::Playback,
    report::Report,
    view::GraphView,
};

/// Prints rows as aligned columns below a bold header.
fn print_table(headers: &[&str], rows: &[Vec<String>], highlight: impl Fn(usize, &str) -> String) {
    let mut widths = headers.iter().map(|h| h.chars().count()).collect::<Vec<_>>();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| format!("{:<w$}", h, w = *w))
        .collect::<Vec<_>>()
        .join("  ");
    println!("{}", header.bold());

    for row in rows {
        let line = row
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(column, (cell, w))| highlight(column, &format!("{:<w$}", cell, w = *w)))
            .collect::<Vec<_>>()
            .join("  ");
        println!("{}", line);
    }
}

fn print_graph(view: &GraphView) {
    for node in &view.nodes {
        let mut label = node.label.normal();
        if node.accepting {
            label = label.green();
        }
        if node.initial {
            label = label.bold();
        }
        println!("  {}", label);
    }
    for edge in &view.edges {
        println!("  {} -{}-> {}", edge.from, edge.label.cyan(), edge.to);
    }
}

pub fn print_report(report: &Report) {
    for skipped in report.skipped {
        println!(
            "{} line {}: {}",
            "skipped".yellow(),
            skipped.line,
            skipped.content
        );
    }

    println!("{}", "NFA".underline());
    let rows = report
        .nfa_table
        .iter()
        .map(|row| vec![row.state.clone(), row.symbol.clone(), row.targets.clone()])
        .collect::<Vec<_>>();
    print_table(&["State", "Symbol", "Next states"], &rows, |_, cell| cell.to_string());

    println!();
    println!("{}", "DFA".underline());
    let accepting = report
        .dfa
        .nodes
        .iter()
        .filter(|node| node.accepting)
        .map(|node| node.label.as_str())
        .collect::<Vec<_>>();
    let rows = report
        .dfa_table
        .iter()
        .map(|row| vec![row.subset.clone(), row.symbol.clone(), row.target.clone()])
        .collect::<Vec<_>>();
    print_table(&["State", "Symbol", "Next state"], &rows, |column, cell| {
        if column == 2 && !cell.trim_start().starts_with('{') {
            cell.dimmed().to_string()
        } else if column == 0 && accepting.contains(&cell.trim_end()) {
            cell.green().to_string()
        } else {
            cell.to_string()
        }
    });

    println!();
    println!("{}", "Construction".underline());
    for (index, step) in report.steps.iter().enumerate() {
        println!("Step {}: {}", index + 1, step.subset().label());
        for transition in step.transitions() {
            println!("  {} -> {}", transition.symbol, transition.target.label());
        }
    }
}

pub fn print_playback(playback: &Playback, steps: &StepRecord, view: &GraphView) {
    println!("{}", playback.to_string().bold());
    for step in playback.revealed(steps) {
        println!("  {}", step.subset().label());
    }

    println!();
    print_graph(view);
}
