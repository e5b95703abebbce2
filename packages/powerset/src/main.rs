use std::{fmt::Display, str::FromStr};

use anyhow::{Context, bail};
use clap::Parser;
use powerset_lib::{
    automaton::nfa::NFA,
    config::PowersetConfig,
    logger,
    parse::FormInput,
    playback::Playback,
    presets::Preset,
    report::Report,
    view::GraphView,
};

mod print;

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Json,
    Table,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "table" | "text" => Ok(OutputFormat::Table),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Table => write!(f, "table"),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "powerset")]
#[command(version = "0.1")]
#[command(about = "Convert an NFA into a DFA by subset construction", long_about = None)]
struct Args {
    /// Form input as TOML, or JSON when the file ends in `.json`.
    file: Option<String>,

    /// Use a built in automaton instead of a file (contains-ab, epsilon-loop).
    #[arg(short, long)]
    preset: Option<Preset>,

    #[arg(short, long)]
    config: Option<String>,

    #[arg(short, long, default_value_t = OutputFormat::Table)]
    output: OutputFormat,

    /// Show the DFA as it looks after this many construction steps.
    #[arg(short, long)]
    step: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = PowersetConfig::from_optional_file(args.config.as_ref())?;
    logger::init(config.get_logger())?;

    let form = match (&args.file, args.preset) {
        (Some(file), _) => FormInput::from_file(file)?,
        (None, Some(preset)) => preset.form(),
        (None, None) => bail!("Provide an input file or a --preset"),
    };

    let parsed = form.parse();
    tracing::debug!(
        "Parsed form with {} transitions, {} skipped lines",
        parsed.description.transitions.len(),
        parsed.skipped.len()
    );
    let nfa = NFA::from_description(&parsed.description).context("Cannot build the NFA")?;
    let construction = nfa.determinize();

    if let Some(position) = args.step {
        let view = GraphView::dfa_up_to(&construction, position)?;

        let mut playback = Playback::new(&construction.steps);
        while playback.position() < position {
            playback.advance();
        }

        match args.output {
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "position": playback.position(),
                    "step_count": playback.step_count(),
                    "dfa": view,
                });
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
            OutputFormat::Table => {
                print::print_playback(&playback, &construction.steps, &view);
            }
        }

        return Ok(());
    }

    let report = Report::new(&nfa, &construction, &parsed.skipped, config.get_view());
    match args.output {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Table => print::print_report(&report),
    }

    Ok(())
}
