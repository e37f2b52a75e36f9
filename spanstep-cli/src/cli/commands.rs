//! Command implementations and argument parsing for the spanstep CLI.

use std::io::{self, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use spanstep_core::{
    DEFAULT_BASE_INTERVAL, DEFAULT_SPEED, EdgeId, Graph, KruskalRun, PlaybackBuilder,
    PlaybackError, StepperError,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::{loader::load_graph, play::drive_playback};
use crate::report;

const SAMPLE_SOURCE: &str = "sample";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "spanstep",
    about = "Step through Kruskal's minimum spanning tree algorithm."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Generate and list every step.
    Steps(StepsCommand),
    /// Replay the steps in real time.
    Play(PlayCommand),
    /// Print a report of the run.
    Report(ReportCommand),
}

/// Graph selection shared by every command.
#[derive(Debug, Args, Clone, Default)]
pub struct GraphArgs {
    /// JSON graph document; the built-in sample graph is used when omitted.
    pub graph: Option<PathBuf>,
}

/// Options accepted by the `steps` command.
#[derive(Debug, Args, Clone, Default)]
pub struct StepsCommand {
    /// Graph to run.
    #[command(flatten)]
    pub graph: GraphArgs,
}

/// Options accepted by the `play` command.
#[derive(Debug, Args, Clone)]
pub struct PlayCommand {
    /// Graph to run.
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Speed multiplier applied to the base interval.
    #[arg(long, default_value_t = DEFAULT_SPEED)]
    pub speed: f64,

    /// Milliseconds between steps at speed 1.0.
    #[arg(
        long = "interval-ms",
        default_value_t = default_interval_ms(),
        value_parser = clap::value_parser!(u64),
    )]
    pub interval_ms: u64,

    /// Stop after this many steps.
    #[arg(long = "max-steps")]
    pub max_steps: Option<usize>,
}

/// Options accepted by the `report` command.
#[derive(Debug, Args, Clone)]
pub struct ReportCommand {
    /// Graph to run.
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Report layout.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Report layouts offered by the `report` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Per-step CSV table.
    StepsCsv,
    /// Final MST edges as CSV.
    MstCsv,
    /// Plain-text results summary.
    Text,
    /// Tab-separated table with decision reasons and disjoint-set parents.
    Detailed,
}

impl ReportFormat {
    const fn as_str(self) -> &'static str {
        match self {
            Self::StepsCsv => "steps-csv",
            Self::MstCsv => "mst-csv",
            Self::Text => "text",
            Self::Detailed => "detailed",
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading the graph document failed.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The graph document was not valid JSON of the expected shape.
    #[error("failed to parse graph document `{path}`: {source}")]
    Parse {
        /// Path of the malformed document.
        path: PathBuf,
        /// Underlying decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// An edge weight was not a positive finite number.
    #[error("edge {edge} has weight {weight}; weights must be positive")]
    InvalidEdge {
        /// Offending edge.
        edge: EdgeId,
        /// Weight supplied for it.
        weight: f64,
    },
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
    /// Step generation failed.
    #[error(transparent)]
    Core(#[from] StepperError),
    /// Playback configuration was rejected.
    #[error(transparent)]
    Playback(#[from] PlaybackError),
}

impl CliError {
    /// Returns the stable code of a core error, if this wraps one.
    #[must_use]
    pub const fn code(&self) -> Option<&'static str> {
        match self {
            Self::Core(err) => Some(err.code().as_str()),
            Self::Playback(err) => Some(err.code().as_str()),
            _ => None,
        }
    }
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionSummary {
    /// Graph path, or `sample` for the built-in graph.
    pub source: String,
    /// Number of generated steps.
    pub steps: usize,
    /// Number of steps replayed; equals `steps` for non-interactive commands.
    pub applied: usize,
    /// Total weight of the final MST.
    pub final_cost: f64,
}

/// Executes the CLI command represented by `cli`, writing its output to
/// `writer`.
///
/// # Errors
/// Returns [`CliError`] when loading, generation, playback or output fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use spanstep_cli::cli::{Cli, Command, StepsCommand, run_cli};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let cli = Cli {
///     command: Command::Steps(StepsCommand::default()),
/// };
/// let mut out = Vec::new();
/// let summary = run_cli(cli, &mut out)?;
/// assert_eq!(summary.steps, 8);
/// assert_eq!(summary.final_cost, 21.0);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip_all,
    fields(command = field::Empty, source = field::Empty),
)]
pub fn run_cli(cli: Cli, writer: impl Write) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    let summary = match cli.command {
        Command::Steps(command) => {
            span.record("command", field::display("steps"));
            run_steps(&command, writer)?
        }
        Command::Play(command) => {
            span.record("command", field::display("play"));
            run_play(&command, writer)?
        }
        Command::Report(command) => {
            span.record("command", field::display("report"));
            run_report(&command, writer)?
        }
    };
    span.record("source", field::display(&summary.source));
    info!(
        steps = summary.steps,
        applied = summary.applied,
        final_cost = summary.final_cost,
        "command completed"
    );
    Ok(summary)
}

pub(super) fn run_steps(
    command: &StepsCommand,
    writer: impl Write,
) -> Result<ExecutionSummary, CliError> {
    let (source, run) = generate(&command.graph)?;
    report::write_step_list(&run, writer)?;
    Ok(summarise(source, &run, run.steps().len()))
}

#[instrument(
    name = "cli.play_command",
    err,
    skip_all,
    fields(speed = command.speed, interval_ms = command.interval_ms),
)]
pub(super) fn run_play(
    command: &PlayCommand,
    writer: impl Write,
) -> Result<ExecutionSummary, CliError> {
    let (source, run) = generate(&command.graph)?;
    let mut playback = PlaybackBuilder::new()
        .with_base_interval(Duration::from_millis(command.interval_ms))
        .with_speed(command.speed)
        .build(run.shared_steps())?;
    let applied = drive_playback(&mut playback, command.max_steps, writer, thread::sleep)?;
    Ok(summarise(source, &run, applied))
}

#[instrument(
    name = "cli.report",
    err,
    skip_all,
    fields(format = command.format.as_str()),
)]
pub(super) fn run_report(
    command: &ReportCommand,
    writer: impl Write,
) -> Result<ExecutionSummary, CliError> {
    let (source, run) = generate(&command.graph)?;
    match command.format {
        ReportFormat::StepsCsv => report::write_steps_csv(&run, writer)?,
        ReportFormat::MstCsv => report::write_mst_csv(&run, writer)?,
        ReportFormat::Text => report::write_text(&run, writer)?,
        ReportFormat::Detailed => report::write_detailed(&run, writer)?,
    }
    Ok(summarise(source, &run, run.steps().len()))
}

fn generate(args: &GraphArgs) -> Result<(String, KruskalRun), CliError> {
    let (source, graph) = match &args.graph {
        Some(path) => (path.display().to_string(), load_graph(path)?),
        None => (SAMPLE_SOURCE.to_owned(), Graph::sample()),
    };
    let run = graph.run_kruskal()?;
    Ok((source, run))
}

fn summarise(source: String, run: &KruskalRun, applied: usize) -> ExecutionSummary {
    ExecutionSummary {
        source,
        steps: run.steps().len(),
        applied,
        final_cost: run.final_cost(),
    }
}

fn default_interval_ms() -> u64 {
    u64::try_from(DEFAULT_BASE_INTERVAL.as_millis()).unwrap_or(u64::MAX)
}
