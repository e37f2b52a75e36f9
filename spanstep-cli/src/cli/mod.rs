//! Command-line interface orchestration for spanstep.
//!
//! Three commands share one pipeline: load a graph (or fall back to the
//! built-in sample), generate the Kruskal steps, then list, play back or
//! report them.

mod commands;
mod loader;
mod play;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, GraphArgs, PlayCommand, ReportCommand,
    ReportFormat, StepsCommand, run_cli,
};
pub use loader::load_graph;
pub use play::drive_playback;
