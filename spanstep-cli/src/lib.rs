//! Support library for the spanstep CLI binary.
//!
//! Exposes the command pipeline, report writers and logging setup so
//! integration tests can drive them without spawning a subprocess.

pub mod cli;
pub mod logging;
pub mod report;
