//! ## lopband-cli
//! **Pipeline orchestrator front end**
//!
//! Wires the requested stages in order, feeds stdin lines into the first
//! one, and drives the end-of-stream shutdown handshake. Diagnostics go to
//! stderr via `tracing`; stdout belongs to the pipeline's own output
//! (logger/typewriter stages).

use clap::Parser;

mod commands;

use commands::Cli;

fn main() -> anyhow::Result<()> {
    commands::init_logging();
    let cli = Cli::parse();
    commands::run(cli)
}
