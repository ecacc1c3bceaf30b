use std::io::{self, BufRead};

use anyhow::Context;
use bytes::Bytes;
use clap::Parser;
use lopband_core::{Pipeline, StageSpec, END_OF_STREAM};
use lopband_stages::registry;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "lopband",
    version,
    about = "Multi-stage text-processing pipeline",
    after_help = stage_listing()
)]
pub struct Cli {
    /// Maximum number of items in each stage's queue
    pub queue_size: usize,

    /// Stage names, applied to every input line in the given order
    #[arg(required = true)]
    pub stages: Vec<String>,
}

fn stage_listing() -> String {
    use std::fmt::Write;

    let mut text = String::from("Available stages:\n");
    for (name, description) in registry::available() {
        let _ = writeln!(text, "  {name:<12}- {description}");
    }
    text.push_str(
        "\nExamples:\n  \
         echo 'hello' | lopband 20 uppercaser rotator logger\n  \
         echo '<END>' | lopband 20 uppercaser rotator logger\n",
    );
    text
}

/// Stderr logger with `RUST_LOG`-style filtering, `info` by default.
/// Stdout stays reserved for pipeline output.
pub fn init_logging() {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let mut specs = Vec::with_capacity(cli.stages.len());
    for name in &cli.stages {
        let transform = registry::create(name)
            .with_context(|| format!("cannot construct stage '{name}'"))?;
        specs.push(StageSpec::new(name.as_str(), transform));
    }

    let pipeline =
        Pipeline::build(cli.queue_size, specs).context("failed to start the pipeline")?;
    info!(capacity = cli.queue_size, stages = ?cli.stages, "pipeline started");

    feed(&pipeline, io::stdin().lock())?;

    pipeline.wait_finished();
    pipeline
        .shutdown()
        .context("failed to tear the pipeline down")?;

    println!("Pipeline shutdown complete");
    Ok(())
}

/// Feeds input lines into the first stage, one item per line with the
/// terminator stripped, until the end-of-stream marker or end of input.
///
/// When input ends without a marker line, the marker is injected anyway;
/// otherwise no stage would ever finish and `wait_finished` would hang.
fn feed(pipeline: &Pipeline, input: impl BufRead) -> anyhow::Result<()> {
    for line in input.lines() {
        let mut line = line.context("failed to read input line")?;
        if line.ends_with('\r') {
            line.pop();
        }

        let is_marker = line.as_bytes() == END_OF_STREAM;
        pipeline.place_work(Bytes::from(line))?;
        if is_marker {
            return Ok(());
        }
    }

    pipeline.place_work(Bytes::from_static(END_OF_STREAM))?;
    Ok(())
}
