//! Command-line entrypoint for the fixup runner.
use eyre::Result;

pub mod checklist;
pub mod cli;
pub mod logging;
pub mod patch;
pub mod plan;
pub mod probe;

#[tokio::main]
async fn main() -> Result<()> {
    logging::setup_tracing();
    cli::run().await
}
