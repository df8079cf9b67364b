//! `asana` binary entry point.

use clap::Parser;

use asana_cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    asana_cli::run(Cli::parse()).await
}
