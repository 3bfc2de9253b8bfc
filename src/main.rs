use anyhow::Result;
use clap::Parser;
use sector_pulse::cli::{self, Cli};
use sector_pulse::{preview, seed, server};

#[tokio::main]
async fn main() -> Result<()> {
    match Cli::parse().command() {
        cli::Command::Serve(args) => server::run(args).await,
        cli::Command::Preview(args) => preview::run(args),
        cli::Command::Seed(args) => seed::run(args),
    }
}
