use clap::{Parser, Subcommand};

use crate::preview::PreviewArgs;
use crate::seed::SeedArgs;
use crate::server::ServeArgs;

#[derive(Debug, Parser)]
#[command(author, version, about = "Sector valuation dashboard")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn command(self) -> Command {
        self.command.unwrap_or_default()
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load the series tables and serve the dashboard
    Serve(ServeArgs),
    /// Render a sector's closing price as an ASCII chart
    Preview(PreviewArgs),
    /// Write demo series tables for a quick start
    Seed(SeedArgs),
}

impl Default for Command {
    fn default() -> Self {
        Command::Serve(ServeArgs::default())
    }
}
