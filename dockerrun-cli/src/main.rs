//! dockerrun — Elastic Beanstalk manifest renderer.
//!
//! # Usage
//!
//! ```text
//! dockerrun render <template> [tag] [--output <path>] [--dry-run]
//! dockerrun diff <template> <tag> [--output <path>]
//! dockerrun check <template>
//! ```

mod commands;

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{check::CheckArgs, diff::DiffArgs, render::RenderArgs};
use dockerrun_core::{EnvTag, ValidationError};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "dockerrun",
    version,
    about = "Render Elastic Beanstalk Dockerrun manifests from templates",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Substitute an environment tag into a template and write the manifest.
    Render(RenderArgs),

    /// Show a unified diff of what render would write.
    Diff(DiffArgs),

    /// Inspect a template without writing anything.
    Check(CheckArgs),
}

// ---------------------------------------------------------------------------
// Shared EnvTag argument — parsed from CLI strings, converts to core type
// ---------------------------------------------------------------------------

/// Thin wrapper so clap can parse [`EnvTag`] from CLI args.
#[derive(Debug, Clone, Copy)]
pub struct EnvTagArg(pub EnvTag);

impl FromStr for EnvTagArg {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.parse::<EnvTag>().map(Self)
    }
}

impl fmt::Display for EnvTagArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<EnvTagArg> for EnvTag {
    fn from(t: EnvTagArg) -> Self {
        t.0
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Render(args) => args.run(),
        Commands::Diff(args) => args.run(),
        Commands::Check(args) => args.run(),
    }
}
