//! `dockerrun render <template> [tag]` — render and write the manifest.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;

use dockerrun_core::EnvTag;
use dockerrun_renderer::{render_to_file, Engine, RenderReport, WriteResult};

use super::super::EnvTagArg;

/// Arguments for `dockerrun render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Path to the manifest template.
    pub template: PathBuf,

    /// Environment tag: latest | master. Prompted for when omitted on an
    /// interactive terminal.
    pub tag: Option<EnvTagArg>,

    /// Write the manifest here instead of Dockerrun.aws.json next to the
    /// template.
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Show what would be written without actually writing the manifest.
    #[arg(long)]
    pub dry_run: bool,
}

impl RenderArgs {
    pub fn run(self) -> Result<()> {
        let stdin = io::stdin();
        let interactive = stdin.is_terminal();
        let tag = resolve_tag(self.tag, interactive, &mut stdin.lock())?;

        let report = render_to_file(
            &Engine::new(),
            &self.template,
            tag,
            self.output.as_deref(),
            self.dry_run,
        )
        .with_context(|| format!("render failed for '{}'", self.template.display()))?;

        print_report(&report, tag, self.dry_run);
        Ok(())
    }
}

/// Resolve the environment tag from the argument, or interactively.
///
/// Prompting is gated on `interactive` so automated pipelines that omit the
/// tag fail fast instead of blocking on standard input. The line terminator
/// is stripped from prompted input; any other whitespace is part of the
/// value and fails validation.
fn resolve_tag(
    arg: Option<EnvTagArg>,
    interactive: bool,
    input: &mut dyn BufRead,
) -> Result<EnvTag> {
    if let Some(tag) = arg {
        return Ok(tag.into());
    }
    if !interactive {
        bail!(
            "missing environment tag; pass one of: {}",
            EnvTag::allowed_list()
        );
    }

    print!("Environment tag ({}): ", EnvTag::allowed_list());
    io::stdout().flush().context("failed to flush prompt")?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("failed to read environment tag")?;
    let entered = line.trim_end_matches(&['\r', '\n'][..]);
    let tag = entered.parse::<EnvTag>()?;
    Ok(tag)
}

fn print_report(report: &RenderReport, tag: EnvTag, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };

    match &report.write {
        WriteResult::Written { path } => {
            println!(
                "{prefix}{} rendered manifest with tag '{tag}' ({} replaced)",
                "✓".green(),
                report.replaced
            );
            println!("  ✎  {}", path.display());
        }
        WriteResult::WouldWrite { path } => {
            println!(
                "{prefix}{} would render manifest with tag '{tag}' ({} replaced)",
                "✓".green(),
                report.replaced
            );
            println!("  ~  {}", path.display());
        }
        WriteResult::Unchanged { path } => {
            println!(
                "{prefix}{} manifest already up to date with tag '{tag}' (unchanged)",
                "✓".green()
            );
            println!("  ·  {}", path.display());
        }
    }

    if report.replaced == 0 {
        println!(
            "  {} template contains no placeholder; manifest is a verbatim copy",
            "!".yellow()
        );
    }
}
