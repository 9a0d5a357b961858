//! `dockerrun check <template>` — inspect a template without writing.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;

use dockerrun_core::PLACEHOLDER;
use dockerrun_renderer::{check_template, Engine, JsonProbe};

/// Arguments for `dockerrun check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the manifest template.
    pub template: PathBuf,
}

impl CheckArgs {
    pub fn run(self) -> Result<()> {
        let report = check_template(&Engine::new(), &self.template)
            .with_context(|| format!("check failed for '{}'", self.template.display()))?;

        println!(
            "{} '{}': {} {} occurrence(s)",
            "✓".green(),
            report.template.display(),
            report.placeholders,
            PLACEHOLDER
        );
        if report.placeholders == 0 {
            println!(
                "  {} template contains no {} placeholder",
                "!".yellow(),
                PLACEHOLDER
            );
        }

        match report.json {
            JsonProbe::Skipped => {}
            JsonProbe::WellFormed => println!("  json: well-formed"),
            JsonProbe::Malformed(err) => {
                bail!(
                    "rendered '{}' is not valid JSON: {err}",
                    report.template.display()
                )
            }
        }

        Ok(())
    }
}
