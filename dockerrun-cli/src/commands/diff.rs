//! `dockerrun diff <template> <tag>` — show what render would change.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use dockerrun_renderer::{diff_manifest, Engine};

use super::super::EnvTagArg;

/// Arguments for `dockerrun diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Path to the manifest template.
    pub template: PathBuf,

    /// Environment tag: latest | master.
    pub tag: EnvTagArg,

    /// Compare against this manifest instead of Dockerrun.aws.json next to
    /// the template.
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

impl DiffArgs {
    pub fn run(self) -> Result<()> {
        let diff = diff_manifest(
            &Engine::new(),
            &self.template,
            self.tag.0,
            self.output.as_deref(),
        )
        .with_context(|| format!("diff failed for '{}'", self.template.display()))?;

        match diff {
            None => println!("No differences."),
            Some(diff) => {
                print!("{}", diff.unified_diff);
                if !diff.unified_diff.ends_with('\n') {
                    println!();
                }
            }
        }

        Ok(())
    }
}
