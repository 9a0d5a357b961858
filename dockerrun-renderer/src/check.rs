//! Template inspection for `dockerrun check`.
//!
//! Reports the placeholder census and, for JSON templates, whether a probe
//! render yields well-formed JSON. The render path itself never parses JSON;
//! this is a pre-deploy sanity check only.

use std::path::{Path, PathBuf};

use dockerrun_core::EnvTag;

use crate::engine::Engine;
use crate::error::RenderError;

/// Outcome of the JSON well-formedness probe.
#[derive(Debug)]
pub enum JsonProbe {
    /// Template name does not look like JSON; probe not attempted.
    Skipped,
    /// Probe render parsed as JSON.
    WellFormed,
    /// Probe render failed to parse; carries the parse error text.
    Malformed(String),
}

/// Report produced by [`check_template`].
#[derive(Debug)]
pub struct CheckReport {
    pub template: PathBuf,
    /// Placeholder occurrences found in the template.
    pub placeholders: usize,
    pub json: JsonProbe,
}

/// Inspect the template at `template` without writing anything.
///
/// The probe substitutes an arbitrary allowed tag; since substitution is the
/// only transform, well-formedness under one tag implies it under every tag
/// of the same shape.
pub fn check_template(engine: &Engine, template: &Path) -> Result<CheckReport, RenderError> {
    let rendered = engine.render_file(template, EnvTag::Latest)?;

    let looks_like_json = template
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.contains(".json"))
        .unwrap_or(false);

    let json = if looks_like_json {
        match serde_json::from_str::<serde_json::Value>(&rendered.content) {
            Ok(_) => JsonProbe::WellFormed,
            Err(e) => JsonProbe::Malformed(e.to_string()),
        }
    } else {
        JsonProbe::Skipped
    };

    Ok(CheckReport {
        template: template.to_path_buf(),
        placeholders: rendered.replaced,
        json,
    })
}
