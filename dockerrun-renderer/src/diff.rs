//! Dry-run unified diff support for `dockerrun diff`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use similar::TextDiff;

use dockerrun_core::EnvTag;

use crate::engine::Engine;
use crate::error::{io_err, RenderError};
use crate::writer::default_output_path;

/// Unified diff between the rendered manifest and what is on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestDiff {
    pub path: PathBuf,
    pub unified_diff: String,
}

/// Render what `render` would write and compare it to the current on-disk
/// manifest. A missing manifest diffs against empty content.
///
/// No files are written. Returns `None` when the rendered content matches
/// the disk exactly.
pub fn diff_manifest(
    engine: &Engine,
    template: &Path,
    tag: EnvTag,
    output: Option<&Path>,
) -> Result<Option<ManifestDiff>, RenderError> {
    let rendered = engine.render_file(template, tag)?;
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(template));

    let existing = read_existing_or_empty(&output)?;
    if existing == rendered.content {
        return Ok(None);
    }

    let name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| output.display().to_string());
    let old_header = format!("a/{name}");
    let new_header = format!("b/{name}");
    let unified = TextDiff::from_lines(&existing, &rendered.content)
        .unified_diff()
        .header(&old_header, &new_header)
        .context_radius(3)
        .to_string();

    Ok(Some(ManifestDiff {
        path: output,
        unified_diff: unified,
    }))
}

fn read_existing_or_empty(path: &Path) -> Result<String, RenderError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(err) => Err(io_err(path, err)),
    }
}
