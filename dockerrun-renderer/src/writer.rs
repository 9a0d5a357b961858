//! Atomic manifest writer and the render-to-file pipeline.
//!
//! ## Write protocol
//!
//! 1. Render content (already done by caller).
//! 2. SHA-256 hash the rendered content.
//! 3. Hash the existing output file, when present.
//! 4. Skip the write if the digests match.
//! 5. Write to `<path>.dockerrun.tmp`.
//! 6. Rename to the final path (atomic on POSIX).
//!
//! The final manifest is therefore either the previous content or the fully
//! substituted new content — never a partial write.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use dockerrun_core::EnvTag;

use crate::engine::Engine;
use crate::error::{io_err, RenderError};

/// Fixed output file name consumed by Elastic Beanstalk.
pub const OUTPUT_FILENAME: &str = "Dockerrun.aws.json";

/// Default output path: [`OUTPUT_FILENAME`] sibling to the template.
pub fn default_output_path(template: &Path) -> PathBuf {
    match template.parent() {
        Some(parent) if parent != Path::new("") => parent.join(OUTPUT_FILENAME),
        _ => PathBuf::from(OUTPUT_FILENAME),
    }
}

// ---------------------------------------------------------------------------
// Write result
// ---------------------------------------------------------------------------

/// Outcome of an individual manifest write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written (content changed or did not previously exist).
    Written { path: PathBuf },
    /// File was skipped — rendered content matches what is on disk.
    Unchanged { path: PathBuf },
    /// Dry-run mode: the file *would* have been written.
    WouldWrite { path: PathBuf },
}

impl WriteResult {
    /// The output path this result refers to.
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path }
            | WriteResult::Unchanged { path }
            | WriteResult::WouldWrite { path } => path,
        }
    }
}

// ---------------------------------------------------------------------------
// atomic_write
// ---------------------------------------------------------------------------

fn sha256_hex(bytes: &[u8]) -> String {
    let mut h = Sha256::new();
    h.update(bytes);
    hex::encode(h.finalize())
}

/// Digest of the existing output file, or `None` when it does not exist.
fn existing_digest(path: &Path) -> Result<Option<String>, RenderError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(sha256_hex(&bytes))),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(io_err(path, err)),
    }
}

/// Atomically write `content` to `path` via a tmp-file rename.
///
/// Returns [`WriteResult`] indicating whether the file was written, skipped
/// as unchanged, or (in dry-run) merely reported.
pub(crate) fn atomic_write(
    path: &Path,
    content: &str,
    dry_run: bool,
) -> Result<WriteResult, RenderError> {
    let tmp = PathBuf::from(format!("{}.dockerrun.tmp", path.display()));
    atomic_write_with_tmp(path, content, dry_run, &tmp)
}

fn atomic_write_with_tmp(
    path: &Path,
    content: &str,
    dry_run: bool,
    tmp: &Path,
) -> Result<WriteResult, RenderError> {
    let digest = sha256_hex(content.as_bytes());
    if existing_digest(path)?.as_deref() == Some(digest.as_str()) {
        tracing::debug!("unchanged: {}", path.display());
        return Ok(WriteResult::Unchanged {
            path: path.to_path_buf(),
        });
    }

    if dry_run {
        tracing::info!("[dry-run] would write: {}", path.display());
        return Ok(WriteResult::WouldWrite {
            path: path.to_path_buf(),
        });
    }

    if let Some(parent) = path.parent() {
        if parent != Path::new("") {
            std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
        }
    }

    std::fs::write(tmp, content).map_err(|e| io_err(tmp, e))?;

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }

    tracing::info!("wrote: {}", path.display());
    Ok(WriteResult::Written {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// render_to_file
// ---------------------------------------------------------------------------

/// Summary of a render-and-write invocation.
#[derive(Debug)]
pub struct RenderReport {
    /// Path the manifest was (or would be) written to.
    pub output: PathBuf,
    /// Number of placeholder occurrences replaced.
    pub replaced: usize,
    /// Write outcome.
    pub write: WriteResult,
}

/// Render the template at `template` with `tag` and write the manifest.
///
/// `output` defaults to [`OUTPUT_FILENAME`] sibling to the template. The tag
/// is already validated by construction ([`EnvTag`] only holds allowed
/// values), so any failure here is I/O; on failure the output file is left
/// untouched.
pub fn render_to_file(
    engine: &Engine,
    template: &Path,
    tag: EnvTag,
    output: Option<&Path>,
    dry_run: bool,
) -> Result<RenderReport, RenderError> {
    let rendered = engine.render_file(template, tag)?;
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(template));
    let write = atomic_write(&output, &rendered.content, dry_run)?;
    Ok(RenderReport {
        output,
        replaced: rendered.replaced,
        write,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn first_write_returns_written() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(OUTPUT_FILENAME);
        let result = atomic_write(&path, r#"{"image":"x:latest"}"#, false).unwrap();
        assert!(matches!(result, WriteResult::Written { .. }));
        assert!(path.exists());
    }

    #[test]
    fn second_write_same_content_returns_unchanged() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(OUTPUT_FILENAME);
        atomic_write(&path, "same content", false).unwrap();
        let result = atomic_write(&path, "same content", false).unwrap();
        assert!(matches!(result, WriteResult::Unchanged { .. }));
    }

    #[test]
    fn changed_content_returns_written() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(OUTPUT_FILENAME);
        atomic_write(&path, "v1", false).unwrap();
        let result = atomic_write(&path, "v2", false).unwrap();
        assert!(matches!(result, WriteResult::Written { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "v2");
    }

    #[test]
    fn dry_run_does_not_write_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(OUTPUT_FILENAME);
        let result = atomic_write(&path, "content", true).unwrap();
        assert!(matches!(result, WriteResult::WouldWrite { .. }));
        assert!(!path.exists(), "dry-run must not create files");
    }

    #[test]
    fn dry_run_still_detects_unchanged() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(OUTPUT_FILENAME);
        fs::write(&path, "content").unwrap();
        let result = atomic_write(&path, "content", true).unwrap();
        assert!(matches!(result, WriteResult::Unchanged { .. }));
    }

    #[test]
    fn tmp_file_removed_after_write() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(OUTPUT_FILENAME);
        atomic_write(&path, "data", false).unwrap();
        let tmp_path = PathBuf::from(format!("{}.dockerrun.tmp", path.display()));
        assert!(!tmp_path.exists(), ".dockerrun.tmp must be cleaned up");
    }

    #[test]
    fn creates_parent_directories_for_output_override() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("deploy").join("out").join(OUTPUT_FILENAME);
        atomic_write(&path, "content", false).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn default_output_is_sibling_to_template() {
        let template = Path::new("/deploy/Dockerrun.aws.json.template");
        assert_eq!(
            default_output_path(template),
            PathBuf::from("/deploy/Dockerrun.aws.json")
        );
    }

    #[test]
    fn bare_template_name_defaults_to_cwd_output() {
        let template = Path::new("Dockerrun.aws.json.template");
        assert_eq!(default_output_path(template), PathBuf::from(OUTPUT_FILENAME));
    }

    #[test]
    fn render_to_file_writes_substituted_manifest() {
        let tmp = TempDir::new().unwrap();
        let template = tmp.path().join("Dockerrun.aws.json.template");
        fs::write(&template, r#"{"image":"x:${ENV}"}"#).unwrap();

        let report =
            render_to_file(&Engine::new(), &template, EnvTag::Latest, None, false).unwrap();
        assert_eq!(report.replaced, 1);
        assert_eq!(report.output, tmp.path().join(OUTPUT_FILENAME));
        assert!(matches!(report.write, WriteResult::Written { .. }));
        assert_eq!(
            fs::read_to_string(&report.output).unwrap(),
            r#"{"image":"x:latest"}"#
        );
    }

    #[test]
    fn render_to_file_missing_template_leaves_no_output() {
        let tmp = TempDir::new().unwrap();
        let template = tmp.path().join("missing.template");

        let err = render_to_file(&Engine::new(), &template, EnvTag::Master, None, false)
            .expect_err("missing template must fail");
        assert!(err.to_string().contains("missing.template"));
        assert!(
            !tmp.path().join(OUTPUT_FILENAME).exists(),
            "no output may be produced on failure"
        );
    }

    #[test]
    fn rerender_same_tag_is_byte_identical_and_unchanged() {
        let tmp = TempDir::new().unwrap();
        let template = tmp.path().join("Dockerrun.aws.json.template");
        fs::write(&template, r#"{"web":"a:${ENV}","worker":"b:${ENV}"}"#).unwrap();

        let engine = Engine::new();
        let first = render_to_file(&engine, &template, EnvTag::Master, None, false).unwrap();
        let first_bytes = fs::read(&first.output).unwrap();

        let second = render_to_file(&engine, &template, EnvTag::Master, None, false).unwrap();
        assert!(matches!(second.write, WriteResult::Unchanged { .. }));
        assert_eq!(fs::read(&second.output).unwrap(), first_bytes);
    }

    #[test]
    #[cfg(unix)]
    fn rename_failure_leaves_original_and_cleans_tmp() {
        use std::os::unix::fs::PermissionsExt;

        let root = TempDir::new().unwrap();
        let readonly_dir = root.path().join("readonly");
        fs::create_dir_all(&readonly_dir).unwrap();

        let path = readonly_dir.join(OUTPUT_FILENAME);
        fs::write(&path, "original").unwrap();

        let mut perms = fs::metadata(&readonly_dir).unwrap().permissions();
        perms.set_mode(0o555);
        fs::set_permissions(&readonly_dir, perms).unwrap();

        let tmp_dir = TempDir::new().unwrap();
        let tmp_path = tmp_dir.path().join("Dockerrun.aws.json.dockerrun.tmp");

        let err = atomic_write_with_tmp(&path, "new content", false, &tmp_path)
            .expect_err("rename should fail on readonly dir");
        let _ = err;

        let current = fs::read_to_string(&path).unwrap();
        assert_eq!(current, "original", "original file should be intact");
        assert!(!tmp_path.exists(), ".dockerrun.tmp should be cleaned up");

        let mut perms = fs::metadata(&readonly_dir).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&readonly_dir, perms).unwrap();
    }
}
