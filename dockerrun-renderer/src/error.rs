//! Error types for dockerrun-renderer.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from rendering and writing manifests.
#[derive(Debug, Error)]
pub enum RenderError {
    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`RenderError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Io {
        path: path.into(),
        source,
    }
}
