//! # dockerrun-renderer
//!
//! Renders a Dockerrun manifest from a template by literal substitution of
//! the `${ENV}` placeholder, and writes it atomically so a partially
//! substituted manifest is never observable on disk.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use dockerrun_core::EnvTag;
//! use dockerrun_renderer::{render_to_file, Engine};
//!
//! fn render(template: &Path) {
//!     let engine = Engine::new();
//!     if let Ok(report) = render_to_file(&engine, template, EnvTag::Latest, None, false) {
//!         println!("{}: {} replaced", report.output.display(), report.replaced);
//!     }
//! }
//! ```

pub mod check;
pub mod diff;
pub mod engine;
pub mod error;
pub mod writer;

pub use check::{check_template, CheckReport, JsonProbe};
pub use diff::{diff_manifest, ManifestDiff};
pub use engine::{Engine, Rendered};
pub use error::RenderError;
pub use writer::{default_output_path, render_to_file, RenderReport, WriteResult, OUTPUT_FILENAME};
