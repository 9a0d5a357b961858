//! Substitution engine — [`Engine`] and the [`Rendered`] outcome.
//!
//! The template is opaque text. Only exact occurrences of the placeholder
//! token are replaced; there is no templating language, no escaping, and no
//! JSON awareness. Braces, `{{`, and other template-looking input pass
//! through untouched.

use std::path::Path;

use dockerrun_core::{EnvTag, PLACEHOLDER};

use crate::error::{io_err, RenderError};

/// Outcome of a substitution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Template text with every placeholder occurrence replaced.
    pub content: String,
    /// Number of placeholder occurrences that were replaced.
    pub replaced: usize,
}

/// Literal-substitution engine with a configurable placeholder token.
///
/// Create once with [`Engine::new`] and reuse. [`Engine::with_placeholder`]
/// exists for templates that mark insertion points with a non-standard
/// token.
pub struct Engine {
    placeholder: String,
}

impl Engine {
    /// Construct an [`Engine`] using the standard `${ENV}` placeholder.
    pub fn new() -> Self {
        Engine {
            placeholder: PLACEHOLDER.to_string(),
        }
    }

    /// Construct an [`Engine`] with a caller-supplied placeholder token.
    ///
    /// The token must be non-empty.
    pub fn with_placeholder(token: impl Into<String>) -> Self {
        let placeholder = token.into();
        debug_assert!(!placeholder.is_empty(), "placeholder token must be non-empty");
        Engine { placeholder }
    }

    /// The placeholder token this engine substitutes.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Count placeholder occurrences in `template` without substituting.
    pub fn count(&self, template: &str) -> usize {
        template.matches(&self.placeholder).count()
    }

    /// Replace every placeholder occurrence in `template` with `tag`.
    pub fn render_str(&self, template: &str, tag: EnvTag) -> Rendered {
        let replaced = self.count(template);
        let content = if replaced == 0 {
            template.to_string()
        } else {
            template.replace(&self.placeholder, tag.as_str())
        };
        Rendered { content, replaced }
    }

    /// Read the template at `path` and substitute `tag`.
    ///
    /// A missing or unreadable template is a [`RenderError::Io`] naming the
    /// path; nothing is written by this call.
    pub fn render_file(&self, path: &Path, tag: EnvTag) -> Result<Rendered, RenderError> {
        let template = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
        let rendered = self.render_str(&template, tag);
        if rendered.replaced == 0 {
            tracing::warn!(
                "template '{}' contains no '{}' placeholder",
                path.display(),
                self.placeholder
            );
        }
        Ok(rendered)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}
