//! Render pipeline errors.

use vdocs_template::TemplateError;

/// Error returned by [`ContentRenderer::render`](crate::ContentRenderer::render).
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Template evaluation failed in either template pass.
    #[error(transparent)]
    Template(#[from] TemplateError),
}

impl RenderError {
    /// Name the failing content was rendered under.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Template(TemplateError::Render { name, .. }) => name,
        }
    }
}
