//! Template error types.

/// Error returned when a template fails to render.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// Syntax or evaluation error reported by the template engine.
    #[error("Failed to render template {name}: {source}")]
    Render {
        /// Name the template was rendered under (usually a file path).
        name: String,
        /// Underlying engine error.
        #[source]
        source: minijinja::Error,
    },
}
