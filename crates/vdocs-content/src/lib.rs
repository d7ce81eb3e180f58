//! Render pipeline for versioned documentation content.
//!
//! [`ContentRenderer`] turns markdown with embedded template syntax into HTML:
//!
//! 1. `{% raw %}` regions are protected from the first template pass
//! 2. the template engine evaluates conditions, variables and includes
//! 3. runs of three newlines collapse so split lists stay one list
//! 4. markdown is converted to HTML, decorating `{:copy}` code blocks
//! 5. raw regions are restored and resolved by a second template pass
//! 6. optional post-processing ([`RenderOptions`])
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use vdocs_content::{ContentRenderer, RenderOptions};
//! use vdocs_template::{ConditionOperators, TemplateEngine};
//!
//! let renderer = ContentRenderer::new(TemplateEngine::new(ConditionOperators::versions()));
//! let html = renderer
//!     .render(
//!         "my favorite color is {{ color }}.",
//!         &json!({ "color": "orange" }),
//!         &RenderOptions::default(),
//!     )
//!     .unwrap();
//! assert_eq!(html, "<p>my favorite color is orange.</p>");
//! ```

mod error;
mod options;
mod pipeline;

pub use error::RenderError;
pub use options::{RenderOptions, encode_entities, text_only, unwrap_paragraph};
pub use pipeline::ContentRenderer;
