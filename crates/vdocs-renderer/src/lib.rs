//! Markdown to HTML rendering for documentation pages.
//!
//! This crate provides a generic [`MarkdownRenderer`] driven by
//! [`pulldown_cmark`] events, producing output through the [`RenderBackend`]
//! trait. [`HtmlBackend`] produces semantic HTML5.
//!
//! Fenced code blocks can be intercepted with a [`CodeBlockProcessor`].
//! [`CodeHeaderProcessor`] is the built-in one: blocks whose language carries
//! the `{:copy}` suffix get a header with the language name and a copy button.
//!
//! # Example
//!
//! ```
//! use vdocs_renderer::{CodeHeaderProcessor, HtmlBackend, MarkdownRenderer};
//!
//! let html = MarkdownRenderer::<HtmlBackend>::new()
//!     .with_processor(CodeHeaderProcessor)
//!     .render_markdown("```ruby{:copy}\nputs 1\n```");
//! assert!(html.starts_with("<header"));
//! assert!(html.contains(r#"<code class="language-ruby">"#));
//! ```

mod backend;
mod code_block;
pub mod code_header;
mod html;
mod renderer;
mod state;

pub use backend::RenderBackend;
pub use code_block::{CodeBlockProcessor, ProcessResult};
pub use code_header::{CodeBlockNode, CodeHeader, CodeHeaderProcessor, decorate};
pub use html::HtmlBackend;
pub use renderer::MarkdownRenderer;
pub use state::{escape_attr, escape_text, slugify};
