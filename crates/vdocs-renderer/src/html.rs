//! HTML backend for markdown rendering.

use std::fmt::Write;

use crate::backend::RenderBackend;
use crate::state::{escape_attr, escape_text};

/// HTML render backend.
///
/// Produces semantic HTML5 with:
/// - `<pre><code class="language-*">` for code blocks
/// - `<blockquote>` for blockquotes
/// - `<img>` for images
pub struct HtmlBackend;

impl RenderBackend for HtmlBackend {
    fn code_block(lang: Option<&str>, content: &str, out: &mut String) {
        if let Some(lang) = lang {
            write!(
                out,
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                escape_attr(lang),
                escape_text(content)
            )
            .unwrap();
        } else {
            write!(out, "<pre><code>{}</code></pre>", escape_text(content)).unwrap();
        }
    }

    fn blockquote_start(out: &mut String) {
        out.push_str("<blockquote>");
    }

    fn blockquote_end(out: &mut String) {
        out.push_str("</blockquote>");
    }

    fn image(src: &str, alt: &str, title: &str, out: &mut String) {
        write!(
            out,
            r#"<img src="{}" alt="{}""#,
            escape_attr(src),
            escape_attr(alt)
        )
        .unwrap();
        if !title.is_empty() {
            write!(out, r#" title="{}""#, escape_attr(title)).unwrap();
        }
        out.push('>');
    }
}
