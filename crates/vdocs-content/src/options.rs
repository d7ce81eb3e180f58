//! Post-processing options applied to rendered HTML.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Options for a single render call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Strip all markup and decode entities, leaving plain text.
    pub text_only: bool,
    /// Drop the `<p>` wrapper when the output is a single paragraph.
    pub unwrap: bool,
    /// Encode `&`, `<` and `>` of the final output.
    pub encode_entities: bool,
    /// Source file name, used in error messages and the failure diagnostic.
    pub filename: Option<String>,
}

impl RenderOptions {
    /// Apply the enabled post-processing steps to `html` and trim the result.
    ///
    /// `text_only` takes precedence over `unwrap`; `encode_entities` runs last.
    #[must_use]
    pub fn apply(&self, html: &str) -> String {
        let html = html.trim();
        let processed = if self.text_only {
            Cow::Owned(text_only(html))
        } else if self.unwrap {
            Cow::Borrowed(unwrap_paragraph(html))
        } else {
            Cow::Borrowed(html)
        };
        let processed = if self.encode_entities {
            Cow::Owned(encode_entities(&processed).into_owned())
        } else {
            processed
        };
        processed.trim().to_owned()
    }
}

/// Inner HTML of `html` when it is exactly one paragraph, else `html` itself.
#[must_use]
pub fn unwrap_paragraph(html: &str) -> &str {
    let html = html.trim();
    match html
        .strip_prefix("<p>")
        .and_then(|rest| rest.strip_suffix("</p>"))
    {
        Some(inner) if !inner.contains("<p>") && !inner.contains("</p>") => inner,
        _ => html,
    }
}

/// Text content of `html`: tags removed, entities decoded.
#[must_use]
pub fn text_only(html: &str) -> String {
    let stripped = TAG_RE.replace_all(html, "");
    html_escape::decode_html_entities(&stripped).into_owned()
}

/// Encode `&`, `<` and `>` so the HTML displays as source.
#[must_use]
pub fn encode_entities(html: &str) -> Cow<'_, str> {
    html_escape::encode_text(html)
}
