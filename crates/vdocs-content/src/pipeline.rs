//! Template, markdown and raw-region stages wired into one render call.

use std::sync::LazyLock;

use minijinja::Value;
use regex::Regex;
use serde::Serialize;
use vdocs_renderer::{CodeHeaderProcessor, HtmlBackend, MarkdownRenderer};
use vdocs_template::{TemplateEngine, raw};

use crate::error::RenderError;
use crate::options::RenderOptions;

/// Name used for content rendered without a file name.
const ANONYMOUS: &str = "content";

/// Three consecutive line breaks.
static EXTRA_NEWLINES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\r?\n){3}").unwrap());

/// Renders templated markdown into HTML.
///
/// Holds a configured [`TemplateEngine`]; a markdown renderer is created per
/// call, so one `ContentRenderer` can serve concurrent renders.
pub struct ContentRenderer {
    engine: TemplateEngine,
}

impl ContentRenderer {
    /// Create a renderer around a configured engine.
    #[must_use]
    pub fn new(engine: TemplateEngine) -> Self {
        Self { engine }
    }

    /// Template engine used for both template passes.
    pub fn engine(&self) -> &TemplateEngine {
        &self.engine
    }

    /// Render `template` with `context`.
    ///
    /// Empty or whitespace-only templates render to the empty string.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Template`] when either template pass fails. When
    /// [`RenderOptions::filename`] is set the failure is also logged.
    pub fn render<S: Serialize + ?Sized>(
        &self,
        template: &str,
        context: &S,
        options: &RenderOptions,
    ) -> Result<String, RenderError> {
        let name = options.filename.as_deref().unwrap_or(ANONYMOUS);
        let context = Value::from_serialize(context);

        match self.render_html(name, template, &context) {
            Ok(html) => Ok(options.apply(&html)),
            Err(err) => {
                if let Some(filename) = &options.filename {
                    tracing::error!(error = %err, "render failed on file: {filename}");
                }
                Err(err)
            }
        }
    }

    fn render_html(
        &self,
        name: &str,
        template: &str,
        context: &Value,
    ) -> Result<String, RenderError> {
        let source = template.trim();
        if source.is_empty() {
            return Ok(String::new());
        }

        let protected = raw::protect(source);
        let rendered = self.engine.render(name, &protected, context)?;
        let collapsed = EXTRA_NEWLINES_RE.replace_all(&rendered, "\n\n");
        tracing::debug!(name, len = collapsed.len(), "Converting markdown");

        let html = MarkdownRenderer::<HtmlBackend>::new()
            .with_processor(CodeHeaderProcessor)
            .render_markdown(&collapsed);
        let restored = raw::restore(&html);

        // Second pass turns the restored raw tags into their literal content.
        Ok(self.engine.render(name, &restored, context)?)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use serde_json::json;
    use vdocs_template::ConditionOperators;

    use super::*;

    fn renderer() -> ContentRenderer {
        ContentRenderer::new(TemplateEngine::new(ConditionOperators::versions()))
    }

    fn render(template: &str, context: &serde_json::Value) -> String {
        renderer()
            .render(template, context, &RenderOptions::default())
            .unwrap()
    }

    #[test]
    fn test_variable_in_paragraph() {
        assert_eq!(
            render("my favorite color is {{ color }}.", &json!({ "color": "orange" })),
            "<p>my favorite color is orange.</p>"
        );
    }

    #[test]
    fn test_version_condition() {
        let template = r#"{% if currentVersion ver_gt "enterprise-server@2.13" %}New **feature**.{% endif %}"#;
        assert_eq!(
            render(template, &json!({ "currentVersion": "enterprise-server@2.14" })),
            "<p>New <strong>feature</strong>.</p>"
        );
        assert_eq!(
            render(template, &json!({ "currentVersion": "enterprise-server@2.13" })),
            ""
        );
    }

    #[test]
    fn test_raw_inside_code_block() {
        let template = "```liquid{:copy}\n{% raw %}{{ page.title }}{% endraw %}\n```";
        let html = render(template, &json!({ "page": { "title": "Home" } }));
        assert!(html.starts_with("<header"));
        assert!(html.contains("<span>liquid</span>"));
        assert!(html.contains(r#"data-clipboard-text="{{ page.title }}
""#));
        assert!(html.ends_with(
            "<pre><code class=\"language-liquid\">{{ page.title }}\n</code></pre>"
        ));
    }

    #[test]
    fn test_raw_block_spanning_paragraphs() {
        let template = "{% raw %}{{ a }}\n\n{% if b %}{% endraw %}";
        assert_eq!(
            render(template, &json!({ "a": "A" })),
            "<p>{{ a }}</p><p>{% if b %}</p>"
        );
    }

    #[test]
    fn test_extra_newlines_collapse() {
        let template = "1. item one\n1. item two\n\n\n1. item three";
        let html = render(template, &json!({}));
        assert_eq!(html.matches("<ol>").count(), 1);
        assert_eq!(html.matches("<li>").count(), 3);
    }

    #[test]
    fn test_crlf_newlines_collapse() {
        let html = render("1. one\r\n\r\n\r\n1. two", &json!({}));
        assert_eq!(html.matches("<ol>").count(), 1);
    }

    #[test]
    fn test_include() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("note.md"), "> **Note:** {{ text }}").unwrap();
        let engine =
            TemplateEngine::new(ConditionOperators::versions()).with_includes_dir(dir.path());
        let html = ContentRenderer::new(engine)
            .render(
                r#"{% include "note.md" %}"#,
                &json!({ "text": "careful" }),
                &RenderOptions::default(),
            )
            .unwrap();
        assert_eq!(
            html,
            "<blockquote><p><strong>Note:</strong> careful</p></blockquote>"
        );
    }

    #[test]
    fn test_error_names_file() {
        let options = RenderOptions {
            filename: Some("guide/intro.md".to_owned()),
            ..Default::default()
        };
        let err = renderer()
            .render("{% if %}", &json!({}), &options)
            .unwrap_err();
        assert_eq!(err.name(), "guide/intro.md");
    }

    #[test]
    fn test_anonymous_error_name() {
        let err = renderer()
            .render("{{ }}", &json!({}), &RenderOptions::default())
            .unwrap_err();
        assert_eq!(err.name(), ANONYMOUS);
    }

    static_assertions::assert_impl_all!(super::ContentRenderer: Send, Sync);
}
