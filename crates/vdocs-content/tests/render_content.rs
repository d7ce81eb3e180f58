//! End-to-end rendering of templated markdown.

use pretty_assertions::assert_eq;
use serde_json::json;
use vdocs_content::{ContentRenderer, RenderError, RenderOptions};
use vdocs_template::{ConditionOperators, TemplateEngine};

fn renderer() -> ContentRenderer {
    ContentRenderer::new(TemplateEngine::new(ConditionOperators::versions()))
}

fn render(template: &str, context: &serde_json::Value, options: &RenderOptions) -> String {
    renderer().render(template, context, options).unwrap()
}

#[test]
fn renders_template_with_context() {
    let output = render(
        "my favorite color is {{ color }}.",
        &json!({ "color": "orange" }),
        &RenderOptions::default(),
    );
    assert_eq!(output, "<p>my favorite color is orange.</p>");
}

#[test]
fn preserves_content_within_raw_tags() {
    let template = "
      For example: {% raw %}{% include cool_header.html %}{% endraw %}.
    ";
    let output = render(template, &json!({}), &RenderOptions::default());
    assert_eq!(output, "<p>For example: {% include cool_header.html %}.</p>");
}

#[test]
fn preserves_comment_delimiters_within_raw_tags() {
    let output = render(
        "Count: {% raw %}echo ${#arr[@]}{% endraw %}",
        &json!({}),
        &RenderOptions::default(),
    );
    assert_eq!(output, "<p>Count: echo ${#arr[@]}</p>");

    let output = render(
        "{% raw %}a {# note #} b{% endraw %}",
        &json!({}),
        &RenderOptions::default(),
    );
    assert_eq!(output, "<p>a {# note #} b</p>");
}

#[test]
fn preserves_content_within_raw_tags_in_data_files() {
    let context = json!({
        "site": {
            "data": {
                "reusables": {
                    "fake_reusable_file": {
                        "foo": "{% raw %}{% include cool_header.html %}{% endraw %}"
                    }
                }
            }
        }
    });
    let template = "
      For example: {{ site.data.reusables.fake_reusable_file.foo }}.
    ";
    let output = render(template, &context, &RenderOptions::default());
    assert_eq!(output, "<p>For example: {% include cool_header.html %}.</p>");
}

#[test]
fn removes_extra_newlines_to_keep_lists_together() {
    let template = "
1. item one
1. item two


1. item three";
    let html = render(template, &json!({}), &RenderOptions::default());
    assert_eq!(html.matches("<ol>").count(), 1);
    assert_eq!(html.matches("<li>").count(), 3);
}

#[test]
fn renders_text_only() {
    let options = RenderOptions {
        text_only: true,
        ..Default::default()
    };
    let output = render(
        "my favorite color is {{ color }}.",
        &json!({ "color": "orange" }),
        &options,
    );
    assert_eq!(output, "my favorite color is orange.");
}

#[test]
fn fails_on_rendering_errors() {
    let result = renderer().render("{% if %}", &json!({}), &RenderOptions::default());
    assert!(matches!(result, Err(RenderError::Template(_))));
}

#[test]
fn fails_on_unterminated_raw_tag() {
    let result = renderer().render("a {% raw %} {{ b }}", &json!({}), &RenderOptions::default());
    assert!(matches!(result, Err(RenderError::Template(_))));
}

#[test]
fn fails_with_file_name_when_given() {
    let options = RenderOptions {
        filename: Some("name".to_owned()),
        ..Default::default()
    };
    let err = renderer()
        .render("{% endif %}", &json!({}), &options)
        .unwrap_err();
    assert_eq!(err.name(), "name");
    assert!(err.to_string().contains("name"));
}

#[test]
fn renders_empty_templates() {
    assert_eq!(render("", &json!({}), &RenderOptions::default()), "");
    assert_eq!(render(" \n\n ", &json!({}), &RenderOptions::default()), "");
}

#[test]
fn encodes_entities() {
    let options = RenderOptions {
        encode_entities: true,
        ..Default::default()
    };
    let output = render("<beep></beep>", &json!({}), &options);
    assert_eq!(output, "&lt;p&gt;&lt;beep&gt;&lt;/beep&gt;&lt;/p&gt;");
}

#[test]
fn unwraps() {
    let options = RenderOptions {
        unwrap: true,
        ..Default::default()
    };
    let output = render(
        "my favorite color is {{ color }}.",
        &json!({ "color": "orange" }),
        &options,
    );
    assert_eq!(output, "my favorite color is orange.");
}

#[test]
fn decorates_copyable_code_blocks() {
    let template = "```ruby{:copy}\nputs \"{{ greeting }}\"\n```";
    let html = render(template, &json!({ "greeting": "hi" }), &RenderOptions::default());
    assert!(html.starts_with(
        r#"<header class="d-flex flex-items-center flex-justify-between p-2 text-small rounded-top-1 border"><span>Ruby</span>"#
    ));
    assert!(html.contains(r#"data-clipboard-text="puts &quot;hi&quot;
""#));
    assert!(html.ends_with("<pre><code class=\"language-ruby\">puts \"hi\"\n</code></pre>"));
}

#[test]
fn selects_content_by_version() {
    let template = r#"
{% if currentVersion ver_gt "enterprise-server@2.13" %}
Use the **new** settings page.
{% elif currentVersion ver_lt "enterprise-server@2.13" %}
Upgrade first.
{% else %}
Use the classic settings page.
{% endif %}
"#;
    for (version, expected) in [
        ("enterprise-server@2.14", "<p>Use the <strong>new</strong> settings page.</p>"),
        ("enterprise-server@2.12", "<p>Upgrade first.</p>"),
        ("enterprise-server@2.13", "<p>Use the classic settings page.</p>"),
        ("free-pro-team@latest", "<p>Use the classic settings page.</p>"),
    ] {
        let output = render(
            template,
            &json!({ "currentVersion": version }),
            &RenderOptions::default(),
        );
        assert_eq!(output, expected, "currentVersion = {version}");
    }
}

#[test]
fn decorates_code_blocks_with_raw_shell_syntax() {
    let template = "```bash{:copy}\n{% raw %}echo ${#arr[@]}{% endraw %}\n```";
    let html = render(template, &json!({}), &RenderOptions::default());
    assert!(html.contains("<span>Shell</span>"));
    assert!(html.contains(r#"data-clipboard-text="echo ${#arr[@]}
""#));
    assert!(html.ends_with("<pre><code class=\"language-bash\">echo ${#arr[@]}\n</code></pre>"));
}
