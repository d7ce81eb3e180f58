//! Template engine construction and rendering.

use std::borrow::Cow;
use std::path::Path;

use minijinja::{AutoEscape, Environment, UndefinedBehavior, Value};

use crate::error::TemplateError;
use crate::infix::InfixRewriter;
use crate::operators::ConditionOperators;

/// Template engine with condition operators registered.
///
/// Built once and shared; rendering takes `&self` and touches no global
/// state. Operators are registered as engine tests, and infix uses inside
/// `if`/`elif` tags are rewritten to test syntax before evaluation.
///
/// Undefined variables render as empty and chain (`site.data.missing.key` is
/// undefined rather than an error). Output is never HTML-escaped: sources are
/// markdown, and escaping belongs to the markdown stage.
pub struct TemplateEngine {
    env: Environment<'static>,
    operators: ConditionOperators,
    infix: InfixRewriter,
}

impl TemplateEngine {
    /// Create an engine with the given operator table.
    #[must_use]
    pub fn new(operators: ConditionOperators) -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Chainable);
        env.set_auto_escape_callback(|_| AutoEscape::None);

        for (name, comparison) in operators.iter() {
            env.add_test(name, move |left: &Value, right: &Value| {
                comparison(&operand(left), &operand(right))
            });
        }

        let infix = InfixRewriter::new(operators.names());
        Self {
            env,
            operators,
            infix,
        }
    }

    /// Resolve `{% include %}` names against `dir`.
    #[must_use]
    pub fn with_includes_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.env.set_loader(minijinja::path_loader(dir.as_ref().to_path_buf()));
        self
    }

    /// Operators registered with this engine.
    pub fn operators(&self) -> &ConditionOperators {
        &self.operators
    }

    /// Render `source` with `context`.
    ///
    /// `name` identifies the source in error messages.
    pub fn render(
        &self,
        name: &str,
        source: &str,
        context: &Value,
    ) -> Result<String, TemplateError> {
        let source = self.infix.rewrite(source);
        tracing::debug!(name, len = source.len(), "Rendering template");
        self.env
            .render_named_str(name, &source, context)
            .map_err(|source| TemplateError::Render {
                name: name.to_owned(),
                source,
            })
    }
}

/// String form of an operand; undefined and none are the empty string.
fn operand(value: &Value) -> Cow<'_, str> {
    if value.is_undefined() || value.is_none() {
        Cow::Borrowed("")
    } else if let Some(s) = value.as_str() {
        Cow::Borrowed(s)
    } else {
        Cow::Owned(value.to_string())
    }
}
