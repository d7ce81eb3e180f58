//! `vdocs render` command implementation.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use serde_json::{Map, Value};
use vdocs_config::{CliSettings, Config};
use vdocs_content::{ContentRenderer, RenderOptions};
use vdocs_template::{ConditionOperators, TemplateEngine};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render.
    file: PathBuf,

    /// Current version, e.g. `enterprise-server@3.0` (overrides config).
    #[arg(long, env = "VDOCS_CURRENT_VERSION")]
    current_version: Option<String>,

    /// Additional template context as a JSON object.
    #[arg(short, long)]
    data: Option<String>,

    /// Directory for `{% include %}` files (overrides config).
    #[arg(short, long)]
    includes_dir: Option<PathBuf>,

    /// Strip markup and print plain text.
    #[arg(long)]
    text_only: bool,

    /// Drop the `<p>` wrapper of single paragraph output.
    #[arg(long)]
    unwrap: bool,

    /// Encode `&`, `<` and `>` of the output.
    #[arg(long)]
    encode_entities: bool,

    /// Path to configuration file (default: auto-discover vdocs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl RenderArgs {
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            includes_dir: self.includes_dir.clone(),
            current_version: self.current_version.clone(),
            text_only: self.text_only.then_some(true),
            unwrap: self.unwrap.then_some(true),
            encode_entities: self.encode_entities.then_some(true),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }
        if config.versions.current.is_none() {
            output.warning("No current version set; version conditions evaluate to false");
        }

        let template = fs::read_to_string(&self.file)?;
        let context = build_context(self.data.as_deref(), &config)?;

        let engine = TemplateEngine::new(ConditionOperators::versions())
            .with_includes_dir(&config.templates_resolved.includes_dir);
        let renderer = ContentRenderer::new(engine);

        let options = RenderOptions {
            text_only: config.render.text_only,
            unwrap: config.render.unwrap,
            encode_entities: config.render.encode_entities,
            filename: Some(self.file.display().to_string()),
        };
        let html = renderer.render(&template, &context, &options)?;

        output.result(&html);
        Ok(())
    }
}

/// Template context from `--data` plus the configured current version.
///
/// The current version is bound to `versions.variable` and takes precedence
/// over the same key in `--data`.
fn build_context(data: Option<&str>, config: &Config) -> Result<Value, CliError> {
    let mut context = match data {
        Some(json) => match serde_json::from_str(json)? {
            Value::Object(map) => map,
            _ => {
                return Err(CliError::Validation(
                    "--data must be a JSON object".to_owned(),
                ));
            }
        },
        None => Map::new(),
    };

    if let Some(current) = &config.versions.current {
        context.insert(
            config.versions.variable.clone(),
            Value::String(current.clone()),
        );
    }

    Ok(Value::Object(context))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn config_with_current(current: Option<&str>) -> Config {
        let mut config = Config::default();
        config.versions.current = current.map(str::to_owned);
        config
    }

    #[test]
    fn test_context_from_data() {
        let context = build_context(Some(r#"{"color": "orange"}"#), &config_with_current(None));
        assert_eq!(context.unwrap(), json!({ "color": "orange" }));
    }

    #[test]
    fn test_context_binds_current_version() {
        let context = build_context(
            Some(r#"{"currentVersion": "ignored", "n": 1}"#),
            &config_with_current(Some("enterprise-server@3.0")),
        );
        assert_eq!(
            context.unwrap(),
            json!({ "currentVersion": "enterprise-server@3.0", "n": 1 })
        );
    }

    #[test]
    fn test_context_custom_variable() {
        let mut config = config_with_current(Some("2.14"));
        config.versions.variable = "productVersion".to_owned();
        let context = build_context(None, &config).unwrap();
        assert_eq!(context, json!({ "productVersion": "2.14" }));
    }

    #[test]
    fn test_context_rejects_non_object() {
        let err = build_context(Some("[1, 2]"), &config_with_current(None)).unwrap_err();
        assert!(matches!(err, CliError::Validation(_)));
    }

    #[test]
    fn test_context_rejects_invalid_json() {
        let err = build_context(Some("{"), &config_with_current(None)).unwrap_err();
        assert!(matches!(err, CliError::Json(_)));
        assert!(err.to_string().starts_with("Invalid --data JSON"));
    }
}
