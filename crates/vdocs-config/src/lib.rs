//! Configuration management for vdocs.
//!
//! Parses `vdocs.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `templates.includes_dir`
//! - `versions.current`

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the includes directory.
    pub includes_dir: Option<PathBuf>,
    /// Override the current version.
    pub current_version: Option<String>,
    /// Override text-only output.
    pub text_only: Option<bool>,
    /// Override single paragraph unwrapping.
    pub unwrap: Option<bool>,
    /// Override entity encoding of the output.
    pub encode_entities: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "vdocs.toml";

/// Default includes directory, relative to the config file.
const DEFAULT_INCLUDES_DIR: &str = "includes";

/// Default context key holding the current version.
const DEFAULT_VERSION_VARIABLE: &str = "currentVersion";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Template configuration (paths are relative strings from TOML).
    templates: TemplatesConfigRaw,
    /// Version selection.
    pub versions: VersionsConfig,
    /// Default post-processing of rendered output.
    pub render: RenderConfig,

    /// Resolved template configuration (set after loading).
    #[serde(skip)]
    pub templates_resolved: TemplatesConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw template configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct TemplatesConfigRaw {
    includes_dir: Option<String>,
}

/// Resolved template configuration with absolute paths.
#[derive(Debug, Default)]
pub struct TemplatesConfig {
    /// Directory `{% include %}` names are resolved against.
    pub includes_dir: PathBuf,
}

/// Version selection configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct VersionsConfig {
    /// Context key bound to the current version.
    pub variable: String,
    /// Version rendered when none is given on the command line.
    pub current: Option<String>,
}

impl Default for VersionsConfig {
    fn default() -> Self {
        Self {
            variable: DEFAULT_VERSION_VARIABLE.to_owned(),
            current: None,
        }
    }
}

/// Default post-processing options.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Strip markup from the output.
    pub text_only: bool,
    /// Drop the wrapper of single paragraph output.
    pub unwrap: bool,
    /// Encode `&`, `<` and `>` of the output.
    pub encode_entities: bool,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`versions.current`").
        field: String,
        /// Error message (e.g., "${`DOCS_VERSION`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a string field to be a template identifier.
fn require_identifier(value: &str, field: &str) -> Result<(), ConfigError> {
    let mut chars = value.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(ConfigError::Validation(format!(
            "{field} must be an identifier (letters, digits and underscores), got {value:?}"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `vdocs.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(includes_dir) = &settings.includes_dir {
            self.templates_resolved.includes_dir.clone_from(includes_dir);
        }
        if let Some(current) = &settings.current_version {
            self.versions.current = Some(current.clone());
        }
        if let Some(text_only) = settings.text_only {
            self.render.text_only = text_only;
        }
        if let Some(unwrap) = settings.unwrap {
            self.render.unwrap = unwrap;
        }
        if let Some(encode_entities) = settings.encode_entities {
            self.render.encode_entities = encode_entities;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        Self::discover_config_from(std::env::current_dir().ok()?)
    }

    /// Search for config file in `start` and its parents.
    fn discover_config_from(mut current: PathBuf) -> Option<PathBuf> {
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            templates: TemplatesConfigRaw::default(),
            versions: VersionsConfig::default(),
            render: RenderConfig::default(),
            templates_resolved: TemplatesConfig {
                includes_dir: base.join(DEFAULT_INCLUDES_DIR),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.versions.variable, "versions.variable")?;
        require_identifier(&self.versions.variable, "versions.variable")?;
        if let Some(current) = &self.versions.current {
            require_non_empty(current, "versions.current")?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.templates.includes_dir {
            self.templates.includes_dir = Some(expand::expand_env(dir, "templates.includes_dir")?);
        }
        if let Some(ref current) = self.versions.current {
            self.versions.current = Some(expand::expand_env(current, "versions.current")?);
        }
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let includes_dir = self
            .templates
            .includes_dir
            .as_deref()
            .unwrap_or(DEFAULT_INCLUDES_DIR);
        self.templates_resolved = TemplatesConfig {
            includes_dir: config_dir.join(includes_dir),
        };
    }
}
