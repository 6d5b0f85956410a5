//! Configuration management for mdpipe.
//!
//! Parses `mdpipe.toml` configuration files with serde and provides
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
//! - `document.title`
//! - `document.lang`
//! - `document.stylesheet`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override standalone document output.
    pub standalone: Option<bool>,
    /// Override document title.
    pub title: Option<String>,
    /// Override stylesheet path.
    pub stylesheet: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdpipe.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Document output configuration (stylesheet path is a relative string from TOML).
    document: DocumentConfigRaw,

    /// Resolved document configuration (set after loading).
    #[serde(skip)]
    pub document_resolved: DocumentConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Raw document configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocumentConfigRaw {
    standalone: Option<bool>,
    title: Option<String>,
    lang: Option<String>,
    stylesheet: Option<String>,
}

/// Resolved document output configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentConfig {
    /// Wrap the HTML fragment in a complete HTML document.
    pub standalone: bool,
    /// Title of the standalone document.
    pub title: String,
    /// Language of the standalone document.
    pub lang: String,
    /// Stylesheet inlined into the standalone document.
    pub stylesheet: Option<PathBuf>,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            standalone: false,
            title: "Document".to_owned(),
            lang: "en".to_owned(),
            stylesheet: None,
        }
    }
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
        /// Config field path (e.g., "`document.title`").
        field: String,
        /// Error message (e.g., "${`DOC_TITLE`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdpipe.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
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
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(standalone) = settings.standalone {
            self.document_resolved.standalone = standalone;
        }
        if let Some(title) = &settings.title {
            self.document_resolved.title.clone_from(title);
        }
        if let Some(stylesheet) = &settings.stylesheet {
            self.document_resolved.stylesheet = Some(stylesheet.clone());
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_config_from(&current)
    }

    /// Search for config file starting at `start` and walking up.
    fn discover_config_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
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

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI settings
    /// are applied.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.document_resolved.title, "document.title")?;
        require_non_empty(&self.document_resolved.lang, "document.lang")?;
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let document = &mut self.document;
        if let Some(ref title) = document.title {
            document.title = Some(expand::expand_env(title, "document.title")?);
        }
        if let Some(ref lang) = document.lang {
            document.lang = Some(expand::expand_env(lang, "document.lang")?);
        }
        if let Some(ref stylesheet) = document.stylesheet {
            document.stylesheet = Some(expand::expand_env(stylesheet, "document.stylesheet")?);
        }
        Ok(())
    }

    /// Resolve raw values against defaults, and relative paths against the
    /// config directory.
    fn resolve(&mut self, config_dir: &Path) {
        let defaults = DocumentConfig::default();
        let raw = &self.document;

        self.document_resolved = DocumentConfig {
            standalone: raw.standalone.unwrap_or(defaults.standalone),
            title: raw.title.clone().unwrap_or(defaults.title),
            lang: raw.lang.clone().unwrap_or(defaults.lang),
            stylesheet: raw.stylesheet.as_deref().map(|s| config_dir.join(s)),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.document_resolved.standalone);
        assert_eq!(config.document_resolved.title, "Document");
        assert_eq!(config.document_resolved.lang, "en");
        assert!(config.document_resolved.stylesheet.is_none());
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve(Path::new("/project"));
        assert_eq!(config.document_resolved, DocumentConfig::default());
    }

    #[test]
    fn test_parse_document_config() {
        let toml = r#"
[document]
standalone = true
title = "Release notes"
lang = "de"
stylesheet = "styles/site.css"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve(Path::new("/project"));

        assert_eq!(
            config.document_resolved,
            DocumentConfig {
                standalone: true,
                title: "Release notes".to_owned(),
                lang: "de".to_owned(),
                stylesheet: Some(PathBuf::from("/project/styles/site.css")),
            }
        );
    }

    #[test]
    fn test_absolute_stylesheet_kept() {
        let toml = r#"
[document]
stylesheet = "/usr/share/mdpipe/style.css"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve(Path::new("/project"));
        assert_eq!(
            config.document_resolved.stylesheet,
            Some(PathBuf::from("/usr/share/mdpipe/style.css"))
        );
    }

    #[test]
    fn test_unknown_type_is_parse_error() {
        let result: Result<Config, _> = toml::from_str("[document]\nstandalone = \"yes\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_expand_env_default() {
        let toml = r#"
[document]
title = "${MDPIPE_TEST_SURELY_UNSET_TITLE:-Handbook}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();
        config.resolve(Path::new("/project"));
        assert_eq!(config.document_resolved.title, "Handbook");
    }

    #[test]
    fn test_validate_empty_title() {
        let mut config = Config::default();
        config.document_resolved.title = "  ".to_owned();
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        assert!(err.to_string().contains("document.title"));
    }

    #[test]
    fn test_apply_cli_settings_standalone() {
        let mut config = Config::default();
        let overrides = CliSettings {
            standalone: Some(true),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert!(config.document_resolved.standalone);
        assert_eq!(config.document_resolved.title, "Document"); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_title_and_stylesheet() {
        let mut config = Config::default();
        let overrides = CliSettings {
            title: Some("Guide".to_owned()),
            stylesheet: Some(PathBuf::from("/tmp/guide.css")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.document_resolved.title, "Guide");
        assert_eq!(
            config.document_resolved.stylesheet,
            Some(PathBuf::from("/tmp/guide.css"))
        );
        assert!(!config.document_resolved.standalone); // Unchanged
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/mdpipe.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_from_file_resolves_relative_to_config_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            "[document]\nstandalone = true\nstylesheet = \"style.css\"\n",
        )
        .unwrap();

        let config = Config::load(Some(path.as_path()), None).unwrap();

        assert!(config.document_resolved.standalone);
        assert_eq!(
            config.document_resolved.stylesheet,
            Some(temp_dir.path().join("style.css"))
        );
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_with_cli_settings_overrides_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[document]\nstandalone = true\ntitle = \"File\"\n").unwrap();

        let settings = CliSettings {
            standalone: Some(false),
            title: Some("Flag".to_owned()),
            ..Default::default()
        };
        let config = Config::load(Some(path.as_path()), Some(&settings)).unwrap();

        assert!(!config.document_resolved.standalone);
        assert_eq!(config.document_resolved.title, "Flag");
    }

    #[test]
    fn test_load_rejects_empty_cli_title() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "").unwrap();

        let settings = CliSettings {
            title: Some(String::new()),
            ..Default::default()
        };
        let err = Config::load(Some(path.as_path()), Some(&settings)).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[document\n").unwrap();

        let err = Config::load(Some(path.as_path()), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_discover_config_in_parent() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested = temp_dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "").unwrap();

        assert_eq!(Config::discover_config_from(&nested), Some(path));
    }
}
