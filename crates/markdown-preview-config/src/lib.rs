use markdown_preview_engine::{ExportOptions, ParserMode, export::DEFAULT_TITLE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to read stylesheet at {stylesheet_path}: {source}")]
    StylesheetReadError {
        stylesheet_path: PathBuf,
        source: std::io::Error,
    },
}

/// Which parser the renderer uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Pick per document by feature detection.
    #[default]
    Auto,
    /// Block parser only.
    Fallback,
    /// Standards pipeline first, block parser on failure.
    Standards,
}

impl From<Mode> for ParserMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Auto => ParserMode::Auto,
            Mode::Fallback => ParserMode::FallbackOnly,
            Mode::Standards => ParserMode::Standards,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub title: String,
    /// CSS file that replaces the built-in export stylesheet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stylesheet: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            stylesheet: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub mode: Mode,
    pub export: ExportConfig,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the stylesheet path
        config.export.stylesheet = config
            .export
            .stylesheet
            .map(|path| Self::expand_path(&path).unwrap_or(path));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/markdown-preview");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn parser_mode(&self) -> ParserMode {
        self.mode.into()
    }

    /// Export settings with the stylesheet file, if any, read into memory.
    pub fn export_options(&self) -> Result<ExportOptions, ConfigError> {
        let stylesheet = match &self.export.stylesheet {
            Some(path) => Some(std::fs::read_to_string(path).map_err(|source| {
                ConfigError::StylesheetReadError {
                    stylesheet_path: path.clone(),
                    source,
                }
            })?),
            None => None,
        };

        Ok(ExportOptions {
            title: self.export.title.clone(),
            stylesheet,
        })
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        // Should not contain tilde anymore
        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/markdown-preview/config.toml"));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.mode, Mode::Auto);
        assert_eq!(config.export.title, "Markdown Export");
        assert_eq!(config.export.stylesheet, None);
        assert_eq!(config.parser_mode(), ParserMode::Auto);
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let original = Config {
            mode: Mode::Fallback,
            export: ExportConfig {
                title: "Notes".to_string(),
                stylesheet: Some(PathBuf::from("/tmp/style.css")),
            },
        };

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_config() {
        let config: Config = toml::from_str("mode = \"standards\"\n").unwrap();
        assert_eq!(config.mode, Mode::Standards);
        assert_eq!(config.export, ExportConfig::default());
        assert_eq!(config.parser_mode(), ParserMode::Standards);
    }

    #[test]
    fn test_unknown_mode_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "mode = \"fastest\"\n").unwrap();

        let result = Config::load_from_path(&config_file);

        assert!(matches!(result, Err(ConfigError::ConfigParseError { .. })));
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/test/path");
        let expanded = Config::expand_path(&path);

        assert!(expanded.is_some());
        let expanded = expanded.unwrap();
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_stylesheet_with_env_var_in_toml() {
        unsafe {
            env::set_var("PREVIEW_STYLE_ROOT", "/custom/styles");
        }

        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_file,
            "[export]\nstylesheet = \"$PREVIEW_STYLE_ROOT/print.css\"\n",
        )
        .unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(
            config.export.stylesheet,
            Some(PathBuf::from("/custom/styles/print.css"))
        );

        unsafe {
            env::remove_var("PREVIEW_STYLE_ROOT");
        }
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let test_config = Config {
            mode: Mode::Standards,
            export: ExportConfig::default(),
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_export_options_reads_stylesheet() {
        let temp_dir = TempDir::new().unwrap();
        let css = temp_dir.path().join("style.css");
        std::fs::write(&css, "body { margin: 0; }\n").unwrap();
        let config = Config {
            mode: Mode::Auto,
            export: ExportConfig {
                title: "Doc".to_string(),
                stylesheet: Some(css),
            },
        };

        let options = config.export_options().unwrap();

        assert_eq!(options.title, "Doc");
        assert_eq!(options.stylesheet.as_deref(), Some("body { margin: 0; }\n"));
    }

    #[test]
    fn test_export_options_missing_stylesheet() {
        let config = Config {
            mode: Mode::Auto,
            export: ExportConfig {
                title: "Doc".to_string(),
                stylesheet: Some(PathBuf::from("/nonexistent/style.css")),
            },
        };

        let result = config.export_options();

        assert!(matches!(
            result,
            Err(ConfigError::StylesheetReadError { .. })
        ));
    }
}
