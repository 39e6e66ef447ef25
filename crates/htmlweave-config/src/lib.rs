use htmlweave_engine::CodecOptions;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_DIR: &str = "~/.config/htmlweave";
const CONFIG_FILE: &str = "config.toml";

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

    #[error("Unknown log level '{level}' in {config_path}")]
    InvalidLogLevel { config_path: PathBuf, level: String },
}

/// Settings read from `~/.config/htmlweave/config.toml`.
///
/// ```toml
/// log_level = "debug"
///
/// [codec]
/// extra_block_tags = ["iframe"]
/// preformatted_tags = ["pre", "code"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`; `RUST_LOG` still wins
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    pub codec: CodecOptions,
}

impl Config {
    /// Load from `config_path` after tilde and variable expansion. A missing
    /// file is `Ok(None)`.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let requested = config_path.as_ref();
        let config_path = Self::expand_path(requested).unwrap_or_else(|| requested.to_path_buf());
        if !config_path.exists() {
            return Ok(None);
        }

        let config: Config = Self::read_toml(&config_path)?;
        let unknown_level = config
            .log_level
            .as_deref()
            .filter(|level| level.parse::<LevelFilter>().is_err());
        if let Some(level) = unknown_level {
            return Err(ConfigError::InvalidLogLevel {
                config_path,
                level: level.to_string(),
            });
        }
        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        Self::load_from_path(Self::config_path())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(config_path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to_path(Self::config_path())
    }

    pub fn config_path() -> PathBuf {
        PathBuf::from(shellexpand::tilde(CONFIG_DIR).as_ref()).join(CONFIG_FILE)
    }

    /// Level to hand to the logger, or `None` when the file leaves it unset.
    pub fn log_filter(&self) -> Option<LevelFilter> {
        self.log_level.as_deref().and_then(|level| level.parse().ok())
    }

    fn read_toml(config_path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(config_path).map_err(|source| ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            })?;
        toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
            config_path: config_path.to_path_buf(),
            source,
        })
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        shellexpand::full(&path.to_string_lossy())
            .ok()
            .map(|expanded| PathBuf::from(expanded.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::env;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn default_location_is_expanded() {
        let path = Config::config_path();
        assert!(!path.to_string_lossy().starts_with('~'));
        assert!(path.ends_with(".config/htmlweave/config.toml"));
    }

    #[test]
    fn empty_file_gives_default_codec_options() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from_path(write_config(&dir, ""))
            .unwrap()
            .unwrap();

        assert_eq!(config, Config::default());
        assert!(config.codec.ignore_inter_block_whitespace);
        assert_eq!(config.codec.preformatted_tags, vec!["pre".to_string()]);
        assert_eq!(config.log_filter(), None);
    }

    #[test]
    fn codec_section_extends_tag_sets() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
log_level = "debug"

[codec]
extra_block_tags = ["iframe"]
"#,
        );
        let config = Config::load_from_path(path).unwrap().unwrap();

        assert_eq!(config.log_filter(), Some(LevelFilter::Debug));
        assert!(config.codec.is_block_tag("iframe"));
        assert!(config.codec.is_preformatted("pre"));
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "log_level = \"chatty\"\n");

        let err = Config::load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogLevel { ref level, .. } if level == "chatty"));
    }

    #[test]
    fn config_path_may_use_env_vars() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "log_level = \"warn\"\n");
        unsafe {
            env::set_var("HTMLWEAVE_TEST_DIR", dir.path());
        }

        let config = Config::load_from_path("$HTMLWEAVE_TEST_DIR/config.toml").unwrap();

        unsafe {
            env::remove_var("HTMLWEAVE_TEST_DIR");
        }
        assert_eq!(config.and_then(|c| c.log_filter()), Some(LevelFilter::Warn));
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let result = Config::load_from_path(dir.path().join("nonexistent.toml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn broken_toml_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[codec\nbroken");

        let err = Config::load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigParseError { ref config_path, .. } if *config_path == path));
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/config.toml");
        let mut config = Config {
            log_level: Some("trace".into()),
            ..Config::default()
        };
        config.codec.extra_void_tags.push("x-embed".into());

        config.save_to_path(&path).unwrap();

        assert_eq!(Config::load_from_path(&path).unwrap(), Some(config));
    }
}
