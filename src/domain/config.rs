use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{margin::AlertThresholds, task::DEFAULT_COMPONENT};

/// Configuration for maintenance tracking.
///
/// Controls the alert windows used to classify tasks as "Due Soon", the
/// component tasks fall back to when they name none, and how strictly the
/// store treats unreadable records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Component assumed for tasks without an associated component.
    default_component: String,

    /// Remaining margins below which a task is "Due Soon".
    pub thresholds: AlertThresholds,

    /// Whether unreadable or unparseable record files abort loading.
    ///
    /// When `false` (default) such files are skipped and reported.
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_component: default_component(),
            thresholds: AlertThresholds::default(),
            strict: false,
        }
    }
}

/// Errors reading or writing a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read or written.
    #[error("failed to access config file {}: {source}", .path.display())]
    Io {
        /// The config file.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },

    /// The file is not valid configuration TOML.
    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        /// The config file.
        path: PathBuf,
        /// The underlying error.
        source: toml::de::Error,
    },

    /// The configuration could not be rendered as TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The component assumed for tasks that name none.
    #[must_use]
    pub fn default_component(&self) -> &str {
        &self.default_component
    }

    /// Sets the default component.
    ///
    /// The name is trimmed. Blank names reset it to "Airframe".
    pub fn set_default_component(&mut self, name: &str) {
        let name = name.trim();
        self.default_component = if name.is_empty() {
            default_component()
        } else {
            name.to_string()
        };
    }
}

fn default_component() -> String {
    DEFAULT_COMPONENT.to_string()
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_component")]
        default_component: String,

        #[serde(default)]
        strict: bool,

        #[serde(default)]
        thresholds: AlertThresholds,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                default_component,
                strict,
                thresholds,
            } => {
                let mut config = Self {
                    default_component: String::new(),
                    thresholds,
                    strict,
                };
                config.set_default_component(&default_component);
                config
            }
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            default_component: config.default_component,
            strict: config.strict,
            thresholds: config.thresholds,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"_version = \"1\"\ndefault_component = \"Hull\"\nstrict = true\n\n[thresholds]\ndays = 45\nhours = 10.0\ncycles = 20\n",
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.default_component(), "Hull");
        assert!(config.strict);
        assert_eq!(
            config.thresholds,
            AlertThresholds {
                days: 45,
                hours: 10.0,
                cycles: 20,
            }
        );
    }

    #[test]
    fn partial_thresholds_keep_defaults() {
        let config: Config = toml::from_str("_version = \"1\"\n[thresholds]\ndays = 60\n").unwrap();
        assert_eq!(config.thresholds.days, 60);
        assert_eq!(config.thresholds.cycles, AlertThresholds::default().cycles);
    }

    #[test]
    fn blank_default_component_falls_back() {
        let config: Config =
            toml::from_str("_version = \"1\"\ndefault_component = \"  \"\n").unwrap();
        assert_eq!(config.default_component(), "Airframe");
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(matches!(error, ConfigError::Io { .. }));
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nstrict = \"very\"\n").unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(matches!(error, ConfigError::Parse { .. }));
    }

    #[test]
    fn empty_file_returns_default() {
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn save_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");

        let mut config = Config::default();
        config.thresholds.days = 14;
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }
}
