use std::{env, fmt, fs, path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    ReadFailed { path: path::PathBuf, source: std::io::Error },

    #[error("Failed to write config {path}: {source}")]
    WriteFailed { path: path::PathBuf, source: std::io::Error },

    #[error("Failed to parse config {path}: {source}")]
    ParseFailed { path: path::PathBuf, source: toml::de::Error },

    #[error("Failed to serialize config: {0}")]
    SerializeFailed(#[from] toml::ser::Error),

    #[error("No config directory: neither XDG_CONFIG_HOME nor HOME is set")]
    ConfigPathUnavailable,

    #[error("No home directory to place the endpoint list in")]
    DataPathUnavailable,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub probe: Probe,
    pub storage: Storage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Probe {
    /// Per-endpoint budget in milliseconds
    pub timeout_ms: u64,
    /// Upper bound on probes in flight, unbounded when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_concurrency: Option<usize>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Storage {
    /// Endpoint list location, `~/.upcheck.json` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<path::PathBuf>,
}

impl Default for Probe {
    fn default() -> Self {
        Self { timeout_ms: upcheck::DEFAULT_TIMEOUT_MS, max_concurrency: None }
    }
}

/// Used to ensure we are actually reading a toml file
fn normalize_toml_path(path: &path::Path) -> path::PathBuf {
    let mut path = path.to_path_buf();
    if path.extension().map(|ext| ext != "toml").unwrap_or(true) {
        path.set_extension("toml");
    }
    path
}

/// Get default config path ($XDG_CONFIG_HOME/upcheck/config.toml or
/// $HOME/.config/...)
fn default_config_path() -> Result<path::PathBuf, ConfigError> {
    let path = if let Ok(config_home) = env::var("XDG_CONFIG_HOME") {
        path::PathBuf::from(config_home)
    } else if let Some(home_dir) = env::home_dir() {
        home_dir.join(".config")
    } else {
        return Err(ConfigError::ConfigPathUnavailable);
    };

    Ok(path.join("upcheck/config.toml"))
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let write_indented = |level: usize| {
            move |f: &mut fmt::Formatter<'_>, label: &str, value: &dyn fmt::Display| {
                writeln!(f, "  {:indent$}{}: {}", "", label, value, indent = level * 2)
            }
        };
        let write_title_indented = |level: usize| {
            move |f: &mut fmt::Formatter<'_>, label: &str| {
                writeln!(f, "{:indent$}{}", "", label, indent = level * 2)
            }
        };

        let write_title_1 = write_title_indented(1);
        let write_1 = write_indented(1);

        writeln!(f, "Current Configuration:")?;
        write_title_1(f, "Probe")?;
        write_1(f, "Timeout (ms)", &self.probe.timeout_ms)?;
        match self.probe.max_concurrency {
            Some(limit) => write_1(f, "Max Concurrency", &limit)?,
            None => write_1(f, "Max Concurrency", &"unbounded")?,
        }
        write_title_1(f, "Storage")?;
        match self.data_file() {
            Ok(data_file) => write_1(f, "Data File", &data_file.display())?,
            Err(error) => write_1(f, "Data File", &error)?,
        }

        Ok(())
    }
}

impl Config {
    /// Generate Config structure from file
    ///
    /// Creates a default config in ~/.config/upcheck/config.toml
    ///  or the specified path, with the name config.toml if one does not exist
    ///
    /// ```ignore
    /// let cfg = config::Config::from_config(None::<&path::Path>)?;
    /// println!("{}", cfg);
    /// ```
    pub fn from_config(optional_path: Option<impl AsRef<path::Path>>) -> Result<Self, ConfigError> {
        let config_path: path::PathBuf = if let Some(path) = optional_path {
            normalize_toml_path(path.as_ref())
        } else {
            default_config_path()?
        };

        if config_path.exists() {
            let raw_string = fs::read_to_string(&config_path)
                .map_err(|source| ConfigError::ReadFailed { path: config_path.clone(), source })?;
            toml::from_str(raw_string.as_str())
                .map_err(|source| ConfigError::ParseFailed { path: config_path, source })
        } else {
            tracing::info!(path = %config_path.display(), "Writing default config");
            let config = Self::default();
            config.write_config(&config_path)?;
            Ok(config)
        }
    }

    /// Serialize and write a config to a file
    pub fn write_config(&self, path: &path::Path) -> Result<(), ConfigError> {
        let config_str: String = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|source| ConfigError::WriteFailed { path: path.to_path_buf(), source })?;
        }

        fs::write(path, config_str)
            .map_err(|source| ConfigError::WriteFailed { path: path.to_path_buf(), source })
    }

    /// Resolved endpoint list location
    pub fn data_file(&self) -> Result<path::PathBuf, ConfigError> {
        match &self.storage.data_file {
            Some(path) => Ok(path.clone()),
            None => env::home_dir()
                .map(|home| home.join(".upcheck.json"))
                .ok_or(ConfigError::DataPathUnavailable),
        }
    }
}
