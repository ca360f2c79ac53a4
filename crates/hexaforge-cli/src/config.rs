//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `HEXAFORGE_REMOTE__CONFIG_URL`, ...
//! 3. Config file: `--config <FILE>`, else the platform default location
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use hexaforge_adapters::{FileConfigSource, HttpConfigSource};
use hexaforge_core::application::ConfigurationProvider;

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where the remote configuration payload comes from.
    pub remote: RemoteSettings,
    /// Default values for new projects.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteSettings {
    /// URL serving the configuration JSON.
    pub config_url: Option<String>,
    pub timeout_secs: u64,
    /// Local JSON file used instead of `config_url`.
    pub config_file: Option<PathBuf>,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            config_url: None,
            timeout_secs: 10,
            config_file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Defaults {
    pub group_id: String,
    pub archetype: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            group_id: "com.example".into(),
            archetype: "HEXA".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration, starting from defaults.
    ///
    /// An explicit `config_file` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let file = match config_file {
            Some(path) => File::from(path.as_path()).required(true),
            None => File::from(Self::config_path()).required(false),
        };

        Config::builder()
            .add_source(Config::try_from(&Self::default()).context("encoding defaults")?)
            .add_source(file)
            .add_source(
                Environment::with_prefix("HEXAFORGE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("reading configuration sources")?
            .try_deserialize()
            .context("invalid configuration")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.hexaforge.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "hexaforge", "hexaforge")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".hexaforge.toml"))
    }

    /// Drop both remote sources so generation runs offline.
    pub fn without_remote(mut self) -> Self {
        self.remote.config_url = None;
        self.remote.config_file = None;
        self
    }

    /// Provider over the configured source: a local file wins over a URL;
    /// with neither, generation runs offline with empty importables.
    pub fn configuration_provider(&self) -> ConfigurationProvider {
        match (&self.remote.config_file, &self.remote.config_url) {
            (Some(path), _) => ConfigurationProvider::new(Box::new(FileConfigSource::new(
                resolve(path),
            ))),
            (None, Some(url)) => ConfigurationProvider::new(Box::new(
                HttpConfigSource::new(url)
                    .timeout(Duration::from_secs(self.remote.timeout_secs)),
            )),
            (None, None) => ConfigurationProvider::offline(),
        }
    }
}

fn resolve(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
