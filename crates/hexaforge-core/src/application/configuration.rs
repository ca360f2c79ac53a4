//! Process-wide view of the remote configuration.
//!
//! The payload is fetched lazily on first use and cached for the lifetime of
//! the provider. A failed fetch is cached too: generation continues with empty
//! maps and a single warning.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use tracing::{debug, info, warn};

use crate::{
    application::ports::ConfigSource,
    domain::{Dependency, Importables, RemoteConfig},
};

pub struct ConfigurationProvider {
    source: Option<Box<dyn ConfigSource>>,
    cache: OnceLock<RemoteConfig>,
}

impl ConfigurationProvider {
    pub fn new(source: Box<dyn ConfigSource>) -> Self {
        Self {
            source: Some(source),
            cache: OnceLock::new(),
        }
    }

    /// Provider that never fetches and serves `config`.
    pub fn preloaded(config: RemoteConfig) -> Self {
        let cache = OnceLock::new();
        let _ = cache.set(config);
        Self {
            source: None,
            cache,
        }
    }

    /// Provider serving empty maps.
    pub fn offline() -> Self {
        Self::preloaded(RemoteConfig::default())
    }

    pub fn config(&self) -> &RemoteConfig {
        self.cache.get_or_init(|| self.load())
    }

    pub fn importables(&self) -> &Importables {
        &self.config().importables
    }

    pub fn databases(&self) -> &BTreeMap<String, Dependency> {
        &self.config().databases
    }

    pub fn version(&self, key: &str) -> Option<&str> {
        self.config().version(key)
    }

    /// Whether the payload has been resolved (successfully or not).
    pub fn is_loaded(&self) -> bool {
        self.cache.get().is_some()
    }

    fn load(&self) -> RemoteConfig {
        let Some(source) = &self.source else {
            debug!("No configuration source, using empty configuration");
            return RemoteConfig::default();
        };
        match source.fetch() {
            Ok(config) => {
                info!(
                    importables = config.importables.len(),
                    databases = config.databases.len(),
                    "Remote configuration loaded"
                );
                config
            }
            Err(e) => {
                warn!(error = %e, "Remote configuration unavailable, continuing without importables");
                RemoteConfig::default()
            }
        }
    }
}

impl std::fmt::Debug for ConfigurationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigurationProvider")
            .field("has_source", &self.source.is_some())
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
