//! Configuration payload read from a local JSON file.

use std::path::{Path, PathBuf};

use hexaforge_core::{
    application::{ApplicationError, ports::ConfigSource},
    domain::RemoteConfig,
    error::HexaforgeResult,
};
use tracing::instrument;

#[derive(Debug, Clone)]
pub struct FileConfigSource {
    path: PathBuf,
}

impl FileConfigSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigSource for FileConfigSource {
    #[instrument(skip_all, fields(path = %self.path.display()))]
    fn fetch(&self) -> HexaforgeResult<RemoteConfig> {
        let raw = std::fs::read_to_string(&self.path).map_err(|e| ApplicationError::Configuration {
            reason: format!("cannot read {}: {e}", self.path.display()),
        })?;
        let config = serde_json::from_str(&raw).map_err(|e| ApplicationError::Configuration {
            reason: format!("invalid configuration in {}: {e}", self.path.display()),
        })?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_importables_and_databases() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{
                "importables": {"LocalDate": "java.time.LocalDate"},
                "databases": {"h2": {"groupId": "com.h2database", "artifactId": "h2", "scope": "runtime"}},
                "versions": {"spring-boot": "3.2.0"}
            }"#,
        )
        .unwrap();

        let config = FileConfigSource::new(&path).fetch().unwrap();
        assert_eq!(config.importables.resolve("LocalDate"), Some("java.time.LocalDate"));
        assert_eq!(config.databases["h2"].artifact_id, "h2");
        assert_eq!(config.version("spring-boot"), Some("3.2.0"));
    }

    #[test]
    fn missing_file_fails() {
        assert!(FileConfigSource::new("/definitely/not/here.json").fetch().is_err());
    }
}
