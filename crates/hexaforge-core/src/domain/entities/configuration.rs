use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{entities::pom::Dependency, text::type_tokens};

/// Payload served by the configuration provider.
///
/// Every map is optional in the JSON; a missing key reads as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default)]
    pub importables: Importables,
    #[serde(default)]
    pub databases: BTreeMap<String, Dependency>,
    #[serde(default)]
    pub versions: BTreeMap<String, String>,
}

impl RemoteConfig {
    pub fn version(&self, key: &str) -> Option<&str> {
        self.versions.get(key).map(String::as_str)
    }
}

/// Short type name → fully qualified name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Importables(BTreeMap<String, String>);

impl Importables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, short: impl Into<String>, qualified: impl Into<String>) -> Self {
        self.0.insert(short.into(), qualified.into());
        self
    }

    pub fn resolve(&self, short: &str) -> Option<&str> {
        self.0.get(short).map(String::as_str)
    }

    /// Imports required by every known identifier inside `ty`.
    ///
    /// `Map<String, List<Order>>` yields the qualified names of whichever of
    /// `Map`, `String`, `List` and `Order` are known.
    pub fn imports_for(&self, ty: &str) -> Vec<String> {
        type_tokens(ty)
            .into_iter()
            .filter_map(|token| self.resolve(token))
            .map(str::to_string)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for Importables {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_payload_defaults_missing_maps() {
        let config: RemoteConfig =
            serde_json::from_str(r#"{"importables":{"List":"java.util.List"}}"#).unwrap();
        assert_eq!(config.importables.len(), 1);
        assert!(config.databases.is_empty());
        assert!(config.version("spring-boot").is_none());
    }

    #[test]
    fn databases_deserialize_as_dependencies() {
        let config: RemoteConfig = serde_json::from_str(
            r#"{"databases":{"postgres":{"groupId":"org.postgresql","artifactId":"postgresql","scope":"runtime"}},
                "versions":{"spring-boot":"3.2.0"}}"#,
        )
        .unwrap();
        assert_eq!(
            config.databases["postgres"].coordinates(),
            "org.postgresql:postgresql"
        );
        assert_eq!(config.version("spring-boot"), Some("3.2.0"));
    }

    #[test]
    fn imports_cover_generic_arguments() {
        let importables = Importables::new()
            .with("List", "java.util.List")
            .with("LocalDate", "java.time.LocalDate");
        assert_eq!(
            importables.imports_for("List<LocalDate>"),
            vec!["java.util.List", "java.time.LocalDate"]
        );
        assert!(importables.imports_for("String").is_empty());
    }
}
