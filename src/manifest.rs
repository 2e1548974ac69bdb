//! Package manifest dependency extraction
//!
//! Reads `package.json` and reports the dependency names that matter at
//! runtime: `dependencies` followed by `peerDependencies`. Dev-only
//! dependencies are never reported.

use crate::types::{ConfigError, Result};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, warn};

/// Manifest file looked up at the working root
pub const MANIFEST_FILE_NAME: &str = "package.json";

const RUNTIME_SECTIONS: [&str; 2] = ["dependencies", "peerDependencies"];

/// A parsed `package.json`
#[derive(Debug, Clone, Default)]
pub struct PackageManifest {
    root: Map<String, Value>,
}

impl PackageManifest {
    pub fn parse(text: &str) -> Result<Self> {
        match serde_json::from_str::<Value>(text)? {
            Value::Object(root) => Ok(Self { root }),
            _ => Ok(Self::default()),
        }
    }

    /// Load a manifest, returning `Ok(None)` if the file does not exist
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.is_file() {
            debug!("No manifest at {}", path.display());
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
            .map(Some)
            .map_err(|e| ConfigError::MalformedDocument(path.to_path_buf(), e.to_string()))
    }

    /// Names declared under one section, in file order
    pub fn section(&self, name: &str) -> Vec<&str> {
        self.root
            .get(name)
            .and_then(Value::as_object)
            .map(|deps| deps.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Union of runtime and peer dependency names, first occurrence wins
    pub fn dependency_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for section in RUNTIME_SECTIONS {
            for name in self.section(section) {
                if !names.iter().any(|existing| existing == name) {
                    names.push(name.to_string());
                }
            }
        }
        names
    }
}

/// Dependency names from the manifest in `root`
///
/// A missing or unreadable manifest yields an empty list.
pub fn package_dependencies(root: &Path) -> Vec<String> {
    let path = root.join(MANIFEST_FILE_NAME);
    match PackageManifest::load(&path) {
        Ok(Some(manifest)) => manifest.dependency_names(),
        Ok(None) => Vec::new(),
        Err(e) => {
            warn!("Failed to read manifest {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_manifest(content: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE_NAME), content).unwrap();
        dir
    }

    #[test]
    fn test_only_dependencies() {
        let manifest =
            PackageManifest::parse(r#"{"dependencies": {"foo": "1.0.0", "bar": "2.0.0"}}"#)
                .unwrap();
        assert_eq!(manifest.dependency_names(), vec!["foo", "bar"]);
    }

    #[test]
    fn test_dependencies_and_peer_dependencies() {
        let manifest = PackageManifest::parse(
            r#"{"dependencies": {"foo": "1.0.0"}, "peerDependencies": {"bar": "2.0.0"}}"#,
        )
        .unwrap();
        assert_eq!(manifest.dependency_names(), vec!["foo", "bar"]);
    }

    #[test]
    fn test_dev_dependencies_left_out() {
        let manifest = PackageManifest::parse(
            r#"{"dependencies": {"foo": "1.0.0"}, "devDependencies": {"bar": "2.0.0"}}"#,
        )
        .unwrap();
        assert_eq!(manifest.dependency_names(), vec!["foo"]);
    }

    #[test]
    fn test_dev_duplicate_does_not_remove_name() {
        let manifest = PackageManifest::parse(
            r#"{
                "dependencies": {"foo": "1.0.0"},
                "peerDependencies": {"bar": "2.0.0"},
                "devDependencies": {"bar": "2.0.0", "baz": "3.0.0"}
            }"#,
        )
        .unwrap();
        assert_eq!(manifest.dependency_names(), vec!["foo", "bar"]);
    }

    #[test]
    fn test_duplicates_collapse_on_first_occurrence() {
        let manifest = PackageManifest::parse(
            r#"{"dependencies": {"zed": "1", "foo": "1"}, "peerDependencies": {"foo": "1", "abc": "1"}}"#,
        )
        .unwrap();
        assert_eq!(manifest.dependency_names(), vec!["zed", "foo", "abc"]);
    }

    #[test]
    fn test_non_object_sections_are_empty() {
        let manifest =
            PackageManifest::parse(r#"{"dependencies": ["foo"], "peerDependencies": {"bar": "1"}}"#)
                .unwrap();
        assert_eq!(manifest.dependency_names(), vec!["bar"]);
    }

    #[test]
    fn test_without_manifest() {
        let dir = TempDir::new().unwrap();
        assert!(package_dependencies(dir.path()).is_empty());
    }

    #[test]
    fn test_malformed_manifest() {
        let dir = write_manifest("{ \"dependencies\": ");
        assert!(package_dependencies(dir.path()).is_empty());
    }

    #[test]
    fn test_manifest_from_disk() {
        let dir = write_manifest(r#"{"name": "app", "dependencies": {"react": "^18.0.0"}}"#);
        assert_eq!(package_dependencies(dir.path()), vec!["react"]);
    }
}
