//! Project manifest I/O.
//!
//! Every materialized project gets an `ovo.json` manifest at its root,
//! recording the project name and the template it was created from. The
//! build-side commands (`ovo build`, `ovo run`, `ovo test`) locate and read
//! this file to decide how to drive the native toolchain.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{OvoError, Result};

/// Manifest file name at the project root.
pub const MANIFEST_FILE: &str = "ovo.json";

/// The `ovo.json` contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectManifest {
    pub name: String,
    /// Built-in template kind or the path the project was scaffolded from.
    pub template: String,
    pub version: String,
}

impl ProjectManifest {
    pub fn new(name: &str, template: &str) -> Self {
        Self {
            name: name.to_string(),
            template: template.to_string(),
            version: "0.1.0".to_string(),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(anyhow::Error::from)?;
        std::fs::write(path, json + "\n")?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| OvoError::ManifestNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| OvoError::ManifestParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MANIFEST_FILE);

        let manifest = ProjectManifest::new("my_app", "cpp-lib");
        manifest.save(&path).unwrap();

        let loaded = ProjectManifest::load(&path).unwrap();
        assert_eq!(loaded.name, "my_app");
        assert_eq!(loaded.template, "cpp-lib");
        assert_eq!(loaded.version, "0.1.0");
    }

    #[test]
    fn test_load_missing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let err = ProjectManifest::load(&dir.path().join(MANIFEST_FILE)).unwrap_err();
        assert!(matches!(err, OvoError::ManifestNotFound { .. }));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MANIFEST_FILE);
        std::fs::write(&path, "{not json").unwrap();
        let err = ProjectManifest::load(&path).unwrap_err();
        assert!(matches!(err, OvoError::ManifestParse { .. }));
    }
}
