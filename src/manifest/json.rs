use crate::domain::SemanticVersion;
use crate::error::{ReleaseError, Result};
use crate::manifest::ManifestStore;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// npm style JSON manifest with a top-level `version` string
///
/// Key order is preserved. Files are written back with 2-space indentation
/// and a trailing newline.
#[derive(Debug, Clone)]
pub struct JsonManifest {
    path: PathBuf,
    full_path: PathBuf,
    document: Value,
}

impl JsonManifest {
    pub fn load(workdir: &Path, path: &Path) -> Result<Self> {
        let full_path = workdir.join(path);
        let content = fs::read_to_string(&full_path)?;
        let document: Value = serde_json::from_str(&content).map_err(|e| {
            ReleaseError::manifest(format!("cannot parse {}: {}", path.display(), e))
        })?;

        if !document.is_object() {
            return Err(ReleaseError::manifest(format!(
                "{} must contain a JSON object",
                path.display()
            )));
        }

        Ok(JsonManifest {
            path: path.to_path_buf(),
            full_path,
            document,
        })
    }

    /// `"private": true` keeps the package off the registry
    pub fn is_private(&self) -> bool {
        self.document
            .get("private")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

impl ManifestStore for JsonManifest {
    fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Option<SemanticVersion>> {
        match self.document.get("version") {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(version)) => SemanticVersion::parse(version).map(Some),
            Some(other) => Err(ReleaseError::manifest(format!(
                "{}: version must be a string, found {}",
                self.path.display(),
                other
            ))),
        }
    }

    fn write(&mut self, version: &SemanticVersion) -> Result<()> {
        if let Some(object) = self.document.as_object_mut() {
            object.insert("version".to_string(), Value::String(version.to_string()));
        }

        let mut content = serde_json::to_string_pretty(&self.document)?;
        content.push('\n');
        fs::write(&self.full_path, content)?;
        tracing::debug!(path = %self.full_path.display(), %version, "wrote manifest");
        Ok(())
    }

    fn publish_hint(&self) -> Option<&'static str> {
        (!self.is_private()).then_some("npm publish")
    }
}
