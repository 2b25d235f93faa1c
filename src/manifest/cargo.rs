use crate::domain::SemanticVersion;
use crate::error::{ReleaseError, Result};
use crate::manifest::ManifestStore;
use std::fs;
use std::path::{Path, PathBuf};
use toml_edit::{DocumentMut, Item, Value};

/// `Cargo.toml` manifest
///
/// The version lives in `[package]`, or in `[workspace.package]` for
/// workspaces with an inherited version. Comments and layout survive a rewrite.
#[derive(Debug, Clone)]
pub struct CargoManifest {
    path: PathBuf,
    full_path: PathBuf,
    document: DocumentMut,
}

impl CargoManifest {
    pub fn load(workdir: &Path, path: &Path) -> Result<Self> {
        let full_path = workdir.join(path);
        let content = fs::read_to_string(&full_path)?;
        let document = content.parse::<DocumentMut>().map_err(|e| {
            ReleaseError::manifest(format!("cannot parse {}: {}", path.display(), e))
        })?;

        Ok(CargoManifest {
            path: path.to_path_buf(),
            full_path,
            document,
        })
    }

    fn version_item(&self) -> Option<&Item> {
        let package = self
            .document
            .get("package")
            .and_then(|p| p.get("version"))
            .filter(|v| v.is_str());

        package.or_else(|| {
            self.document
                .get("workspace")
                .and_then(|w| w.get("package"))
                .and_then(|p| p.get("version"))
        })
    }

    fn version_item_mut(&mut self) -> Option<&mut Item> {
        let in_package = self
            .document
            .get("package")
            .and_then(|p| p.get("version"))
            .is_some_and(Item::is_str);

        if in_package {
            self.document
                .get_mut("package")
                .and_then(|p| p.get_mut("version"))
        } else {
            self.document
                .get_mut("workspace")
                .and_then(|w| w.get_mut("package"))
                .and_then(|p| p.get_mut("version"))
        }
    }

    /// `publish = false` (or an empty registry list) keeps the crate off crates.io
    pub fn is_private(&self) -> bool {
        match self.document.get("package").and_then(|p| p.get("publish")) {
            Some(Item::Value(Value::Boolean(publish))) => !*publish.value(),
            Some(Item::Value(Value::Array(registries))) => registries.is_empty(),
            _ => false,
        }
    }
}

impl ManifestStore for CargoManifest {
    fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Option<SemanticVersion>> {
        match self.version_item() {
            None => Ok(None),
            Some(item) => match item.as_str() {
                Some(version) => SemanticVersion::parse(version).map(Some),
                None => Err(ReleaseError::manifest(format!(
                    "{}: version must be a string",
                    self.path.display()
                ))),
            },
        }
    }

    fn write(&mut self, version: &SemanticVersion) -> Result<()> {
        let path = self.path.display().to_string();
        let item = self
            .version_item_mut()
            .ok_or_else(|| ReleaseError::manifest(format!("{}: no version field", path)))?;

        let decor = item.as_value().map(|v| v.decor().clone());
        *item = toml_edit::value(version.to_string());
        if let (Some(decor), Some(value)) = (decor, item.as_value_mut()) {
            *value.decor_mut() = decor;
        }

        fs::write(&self.full_path, self.document.to_string())?;
        tracing::debug!(path = %self.full_path.display(), %version, "wrote manifest");
        Ok(())
    }

    fn publish_hint(&self) -> Option<&'static str> {
        (!self.is_private()).then_some("cargo publish")
    }
}
