//! Version manifests
//!
//! A manifest is a project file carrying the package version:
//! - [json::JsonManifest]: `package.json`, `bower.json` and other JSON files
//! - [cargo::CargoManifest]: `Cargo.toml`, either `[package]` or `[workspace.package]`

pub mod cargo;
pub mod json;

pub use cargo::CargoManifest;
pub use json::JsonManifest;

use crate::boundary::BoundaryWarning;
use crate::domain::SemanticVersion;
use crate::error::{ReleaseError, Result};
use crate::ui::Reporter;
use std::path::{Path, PathBuf};

/// A file whose version field can be read and rewritten
pub trait ManifestStore {
    /// Path relative to the working directory, as configured
    fn path(&self) -> &Path;

    /// Version declared by the manifest, `None` when it has no version field
    fn read(&self) -> Result<Option<SemanticVersion>>;

    /// Set the version field and write the file back
    fn write(&mut self, version: &SemanticVersion) -> Result<()>;

    /// Command that publishes this package, `None` when marked private
    fn publish_hint(&self) -> Option<&'static str>;
}

/// Open the manifest at `workdir/path`, `None` if the file does not exist
pub fn open_manifest(workdir: &Path, path: &Path) -> Result<Option<Box<dyn ManifestStore>>> {
    let full = workdir.join(path);
    if !full.is_file() {
        return Ok(None);
    }

    let is_toml = path.extension().is_some_and(|ext| ext == "toml");
    let is_json = path.extension().is_some_and(|ext| ext == "json");

    if is_json {
        Ok(Some(Box::new(JsonManifest::load(workdir, path)?)))
    } else if is_toml {
        Ok(Some(Box::new(CargoManifest::load(workdir, path)?)))
    } else {
        Err(ReleaseError::manifest(format!(
            "unsupported manifest format: {}",
            path.display()
        )))
    }
}

/// Open every configured manifest that exists, in configuration order
pub fn load_manifests(workdir: &Path, paths: &[PathBuf]) -> Result<Vec<Box<dyn ManifestStore>>> {
    let mut manifests = Vec::new();
    for path in paths {
        if let Some(manifest) = open_manifest(workdir, path)? {
            tracing::debug!(path = %path.display(), "found manifest");
            manifests.push(manifest);
        }
    }
    Ok(manifests)
}

/// Version of the first manifest that declares one
pub fn current_version(manifests: &[Box<dyn ManifestStore>]) -> Result<Option<SemanticVersion>> {
    for manifest in manifests {
        if let Some(version) = manifest.read()? {
            return Ok(Some(version));
        }
    }
    Ok(None)
}

/// Set `version` in every manifest that declares a version
///
/// Manifests without a version field are reported and left untouched. During
/// a dry run nothing is written.
///
/// # Returns
/// The paths of the manifests that were (or would have been) updated
pub fn update_manifests(
    manifests: &mut [Box<dyn ManifestStore>],
    version: &SemanticVersion,
    reporter: &Reporter,
) -> Result<Vec<PathBuf>> {
    let mut updated = Vec::new();
    let new_version = version.to_string();

    for manifest in manifests.iter_mut() {
        let path = manifest.path().to_path_buf();
        let Some(previous) = manifest.read()? else {
            reporter.warn(&BoundaryWarning::ManifestWithoutVersion { path });
            continue;
        };

        if !reporter.is_dry_run() {
            manifest.write(version)?;
        }

        let display = path.display().to_string();
        reporter.checkpoint(
            "bumping version in %s from %s to %s",
            &[&display, &previous.to_string(), &new_version],
        );
        updated.push(path);
    }

    Ok(updated)
}
