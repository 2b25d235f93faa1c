//! Main release workflow
//!
//! Separates CLI argument parsing from the release logic so the workflow can
//! be driven programmatically, with any [`Repository`] implementation.

use chrono::Local;
use std::path::{Path, PathBuf};

use crate::analyzer::VersionAnalyzer;
use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::{ReleaseRequest, SemanticVersion, TagPrefix};
use crate::error::{ReleaseError, Result};
use crate::git::Repository;
use crate::hooks::HookType;
use crate::lifecycle::{Lifecycle, Release};
use crate::manifest;
use crate::resolver::{self, Resolution};
use crate::ui::Reporter;

/// Arguments for one release run
///
/// `config` already carries the command-line overrides.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReleaseArgs {
    /// Exact version or release type to use instead of commit analysis
    pub release_as: Option<String>,

    /// Pre-release channel; `Some("")` selects numeric-only identifiers
    pub prerelease: Option<String>,

    /// Keep the current version and only write the changelog, commit and tag
    pub first_release: bool,

    /// Report what would happen without writing files or running git
    pub dry_run: bool,

    pub config: Config,
}

/// Result of a successful release run
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseOutcome {
    pub previous: SemanticVersion,
    pub version: SemanticVersion,
    pub resolution: Resolution,
    /// Manifests whose version field was rewritten
    pub updated_manifests: Vec<PathBuf>,
    /// Whether the release commit was made
    pub committed: bool,
    /// The release tag, `None` when tagging was skipped
    pub tag: Option<String>,
}

/// Main release workflow
///
/// Runs the stages in order:
/// 1. `prebump` script, whose output replaces `release_as`
/// 2. Read the current version from the manifests (or the latest tag)
/// 3. Analyze commits since the latest tag and resolve the next version
/// 4. Bump manifests (not on a first release)
/// 5. Prepend the changelog
/// 6. Commit, with the `precommit` script's output as the message when it prints one
/// 7. Tag with the same message
///
/// The next version is resolved before any file is touched; the first failing
/// stage aborts the rest.
pub fn run_release<R: Repository>(
    repo: &R,
    workdir: &Path,
    args: &ReleaseArgs,
    reporter: &Reporter,
) -> Result<ReleaseOutcome> {
    let config = &args.config;
    let lifecycle = Lifecycle::new(repo, workdir, config, reporter);
    let prefix = TagPrefix::new(config.tag_prefix.clone());

    let mut release_as = args.release_as.clone();
    if !config.skip.bump {
        if let Some(output) = lifecycle.run_script(HookType::Prebump, None)? {
            tracing::debug!(%output, "prebump script overrides release-as");
            release_as = Some(output);
        }
    }

    let mut manifests = manifest::load_manifests(workdir, &config.manifests)?;
    let latest_tag = repo.latest_tag(&prefix)?;
    if latest_tag.is_none() {
        reporter.warn(&BoundaryWarning::NoReleaseTag {
            tag_prefix: config.tag_prefix.clone(),
        });
    }

    let current = match (manifest::current_version(&manifests)?, &latest_tag) {
        (Some(version), _) => version,
        (None, Some((tag, version))) => {
            reporter.warn(&BoundaryWarning::VersionFromTag { tag: tag.clone() });
            version.clone()
        }
        (None, None) => {
            return Err(ReleaseError::release(format!(
                "no current version: none of {} declares one and no release tag exists",
                display_paths(&config.manifests)
            )))
        }
    };

    let latest_name = latest_tag.as_ref().map(|(name, _)| name.as_str());
    let commits = repo.commits_since(latest_name)?;
    if commits.is_empty() {
        if let Some(tag) = latest_name {
            reporter.warn(&BoundaryWarning::NoNewCommits {
                latest_tag: tag.to_string(),
            });
        }
    }

    let mut request = ReleaseRequest::new().with_first_release(args.first_release);
    if let Some(release_as) = release_as.as_deref() {
        request = request.with_release_as(release_as)?;
    }
    if let Some(channel) = &args.prerelease {
        request = request.with_channel(channel.clone())?;
    }
    if request.needs_inference() {
        let analyzer = VersionAnalyzer::new(config.conventional_commits.clone());
        request = request.with_inferred(analyzer.analyze_commits(&commits));
    }

    let resolution = resolver::resolve(&request, &current)?;
    tracing::debug!(%current, %resolution, "resolved next version");

    let release = Release {
        previous: current.clone(),
        version: resolution.version().clone(),
        tag: prefix.format(resolution.version()),
    };

    let first_release = matches!(resolution, Resolution::FirstRelease(_));
    let updated_manifests = lifecycle.bump(&mut manifests, &release, first_release)?;
    lifecycle.changelog(&release, &commits, Local::now().date_naive())?;
    let message = lifecycle.message(&release)?;
    let committed = lifecycle.commit(&release, &updated_manifests, &message)?;

    let publish_hints: Vec<&str> = manifests
        .iter()
        .filter(|m| updated_manifests.iter().any(|p| p == m.path()))
        .filter_map(|m| m.publish_hint())
        .fold(Vec::new(), |mut hints, hint| {
            if !hints.contains(&hint) {
                hints.push(hint);
            }
            hints
        });
    let tag = lifecycle.tag(&release, &publish_hints, &message)?;

    Ok(ReleaseOutcome {
        previous: current,
        version: release.version,
        resolution,
        updated_manifests,
        committed,
        tag,
    })
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::{GitCall, MockRepository};
    use std::fs;
    use tempfile::TempDir;

    fn project(version: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("package.json"),
            format!("{{\"name\": \"demo\", \"version\": \"{}\"}}", version),
        )
        .unwrap();
        dir
    }

    fn silent() -> Reporter {
        Reporter::new(true, false)
    }

    #[test]
    fn test_minor_release_from_feature() {
        let dir = project("1.0.0");
        let mut repo = MockRepository::new();
        repo.add_commit("feat: initial");
        repo.add_tag("v1.0.0");
        repo.add_commit("feat: add widgets");

        let outcome = run_release(&repo, dir.path(), &ReleaseArgs::default(), &silent()).unwrap();

        assert_eq!(outcome.version.to_string(), "1.1.0");
        assert_eq!(outcome.updated_manifests, vec![PathBuf::from("package.json")]);
        assert!(outcome.committed);
        assert_eq!(outcome.tag.as_deref(), Some("v1.1.0"));
        assert_eq!(repo.calls().len(), 3);
    }

    #[test]
    fn test_missing_version_is_an_error() {
        let dir = TempDir::new().unwrap();
        let repo = MockRepository::new();

        let err = run_release(&repo, dir.path(), &ReleaseArgs::default(), &silent()).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(repo.calls().is_empty());
    }

    #[test]
    fn test_version_from_tag_without_manifest() {
        let dir = TempDir::new().unwrap();
        let mut repo = MockRepository::new();
        repo.add_commit("feat: initial");
        repo.add_tag("v0.2.0");
        repo.add_commit("fix: crash");

        let outcome = run_release(&repo, dir.path(), &ReleaseArgs::default(), &silent()).unwrap();
        assert_eq!(outcome.previous.to_string(), "0.2.0");
        assert_eq!(outcome.version.to_string(), "0.2.1");
        assert!(outcome.updated_manifests.is_empty());
    }

    #[test]
    fn test_invalid_release_as_touches_nothing() {
        let dir = project("1.0.0");
        let repo = MockRepository::new();
        let args = ReleaseArgs {
            release_as: Some("banana".to_string()),
            ..ReleaseArgs::default()
        };

        assert!(run_release(&repo, dir.path(), &args, &silent()).is_err());
        assert!(!dir.path().join("CHANGELOG.md").exists());
        assert!(repo.calls().is_empty());
    }

    #[test]
    fn test_publish_hint_skips_private_packages() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("package.json"),
            "{\"version\": \"1.0.0\", \"private\": true}",
        )
        .unwrap();
        let repo = MockRepository::new();

        let outcome = run_release(&repo, dir.path(), &ReleaseArgs::default(), &silent()).unwrap();
        assert_eq!(outcome.version.to_string(), "1.0.1");
        assert!(matches!(repo.calls().last(), Some(GitCall::Tag(_))));
    }
}
