use std::fmt;
use std::path::PathBuf;

/// Warnings raised at the edges of a release run.
/// These are non-fatal issues that should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No new commits since the latest release tag
    NoNewCommits { latest_tag: String },
    /// No release tag reachable from HEAD; all history is analyzed
    NoReleaseTag { tag_prefix: String },
    /// No manifest carries a version; the latest tag's version is used instead
    VersionFromTag { tag: String },
    /// A configured manifest exists but has no version field
    ManifestWithoutVersion { path: PathBuf },
    /// A lifecycle script or git command wrote to stderr but succeeded
    CommandStderr { command: String, stderr: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoNewCommits { latest_tag } => {
                write!(f, "No new commits since tag '{}'", latest_tag)
            }
            BoundaryWarning::NoReleaseTag { tag_prefix } => {
                write!(
                    f,
                    "No release tag matching '{}<version>' found, analyzing all commits",
                    tag_prefix
                )
            }
            BoundaryWarning::VersionFromTag { tag } => {
                write!(
                    f,
                    "No manifest declares a version, using tag '{}' as the current version",
                    tag
                )
            }
            BoundaryWarning::ManifestWithoutVersion { path } => {
                write!(f, "Manifest '{}' has no version field", path.display())
            }
            BoundaryWarning::CommandStderr { command, stderr } => {
                write!(f, "'{}' reported: {}", command, stderr.trim())
            }
        }
    }
}
