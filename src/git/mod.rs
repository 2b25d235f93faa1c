//! Git operations abstraction layer
//!
//! The [Repository] trait covers everything a release run needs from git:
//! finding the latest release tag, listing the commits since it, and writing
//! the release commit and tag.
//!
//! - [repository::Git2Repository]: reads history with `git2` and writes
//!   through the system `git` binary
//! - [mock::MockRepository]: in-memory history that records writes, for tests
//!
//! ```no_run
//! # use release_me::domain::TagPrefix;
//! # use release_me::git::{Git2Repository, Repository};
//! # fn main() -> release_me::error::Result<()> {
//! let repo = Git2Repository::open(".")?;
//! let latest = repo.latest_tag(&TagPrefix::default())?;
//! let commits = repo.commits_since(latest.as_ref().map(|(name, _)| name.as_str()))?;
//! println!("{} commits to release", commits.len());
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::{GitCall, MockRepository};
pub use repository::Git2Repository;

use crate::boundary::BoundaryWarning;
use crate::domain::{SemanticVersion, TagPrefix};
use crate::error::Result;
use std::path::PathBuf;

/// Commit information for analysis
#[derive(Debug, Clone, PartialEq)]
pub struct CommitInfo {
    /// The full commit hash
    pub hash: String,
    /// The commit message
    pub message: String,
    /// The commit author
    pub author: String,
}

impl CommitInfo {
    pub fn new(hash: impl Into<String>, message: impl Into<String>) -> Self {
        CommitInfo {
            hash: hash.into(),
            message: message.into(),
            author: "unknown".to_string(),
        }
    }

    /// First seven characters of the hash
    pub fn short_hash(&self) -> &str {
        self.hash.get(..7).unwrap_or(&self.hash)
    }
}

/// Everything needed to create the release commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRequest {
    pub message: String,
    /// Files to commit; ignored when `commit_all` is set
    pub paths: Vec<PathBuf>,
    /// GPG-sign the commit (`-S`)
    pub sign: bool,
    /// Bypass commit hooks (`--no-verify`)
    pub no_verify: bool,
    /// Commit everything staged instead of only `paths`
    pub commit_all: bool,
}

/// Everything needed to create the annotated release tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRequest {
    pub name: String,
    pub message: String,
    /// Create a signed tag (`-s`) instead of an annotated one (`-a`)
    pub sign: bool,
}

/// Git operations used by a release run
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Read failures surface as
/// [crate::error::ReleaseError::Git]; a failing `git` command surfaces as
/// [crate::error::ReleaseError::Command].
///
/// ## Warnings
///
/// Write operations that succeed but print to stderr return a
/// [BoundaryWarning] for the caller to report.
pub trait Repository {
    /// Find the most recent release tag reachable from HEAD
    ///
    /// Only tags made of `prefix` followed by a semantic version count. When
    /// several such tags point at the same commit the highest version wins.
    ///
    /// # Returns
    /// * `Ok(Some((name, version)))` - The latest release tag
    /// * `Ok(None)` - No release tag, or no commits yet
    fn latest_tag(&self, prefix: &TagPrefix) -> Result<Option<(String, SemanticVersion)>>;

    /// Commits reachable from HEAD but not from `tag`, oldest first
    ///
    /// `None` lists the whole history.
    fn commits_since(&self, tag: Option<&str>) -> Result<Vec<CommitInfo>>;

    /// Name of the checked-out branch, `HEAD` when detached
    fn current_branch(&self) -> Result<String>;

    /// Stage the given paths
    fn add(&self, paths: &[PathBuf]) -> Result<Option<BoundaryWarning>>;

    /// Create the release commit
    fn commit(&self, request: &CommitRequest) -> Result<Option<BoundaryWarning>>;

    /// Create the release tag on HEAD
    fn tag(&self, request: &TagRequest) -> Result<Option<BoundaryWarning>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_hash() {
        let commit = CommitInfo::new("0123456789abcdef", "fix: typo");
        assert_eq!(commit.short_hash(), "0123456");
        assert_eq!(CommitInfo::new("abc", "x").short_hash(), "abc");
    }
}
