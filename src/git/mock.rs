use crate::boundary::BoundaryWarning;
use crate::domain::{SemanticVersion, TagPrefix};
use crate::error::{ReleaseError, Result};
use crate::git::{CommitInfo, CommitRequest, Repository, TagRequest};
use std::cell::RefCell;
use std::path::PathBuf;

/// A write operation recorded by [MockRepository]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitCall {
    Add(Vec<PathBuf>),
    Commit(CommitRequest),
    Tag(TagRequest),
}

/// Mock repository for testing without actual git operations
///
/// Commits are kept oldest first; each tag remembers how many commits existed
/// when it was added.
pub struct MockRepository {
    commits: Vec<CommitInfo>,
    tags: Vec<(String, usize)>,
    branch: String,
    fail_commit: bool,
    calls: RefCell<Vec<GitCall>>,
}

impl MockRepository {
    /// Create a new empty mock repository on `master`
    pub fn new() -> Self {
        MockRepository {
            commits: Vec::new(),
            tags: Vec::new(),
            branch: "master".to_string(),
            fail_commit: false,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Append a commit with the given message
    pub fn add_commit(&mut self, message: impl Into<String>) {
        let hash = format!("{:040x}", self.commits.len() + 1);
        self.commits.push(CommitInfo::new(hash, message));
    }

    /// Tag the newest commit
    pub fn add_tag(&mut self, name: impl Into<String>) {
        self.tags.push((name.into(), self.commits.len()));
    }

    pub fn set_branch(&mut self, branch: impl Into<String>) {
        self.branch = branch.into();
    }

    /// Make every `commit` call fail
    pub fn fail_commits(&mut self) {
        self.fail_commit = true;
    }

    /// Write operations performed so far
    pub fn calls(&self) -> Vec<GitCall> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: GitCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn latest_tag(&self, prefix: &TagPrefix) -> Result<Option<(String, SemanticVersion)>> {
        let latest = self
            .tags
            .iter()
            .filter_map(|(name, position)| {
                prefix
                    .parse(name)
                    .map(|version| (*position, name.clone(), version))
            })
            .max_by(|a, b| a.0.cmp(&b.0).then_with(|| a.2.cmp(&b.2)));

        Ok(latest.map(|(_, name, version)| (name, version)))
    }

    fn commits_since(&self, tag: Option<&str>) -> Result<Vec<CommitInfo>> {
        let start = match tag {
            Some(tag) => self
                .tags
                .iter()
                .find(|(name, _)| name == tag)
                .map(|(_, position)| *position)
                .ok_or_else(|| ReleaseError::command(format!("unknown tag: {}", tag)))?,
            None => 0,
        };

        Ok(self.commits[start..].to_vec())
    }

    fn current_branch(&self) -> Result<String> {
        Ok(self.branch.clone())
    }

    fn add(&self, paths: &[PathBuf]) -> Result<Option<BoundaryWarning>> {
        self.record(GitCall::Add(paths.to_vec()));
        Ok(None)
    }

    fn commit(&self, request: &CommitRequest) -> Result<Option<BoundaryWarning>> {
        if self.fail_commit {
            return Err(ReleaseError::command("git commit exited with code 1"));
        }
        self.record(GitCall::Commit(request.clone()));
        Ok(None)
    }

    fn tag(&self, request: &TagRequest) -> Result<Option<BoundaryWarning>> {
        self.record(GitCall::Tag(request.clone()));
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_repository_default() {
        let repo = MockRepository::default();
        assert_eq!(repo.latest_tag(&TagPrefix::default()).unwrap(), None);
        assert!(repo.commits_since(None).unwrap().is_empty());
        assert_eq!(repo.current_branch().unwrap(), "master");
    }

    #[test]
    fn test_commits_since_tag() {
        let mut repo = MockRepository::new();
        repo.add_commit("feat: first");
        repo.add_tag("v1.0.0");
        repo.add_commit("fix: second");
        repo.add_commit("feat: third");

        let commits = repo.commits_since(Some("v1.0.0")).unwrap();
        let messages: Vec<&str> = commits.iter().map(|c| c.message.as_str()).collect();
        assert_eq!(messages, vec!["fix: second", "feat: third"]);
        assert_eq!(repo.commits_since(None).unwrap().len(), 3);
        assert!(repo.commits_since(Some("v9.9.9")).is_err());
    }

    #[test]
    fn test_latest_tag_ignores_other_prefixes() {
        let mut repo = MockRepository::new();
        repo.add_commit("feat: first");
        repo.add_tag("v1.0.0");
        repo.add_commit("fix: second");
        repo.add_tag("nightly");
        repo.add_tag("v1.0.1");
        repo.add_tag("v1.0.1-rc.0");

        let (name, version) = repo.latest_tag(&TagPrefix::default()).unwrap().unwrap();
        assert_eq!(name, "v1.0.1");
        assert_eq!(version, SemanticVersion::new(1, 0, 1));
    }

    #[test]
    fn test_records_writes() {
        let repo = MockRepository::new();
        repo.add(&[PathBuf::from("package.json")]).unwrap();
        repo.tag(&TagRequest {
            name: "v1.0.0".to_string(),
            message: "chore(release): 1.0.0".to_string(),
            sign: false,
        })
        .unwrap();

        let calls = repo.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], GitCall::Add(vec![PathBuf::from("package.json")]));
        assert!(matches!(calls[1], GitCall::Tag(_)));
    }

    #[test]
    fn test_failing_commit() {
        let mut repo = MockRepository::new();
        repo.fail_commits();
        let request = CommitRequest {
            message: "m".to_string(),
            paths: vec![],
            sign: false,
            no_verify: false,
            commit_all: false,
        };
        assert!(repo.commit(&request).is_err());
        assert!(repo.calls().is_empty());
    }
}
