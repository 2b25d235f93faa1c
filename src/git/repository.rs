use crate::boundary::BoundaryWarning;
use crate::domain::{SemanticVersion, TagPrefix};
use crate::error::{ReleaseError, Result};
use crate::git::{CommitInfo, CommitRequest, TagRequest};
use git2::{ErrorCode, Oid, Repository as Git2Repo, Sort};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Wrapper around git2::Repository with our trait interface
///
/// History is read through libgit2. Commits and tags are written by the
/// system `git` binary so signing and commit hooks behave as on the command line.
pub struct Git2Repository {
    repo: Git2Repo,
    workdir: PathBuf,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;
        Ok(Self::from_git2(repo))
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        let workdir = repo
            .workdir()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| repo.path().to_path_buf());
        Git2Repository { repo, workdir }
    }

    /// Working tree the `git` commands run in
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn head_oid(&self) -> Result<Option<Oid>> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_commit()?.id())),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Release tags grouped by the commit they point at
    fn release_tags(&self, prefix: &TagPrefix) -> Result<HashMap<Oid, Vec<(String, SemanticVersion)>>> {
        let mut by_commit: HashMap<Oid, Vec<(String, SemanticVersion)>> = HashMap::new();
        let names = self.repo.tag_names(None)?;

        for name in names.iter().flatten() {
            let Some(version) = prefix.parse(name) else {
                continue;
            };
            let reference = self.repo.find_reference(&format!("refs/tags/{}", name))?;
            let commit = match reference.peel_to_commit() {
                Ok(commit) => commit,
                // Tags on trees or blobs are not releases
                Err(_) => continue,
            };
            by_commit
                .entry(commit.id())
                .or_default()
                .push((name.to_string(), version));
        }

        Ok(by_commit)
    }

    fn run_git(&self, args: &[String]) -> Result<Option<BoundaryWarning>> {
        let command_line = format!("git {}", args.join(" "));
        tracing::debug!(%command_line, workdir = %self.workdir.display(), "running git");

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .map_err(|e| ReleaseError::command(format!("cannot run git: {}", e)))?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if !output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            return Err(ReleaseError::command(format!(
                "{} exited with code {}\n{}{}",
                command_line,
                output.status.code().unwrap_or(-1),
                stdout,
                stderr
            )));
        }

        Ok((!stderr.is_empty()).then(|| BoundaryWarning::CommandStderr {
            command: command_line,
            stderr,
        }))
    }
}

impl super::Repository for Git2Repository {
    fn latest_tag(&self, prefix: &TagPrefix) -> Result<Option<(String, SemanticVersion)>> {
        let Some(head) = self.head_oid()? else {
            return Ok(None);
        };

        let mut by_commit = self.release_tags(prefix)?;
        if by_commit.is_empty() {
            return Ok(None);
        }

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(head)?;

        for oid in revwalk {
            if let Some(tags) = by_commit.remove(&oid?) {
                let latest = tags.into_iter().max_by(|a, b| a.1.cmp(&b.1));
                tracing::debug!(tag = ?latest.as_ref().map(|(name, _)| name), "latest release tag");
                return Ok(latest);
            }
        }

        Ok(None)
    }

    fn commits_since(&self, tag: Option<&str>) -> Result<Vec<CommitInfo>> {
        let Some(head) = self.head_oid()? else {
            return Ok(Vec::new());
        };

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(head)?;

        if let Some(tag) = tag {
            let tagged = self
                .repo
                .revparse_single(&format!("refs/tags/{}", tag))?
                .peel_to_commit()?;
            revwalk.hide(tagged.id())?;
        }

        let mut commits = Vec::new();
        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            commits.push(CommitInfo {
                hash: commit.id().to_string(),
                message: commit.message().unwrap_or("(empty message)").to_string(),
                author: commit.author().name().unwrap_or("unknown").to_string(),
            });
        }

        commits.reverse();
        tracing::debug!(count = commits.len(), since = ?tag, "collected commits");
        Ok(commits)
    }

    fn current_branch(&self) -> Result<String> {
        match self.repo.head() {
            Ok(head) => Ok(head.shorthand().unwrap_or("HEAD").to_string()),
            Err(e) if e.code() == ErrorCode::UnbornBranch => {
                let head = self.repo.find_reference("HEAD")?;
                let target = head.symbolic_target().unwrap_or("HEAD");
                Ok(target
                    .strip_prefix("refs/heads/")
                    .unwrap_or(target)
                    .to_string())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn add(&self, paths: &[PathBuf]) -> Result<Option<BoundaryWarning>> {
        let mut args = vec!["add".to_string()];
        args.extend(paths.iter().map(|p| p.display().to_string()));
        self.run_git(&args)
    }

    fn commit(&self, request: &CommitRequest) -> Result<Option<BoundaryWarning>> {
        self.run_git(&commit_args(request))
    }

    fn tag(&self, request: &TagRequest) -> Result<Option<BoundaryWarning>> {
        self.run_git(&tag_args(request))
    }
}

fn commit_args(request: &CommitRequest) -> Vec<String> {
    let mut args = vec!["commit".to_string()];
    if request.no_verify {
        args.push("--no-verify".to_string());
    }
    if request.sign {
        args.push("-S".to_string());
    }
    if !request.commit_all {
        args.extend(request.paths.iter().map(|p| p.display().to_string()));
    }
    args.push("-m".to_string());
    args.push(request.message.clone());
    args
}

fn tag_args(request: &TagRequest) -> Vec<String> {
    let kind = if request.sign { "-s" } else { "-a" };
    vec![
        "tag".to_string(),
        kind.to_string(),
        request.name.clone(),
        "-m".to_string(),
        request.message.clone(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(commit_all: bool) -> CommitRequest {
        CommitRequest {
            message: "chore(release): 1.1.0".to_string(),
            paths: vec![PathBuf::from("package.json"), PathBuf::from("CHANGELOG.md")],
            sign: false,
            no_verify: false,
            commit_all,
        }
    }

    #[test]
    fn test_commit_args_lists_paths() {
        assert_eq!(
            commit_args(&request(false)),
            vec![
                "commit",
                "package.json",
                "CHANGELOG.md",
                "-m",
                "chore(release): 1.1.0"
            ]
        );
    }

    #[test]
    fn test_commit_args_flags() {
        let mut req = request(true);
        req.sign = true;
        req.no_verify = true;
        assert_eq!(
            commit_args(&req),
            vec!["commit", "--no-verify", "-S", "-m", "chore(release): 1.1.0"]
        );
    }

    #[test]
    fn test_tag_args() {
        let mut req = TagRequest {
            name: "v1.1.0".to_string(),
            message: "chore(release): 1.1.0".to_string(),
            sign: false,
        };
        assert_eq!(
            tag_args(&req),
            vec!["tag", "-a", "v1.1.0", "-m", "chore(release): 1.1.0"]
        );
        req.sign = true;
        assert_eq!(tag_args(&req)[1], "-s");
    }

    #[test]
    fn test_open_outside_repository_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let nested = dir.path().join("nowhere");
        assert!(Git2Repository::open(nested).is_err());
    }
}
