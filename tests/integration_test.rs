// tests/integration_test.rs
use git2::{Repository as Git2Repo, Signature};
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn release_me(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_release-me"))
        .args(args)
        .current_dir(dir)
        .env("XDG_CONFIG_HOME", dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute release-me")
}

fn commit(repo: &Git2Repo, message: &str) -> git2::Oid {
    let sig = Signature::now("Test User", "test@example.com").unwrap();
    let tree_id = repo.index().unwrap().write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .unwrap()
}

#[test]
fn test_release_me_help() {
    let dir = TempDir::new().unwrap();
    let output = release_me(dir.path(), &["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("release-me"));
    assert!(stdout.contains("--prerelease"));
    assert!(stdout.contains("--release-as"));
}

#[test]
fn test_release_me_version() {
    let dir = TempDir::new().unwrap();
    let output = release_me(dir.path(), &["--version"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_outside_repository_fails() {
    let dir = TempDir::new().unwrap();
    let output = release_me(dir.path(), &["--dry-run"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Git repository error"));
}

#[test]
fn test_dry_run_reports_without_writing() {
    let dir = TempDir::new().unwrap();
    let repo = Git2Repo::init(dir.path()).unwrap();
    fs::write(
        dir.path().join("package.json"),
        "{\"name\":\"demo\",\"version\":\"1.0.0\"}",
    )
    .unwrap();
    let first = commit(&repo, "chore: init");
    let object = repo.find_object(first, None).unwrap();
    repo.tag_lightweight("v1.0.0", &object, false).unwrap();
    commit(&repo, "feat: add widgets");

    let output = release_me(dir.path(), &["--dry-run"]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("bumping version in package.json from 1.0.0 to 1.1.0"));
    assert!(stdout.contains("outputting changes to CHANGELOG.md"));
    assert!(stdout.contains("tagging release v1.1.0"));
    assert!(stdout.contains("git push --follow-tags origin"));

    let manifest = fs::read_to_string(dir.path().join("package.json")).unwrap();
    assert!(manifest.contains("\"1.0.0\""));
    assert!(!dir.path().join("CHANGELOG.md").exists());
    assert!(repo.find_reference("refs/tags/v1.1.0").is_err());
}

#[test]
fn test_silent_dry_run_prints_nothing() {
    let dir = TempDir::new().unwrap();
    let repo = Git2Repo::init(dir.path()).unwrap();
    fs::write(dir.path().join("package.json"), "{\"version\":\"0.1.0\"}").unwrap();
    commit(&repo, "fix: one");

    let output = release_me(dir.path(), &["--dry-run", "--silent", "--prerelease", "beta"]);

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_invalid_release_as_exits_with_error() {
    let dir = TempDir::new().unwrap();
    let repo = Git2Repo::init(dir.path()).unwrap();
    fs::write(dir.path().join("package.json"), "{\"version\":\"0.1.0\"}").unwrap();
    commit(&repo, "fix: one");

    let output = release_me(dir.path(), &["--dry-run", "--release-as", "banana"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("banana"));
}

#[cfg(unix)]
#[test]
fn test_lifecycle_scripts_are_reported() {
    let dir = TempDir::new().unwrap();
    let repo = Git2Repo::init(dir.path()).unwrap();
    fs::write(dir.path().join("package.json"), "{\"version\":\"0.1.0\"}").unwrap();
    fs::write(
        dir.path().join("releaseme.toml"),
        "[skip]\nchangelog = true\ncommit = true\ntag = true\n\n[scripts]\npostbump = \"echo done\"\n",
    )
    .unwrap();
    commit(&repo, "fix: one");

    let output = release_me(dir.path(), &[]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Running lifecycle script \"postbump\""));
    assert!(stdout.contains("- execute command: \"echo done --new-version=\"0.1.1\"\""));
}
