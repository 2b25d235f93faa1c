//! Release stages: bump, changelog, commit and tag
//!
//! Each stage honors its skip switch, runs its `pre`/`post` lifecycle
//! scripts and does nothing observable on disk or in git during a dry run.

use crate::changelog;
use crate::config::Config;
use crate::domain::SemanticVersion;
use crate::error::Result;
use crate::git::{CommitInfo, CommitRequest, Repository, TagRequest};
use crate::hooks::{HookContext, HookExecutor, HookType};
use crate::manifest::{self, ManifestStore};
use crate::ui::Reporter;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Replace every `%s` in a commit message template with the version
pub fn format_commit_message(template: &str, version: &SemanticVersion) -> String {
    template.replace("%s", &version.to_string())
}

/// Versions and tag of the release being made
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub previous: SemanticVersion,
    pub version: SemanticVersion,
    pub tag: String,
}

/// Shared state for running the release stages
pub struct Lifecycle<'a, R: Repository> {
    pub repo: &'a R,
    pub workdir: &'a Path,
    pub config: &'a Config,
    pub reporter: &'a Reporter,
}

impl<'a, R: Repository> Lifecycle<'a, R> {
    pub fn new(repo: &'a R, workdir: &'a Path, config: &'a Config, reporter: &'a Reporter) -> Self {
        Lifecycle {
            repo,
            workdir,
            config,
            reporter,
        }
    }

    /// Run the configured script for `hook`, if any
    ///
    /// # Returns
    /// The script's non-empty stdout; `None` when nothing ran or it printed nothing
    pub fn run_script(&self, hook: HookType, release: Option<&Release>) -> Result<Option<String>> {
        if self.reporter.is_dry_run() {
            return Ok(None);
        }
        let Some(command) = self.config.scripts.get(hook.name()) else {
            return Ok(None);
        };

        let mut context = HookContext::new(hook);
        if let Some(release) = release {
            context = context
                .with_previous_version(release.previous.to_string())
                .with_release(release.version.to_string(), release.tag.clone());
        }

        self.reporter
            .checkpoint("Running lifecycle script \"%s\"", &[hook.name()]);
        self.reporter.info(
            "- execute command: \"%s\"",
            &[&context.command_line(command)],
        );

        let output = HookExecutor::execute(command, &context, self.workdir)?;
        if let Some(warning) = &output.warning {
            self.reporter.warn(warning);
        }
        Ok(output.replacement().map(str::to_string))
    }

    /// Write the new version to every manifest that declares one
    ///
    /// A first release leaves the manifests untouched but still runs `postbump`.
    ///
    /// # Returns
    /// Paths of the updated manifests
    pub fn bump(
        &self,
        manifests: &mut [Box<dyn ManifestStore>],
        release: &Release,
        first_release: bool,
    ) -> Result<Vec<PathBuf>> {
        if self.config.skip.bump {
            return Ok(Vec::new());
        }

        let updated = if first_release {
            self.reporter.skipped("skip version bump on first release", &[]);
            Vec::new()
        } else {
            manifest::update_manifests(manifests, &release.version, self.reporter)?
        };
        self.run_script(HookType::Postbump, Some(release))?;
        Ok(updated)
    }

    /// Prepend the release section to the changelog
    pub fn changelog(&self, release: &Release, commits: &[CommitInfo], date: NaiveDate) -> Result<()> {
        if self.config.skip.changelog {
            return Ok(());
        }

        self.run_script(HookType::Prechangelog, Some(release))?;
        let section = changelog::render_section(&release.version, date, commits);
        changelog::write_changelog(self.workdir, &self.config.infile, &section, self.reporter)?;
        self.run_script(HookType::Postchangelog, Some(release))?;
        Ok(())
    }

    /// Message template shared by the release commit and tag
    ///
    /// The `precommit` script's output replaces the configured message. The
    /// script does not run when the commit stage is skipped.
    pub fn message(&self, release: &Release) -> Result<String> {
        if self.config.skip.commit {
            return Ok(self.config.message.clone());
        }

        let message = self
            .run_script(HookType::Precommit, Some(release))?
            .unwrap_or_else(|| self.config.message.clone());
        Ok(message)
    }

    /// Stage and commit the updated manifests and the changelog
    ///
    /// `message` is the template from [`Lifecycle::message`].
    ///
    /// # Returns
    /// Whether a commit was made (or would have been, during a dry run)
    pub fn commit(
        &self,
        release: &Release,
        updated_manifests: &[PathBuf],
        message: &str,
    ) -> Result<bool> {
        if self.config.skip.commit {
            return Ok(false);
        }

        let mut paths = updated_manifests.to_vec();
        let changelog_written = !self.config.skip.changelog && self.reporter.is_dry_run();
        if changelog_written || self.workdir.join(&self.config.infile).exists() {
            paths.push(self.config.infile.clone());
        }

        if paths.is_empty() && !self.config.commit_all {
            self.reporter.skipped("nothing to commit for %s", &[&release.version.to_string()]);
            return Ok(false);
        }

        let names: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        let template = vec!["%s"; names.len()].join(" and ");
        self.reporter
            .checkpoint(&format!("committing {}", template), &names);

        if self.reporter.is_dry_run() {
            return Ok(true);
        }

        if !paths.is_empty() {
            if let Some(warning) = self.repo.add(&paths)? {
                self.reporter.warn(&warning);
            }
        }

        let request = CommitRequest {
            message: format_commit_message(message, &release.version),
            paths,
            sign: self.config.sign,
            no_verify: self.config.no_verify,
            commit_all: self.config.commit_all,
        };
        if let Some(warning) = self.repo.commit(&request)? {
            self.reporter.warn(&warning);
        }

        self.run_script(HookType::Postcommit, Some(release))?;
        Ok(true)
    }

    /// Create the release tag and print how to publish it
    ///
    /// `publish_hints` holds the publish commands of the bumped manifests and
    /// `message` is the template from [`Lifecycle::message`].
    ///
    /// # Returns
    /// The tag name, `None` when the stage is skipped
    pub fn tag(
        &self,
        release: &Release,
        publish_hints: &[&str],
        message: &str,
    ) -> Result<Option<String>> {
        if self.config.skip.tag {
            return Ok(None);
        }

        self.run_script(HookType::Pretag, Some(release))?;
        self.reporter
            .checkpoint("tagging release %s", &[&release.tag]);

        if !self.reporter.is_dry_run() {
            let request = TagRequest {
                name: release.tag.clone(),
                message: format_commit_message(message, &release.version),
                sign: self.config.sign,
            };
            if let Some(warning) = self.repo.tag(&request)? {
                self.reporter.warn(&warning);
            }
        }

        let branch = self.repo.current_branch()?;
        let mut instructions = format!("git push --follow-tags origin {}", branch);
        for hint in publish_hints {
            instructions.push_str("; ");
            instructions.push_str(hint);
        }
        self.reporter.info("Run `%s` to publish", &[&instructions]);

        self.run_script(HookType::Posttag, Some(release))?;
        Ok(Some(release.tag.clone()))
    }
}
