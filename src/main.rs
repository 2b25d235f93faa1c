use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use release_me::cli::{run_release, ReleaseArgs};
use release_me::config::{self, Config};
use release_me::git::Git2Repository;
use release_me::ui::Reporter;

/// Release stages that can be skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum Stage {
    Bump,
    Changelog,
    Commit,
    Tag,
}

#[derive(clap::Parser)]
#[command(
    name = "release-me",
    version,
    about = "Bump versions, write the changelog, commit and tag a release from conventional commits"
)]
struct Args {
    #[arg(short = 'r', long, value_name = "VERSION|TYPE", help = "Release as an exact version or as major, minor, patch, premajor, preminor, prepatch or prerelease")]
    release_as: Option<String>,

    #[arg(
        short,
        long,
        value_name = "CHANNEL",
        num_args = 0..=1,
        default_missing_value = "",
        help = "Make a pre-release, optionally on a named channel such as dev or beta"
    )]
    prerelease: Option<String>,

    #[arg(short, long, help = "Release the current version without bumping it")]
    first_release: bool,

    #[arg(short, long, help = "Changelog file to prepend to")]
    infile: Option<PathBuf>,

    #[arg(short, long, help = "Commit message; %s is replaced by the new version")]
    message: Option<String>,

    #[arg(short, long, help = "Prefix for the release tag")]
    tag_prefix: Option<String>,

    #[arg(short, long, help = "GPG-sign the release commit and tag")]
    sign: bool,

    #[arg(short = 'n', long, help = "Bypass git commit hooks")]
    no_verify: bool,

    #[arg(short = 'a', long, help = "Commit all staged changes, not just the release files")]
    commit_all: bool,

    #[arg(long, help = "Suppress console output")]
    silent: bool,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, value_enum, value_name = "STAGE", help = "Skip a release stage (repeatable)")]
    skip: Vec<Stage>,

    #[arg(short, long, help = "Print debug diagnostics")]
    verbose: bool,
}

impl Args {
    /// Command-line flags win over the configuration file
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(infile) = &self.infile {
            config.infile = infile.clone();
        }
        if let Some(message) = &self.message {
            config.message = message.clone();
        }
        if let Some(tag_prefix) = &self.tag_prefix {
            config.tag_prefix = tag_prefix.clone();
        }
        config.sign |= self.sign;
        config.no_verify |= self.no_verify;
        config.commit_all |= self.commit_all;
        config.silent |= self.silent;

        for stage in &self.skip {
            match stage {
                Stage::Bump => config.skip.bump = true,
                Stage::Changelog => config.skip.changelog = true,
                Stage::Commit => config.skip.commit = true,
                Stage::Tag => config.skip.tag = true,
            }
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let workdir = std::env::current_dir().context("cannot determine the working directory")?;

    let mut config = match config::load_config(args.config.as_deref(), &workdir) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };
    args.apply_overrides(&mut config);

    let reporter = Reporter::new(config.silent, args.dry_run);

    let repo = match Git2Repository::open(&workdir) {
        Ok(repo) => repo,
        Err(e) => {
            reporter.error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };

    let release_args = ReleaseArgs {
        release_as: args.release_as.clone(),
        prerelease: args.prerelease.clone(),
        first_release: args.first_release,
        dry_run: args.dry_run,
        config,
    };

    match run_release(&repo, &workdir, &release_args, &reporter) {
        Ok(outcome) => {
            tracing::debug!(
                previous = %outcome.previous,
                version = %outcome.version,
                committed = outcome.committed,
                "release finished"
            );
            Ok(())
        }
        Err(e) => {
            reporter.error(&e.to_string());
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prerelease_without_value_is_empty_channel() {
        let args = Args::parse_from(["release-me", "--prerelease"]);
        assert_eq!(args.prerelease.as_deref(), Some(""));

        let args = Args::parse_from(["release-me", "--prerelease", "dev"]);
        assert_eq!(args.prerelease.as_deref(), Some("dev"));

        let args = Args::parse_from(["release-me"]);
        assert_eq!(args.prerelease, None);
    }

    #[test]
    fn test_overrides_apply_to_config() {
        let args = Args::parse_from([
            "release-me",
            "--tag-prefix",
            "release-",
            "-n",
            "--skip",
            "changelog",
            "--skip",
            "tag",
        ]);
        let mut config = Config::default();
        args.apply_overrides(&mut config);

        assert_eq!(config.tag_prefix, "release-");
        assert!(config.no_verify);
        assert!(config.skip.changelog);
        assert!(config.skip.tag);
        assert!(!config.skip.commit);
    }

    #[test]
    fn test_flags_do_not_clear_config_values() {
        let args = Args::parse_from(["release-me"]);
        let mut config = Config {
            sign: true,
            ..Config::default()
        };
        args.apply_overrides(&mut config);
        assert!(config.sign);
        assert_eq!(config.message, "chore(release): %s");
    }

    #[test]
    fn test_args_are_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
