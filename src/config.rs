use crate::error::{ReleaseError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the project-local configuration file
pub const CONFIG_FILE_NAME: &str = "releaseme.toml";

/// Represents the complete configuration for release-me.
///
/// Contains changelog and message settings, git behavior switches, the manifests
/// to bump, lifecycle scripts, stage skips and conventional commit settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Changelog file to prepend release notes to
    #[serde(default = "default_infile")]
    pub infile: PathBuf,

    /// Commit and tag message; `%s` is replaced by the new version
    #[serde(default = "default_message")]
    pub message: String,

    #[serde(default = "default_tag_prefix")]
    pub tag_prefix: String,

    /// GPG-sign the release commit and tag
    #[serde(default)]
    pub sign: bool,

    /// Bypass git commit hooks
    #[serde(default)]
    pub no_verify: bool,

    /// Commit all staged changes, not only the files touched by the release
    #[serde(default)]
    pub commit_all: bool,

    #[serde(default)]
    pub silent: bool,

    /// Manifest files whose version field is bumped, in lookup order
    #[serde(default = "default_manifests")]
    pub manifests: Vec<PathBuf>,

    #[serde(default)]
    pub skip: SkipConfig,

    #[serde(default)]
    pub scripts: ScriptsConfig,

    #[serde(default)]
    pub conventional_commits: ConventionalCommitsConfig,
}

fn default_infile() -> PathBuf {
    PathBuf::from("CHANGELOG.md")
}

fn default_message() -> String {
    "chore(release): %s".to_string()
}

fn default_tag_prefix() -> String {
    "v".to_string()
}

/// Returns the default manifests: npm, bower and cargo.
fn default_manifests() -> Vec<PathBuf> {
    vec![
        PathBuf::from("package.json"),
        PathBuf::from("bower.json"),
        PathBuf::from("Cargo.toml"),
    ]
}

/// Lifecycle stages that can be skipped individually.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
pub struct SkipConfig {
    #[serde(default)]
    pub bump: bool,
    #[serde(default)]
    pub changelog: bool,
    #[serde(default)]
    pub commit: bool,
    #[serde(default)]
    pub tag: bool,
}

/// Shell commands run around each lifecycle stage.
///
/// Keys are script names such as `prebump` or `posttag`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct ScriptsConfig {
    pub commands: BTreeMap<String, String>,
}

impl ScriptsConfig {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.commands
            .get(name)
            .map(String::as_str)
            .filter(|cmd| !cmd.trim().is_empty())
    }
}

/// Returns the default list of breaking change indicators.
fn default_breaking_change_indicators() -> Vec<String> {
    vec![
        "BREAKING CHANGE:".to_string(),
        "BREAKING-CHANGE:".to_string(),
    ]
}

/// Returns the default commit types that trigger minor version bumps.
fn default_minor_types() -> Vec<String> {
    vec!["feat".to_string(), "feature".to_string()]
}

/// Configuration for conventional commit analysis.
///
/// Defines the breaking change indicators and the commit types used to analyze
/// commits and determine the bump category.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ConventionalCommitsConfig {
    #[serde(default = "default_breaking_change_indicators")]
    pub breaking_change_indicators: Vec<String>,

    #[serde(default = "default_minor_types")]
    pub minor_types: Vec<String>,
}

impl Default for ConventionalCommitsConfig {
    fn default() -> Self {
        ConventionalCommitsConfig {
            breaking_change_indicators: default_breaking_change_indicators(),
            minor_types: default_minor_types(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            infile: default_infile(),
            message: default_message(),
            tag_prefix: default_tag_prefix(),
            sign: false,
            no_verify: false,
            commit_all: false,
            silent: false,
            manifests: default_manifests(),
            skip: SkipConfig::default(),
            scripts: ScriptsConfig::default(),
            conventional_commits: ConventionalCommitsConfig::default(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `releaseme.toml` in `workdir`
/// 3. `.releaseme.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>, workdir: &Path) -> Result<Config> {
    let path = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(workdir),
    };

    let Some(path) = path else {
        return Ok(Config::default());
    };

    let config_str = fs::read_to_string(&path).map_err(|e| {
        ReleaseError::config(format!("cannot read {}: {}", path.display(), e))
    })?;

    parse_config(&config_str)
}

/// Parse configuration from TOML text
pub fn parse_config(text: &str) -> Result<Config> {
    let config: Config = toml::from_str(text)?;
    if config.tag_prefix.chars().any(char::is_whitespace) {
        return Err(ReleaseError::config(format!(
            "tag_prefix '{}' must not contain whitespace",
            config.tag_prefix
        )));
    }
    Ok(config)
}

fn discover_config(workdir: &Path) -> Option<PathBuf> {
    let local = workdir.join(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(format!(".{}", CONFIG_FILE_NAME)))
        .filter(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.infile, PathBuf::from("CHANGELOG.md"));
        assert_eq!(config.message, "chore(release): %s");
        assert_eq!(config.tag_prefix, "v");
        assert!(!config.sign);
        assert_eq!(config.manifests.len(), 3);
        assert_eq!(config.skip, SkipConfig::default());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        assert_eq!(parse_config("").unwrap(), Config::default());
    }

    #[test]
    fn test_parse_full_file() {
        let config = parse_config(
            r#"
infile = "HISTORY.md"
message = "release: %s"
tag_prefix = ""
sign = true
manifests = ["Cargo.toml"]

[skip]
changelog = true

[scripts]
prebump = "echo 2.0.0"
posttag = "./notify.sh"

[conventional_commits]
minor_types = ["feat", "feature", "add"]
"#,
        )
        .unwrap();

        assert_eq!(config.infile, PathBuf::from("HISTORY.md"));
        assert_eq!(config.tag_prefix, "");
        assert!(config.sign);
        assert_eq!(config.manifests, vec![PathBuf::from("Cargo.toml")]);
        assert!(config.skip.changelog);
        assert!(!config.skip.tag);
        assert_eq!(config.scripts.get("prebump"), Some("echo 2.0.0"));
        assert_eq!(config.scripts.get("precommit"), None);
        assert!(config
            .conventional_commits
            .minor_types
            .contains(&"add".to_string()));
        assert!(config
            .conventional_commits
            .breaking_change_indicators
            .contains(&"BREAKING CHANGE:".to_string()));
    }

    #[test]
    fn test_blank_script_is_ignored() {
        let config = parse_config("[scripts]\nprecommit = \"  \"\n").unwrap();
        assert_eq!(config.scripts.get("precommit"), None);
    }

    #[test]
    fn test_invalid_tag_prefix() {
        assert!(parse_config("tag_prefix = \"v \"").is_err());
    }

    #[test]
    fn test_invalid_toml() {
        let err = parse_config("sign = maybe").unwrap_err();
        assert!(err.to_string().starts_with("TOML error"));
    }
}
