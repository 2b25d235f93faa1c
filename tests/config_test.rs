// tests/config_test.rs
use release_me::config::{load_config, Config, CONFIG_FILE_NAME};
use serial_test::serial;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_load_from_explicit_path() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
message = "release: v%s"
tag_prefix = "rel-"
no_verify = true

[skip]
tag = true

[conventional_commits]
minor_types = ["feat"]
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let workdir = TempDir::new().unwrap();
    let config = load_config(Some(temp_file.path()), workdir.path()).unwrap();

    assert_eq!(config.message, "release: v%s");
    assert_eq!(config.tag_prefix, "rel-");
    assert!(config.no_verify);
    assert!(config.skip.tag);
    assert_eq!(config.conventional_commits.minor_types, vec!["feat"]);
    assert_eq!(config.infile, PathBuf::from("CHANGELOG.md"));
}

#[test]
fn test_missing_explicit_path_is_an_error() {
    let workdir = TempDir::new().unwrap();
    let missing = workdir.path().join("nope.toml");
    let err = load_config(Some(&missing), workdir.path()).unwrap_err();
    assert!(err.to_string().contains("Configuration error"));
}

#[test]
#[serial]
fn test_project_file_is_discovered() {
    let config_home = TempDir::new().unwrap();
    std::env::set_var("XDG_CONFIG_HOME", config_home.path());

    let workdir = TempDir::new().unwrap();
    fs::write(
        workdir.path().join(CONFIG_FILE_NAME),
        "manifests = [\"Cargo.toml\"]\n",
    )
    .unwrap();

    let config = load_config(None, workdir.path()).unwrap();
    assert_eq!(config.manifests, vec![PathBuf::from("Cargo.toml")]);
}

#[cfg(target_os = "linux")]
#[test]
#[serial]
fn test_user_config_dir_fallback() {
    let config_home = TempDir::new().unwrap();
    fs::write(
        config_home.path().join(format!(".{}", CONFIG_FILE_NAME)),
        "sign = true\n",
    )
    .unwrap();
    std::env::set_var("XDG_CONFIG_HOME", config_home.path());

    let workdir = TempDir::new().unwrap();
    let config = load_config(None, workdir.path()).unwrap();
    assert!(config.sign);
}

#[test]
#[serial]
fn test_defaults_without_any_file() {
    let config_home = TempDir::new().unwrap();
    std::env::set_var("XDG_CONFIG_HOME", config_home.path());

    let workdir = TempDir::new().unwrap();
    let config = load_config(None, workdir.path()).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_default_values() {
    let config = Config::default();
    assert!(config
        .conventional_commits
        .minor_types
        .contains(&"feat".to_string()));
    assert!(config
        .conventional_commits
        .breaking_change_indicators
        .contains(&"BREAKING CHANGE:".to_string()));
    assert_eq!(
        config.manifests,
        vec![
            PathBuf::from("package.json"),
            PathBuf::from("bower.json"),
            PathBuf::from("Cargo.toml")
        ]
    );
    assert!(!config.skip.bump && !config.skip.changelog && !config.skip.commit && !config.skip.tag);
}
