// tests/config_test.rs
use git_promote::config::{load_config, Config};
use git_promote::GitPromoteError;
use serial_test::serial;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[repository]
host = "https://git.example.com"
owner = "acme"
name = "widgets"

[release]
branch = "trunk"
changelog = "docs/CHANGELOG.md"
artifact = "out/release.md"
branch_prefix = "promote/"
commit_files = ["package.json", "Cargo.toml"]

[branches]
develop = "drc"
staging = "src"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.release.branch, "trunk");
    assert_eq!(config.release.changelog, "docs/CHANGELOG.md");
    assert_eq!(config.release.artifact, "out/release.md");
    assert_eq!(config.release.branch_prefix, "promote/");
    assert_eq!(config.release.commit_files, vec!["package.json", "Cargo.toml"]);
    assert_eq!(config.prerelease_identifier("develop"), Some("drc"));
    assert_eq!(config.prerelease_identifier("staging"), Some("src"));

    let metadata = config.repository.metadata().unwrap();
    assert_eq!(metadata.url(), "https://git.example.com/acme/widgets");
}

#[test]
fn test_load_fixture() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/gitpromote.toml");
    let config = load_config(Some(path)).unwrap();
    assert_eq!(config.release.branch, "main");
    assert_eq!(config.prerelease_identifier("develop"), Some("drc"));
    assert_eq!(config.prerelease_identifier("main"), None);
    assert!(config.repository.metadata().is_none());
}

#[test]
fn test_missing_explicit_path_is_error() {
    let err = load_config(Some("/nonexistent/gitpromote.toml")).unwrap_err();
    assert!(matches!(err, GitPromoteError::Config(_)));
    assert!(err.to_string().contains("/nonexistent/gitpromote.toml"));
}

#[test]
fn test_invalid_file_is_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[branches\ndevelop = ").unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path().to_str().unwrap())).unwrap_err();
    assert!(matches!(err, GitPromoteError::Config(_)));
}

#[test]
#[serial]
fn test_load_from_current_directory() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("gitpromote.toml"),
        "[release]\nchangelog = \"HISTORY.md\"\n",
    )
    .unwrap();

    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    let config = load_config(None);
    std::env::set_current_dir(previous).unwrap();

    assert_eq!(config.unwrap().release.changelog, "HISTORY.md");
}

#[test]
fn test_default_values() {
    let config = Config::default();
    assert_eq!(config.repository.host, "https://github.com");
    assert_eq!(config.release.branch, "main");
    assert_eq!(config.release.pull_requests, ".git/git-promote/pulls.toml");
    assert!(config.release.commit_files.is_empty());
}
