use std::fs;
use std::time::Duration;

use pollwatch::config::{
    load_and_validate, load_from_path, load_optional, ConfigFile, Overrides, RawConfigFile,
};
use pollwatch::errors::PollwatchError;
use pollwatch::{build_watcher, write_dry_run};
use pollwatch_test_utils::TreeBuilder;
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn write_config(contents: &str) -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("Pollwatch.toml");
    fs::write(&path, contents).expect("write config");
    (dir, path)
}

#[test]
fn loads_and_validates_file() -> TestResult {
    let (_dir, path) = write_config(
        r#"
        [watch]
        paths = ["src/**/*.rs", "Cargo.toml"]
        ignore = ["target"]
        interval_ms = 100

        [command]
        cmd = "cargo test"
        "#,
    );

    let cfg = load_and_validate(&path)?;
    assert_eq!(cfg.watch(), ["src/**/*.rs", "Cargo.toml"]);
    assert_eq!(cfg.ignore(), ["target"]);
    assert_eq!(cfg.interval(), Duration::from_millis(100));
    assert_eq!(cfg.cmd(), Some("cargo test"));
    Ok(())
}

#[test]
fn empty_file_needs_command_line_patterns() -> TestResult {
    let (_dir, path) = write_config("");

    let err = load_and_validate(&path).unwrap_err();
    assert!(matches!(err, PollwatchError::ConfigError(_)));

    let raw = load_from_path(&path)?.merge(Overrides {
        watch: vec!["src".to_string()],
        ..Overrides::default()
    });
    let cfg = ConfigFile::try_from(raw)?;
    assert_eq!(cfg.watch(), ["src"]);
    assert_eq!(cfg.interval(), Duration::from_millis(400));
    Ok(())
}

#[test]
fn malformed_toml_is_reported() {
    let (_dir, path) = write_config("[watch\npaths = 1");
    assert!(matches!(
        load_from_path(&path),
        Err(PollwatchError::TomlError(_))
    ));
}

#[test]
fn explicit_missing_path_is_an_error() {
    let dir = TempDir::new().expect("tempdir");
    let missing = dir.path().join("nope.toml");
    assert!(matches!(
        load_optional(Some(missing.as_path())),
        Err(PollwatchError::IoError(_))
    ));
}

#[test]
fn dry_run_lists_every_target() -> TestResult {
    let tree = TreeBuilder::new()
        .file("src/main.go")
        .file("src/util/str.go")
        .file("src/vendor/dep.go")
        .build();

    let raw = RawConfigFile::default().merge(Overrides {
        watch: vec!["src".to_string()],
        ignore: vec!["src/vendor".to_string()],
        ..Overrides::default()
    });
    let cfg = ConfigFile::try_from(raw)?;
    let watcher = build_watcher(&cfg, tree.path())?;
    let targets = watcher.targets()?;

    let mut out = Vec::new();
    write_dry_run(&mut out, &watcher, &targets)?;
    let out = String::from_utf8(out)?;

    assert!(out.contains("targets (4):"));
    assert!(out.contains("  - src/\n"));
    assert!(out.contains("  - src/util/\n"));
    assert!(out.contains("  - src/main.go\n"));
    assert!(!out.contains("vendor/dep.go"));
    Ok(())
}
