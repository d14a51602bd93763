// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.
//!
//! Tests the Config module with realistic TOML configurations.

use std::fs;
use std::time::Duration;

use repograph::config::Config;
use repograph::config::loader::{ConfigLoader, SourceKind};
use repograph::logging::LogLevel;
use repograph::utility::encoding::Encoding;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

// =============================================================================
// Loading from TOML strings
// =============================================================================

#[test]
fn config_parse_empty_uses_defaults() {
    let config = Config::parse("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn config_parse_full() {
    let toml = r#"
[git]
executable = "/opt/git/bin/git"
timeout_secs = 120
output_encoding = "oem"
check_version = false
env = ["GIT_SSH_COMMAND=ssh -o BatchMode=yes", "GIT_TRACE=0"]

[operations]
kill_on_cancel = true
serialize_mutations = false

[log]
console_level = 2
file_level = 5
log_file = "/var/log/repograph.log"
"#;
    let config = Config::parse(toml).unwrap();

    assert_eq!(
        config.git.executable.as_deref(),
        Some(std::path::Path::new("/opt/git/bin/git"))
    );
    assert_eq!(config.git.timeout(), Some(Duration::from_secs(120)));
    assert_eq!(config.git.output_encoding, Encoding::Oem);
    assert!(!config.git.check_version);
    assert_eq!(config.git.env_pairs().count(), 2);
    assert!(config.operations.kill_on_cancel);
    assert!(!config.operations.serialize_mutations);
    assert_eq!(config.log.console_level, LogLevel::WARN);
    assert_eq!(config.log.file_level, LogLevel::TRACE);

    let log = config.log.to_log_config();
    assert_eq!(log.console_level(), LogLevel::WARN);
    assert_eq!(
        log.log_file(),
        Some(std::path::Path::new("/var/log/repograph.log"))
    );
}

#[test]
fn config_unknown_section_rejected() {
    assert!(Config::parse("[paths]\nprefix = \"/build\"\n").is_err());
}

#[test]
fn config_unknown_encoding_rejected() {
    assert!(Config::parse("[git]\noutput_encoding = \"ebcdic\"\n").is_err());
}

// =============================================================================
// Layering
// =============================================================================

#[test]
fn config_later_file_overrides_earlier() {
    let dir = temp_dir();
    let base = dir.path().join("repograph.toml");
    let local = dir.path().join("local.toml");
    fs::write(&base, "[git]\ntimeout_secs = 30\ncheck_version = false\n").unwrap();
    fs::write(&local, "[git]\ntimeout_secs = 60\n").unwrap();

    let loader = ConfigLoader::new()
        .add_toml_file_optional(&base)
        .add_toml_file(&local);
    let kinds: Vec<SourceKind> = loader.loaded_files().iter().map(|(k, _)| *k).collect();
    assert_eq!(kinds, vec![SourceKind::Optional, SourceKind::File]);

    let config = loader.build().unwrap();
    assert_eq!(config.git.timeout_secs, Some(60));
    assert!(!config.git.check_version);
}

#[test]
fn config_set_override_beats_files() {
    let config = Config::builder()
        .add_toml_str("[log]\nconsole_level = 3\n")
        .add_toml_str("[log]\nconsole_level = 4\n")
        .set_assignment("log.console_level=1")
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(config.log.console_level, LogLevel::ERROR);
}

#[test]
fn config_override_validation_applies() {
    let result = Config::builder()
        .set_assignment("git.timeout_secs=0")
        .unwrap()
        .build();
    assert!(result.is_err());
}

#[test]
fn config_format_options_lists_every_key() {
    let config = Config::parse("[git]\ntimeout_secs = 5\n").unwrap();
    let keys: Vec<String> = config
        .format_options()
        .iter()
        .filter_map(|line| line.split_whitespace().next().map(str::to_string))
        .collect();
    insta::assert_snapshot!(keys.join("\n"), @r"
    git.check_version
    git.executable
    git.output_encoding
    git.timeout_secs
    log.console_level
    log.file_level
    log.log_file
    operations.kill_on_cancel
    operations.serialize_mutations
    ");
}
