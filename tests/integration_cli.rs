// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the command line.
//!
//! Parses realistic argument patterns and runs the built binary against
//! temporary repositories.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use clap::Parser;
use repograph::cli::{Cli, Command as CliCommand};
use tempfile::TempDir;

const IDENTITY: [(&str, &str); 4] = [
    ("GIT_AUTHOR_NAME", "Test"),
    ("GIT_AUTHOR_EMAIL", "test@example.com"),
    ("GIT_COMMITTER_NAME", "Test"),
    ("GIT_COMMITTER_EMAIL", "test@example.com"),
];

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn git(args: &[&str], cwd: &Path) {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .envs(IDENTITY)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

/// `upstream.git` (bare) with one commit on main and a `work` clone.
fn cloned_repo(temp: &TempDir) -> std::path::PathBuf {
    let seed = temp.path().join("seed");
    fs::create_dir_all(&seed).unwrap();
    git(&["init", "--quiet", "--initial-branch=main"], &seed);
    fs::write(seed.join("README.md"), "# Test\n").unwrap();
    git(&["add", "README.md"], &seed);
    git(&["commit", "--quiet", "-m", "initial"], &seed);
    git(&["tag", "v1"], &seed);

    git(
        &["clone", "--quiet", "--bare", "seed", "upstream.git"],
        temp.path(),
    );
    git(&["clone", "--quiet", "upstream.git", "work"], temp.path());
    temp.path().join("work")
}

/// Runs the binary from `cwd` so no stray `repograph.toml` is picked up.
fn repograph(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_repograph"))
        .args(args)
        .current_dir(cwd)
        .envs(IDENTITY)
        .output()
        .expect("failed to run repograph")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn cli_version_alias() {
    let cli = Cli::try_parse_from(["repograph", "-v"]).unwrap();
    assert!(matches!(cli.command, Some(CliCommand::Version)));
}

#[test]
fn cli_no_command() {
    let cli = Cli::try_parse_from(["repograph"]).unwrap();
    assert!(cli.command.is_none());
}

#[test]
fn cli_global_options_anywhere() {
    let cli = Cli::try_parse_from([
        "repograph",
        "-C",
        "/srv/repo",
        "refs",
        "-k",
        "tag",
        "-l",
        "4",
        "-s",
        "git.timeout_secs=30",
    ])
    .unwrap();
    assert_eq!(cli.global.repo_dir(), Path::new("/srv/repo"));
    assert_eq!(
        cli.global.to_config_overrides(),
        vec![
            "git.timeout_secs=30".to_string(),
            "log.console_level=4".to_string(),
            "log.file_level=4".to_string(),
        ]
    );
}

#[test]
fn cli_push_requires_remote_and_branch() {
    assert!(Cli::try_parse_from(["repograph", "push"]).is_err());
    assert!(Cli::try_parse_from(["repograph", "push", "origin"]).is_err());

    let cli =
        Cli::try_parse_from(["repograph", "push", "origin", "main", "topic", "--force"]).unwrap();
    let Some(CliCommand::Push(args)) = cli.command else {
        panic!("expected push");
    };
    assert_eq!(args.remote, "origin");
    assert_eq!(args.branches, vec!["main", "topic"]);
    assert!(args.force);
}

#[test]
fn cli_unknown_command_rejected() {
    assert!(Cli::try_parse_from(["repograph", "build"]).is_err());
}

// =============================================================================
// Binary
// =============================================================================

#[test]
fn bin_version() {
    let temp = temp_dir();
    let output = repograph(temp.path(), &["version"]);
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec![env!("CARGO_PKG_VERSION")]);
}

#[test]
fn bin_options_reflect_set_override() {
    let temp = temp_dir();
    let output = repograph(temp.path(), &["options", "-s", "git.timeout_secs=45"]);
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert!(
        lines
            .iter()
            .any(|line| line.starts_with("git.timeout_secs") && line.ends_with("= 45")),
        "{lines:?}"
    );
}

#[test]
fn bin_inis_lists_ini_files() {
    let temp = temp_dir();
    let ini = temp.path().join("extra.toml");
    fs::write(&ini, "[git]\ncheck_version = false\n").unwrap();

    let output = repograph(temp.path(), &["inis", "-i", &ini.to_string_lossy()]);
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert!(lines.iter().any(|line| line.contains("[file]") && line.ends_with("extra.toml")));
}

#[test]
fn bin_invalid_config_fails() {
    let temp = temp_dir();
    let output = repograph(temp.path(), &["options", "-s", "git.timeout_secs=0"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load config"));
}

#[test]
fn bin_refs_lists_all_kinds() {
    let temp = temp_dir();
    let work = cloned_repo(&temp);

    let output = repograph(temp.path(), &["-C", &work.to_string_lossy(), "refs"]);
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 3, "{lines:?}");
    assert!(lines[0].starts_with("* "));
    assert!(lines[0].ends_with("refs/heads/main [origin/main]"));
    assert!(lines[1].ends_with("refs/remotes/origin/main"));
    assert!(lines[2].ends_with("refs/tags/v1"));
}

#[test]
fn bin_refs_glob_filters() {
    let temp = temp_dir();
    let work = cloned_repo(&temp);

    let output = repograph(
        temp.path(),
        &["-C", &work.to_string_lossy(), "refs", "-g", "refs/tags/**"],
    );
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 1, "{lines:?}");
    assert!(lines[0].ends_with("refs/tags/v1"));
}

#[test]
fn bin_status_shows_untracked() {
    let temp = temp_dir();
    let work = cloned_repo(&temp);
    fs::write(work.join("notes.txt"), "draft\n").unwrap();

    let output = repograph(temp.path(), &["-C", &work.to_string_lossy(), "status"]);
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec!["?? notes.txt"]);
}

#[test]
fn bin_remotes() {
    let temp = temp_dir();
    let work = cloned_repo(&temp);

    let output = repograph(temp.path(), &["-C", &work.to_string_lossy(), "remotes"]);
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 2, "{lines:?}");
    assert!(lines[0].starts_with("origin\t") && lines[0].ends_with("(fetch)"));
    assert!(lines[1].starts_with("origin\t") && lines[1].ends_with("(push)"));
}

#[test]
fn bin_fetch_reports_new_tag() {
    let temp = temp_dir();
    let work = cloned_repo(&temp);
    git(&["tag", "v2"], &temp.path().join("upstream.git"));

    let output = repograph(temp.path(), &["-C", &work.to_string_lossy(), "fetch"]);
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 1, "{lines:?}");
    assert!(lines[0].starts_with("+ refs/tags/v2 "));

    let again = repograph(temp.path(), &["-C", &work.to_string_lossy(), "fetch"]);
    assert!(again.status.success());
    assert_eq!(
        stdout_lines(&again),
        vec!["fetch origin: no references changed"]
    );
}

#[test]
fn bin_fetch_unknown_remote_fails() {
    let temp = temp_dir();
    let work = cloned_repo(&temp);

    let output = repograph(
        temp.path(),
        &["-C", &work.to_string_lossy(), "fetch", "nowhere"],
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("nowhere"));
}

#[test]
fn bin_outside_repository_fails() {
    let temp = temp_dir();
    let output = repograph(temp.path(), &["-C", &temp.path().to_string_lossy(), "refs"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("cannot open repository"));
}
