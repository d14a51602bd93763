// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use super::builder::{ProcessBuilder, ProcessFlags};
use super::execute;
use crate::error::{ErrorKind, LaunchError, ProcessError, RepoError};
use crate::utility::encoding::Encoding;

fn sh(script: &str) -> ProcessBuilder {
    ProcessBuilder::new("/bin/sh").arg("-c").arg(script).name("sh")
}

#[tokio::test]
async fn test_process_echo() {
    let output = ProcessBuilder::new("echo")
        .arg("hello")
        .run()
        .await
        .expect("echo should succeed");

    assert!(output.success());
    insta::assert_snapshot!(output.stdout_text(Encoding::Utf8).trim(), @"hello");
}

#[tokio::test]
async fn test_nonzero_exit_is_not_an_error() {
    let output = sh("echo oops >&2; exit 42")
        .run()
        .await
        .expect("process should complete");

    assert_eq!(output.exit_code(), 42);
    assert_eq!(output.stderr(), b"oops\n");
    assert!(!output.is_interrupted());
}

#[tokio::test]
async fn test_run_checked_carries_stderr() {
    let err = sh("echo 'fatal: broken' >&2; exit 3")
        .flag(ProcessFlags::QUIET_FAILURE)
        .run_checked()
        .await
        .expect_err("exit 3 is a failure");

    match err {
        RepoError::ExternalExit(exit) => {
            assert_eq!(exit.code, 3);
            assert_eq!(exit.stderr.trim(), "fatal: broken");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_run_checked_accepts_custom_success_codes() {
    let output = sh("exit 1")
        .success_codes([0, 1])
        .run_checked()
        .await
        .expect("1 is accepted");
    assert_eq!(output.exit_code(), 1);
}

#[tokio::test]
async fn test_process_env() {
    let output = sh("printf '%s' \"$REPOGRAPH_TEST_VAR\"")
        .env("REPOGRAPH_TEST_VAR", "test_value")
        .run()
        .await
        .expect("process should succeed");

    assert_eq!(output.stdout(), b"test_value");
}

#[tokio::test]
async fn test_stdin_is_fed() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let output = execute("cat", std::iter::empty::<&str>(), dir.path(), Some(b"a\0b".to_vec()))
        .await
        .expect("cat should succeed");
    assert_eq!(output.stdout(), b"a\0b");
}

#[tokio::test]
async fn test_missing_executable_is_launch_error() {
    let err = ProcessBuilder::new("repograph-no-such-program-12345")
        .run()
        .await
        .expect_err("program does not exist");

    assert_eq!(err.kind(), ErrorKind::Launch);
    assert!(matches!(
        err,
        RepoError::Launch(ref launch) if matches!(**launch, LaunchError::ExecutableNotFound { .. })
    ));
}

#[tokio::test]
async fn test_timeout_kills_process() {
    let start = Instant::now();
    let err = ProcessBuilder::new("sleep")
        .arg("5")
        .timeout(Duration::from_millis(200))
        .run()
        .await
        .expect_err("should time out");

    assert!(start.elapsed() < Duration::from_secs(4));
    assert!(matches!(
        err,
        RepoError::Process(ref p) if matches!(**p, ProcessError::Timeout { .. })
    ));
}

#[tokio::test]
async fn test_cancel_before_spawn_does_not_run() {
    let token = CancellationToken::new();
    token.cancel();

    let output = sh("exit 0")
        .run_with_cancellation(token)
        .await
        .expect("no error");
    assert!(output.is_interrupted());
}

#[tokio::test]
async fn test_cancel_without_kill_flag_lets_process_finish() {
    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        canceller.cancel();
    });

    let output = sh("sleep 0.3; echo done")
        .run_with_cancellation(token)
        .await
        .expect("process should complete");

    assert!(!output.is_interrupted());
    assert_eq!(output.stdout(), b"done\n");
}

#[tokio::test]
async fn test_cancel_with_kill_flag_interrupts() {
    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        canceller.cancel();
    });

    let start = Instant::now();
    let err = ProcessBuilder::new("sleep")
        .arg("5")
        .flag(ProcessFlags::KILL_ON_CANCEL)
        .run_checked_with_cancellation(token)
        .await
        .expect_err("killed process is cancelled");

    assert!(err.is_cancelled());
    assert!(start.elapsed() < Duration::from_secs(4));
}

#[test]
fn test_command_line_quotes_arguments() {
    let builder = ProcessBuilder::new("/usr/bin/git")
        .args(["commit", "-m", "two words", ""]);
    insta::assert_snapshot!(builder.command_line(), @r#"git commit -m "two words" """#);
}
