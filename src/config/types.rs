// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration sections.
//!
//! ```text
//! Config
//!   [git]         GitConfig         executable, timeout, encoding, env
//!   [operations]  OperationsConfig  cancellation and serialization policy
//!   [log]         LogSection        console/file levels, log file
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::logging::{LogConfig, LogLevel};
use crate::utility::encoding::Encoding;

/// How the git executable is found and invoked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitConfig {
    /// Explicit path or name of the git binary; `None` searches `PATH`.
    pub executable: Option<PathBuf>,
    /// Per-command timeout. `None` waits forever.
    pub timeout_secs: Option<u64>,
    /// Encoding of git's stdout and stderr.
    pub output_encoding: Encoding,
    /// Reject git versions older than the supported minimum on open.
    pub check_version: bool,
    /// Extra `NAME=VALUE` environment entries for every git invocation.
    pub env: Vec<String>,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            executable: None,
            timeout_secs: None,
            output_encoding: Encoding::Utf8,
            check_version: true,
            env: Vec::new(),
        }
    }
}

impl GitConfig {
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Splits `env` entries into name/value pairs, skipping malformed ones.
    pub fn env_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.env.iter().filter_map(|entry| entry.split_once('='))
    }
}

/// Policies of the asynchronous operation framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OperationsConfig {
    /// Kill a running git child when its operation is cancelled.
    pub kill_on_cancel: bool,
    /// Run fetch, pull, push and prune of one repository one at a time.
    pub serialize_mutations: bool,
}

impl Default for OperationsConfig {
    fn default() -> Self {
        Self {
            kill_on_cancel: false,
            serialize_mutations: true,
        }
    }
}

/// The `[log]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogSection {
    pub console_level: LogLevel,
    pub file_level: LogLevel,
    pub log_file: Option<PathBuf>,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            console_level: LogLevel::INFO,
            file_level: LogLevel::TRACE,
            log_file: None,
        }
    }
}

impl LogSection {
    /// Converts the section into a logging configuration.
    #[must_use]
    pub fn to_log_config(&self) -> LogConfig {
        LogConfig::builder()
            .with_console_level(self.console_level)
            .with_file_level(self.file_level)
            .maybe_with_log_file(self.log_file.clone())
            .build()
    }
}
