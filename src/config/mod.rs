// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for repograph.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. repograph.toml (working directory, optional)
//! 3. --ini files, in order
//! 4. REPOGRAPH__* env vars
//! 5. --set section.key=value
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! REPOGRAPH__GIT__TIMEOUT_SECS=30            → git.timeout_secs = 30
//! REPOGRAPH__OPERATIONS__KILL_ON_CANCEL=true → operations.kill_on_cancel = true
//! REPOGRAPH__LOG__CONSOLE_LEVEL=4            → log.console_level = 4
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use types::{GitConfig, LogSection, OperationsConfig};

/// Name of the optional configuration file read from the working directory.
pub const CONFIG_FILE_NAME: &str = "repograph.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "REPOGRAPH";

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub git: GitConfig,
    pub operations: OperationsConfig,
    pub log: LogSection,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use repograph::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("repograph.toml")
    ///     .with_env_prefix("REPOGRAPH")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Validate values that deserialize fine but make no sense.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a zero timeout or an `env`
    /// entry that is not `NAME=VALUE`.
    pub fn validate(&mut self) -> Result<()> {
        if self.git.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                section: "git".to_string(),
                key: "timeout_secs".to_string(),
                message: "timeout must be at least one second".to_string(),
            }
            .into());
        }

        if let Some(entry) = self.git.env.iter().find(|entry| {
            entry
                .split_once('=')
                .is_none_or(|(name, _)| name.trim().is_empty())
        }) {
            return Err(ConfigError::InvalidValue {
                section: "git".to_string(),
                key: "env".to_string(),
                message: format!("expected NAME=VALUE, got '{entry}'"),
            }
            .into());
        }

        if self
            .git
            .executable
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            self.git.executable = None;
        }

        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_git_options(&mut options);
        self.format_operations_options(&mut options);
        self.format_log_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_git_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "git.executable".into(),
            self.git
                .executable
                .as_ref()
                .map_or_else(|| "(PATH)".to_string(), |p| p.display().to_string()),
        );
        options.insert(
            "git.timeout_secs".into(),
            self.git
                .timeout_secs
                .map_or_else(|| "none".to_string(), |t| t.to_string()),
        );
        options.insert(
            "git.output_encoding".into(),
            self.git.output_encoding.to_string(),
        );
        options.insert(
            "git.check_version".into(),
            self.git.check_version.to_string(),
        );
        for (name, value) in self.git.env_pairs() {
            options.insert(format!("git.env.{name}"), value.to_string());
        }
    }

    fn format_operations_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "operations.kill_on_cancel".into(),
            self.operations.kill_on_cancel.to_string(),
        );
        options.insert(
            "operations.serialize_mutations".into(),
            self.operations.serialize_mutations.to_string(),
        );
    }

    fn format_log_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "log.console_level".into(),
            self.log.console_level.as_u8().to_string(),
        );
        options.insert(
            "log.file_level".into(),
            self.log.file_level.as_u8().to_string(),
        );
        options.insert(
            "log.log_file".into(),
            self.log
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
    }
}
