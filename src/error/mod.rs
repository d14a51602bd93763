// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!                 RepoError (~24 bytes)
//!                        |
//!   +------+------+------+------+------+------+-----+
//!   |      |      |      |      |      |      |     |
//!   v      v      v      v      v      v      v     v
//! Launch  Exit  Parse  State  Proc   Cfg    Io  Cancelled/Other
//!  Box    Box    Box    Box    Box    Box   Box     -/Box<str>
//!
//! Sub-errors:
//!   Launch   ExecutableNotFound, SpawnFailed
//!   Exit     command + exit code + captured stderr
//!   Parse    what was parsed, line, message
//!   State    Deleted, AlreadyExists, NotFound, Inappropriate
//!   Process  Timeout, Io, StdinFailed
//!   Config   ParseError, InvalidValue, UnsupportedVersion
//! ```
//!
//! Library APIs return [`RepoResult`]; the CLI layer and the config loader use
//! [`Result`] (`anyhow`). [`RepoError::kind`] lets callers branch on the error
//! category without matching on the boxed payloads.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`RepoError`].
pub type RepoResult<T> = std::result::Result<T, RepoError>;

/// Top-level library error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum RepoError {
    /// The external program could not be started.
    #[error("launch error: {0}")]
    Launch(#[from] Box<LaunchError>),

    /// The process ran but its exit code means failure for this command.
    #[error("{0}")]
    ExternalExit(#[from] Box<ExternalExitError>),

    /// Command output did not have the expected shape.
    #[error("parse error: {0}")]
    Parse(#[from] Box<ParseError>),

    /// A domain object was used in a state that forbids the operation.
    #[error("state error: {0}")]
    State(#[from] Box<StateError>),

    /// Process I/O failure after a successful launch.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// The operation was cancelled cooperatively.
    #[error("operation cancelled")]
    Cancelled,

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

/// Error category, independent of the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Launch,
    ExternalExit,
    Parse,
    State,
    Process,
    Config,
    Io,
    Cancelled,
    Other,
}

impl RepoError {
    /// Creates a [`RepoError::Other`] from a message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into().into_boxed_str())
    }

    /// Returns the error category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Launch(_) => ErrorKind::Launch,
            Self::ExternalExit(_) => ErrorKind::ExternalExit,
            Self::Parse(_) => ErrorKind::Parse,
            Self::State(_) => ErrorKind::State,
            Self::Process(_) => ErrorKind::Process,
            Self::Config(_) => ErrorKind::Config,
            Self::Io(_) => ErrorKind::Io,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::Other(_) => ErrorKind::Other,
        }
    }

    /// Returns true if this error is a cooperative cancellation.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for RepoError {
                fn from(err: $error) -> Self {
                    RepoError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    LaunchError => Launch,
    ExternalExitError => ExternalExit,
    ParseError => Parse,
    StateError => State,
    ProcessError => Process,
    ConfigError => Config,
    std::io::Error => Io,
}

// --- Launch Errors ---

/// The external program could not be started.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// The OS refused to start the process (missing binary, permission denied).
    #[error("failed to start '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Exit Errors ---

/// A process exited with a code its caller treats as failure.
#[derive(Debug, Error)]
#[error("'{command}' exited with code {code}{}", stderr_suffix(.stderr))]
pub struct ExternalExitError {
    pub command: String,
    pub code: i32,
    pub stderr: String,
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}

// --- Parse Errors ---

/// Output could not be interpreted into the expected shape.
#[derive(Debug, Error)]
#[error("{what}{}: {message}", .line.map(|l| format!(" (line {l})")).unwrap_or_default())]
pub struct ParseError {
    /// What was being parsed (usually the subcommand).
    pub what: &'static str,
    /// 1-based line or record number, when known.
    pub line: Option<usize>,
    pub message: String,
}

impl ParseError {
    pub fn new(what: &'static str, message: impl Into<String>) -> Self {
        Self {
            what,
            line: None,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

// --- State Errors ---

/// Contract violations on domain objects.
#[derive(Debug, Error)]
pub enum StateError {
    /// The object was removed from its collection.
    #[error("{kind} '{name}' is deleted")]
    Deleted { kind: &'static str, name: String },

    /// A key is already taken in the target collection.
    #[error("{kind} '{name}' already exists")]
    AlreadyExists { kind: &'static str, name: String },

    /// No object with this key exists.
    #[error("{kind} '{name}' not found")]
    NotFound { kind: &'static str, name: String },

    /// The object's current state does not allow the operation.
    #[error("cannot {action} '{name}': {reason}")]
    Inappropriate {
        action: &'static str,
        name: String,
        reason: String,
    },
}

// --- Process Errors ---

/// Process failures after a successful launch.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Process timed out and was terminated.
    #[error("process '{command}' timed out after {timeout_secs} seconds")]
    Timeout { command: String, timeout_secs: u64 },

    /// Waiting on or killing the process failed.
    #[error("i/o error while running '{command}': {source}")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing stdin failed.
    #[error("failed to write stdin of '{command}': {source}")]
    StdinFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration.
    #[error("failed to parse config '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// The installed git is older than the supported minimum.
    #[error("git {found} is not supported (minimum {required})")]
    UnsupportedVersion { found: String, required: String },

    /// The directory is not inside a git work tree.
    #[error("not a git repository: {0}")]
    NotARepository(String),
}
