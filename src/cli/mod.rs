// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for repograph using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! repograph [global options] <command>
//! version | options | inis
//! refs [--kind K]... [--glob PATTERN]
//! status
//! remotes
//! submodules [update]
//! reflog [REF] [-n COUNT]
//! fetch | pull | prune [REMOTE]
//! push REMOTE BRANCH... [--force] [--tags] [--no-thin]
//! ```

pub mod global;
pub mod refs;
pub mod remote;
pub mod submodule;


use crate::cli::global::GlobalOptions;
use crate::cli::refs::{RefsArgs, ReflogArgs};
use crate::cli::remote::{PushArgs, RemoteArgs};
use crate::cli::submodule::SubmodulesArgs;
use clap::{Parser, Subcommand};

/// Git Repository Object Graph
///
/// Inspects and drives a git work tree through a live object model.
#[derive(Debug, Parser)]
#[command(
    name = "repograph",
    author,
    version,
    about = "Git repository object graph",
    long_about = "repograph Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Loads the branches, remote branches, tags, remotes, submodules\n\
                  and work tree status of a repository and runs remote operations\n\
                  against it, reporting which references moved. See\n\
                  `repograph <command> --help` for more information about a command.",
    after_help = "CONFIGURATION:\n\n\
                  repograph reads `repograph.toml` from the current directory if it\n\
                  exists, then every file given with --ini in order. Environment\n\
                  variables such as REPOGRAPH__GIT__TIMEOUT_SECS=30 override the\n\
                  files, and --set git.timeout_secs=30 overrides everything."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their effective values.
    Options,

    /// Lists the configuration files that were loaded.
    Inis,

    /// Lists references with the object they point to.
    Refs(RefsArgs),

    /// Shows changed, untracked and conflicted paths.
    Status,

    /// Lists remotes with their URLs.
    Remotes,

    /// Lists or updates submodules.
    Submodules(SubmodulesArgs),

    /// Shows the reflog of a reference.
    Reflog(ReflogArgs),

    /// Fetches from a remote and reports moved references.
    Fetch(RemoteArgs),

    /// Pulls from a remote into the current branch.
    Pull(RemoteArgs),

    /// Pushes branches to a remote.
    Push(PushArgs),

    /// Deletes remote-tracking branches that are gone on the remote.
    Prune(RemoteArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
