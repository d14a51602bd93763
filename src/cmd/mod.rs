// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> open_repository(-C) --> cmd::run_* handlers
//!   config     options, inis
//!   refs       refs, reflog
//!   status     status
//!   remote     remotes, fetch, pull, push, prune
//!   submodule  submodules [update]
//!   progress   spinner + Ctrl-C for long-running operations
//! ```
//!
//! Handlers refresh only the collections they print, and format through
//! `format_*` functions that return lines.

pub mod config;
pub mod progress;
pub mod refs;
pub mod remote;
pub mod status;
pub mod submodule;

use std::sync::Arc;

use anyhow::Context;

use crate::cache::{DomainObject, ObjectCollection};
use crate::cli::global::GlobalOptions;
use crate::config::Config;
use crate::error::{RepoResult, Result, StateError};
use crate::repository::Repository;

/// Opens the work tree selected with `-C` (default: current directory).
///
/// # Errors
///
/// Returns an error if git is missing or unsupported, or the directory is
/// not inside a work tree.
pub async fn open_repository(global: &GlobalOptions, config: &Config) -> Result<Repository> {
    let dir = global.repo_dir();
    Repository::open(&dir, config)
        .await
        .with_context(|| format!("cannot open repository at '{}'", dir.display()))
}

/// Object named on the command line.
fn lookup<T: DomainObject>(collection: &ObjectCollection<T>, name: &str) -> RepoResult<Arc<T>> {
    collection.get(name).ok_or_else(|| {
        StateError::NotFound {
            kind: T::KIND,
            name: name.to_string(),
        }
        .into()
    })
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
