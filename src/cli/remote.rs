// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Remote traffic arguments.
//!
//! ```text
//! fetch REMOTE
//! pull REMOTE
//! prune REMOTE
//! push REMOTE BRANCH... [--force] [--tags] [--no-thin]
//! ```

use clap::Args;

use crate::git::PushOptions;

/// Arguments for `fetch`, `pull` and `prune`.
#[derive(Debug, Clone, Args)]
pub struct RemoteArgs {
    /// Name of the remote.
    #[arg(value_name = "REMOTE", default_value = "origin")]
    pub remote: String,
}

/// Arguments for the `push` command.
#[derive(Debug, Clone, Args)]
pub struct PushArgs {
    /// Name of the remote.
    #[arg(value_name = "REMOTE")]
    pub remote: String,

    /// Local branches to push.
    #[arg(value_name = "BRANCH", required = true, num_args = 1..)]
    pub branches: Vec<String>,

    /// Updates remote branches even when the update is not a fast-forward.
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Also pushes all tags.
    #[arg(long)]
    pub tags: bool,

    /// Sends a full pack instead of a thin one.
    #[arg(long = "no-thin")]
    pub no_thin: bool,
}

impl PushArgs {
    #[must_use]
    pub fn options(&self) -> PushOptions {
        PushOptions::builder()
            .force(self.force)
            .tags(self.tags)
            .thin_pack(!self.no_thin)
            .build()
    }
}
