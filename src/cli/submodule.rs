// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Submodule arguments.
//!
//! ```text
//! submodules            list path, url and branch
//! submodules update     init and update recursively
//! ```

use clap::{Args, Subcommand};

/// Arguments for the `submodules` command.
#[derive(Debug, Clone, Default, Args)]
pub struct SubmodulesArgs {
    /// Without a subcommand the submodules are listed.
    #[command(subcommand)]
    pub subcommand: Option<SubmodulesSubcommand>,
}

/// Submodule subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum SubmodulesSubcommand {
    /// Initializes and updates all submodules recursively.
    Update,
}
