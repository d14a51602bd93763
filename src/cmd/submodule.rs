// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `submodules` command.

use std::sync::Arc;

use super::print_lines;
use super::progress::run_operation;
use crate::cli::submodule::{SubmodulesArgs, SubmodulesSubcommand};
use crate::error::Result;
use crate::model::Submodule;
use crate::repository::Repository;

/// Lists submodules, after updating them if asked to.
///
/// # Errors
///
/// Returns an error if `.gitmodules` cannot be read or the update fails.
pub async fn run_submodules_command(args: &SubmodulesArgs, repo: &Repository) -> Result<()> {
    match args.subcommand {
        Some(SubmodulesSubcommand::Update) => {
            run_operation(|runner, done| Ok(repo.update_submodules_async(runner, done))).await?;
        }
        None => repo.refresh_submodules().await?,
    }
    print_lines(&format_submodules(&repo.submodules().snapshot()));
    Ok(())
}

/// `path url`, followed by the tracked branch if one is configured.
#[must_use]
pub fn format_submodules(submodules: &[Arc<Submodule>]) -> Vec<String> {
    submodules
        .iter()
        .map(|submodule| {
            let branch = submodule
                .branch()
                .map(|branch| format!(" ({branch})"))
                .unwrap_or_default();
            format!("{} {}{branch}", submodule.path(), submodule.url())
        })
        .collect()
}
