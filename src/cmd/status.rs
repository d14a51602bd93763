// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `status` command.

use std::sync::Arc;

use super::print_lines;
use crate::error::Result;
use crate::model::TreeItem;
use crate::repository::Repository;

/// Shows the work tree status in porcelain style.
///
/// # Errors
///
/// Returns an error if `git status` fails.
pub async fn run_status_command(repo: &Repository) -> Result<()> {
    repo.refresh_status().await?;
    print_lines(&format_status(&repo.status().snapshot()));
    Ok(())
}

/// `XY path`, or `XY orig -> path` for renames and copies.
#[must_use]
pub fn format_status(items: &[Arc<TreeItem>]) -> Vec<String> {
    items
        .iter()
        .map(|item| match item.orig_path() {
            Some(orig) => format!("{} {orig} -> {}", item.status_code(), item.path()),
            None => format!("{} {}", item.status_code(), item.path()),
        })
        .collect()
}
