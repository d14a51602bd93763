// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `refs` and `reflog` commands.

use std::sync::Arc;

use anyhow::Context;
use wax::{Glob, Program};

use super::print_lines;
use crate::cache::DomainObject;
use crate::cli::refs::{RefsArgs, ReflogArgs};
use crate::error::Result;
use crate::model::ReflogRecord;
use crate::refs::{ReferenceKinds, short_name};
use crate::repository::Repository;

/// Lists references of the selected kinds.
///
/// # Errors
///
/// Returns an error for an invalid glob or if the references cannot be read.
pub async fn run_refs_command(args: &RefsArgs, repo: &Repository) -> Result<()> {
    let glob = args
        .glob
        .as_deref()
        .map(|pattern| {
            Glob::new(pattern).with_context(|| format!("Invalid glob pattern: {pattern}"))
        })
        .transpose()?;

    let kinds = args.reference_kinds();
    repo.refresh_refs(kinds).await?;

    let lines = format_refs(repo, kinds, |name| {
        glob.as_ref().is_none_or(|glob| glob.is_match(name))
    });
    print_lines(&lines);
    Ok(())
}

/// One line per reference: current-branch marker, short id, full name.
///
/// `matches` filters on the full name, e.g. `refs/tags/v1`.
pub fn format_refs(
    repo: &Repository,
    kinds: ReferenceKinds,
    matches: impl Fn(&str) -> bool,
) -> Vec<String> {
    let mut lines = Vec::new();

    if kinds.contains(ReferenceKinds::LOCAL_BRANCH) {
        for branch in repo.branches().snapshot() {
            let full_name = branch.full_name();
            if !matches(&full_name) {
                continue;
            }
            let marker = if branch.is_current() { '*' } else { ' ' };
            let upstream = branch
                .upstream()
                .map(|upstream| format!(" [{}]", short_name(&upstream)))
                .unwrap_or_default();
            lines.push(format!("{marker} {} {full_name}{upstream}", branch.target().short()));
        }
    }

    if kinds.contains(ReferenceKinds::REMOTE_BRANCH) {
        for branch in repo.remote_branches().snapshot() {
            let full_name = branch.full_name();
            if matches(&full_name) {
                lines.push(format!("  {} {full_name}", branch.target().short()));
            }
        }
    }

    if kinds.contains(ReferenceKinds::TAG) {
        for tag in repo.tags().snapshot() {
            let full_name = tag.full_name();
            if !matches(&full_name) {
                continue;
            }
            let annotated = if tag.is_annotated() { " (annotated)" } else { "" };
            lines.push(format!("  {} {full_name}{annotated}", tag.target().short()));
        }
    }

    lines
}

/// Shows the reflog of a reference, newest first.
///
/// # Errors
///
/// Returns an error if the reference has no reflog.
pub async fn run_reflog_command(args: &ReflogArgs, repo: &Repository) -> Result<()> {
    let reflog = repo.reflog(&args.reference).await?;
    print_lines(&format_reflog(&reflog.snapshot(), args.max_count));
    Ok(())
}

/// `<short id> <ref>@{n}: <message>`, ordered by position.
#[must_use]
pub fn format_reflog(records: &[Arc<ReflogRecord>], max_count: Option<usize>) -> Vec<String> {
    let mut records = records.to_vec();
    records.sort_by_key(|record| record.index());
    records
        .iter()
        .take(max_count.unwrap_or(usize::MAX))
        .map(|record| {
            format!(
                "{} {}: {}",
                record.target().short(),
                record.name(),
                record.message()
            )
        })
        .collect()
}
