// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `push --porcelain` output.
//!
//! ```text
//! To https://example.com/repo.git
//! =\trefs/heads/main:refs/heads/main\t[up to date]
//! !\trefs/heads/dev:refs/heads/dev\t[rejected] (non-fast-forward)
//! Done
//! ```

use serde::Serialize;

use crate::error::{ParseError, RepoResult};
use crate::utility::encoding::split_records;

/// Outcome of one pushed reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PushResultType {
    FastForward,
    ForcedUpdate,
    Deleted,
    Created,
    Rejected,
    UpToDate,
}

impl PushResultType {
    const fn from_flag(flag: u8) -> Option<Self> {
        Some(match flag {
            b' ' => Self::FastForward,
            b'+' => Self::ForcedUpdate,
            b'-' => Self::Deleted,
            b'*' => Self::Created,
            b'!' => Self::Rejected,
            b'=' => Self::UpToDate,
            _ => return None,
        })
    }

    /// The porcelain flag character, e.g. `*` for a new reference.
    #[must_use]
    pub const fn flag(self) -> char {
        match self {
            Self::FastForward => ' ',
            Self::ForcedUpdate => '+',
            Self::Deleted => '-',
            Self::Created => '*',
            Self::Rejected => '!',
            Self::UpToDate => '=',
        }
    }

    /// Whether the remote side changed.
    #[must_use]
    pub const fn changed_remote(self) -> bool {
        !matches!(self, Self::Rejected | Self::UpToDate)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushResult {
    pub kind: PushResultType,
    /// Local reference, empty for deletions.
    pub from: String,
    /// Remote reference.
    pub to: String,
    /// Summary text, e.g. `[up to date]` or `a1b2c3..d4e5f6`.
    pub summary: String,
}

/// Parses the per-reference lines of `push --porcelain`.
///
/// `To <url>` and `Done` lines are skipped.
///
/// # Errors
///
/// `ParseError` for a reference line without `from:to`.
pub fn parse_push_output(text: &str) -> RepoResult<Vec<PushResult>> {
    let mut results = Vec::new();
    for (index, line) in split_records(text, false).enumerate() {
        let bytes = line.as_bytes();
        if bytes.len() < 2 || bytes[1] != b'\t' {
            continue;
        }
        let Some(kind) = PushResultType::from_flag(bytes[0]) else {
            continue;
        };

        let mut fields = line[2..].splitn(2, '\t');
        let refs = fields.next().unwrap_or_default();
        let summary = fields.next().unwrap_or_default();
        let (from, to) = refs.split_once(':').ok_or_else(|| {
            ParseError::new("push", format!("expected from:to, got '{refs}'")).at_line(index + 1)
        })?;

        results.push(PushResult {
            kind,
            from: from.to_string(),
            to: to.to_string(),
            summary: summary.to_string(),
        });
    }
    Ok(results)
}
