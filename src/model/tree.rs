// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Working tree entries from `status --porcelain`.

use serde::Serialize;

use crate::cache::{ObjectCell, domain_object};

/// One side (index or work tree) of a porcelain status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    #[default]
    Unmodified,
    Modified,
    TypeChanged,
    Added,
    Removed,
    Renamed,
    Copied,
    Unmerged,
    Untracked,
    Ignored,
}

impl FileStatus {
    /// Maps a porcelain status letter.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            b' ' => Self::Unmodified,
            b'M' => Self::Modified,
            b'T' => Self::TypeChanged,
            b'A' => Self::Added,
            b'D' => Self::Removed,
            b'R' => Self::Renamed,
            b'C' => Self::Copied,
            b'U' => Self::Unmerged,
            b'?' => Self::Untracked,
            b'!' => Self::Ignored,
            _ => return None,
        })
    }

    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Unmodified => ' ',
            Self::Modified => 'M',
            Self::TypeChanged => 'T',
            Self::Added => 'A',
            Self::Removed => 'D',
            Self::Renamed => 'R',
            Self::Copied => 'C',
            Self::Unmerged => 'U',
            Self::Untracked => '?',
            Self::Ignored => '!',
        }
    }

    /// Whether this side records an actual change.
    #[must_use]
    pub const fn is_change(self) -> bool {
        !matches!(self, Self::Unmodified | Self::Untracked | Self::Ignored)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TreeItemData {
    pub staged: FileStatus,
    pub unstaged: FileStatus,
    /// Source path of a rename or copy.
    pub orig_path: Option<String>,
}

/// Changed, untracked or conflicted path in the work tree.
pub struct TreeItem(ObjectCell<TreeItemData>);

domain_object!(TreeItem, TreeItemData, "tree item");

impl TreeItem {
    /// Path relative to the work tree root.
    #[must_use]
    pub fn path(&self) -> String {
        self.0.lifetime().name()
    }

    #[must_use]
    pub fn staged_status(&self) -> FileStatus {
        self.0.with(|data| data.staged)
    }

    #[must_use]
    pub fn unstaged_status(&self) -> FileStatus {
        self.0.with(|data| data.unstaged)
    }

    #[must_use]
    pub fn orig_path(&self) -> Option<String> {
        self.0.with(|data| data.orig_path.clone())
    }

    #[must_use]
    pub fn is_untracked(&self) -> bool {
        self.0.with(|data| data.unstaged == FileStatus::Untracked)
    }

    #[must_use]
    pub fn is_staged(&self) -> bool {
        self.0.with(|data| data.staged.is_change())
    }

    /// Unstaged content a revert can restore from the index.
    #[must_use]
    pub fn is_revertible(&self) -> bool {
        self.0.with(|data| {
            matches!(data.unstaged, FileStatus::Modified | FileStatus::Removed)
        })
    }

    /// Porcelain-style two letter code, e.g. `M ` or `??`.
    #[must_use]
    pub fn status_code(&self) -> String {
        self.0
            .with(|data| format!("{}{}", data.staged.code(), data.unstaged.code()))
    }
}
