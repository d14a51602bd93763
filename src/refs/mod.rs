// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Reference kinds, snapshots of reference positions, and their diff.
//!
//! ```text
//! Snapshot::capture(git, kinds)      refs/heads/*, refs/remotes/*, refs/tags/*
//!        |                                  |
//!        |  ... fetch / pull / prune ...    |
//!        v                                  v
//!     before  ----------- diff() -------> after
//!                           |
//!                           v
//!          [Moved..., Removed..., Added...]   each in name order
//! ```

mod diff;
mod state;

use bitflags::bitflags;
use serde::Serialize;

pub use diff::{ReferenceChange, diff};
pub use state::Snapshot;

bitflags! {
    /// Families of references under `refs/`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ReferenceKinds: u8 {
        const LOCAL_BRANCH = 1 << 0;
        const REMOTE_BRANCH = 1 << 1;
        const TAG = 1 << 2;

        const BRANCHES = Self::LOCAL_BRANCH.bits() | Self::REMOTE_BRANCH.bits();
    }
}

impl ReferenceKinds {
    /// Full-name prefix of a single kind.
    #[must_use]
    pub fn prefix(self) -> Option<&'static str> {
        match self {
            Self::LOCAL_BRANCH => Some("refs/heads/"),
            Self::REMOTE_BRANCH => Some("refs/remotes/"),
            Self::TAG => Some("refs/tags/"),
            _ => None,
        }
    }

    /// `for-each-ref` patterns covering every kind in the set.
    #[must_use]
    pub fn patterns(self) -> Vec<&'static str> {
        self.iter()
            .filter_map(|kind| kind.prefix())
            .map(|prefix| prefix.trim_end_matches('/'))
            .collect()
    }

    /// Kind of a full reference name, if it is one we track.
    #[must_use]
    pub fn classify(full_name: &str) -> Option<Self> {
        [Self::LOCAL_BRANCH, Self::REMOTE_BRANCH, Self::TAG]
            .into_iter()
            .find(|kind| {
                kind.prefix()
                    .is_some_and(|prefix| full_name.starts_with(prefix))
            })
    }
}

/// Strips the kind prefix from a full reference name.
///
/// `refs/remotes/origin/main` becomes `origin/main`; unknown names are
/// returned unchanged.
#[must_use]
pub fn short_name(full_name: &str) -> &str {
    ReferenceKinds::classify(full_name)
        .and_then(ReferenceKinds::prefix)
        .and_then(|prefix| full_name.strip_prefix(prefix))
        .unwrap_or(full_name)
}

/// Git object identifier, kept as the hex text git prints.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn new(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    /// True for a full SHA-1 or SHA-256 hex id.
    #[must_use]
    pub fn is_well_formed(hex: &str) -> bool {
        matches!(hex.len(), 40 | 64) && hex.bytes().all(|b| b.is_ascii_hexdigit())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviation used in human-readable output.
    #[must_use]
    pub fn short(&self) -> &str {
        self.0.get(..7).unwrap_or(&self.0)
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(hex: &str) -> Self {
        Self::new(hex)
    }
}
