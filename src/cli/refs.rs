// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Reference listing arguments.
//!
//! ```text
//! refs [--kind branch|remote|tag]... [--glob PATTERN]
//! reflog [REF] [-n COUNT]
//! ```

use clap::{Args, ValueEnum};

use crate::refs::ReferenceKinds;

/// Reference kind selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Local branches (refs/heads).
    Branch,
    /// Remote-tracking branches (refs/remotes).
    Remote,
    /// Tags (refs/tags).
    Tag,
}

impl From<KindArg> for ReferenceKinds {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Branch => Self::LOCAL_BRANCH,
            KindArg::Remote => Self::REMOTE_BRANCH,
            KindArg::Tag => Self::TAG,
        }
    }
}

/// Arguments for the `refs` command.
#[derive(Debug, Clone, Default, Args)]
pub struct RefsArgs {
    /// Kinds to list. Can be specified multiple times; default is all.
    #[arg(short = 'k', long = "kind", value_enum, action = clap::ArgAction::Append)]
    pub kinds: Vec<KindArg>,

    /// Only lists references whose full name matches this glob, e.g.
    /// 'refs/remotes/origin/*'.
    #[arg(short = 'g', long, value_name = "PATTERN")]
    pub glob: Option<String>,
}

impl RefsArgs {
    /// Selected kinds; every kind when none was given.
    #[must_use]
    pub fn reference_kinds(&self) -> ReferenceKinds {
        if self.kinds.is_empty() {
            return ReferenceKinds::all();
        }
        self.kinds
            .iter()
            .fold(ReferenceKinds::empty(), |kinds, kind| kinds | (*kind).into())
    }
}

/// Arguments for the `reflog` command.
#[derive(Debug, Clone, Args)]
pub struct ReflogArgs {
    /// Reference whose reflog is shown.
    #[arg(value_name = "REF", default_value = "HEAD")]
    pub reference: String,

    /// Shows at most this many records.
    #[arg(short = 'n', long = "max-count", value_name = "COUNT")]
    pub max_count: Option<usize>,
}
