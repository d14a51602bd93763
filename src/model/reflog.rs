// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Reflog entries of one reference.

use crate::cache::{ObjectCell, domain_object};
use crate::refs::ObjectId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflogRecordData {
    /// Position in the reflog, 0 being the newest entry.
    pub index: usize,
    pub target: ObjectId,
    pub message: String,
}

/// One reflog entry, keyed as `refs/heads/main@{n}`.
pub struct ReflogRecord(ObjectCell<ReflogRecordData>);

domain_object!(ReflogRecord, ReflogRecordData, "reflog record");

impl ReflogRecord {
    /// Key of the `index`-th entry of `reference`.
    #[must_use]
    pub fn key(reference: &str, index: usize) -> String {
        format!("{reference}@{{{index}}}")
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.0.with(|data| data.index)
    }

    #[must_use]
    pub fn target(&self) -> ObjectId {
        self.0.with(|data| data.target.clone())
    }

    #[must_use]
    pub fn message(&self) -> String {
        self.0.with(|data| data.message.clone())
    }
}
