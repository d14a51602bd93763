// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Immutable map of reference positions.

use std::collections::BTreeMap;

use super::{ObjectId, ReferenceKinds};
use crate::error::RepoResult;
use crate::git::GitCli;
use crate::git::parse::RefRecord;

/// Full reference name to object id, for a set of reference kinds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    kinds: ReferenceKinds,
    refs: BTreeMap<String, ObjectId>,
}

impl Snapshot {
    /// Builds a snapshot from known positions, dropping names outside `kinds`.
    pub fn from_map<I, K, V>(kinds: ReferenceKinds, refs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ObjectId>,
    {
        let refs = refs
            .into_iter()
            .map(|(name, id)| (name.into(), id.into()))
            .filter(|(name, _)| {
                ReferenceKinds::classify(name).is_some_and(|kind| kinds.contains(kind))
            })
            .collect();
        Self { kinds, refs }
    }

    /// Queries git for the current position of every reference in `kinds`.
    ///
    /// # Errors
    ///
    /// Fails if `for-each-ref` cannot run or its output cannot be parsed.
    pub async fn capture(git: &GitCli, kinds: ReferenceKinds) -> RepoResult<Self> {
        let records = git.for_each_ref(kinds).await?;
        Ok(Self::from_records(kinds, &records))
    }

    /// Like [`from_map`](Self::from_map) over `for-each-ref` records.
    /// Symbolic refs such as `refs/remotes/origin/HEAD` are skipped.
    pub fn from_records(kinds: ReferenceKinds, records: &[RefRecord]) -> Self {
        Self::from_map(
            kinds,
            records
                .iter()
                .filter(|record| !record.is_symbolic())
                .map(|record| (record.name.clone(), record.object.clone())),
        )
    }

    #[must_use]
    pub const fn kinds(&self) -> ReferenceKinds {
        self.kinds
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ObjectId> {
        self.refs.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.refs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ObjectId)> {
        self.refs.iter().map(|(name, id)| (name.as_str(), id))
    }

    pub(super) fn names(&self) -> impl Iterator<Item = &str> {
        self.refs.keys().map(String::as_str)
    }
}
