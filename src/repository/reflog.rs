// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::BTreeMap;
use std::sync::Arc;

use super::Repository;
use crate::cache::ObjectCollection;
use crate::error::RepoResult;
use crate::model::ReflogRecord;

impl Repository {
    /// Reflog of `reference`, refreshed on every call.
    ///
    /// `reference` is resolved to its full name first, so `main` and
    /// `refs/heads/main` share one collection. Records that keep their
    /// position keep their identity between calls. Keys are
    /// `refs/heads/main@{n}`. Deleting or renaming the branch or tag drops
    /// the collection.
    ///
    /// # Errors
    ///
    /// Git failures (unknown reference) or parse failures; the collection
    /// keeps its previous content then.
    pub async fn reflog(&self, reference: &str) -> RepoResult<Arc<ObjectCollection<ReflogRecord>>> {
        let full_name = self.git().full_ref_name(reference).await?;
        let records = self.git().reflog(&full_name).await?;
        let fresh: BTreeMap<String, _> = records
            .into_iter()
            .map(|record| (ReflogRecord::key(&full_name, record.index), record))
            .collect();

        let collection = self.reflog_collection(&full_name);
        collection.reconcile(fresh);
        Ok(collection)
    }
}
