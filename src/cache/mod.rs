// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Object collection cache.
//!
//! ```text
//! git output --parse--> BTreeMap<key, Data> --reconcile--> ObjectCollection<T>
//!                                                           |  Arc<T> per key
//!                                                           v
//!                                       CollectionListener: added/updated/removed/renamed
//!                                       RepositoryMonitor:  one kind per collection
//! ```
//!
//! Parsing happens before `reconcile`; a parse failure never reaches the
//! collection, which keeps its previous state and emits nothing.

mod collection;
mod object;
mod reconcile;
#[cfg(test)]
mod tests;

pub use collection::{CollectionListener, ObjectCollection};
pub(crate) use object::domain_object;
pub use object::{DomainObject, ObjectCell, ObjectLifetime};
pub use reconcile::{CollectionEvent, ReconcileReport, reconcile_map};
