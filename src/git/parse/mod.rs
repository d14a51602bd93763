// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Parsers for git output.
//!
//! ```text
//! decoded text --> parse_*() --> RepoResult<records | BTreeMap<key, Data>>
//! ```
//!
//! Parsers are pure: they see only decoded text and either return every
//! record or a `ParseError` naming the record that failed. Callers reconcile
//! only after a parser succeeded.

pub mod config;
pub mod push;
pub mod reflog;
pub mod refs;
pub mod status;
pub mod version;
#[cfg(test)]
mod tests;

pub use config::{ConfigEntry, parse_config_entries, remotes_from_config, submodules_from_config};
pub use push::{PushResult, PushResultType, parse_push_output};
pub use reflog::{REFLOG_FORMAT, parse_reflog};
pub use refs::{FOR_EACH_REF_FORMAT, RefMaps, RefRecord, parse_for_each_ref};
pub use status::parse_status;
pub use version::{GitVersion, MIN_VERSION};
