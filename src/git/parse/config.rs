// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `config -z --get-regexp` output: remotes and `.gitmodules`.
//!
//! ```text
//! remote.origin.url\nhttps://example.com/repo.git\0
//! remote.origin.fetch\n+refs/heads/*:refs/remotes/origin/*\0
//! submodule.libs/core.path\nlibs/core\0
//! ```
//!
//! Section and variable names come back lowercased by git; the subsection
//! (remote or submodule name) keeps its case and may contain dots.

use std::collections::BTreeMap;

use tracing::warn;

use crate::error::{ParseError, RepoResult};
use crate::model::{RemoteData, SubmoduleData, TagFetchMode};
use crate::utility::encoding::split_records;

/// One `key value` pair. A key without value (`[section] flag`) has `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    pub key: String,
    pub value: Option<String>,
}

/// Parses `-z` config output.
///
/// # Errors
///
/// `ParseError` for a record with an empty key.
pub fn parse_config_entries(text: &str) -> RepoResult<Vec<ConfigEntry>> {
    split_records(text, true)
        .enumerate()
        .map(|(index, record)| {
            let (key, value) = match record.split_once('\n') {
                Some((key, value)) => (key, Some(value.to_string())),
                None => (record, None),
            };
            if key.trim().is_empty() {
                return Err(ParseError::new("config", "empty key")
                    .at_line(index + 1)
                    .into());
            }
            Ok(ConfigEntry {
                key: key.to_string(),
                value,
            })
        })
        .collect()
}

/// Splits `section.subsection.variable`.
fn split_key<'a>(key: &'a str, section: &str) -> Option<(&'a str, &'a str)> {
    let rest = key.strip_prefix(section)?.strip_prefix('.')?;
    let (name, variable) = rest.rsplit_once('.')?;
    (!name.is_empty()).then_some((name, variable))
}

fn parse_bool(value: Option<&str>) -> bool {
    match value {
        // A bare key means true
        None => true,
        Some(v) => matches!(v.to_ascii_lowercase().as_str(), "true" | "yes" | "on" | "1"),
    }
}

/// Collects `remote.<name>.*` entries into remote data, keyed by name.
#[must_use]
pub fn remotes_from_config(entries: &[ConfigEntry]) -> BTreeMap<String, RemoteData> {
    let mut remotes: BTreeMap<String, RemoteData> = BTreeMap::new();
    for entry in entries {
        let Some((name, variable)) = split_key(&entry.key, "remote") else {
            continue;
        };
        let value = entry.value.as_deref();
        let text = || value.unwrap_or_default().to_string();
        let remote = remotes.entry(name.to_string()).or_default();
        match variable {
            "url" => remote.fetch_url = Some(text()),
            "pushurl" => remote.push_url = Some(text()),
            "fetch" => remote.fetch_refspecs.push(text()),
            "push" => remote.push_refspecs.push(text()),
            "tagopt" => remote.tag_fetch_mode = TagFetchMode::from_config(&text()),
            "mirror" => remote.mirror = parse_bool(value),
            "skipfetchall" => remote.skip_fetch_all = parse_bool(value),
            "proxy" => remote.proxy = Some(text()),
            "receivepack" => remote.receive_pack = Some(text()),
            "uploadpack" => remote.upload_pack = Some(text()),
            _ => {}
        }
    }
    remotes
}

#[derive(Default)]
struct PartialSubmodule {
    path: Option<String>,
    url: Option<String>,
    branch: Option<String>,
}

/// Collects `submodule.<name>.*` entries, keyed by name.
///
/// Declarations without a path or url are incomplete and skipped.
#[must_use]
pub fn submodules_from_config(entries: &[ConfigEntry]) -> BTreeMap<String, SubmoduleData> {
    let mut partial: BTreeMap<String, PartialSubmodule> = BTreeMap::new();
    for entry in entries {
        let Some((name, variable)) = split_key(&entry.key, "submodule") else {
            continue;
        };
        let submodule = partial.entry(name.to_string()).or_default();
        match variable {
            "path" => submodule.path.clone_from(&entry.value),
            "url" => submodule.url.clone_from(&entry.value),
            "branch" => submodule.branch.clone_from(&entry.value),
            _ => {}
        }
    }

    partial
        .into_iter()
        .filter_map(|(name, submodule)| match (submodule.path, submodule.url) {
            (Some(path), Some(url)) => Some((
                name,
                SubmoduleData {
                    path,
                    url,
                    branch: submodule.branch,
                },
            )),
            _ => {
                warn!(submodule = %name, "incomplete declaration in .gitmodules");
                None
            }
        })
        .collect()
}
