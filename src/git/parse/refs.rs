// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `for-each-ref` output.

use std::collections::BTreeMap;

use crate::error::{ParseError, RepoResult};
use crate::model::{BranchData, RemoteBranchData, TagData};
use crate::refs::{ObjectId, ReferenceKinds, short_name};
use crate::utility::encoding::split_records;

/// Six NUL-separated fields per line.
pub const FOR_EACH_REF_FORMAT: &str =
    "--format=%(refname)%00%(objectname)%00%(*objectname)%00%(upstream)%00%(HEAD)%00%(symref)";

/// One line of `for-each-ref`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefRecord {
    /// Full name, e.g. `refs/heads/main`.
    pub name: String,
    pub object: ObjectId,
    /// Commit behind an annotated tag.
    pub peeled: Option<ObjectId>,
    /// Full name of the configured upstream.
    pub upstream: Option<String>,
    pub is_head: bool,
    /// Target of a symbolic reference such as `refs/remotes/origin/HEAD`.
    pub symref: Option<String>,
}

impl RefRecord {
    #[must_use]
    pub const fn is_symbolic(&self) -> bool {
        self.symref.is_some()
    }
}

fn object_id(field: &str, line: usize) -> RepoResult<ObjectId> {
    if ObjectId::is_well_formed(field) {
        Ok(ObjectId::new(field))
    } else {
        Err(ParseError::new("for-each-ref", format!("malformed object id '{field}'"))
            .at_line(line)
            .into())
    }
}

/// Parses `for-each-ref` output produced with [`FOR_EACH_REF_FORMAT`].
///
/// # Errors
///
/// `ParseError` on the first line without six fields or with a malformed
/// object id.
pub fn parse_for_each_ref(text: &str) -> RepoResult<Vec<RefRecord>> {
    let mut records = Vec::new();
    for (index, line) in split_records(text, false).enumerate() {
        let line_no = index + 1;
        let fields: Vec<&str> = line.split('\0').collect();
        let [name, object, peeled, upstream, head, symref] = fields[..] else {
            return Err(ParseError::new(
                "for-each-ref",
                format!("expected 6 fields, got {}", fields.len()),
            )
            .at_line(line_no)
            .into());
        };
        if name.is_empty() {
            return Err(ParseError::new("for-each-ref", "empty reference name")
                .at_line(line_no)
                .into());
        }

        records.push(RefRecord {
            name: name.to_string(),
            object: object_id(object, line_no)?,
            peeled: if peeled.is_empty() {
                None
            } else {
                Some(object_id(peeled, line_no)?)
            },
            upstream: (!upstream.is_empty()).then(|| upstream.to_string()),
            is_head: head == "*",
            symref: (!symref.is_empty()).then(|| symref.to_string()),
        });
    }
    Ok(records)
}

/// Reference records split per entity kind, keyed by short name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefMaps {
    pub branches: BTreeMap<String, BranchData>,
    pub remote_branches: BTreeMap<String, RemoteBranchData>,
    pub tags: BTreeMap<String, TagData>,
}

impl RefMaps {
    /// Sorts records into per-kind maps. Symbolic refs such as
    /// `origin/HEAD` are skipped.
    #[must_use]
    pub fn from_records(records: Vec<RefRecord>) -> Self {
        let mut maps = Self::default();
        for record in records.into_iter().filter(|record| !record.is_symbolic()) {
            let Some(kind) = ReferenceKinds::classify(&record.name) else {
                continue;
            };
            let short = short_name(&record.name).to_string();
            match kind {
                ReferenceKinds::LOCAL_BRANCH => {
                    maps.branches.insert(
                        short,
                        BranchData {
                            target: record.object,
                            upstream: record.upstream,
                            is_current: record.is_head,
                        },
                    );
                }
                ReferenceKinds::REMOTE_BRANCH => {
                    maps.remote_branches.insert(
                        short,
                        RemoteBranchData {
                            target: record.object,
                        },
                    );
                }
                ReferenceKinds::TAG => {
                    let data = match record.peeled {
                        Some(commit) => TagData {
                            target: commit,
                            tag_object: Some(record.object),
                        },
                        None => TagData {
                            target: record.object,
                            tag_object: None,
                        },
                    };
                    maps.tags.insert(short, data);
                }
                _ => {}
            }
        }
        maps
    }
}
