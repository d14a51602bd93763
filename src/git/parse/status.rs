// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `status --porcelain -z` output.
//!
//! ```text
//! XY path\0            ordinary entry
//! R  new\0old\0        rename or copy: the source path follows
//! ```

use std::collections::BTreeMap;

use crate::error::{ParseError, RepoResult};
use crate::model::{FileStatus, TreeItemData};

fn status_error(message: impl Into<String>, record: usize) -> crate::error::RepoError {
    ParseError::new("status", message).at_line(record).into()
}

/// Parses porcelain v1 `-z` status into entries keyed by path.
///
/// # Errors
///
/// `ParseError` on an unknown status letter, a record shorter than
/// `XY path`, or a rename without its source path.
pub fn parse_status(text: &str) -> RepoResult<BTreeMap<String, TreeItemData>> {
    let mut items = BTreeMap::new();
    let mut records = text.split('\0').filter(|r| !r.is_empty()).enumerate();

    while let Some((index, record)) = records.next() {
        let record_no = index + 1;
        let bytes = record.as_bytes();
        if bytes.len() < 4 || bytes[2] != b' ' {
            return Err(status_error(format!("malformed record '{record}'"), record_no));
        }

        let code = |byte: u8| {
            FileStatus::from_code(byte).ok_or_else(|| {
                status_error(
                    format!("unexpected status code '{}'", char::from(byte)),
                    record_no,
                )
            })
        };
        let staged = code(bytes[0])?;
        let unstaged = code(bytes[1])?;
        let path = record[3..].to_string();

        let has_source = [staged, unstaged]
            .iter()
            .any(|s| matches!(s, FileStatus::Renamed | FileStatus::Copied));
        let orig_path = if has_source {
            let (_, source) = records
                .next()
                .ok_or_else(|| status_error("rename without source path", record_no))?;
            Some(source.to_string())
        } else {
            None
        };

        items.insert(
            path,
            TreeItemData {
                staged,
                unstaged,
                orig_path,
            },
        );
    }
    Ok(items)
}
