// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `reflog show` output.

use crate::error::{ParseError, RepoResult};
use crate::model::ReflogRecordData;
use crate::refs::ObjectId;
use crate::utility::encoding::split_records;

/// Commit id and reflog subject, NUL-separated.
pub const REFLOG_FORMAT: &str = "--format=%H%x00%gs";

/// Parses reflog lines, newest first. The index is the line position.
///
/// # Errors
///
/// `ParseError` for a line without the separator or with a malformed id.
pub fn parse_reflog(text: &str) -> RepoResult<Vec<ReflogRecordData>> {
    split_records(text, false)
        .enumerate()
        .map(|(index, line)| {
            let (id, message) = line.split_once('\0').ok_or_else(|| {
                ParseError::new("reflog", "missing field separator").at_line(index + 1)
            })?;
            if !ObjectId::is_well_formed(id) {
                return Err(ParseError::new("reflog", format!("malformed object id '{id}'"))
                    .at_line(index + 1)
                    .into());
            }
            Ok(ReflogRecordData {
                index,
                target: ObjectId::new(id),
                message: message.to_string(),
            })
        })
        .collect()
}
