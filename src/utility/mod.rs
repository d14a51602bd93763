// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Utility modules.
//!
//! ```text
//! encoding
//!   bytes_to_utf8()   UTF-8/CP1252/CP866/UTF-16 --> UTF-8
//!   split_records()   NUL or newline separated records
//! ```

pub mod encoding;
