// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Decoding of captured process output.
//!
//! ```text
//! git stdout (bytes) --(Encoding)--> UTF-8 --(split_records)--> records
//! ```
//!
//! The gateway never decodes; parsers call into this module with the
//! encoding configured under `[git] output_encoding`. Invalid sequences
//! become U+FFFD.

use encoding_rs::{IBM866, WINDOWS_1252};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Encoding of bytes produced by an external program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// UTF-8, lossy.
    #[default]
    Utf8,
    /// UTF-16 little endian.
    Utf16Le,
    /// Windows-1252.
    Cp1252,
    /// IBM866 OEM code page.
    Oem,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Utf8 => "utf8",
            Self::Utf16Le => "utf16le",
            Self::Cp1252 => "cp1252",
            Self::Oem => "oem",
        };
        f.write_str(name)
    }
}

/// Converts bytes from the given encoding to UTF-8.
///
/// # Example
/// ```
/// use repograph::utility::encoding::{bytes_to_utf8, Encoding};
///
/// let cp1252_bytes = b"caf\xe9";
/// assert_eq!(bytes_to_utf8(Encoding::Cp1252, cp1252_bytes), "café");
/// ```
#[must_use]
pub fn bytes_to_utf8(encoding: Encoding, bytes: &[u8]) -> Cow<'_, str> {
    match encoding {
        Encoding::Utf8 => String::from_utf8_lossy(bytes),
        Encoding::Utf16Le => utf16_le_to_utf8(bytes),
        Encoding::Cp1252 => WINDOWS_1252.decode_without_bom_handling(bytes).0,
        Encoding::Oem => IBM866.decode_without_bom_handling(bytes).0,
    }
}

fn utf16_le_to_utf8(bytes: &[u8]) -> Cow<'static, str> {
    // A trailing odd byte is dropped
    let len = bytes.len() & !1;
    if len == 0 {
        return Cow::Borrowed("");
    }

    let units: Vec<u16> = bytes[..len]
        .chunks_exact(2)
        .map(|chunk| u16::from_le_bytes([chunk[0], chunk[1]]))
        .collect();

    Cow::Owned(String::from_utf16_lossy(&units))
}

/// Splits decoded output into records.
///
/// With `nul_separated` the text is split on `\0` (the `-z` porcelain
/// formats); otherwise on line endings, accepting both LF and CRLF. Empty
/// records are dropped.
pub fn split_records(text: &str, nul_separated: bool) -> impl Iterator<Item = &str> {
    let records: Box<dyn Iterator<Item = &str>> = if nul_separated {
        Box::new(text.split('\0'))
    } else {
        Box::new(text.lines())
    };
    records.filter(|record| !record.is_empty())
}

#[cfg(test)]
mod tests;
