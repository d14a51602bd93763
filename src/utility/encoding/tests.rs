// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{Encoding, bytes_to_utf8, split_records};

#[test]
fn test_utf8_passthrough() {
    let input = "Hello, 世界!";
    let result = bytes_to_utf8(Encoding::Utf8, input.as_bytes());
    insta::assert_snapshot!(result, @"Hello, 世界!");
}

#[test]
fn test_invalid_utf8_is_replaced() {
    let result = bytes_to_utf8(Encoding::Utf8, b"ab\xffcd");
    assert_eq!(result, "ab\u{FFFD}cd");
}

#[test]
fn test_windows_1252_conversion() {
    let result = bytes_to_utf8(Encoding::Cp1252, b"caf\xe9");
    insta::assert_snapshot!(result, @"café");
}

#[test]
fn test_utf16_le_conversion() {
    // Trailing odd byte is ignored
    let result = bytes_to_utf8(Encoding::Utf16Le, b"H\x00i\x00!");
    insta::assert_snapshot!(result, @"Hi");
}

#[test]
fn test_split_records_lines() {
    let records: Vec<&str> = split_records("one\r\ntwo\n\nthree", false).collect();
    assert_eq!(records, vec!["one", "two", "three"]);
}

#[test]
fn test_split_records_nul() {
    let records: Vec<&str> = split_records(" M a.txt\0?? b c.txt\0", true).collect();
    assert_eq!(records, vec![" M a.txt", "?? b c.txt"]);
}

#[test]
fn test_encoding_serde_names() {
    let parsed: Encoding = serde_json::from_str("\"cp1252\"").expect("valid encoding");
    assert_eq!(parsed, Encoding::Cp1252);
    assert_eq!(Encoding::Utf16Le.to_string(), "utf16le");
}
