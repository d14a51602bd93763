// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::*;
use crate::error::ErrorKind;
use crate::model::{FileStatus, TagFetchMode};
use crate::refs::ObjectId;

const A: &str = "1111111111111111111111111111111111111111";
const B: &str = "2222222222222222222222222222222222222222";
const C: &str = "3333333333333333333333333333333333333333";

fn ref_line(name: &str, object: &str, peeled: &str, upstream: &str, head: &str) -> String {
    format!("{name}\0{object}\0{peeled}\0{upstream}\0{head}\0\n")
}

fn symref_line(name: &str, object: &str, target: &str) -> String {
    format!("{name}\0{object}\0\0\0 \0{target}\n")
}

// --- for-each-ref ---

#[test]
fn test_for_each_ref_records() {
    let text = [
        ref_line("refs/heads/main", A, "", "refs/remotes/origin/main", "*"),
        ref_line("refs/heads/topic", B, "", "", " "),
        symref_line("refs/remotes/origin/HEAD", A, "refs/remotes/origin/main"),
        ref_line("refs/remotes/origin/main", A, "", "", " "),
        ref_line("refs/tags/v1.0", C, A, "", " "),
        ref_line("refs/tags/light", B, "", "", " "),
    ]
    .concat();

    let records = parse_for_each_ref(&text).expect("parse");
    assert_eq!(records.len(), 6);
    assert!(records[0].is_head);
    assert!(records[2].is_symbolic());
    assert_eq!(records[2].symref.as_deref(), Some("refs/remotes/origin/main"));
    assert_eq!(records[0].upstream.as_deref(), Some("refs/remotes/origin/main"));
    assert_eq!(records[4].peeled, Some(ObjectId::new(A)));

    let maps = RefMaps::from_records(records);
    assert_eq!(maps.branches.keys().collect::<Vec<_>>(), ["main", "topic"]);
    assert!(maps.branches["main"].is_current);
    assert!(!maps.branches["topic"].is_current);
    assert_eq!(maps.remote_branches.keys().collect::<Vec<_>>(), ["origin/main"]);

    let annotated = &maps.tags["v1.0"];
    assert_eq!(annotated.target, ObjectId::new(A));
    assert_eq!(annotated.tag_object, Some(ObjectId::new(C)));
    assert_eq!(maps.tags["light"].tag_object, None);
}

#[test]
fn test_remote_branch_named_head_is_kept() {
    let text = [
        symref_line("refs/remotes/origin/HEAD", A, "refs/remotes/origin/main"),
        ref_line("refs/remotes/origin/feature/HEAD", B, "", "", " "),
        ref_line("refs/remotes/origin/main", A, "", "", " "),
    ]
    .concat();

    let maps = RefMaps::from_records(parse_for_each_ref(&text).expect("parse"));
    assert_eq!(
        maps.remote_branches.keys().collect::<Vec<_>>(),
        ["origin/feature/HEAD", "origin/main"]
    );
    assert_eq!(maps.remote_branches["origin/feature/HEAD"].target, ObjectId::new(B));
}

#[test]
fn test_for_each_ref_rejects_short_line() {
    let text = format!("{}refs/heads/broken\0{A}\n", ref_line("refs/heads/ok", A, "", "", " "));
    let err = parse_for_each_ref(&text).expect_err("must fail");
    assert_eq!(err.kind(), ErrorKind::Parse);
    insta::assert_snapshot!(err.to_string(), @"parse error: for-each-ref (line 2): expected 6 fields, got 2");
}

#[test]
fn test_for_each_ref_rejects_bad_object_id() {
    let text = ref_line("refs/heads/main", "not-a-sha", "", "", " ");
    assert!(parse_for_each_ref(&text).is_err());
}

#[test]
fn test_for_each_ref_empty_output() {
    assert!(parse_for_each_ref("").expect("parse").is_empty());
}

// --- config ---

#[test]
fn test_remotes_from_config() {
    let text = [
        "remote.origin.url\nhttps://example.com/repo.git",
        "remote.origin.fetch\n+refs/heads/*:refs/remotes/origin/*",
        "remote.origin.tagopt\n--no-tags",
        "remote.up.stream.url\ngit@example.com:up.git",
        "remote.up.stream.pushurl\ngit@example.com:push.git",
        "remote.up.stream.mirror\ntrue",
        "remote.up.stream.skipfetchall",
        "remote.up.stream.proxy\nhttp://proxy:8080",
    ]
    .join("\0");

    let entries = parse_config_entries(&text).expect("parse");
    assert_eq!(entries[6].value, None);

    let remotes = remotes_from_config(&entries);
    assert_eq!(remotes.keys().collect::<Vec<_>>(), ["origin", "up.stream"]);

    let origin = &remotes["origin"];
    assert_eq!(origin.fetch_url.as_deref(), Some("https://example.com/repo.git"));
    assert_eq!(origin.push_url, None);
    assert_eq!(origin.fetch_refspecs, ["+refs/heads/*:refs/remotes/origin/*"]);
    assert_eq!(origin.tag_fetch_mode, TagFetchMode::NoTags);
    assert!(!origin.mirror);

    let upstream = &remotes["up.stream"];
    assert_eq!(upstream.push_url.as_deref(), Some("git@example.com:push.git"));
    assert!(upstream.mirror);
    assert!(upstream.skip_fetch_all);
    assert_eq!(upstream.proxy.as_deref(), Some("http://proxy:8080"));
    assert_eq!(upstream.tag_fetch_mode, TagFetchMode::Default);
}

#[test]
fn test_submodules_from_config_skips_incomplete() {
    let text = [
        "submodule.core.path\nlibs/core",
        "submodule.core.url\nhttps://example.com/core.git",
        "submodule.core.branch\nstable",
        "submodule.half.path\nlibs/half",
    ]
    .join("\0");

    let entries = parse_config_entries(&text).expect("parse");
    let submodules = submodules_from_config(&entries);
    assert_eq!(submodules.len(), 1);
    let core = &submodules["core"];
    assert_eq!(core.path, "libs/core");
    assert_eq!(core.branch.as_deref(), Some("stable"));
}

#[test]
fn test_config_entry_with_empty_key_fails() {
    assert!(parse_config_entries("\nvalue\0").is_err());
}

// --- status ---

#[test]
fn test_status_entries() {
    let text = "M  staged.rs\0 M edited.rs\0?? new.txt\0R  renamed.rs\0old.rs\0 D gone.rs\0UU conflict.rs\0";
    let items = parse_status(text).expect("parse");

    assert_eq!(
        items.keys().collect::<Vec<_>>(),
        ["conflict.rs", "edited.rs", "gone.rs", "new.txt", "renamed.rs", "staged.rs"]
    );
    assert_eq!(items["staged.rs"].staged, FileStatus::Modified);
    assert_eq!(items["staged.rs"].unstaged, FileStatus::Unmodified);
    assert_eq!(items["edited.rs"].unstaged, FileStatus::Modified);
    assert_eq!(items["new.txt"].unstaged, FileStatus::Untracked);
    assert_eq!(items["renamed.rs"].orig_path.as_deref(), Some("old.rs"));
    assert_eq!(items["gone.rs"].unstaged, FileStatus::Removed);
    assert_eq!(items["conflict.rs"].staged, FileStatus::Unmerged);
}

#[test]
fn test_status_path_with_spaces() {
    let items = parse_status("?? my file.txt\0").expect("parse");
    assert!(items.contains_key("my file.txt"));
}

#[test]
fn test_status_unknown_code_fails() {
    let err = parse_status("M  ok.rs\0QQ bad.rs\0").expect_err("must fail");
    insta::assert_snapshot!(err.to_string(), @"parse error: status (line 2): unexpected status code 'Q'");
}

#[test]
fn test_status_rename_without_source_fails() {
    assert!(parse_status("R  renamed.rs\0").is_err());
}

// --- reflog ---

#[test]
fn test_reflog_records() {
    let text = format!("{A}\0commit: second\n{B}\0commit (initial): first\n");
    let records = parse_reflog(&text).expect("parse");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].index, 0);
    assert_eq!(records[0].target, ObjectId::new(A));
    assert_eq!(records[1].message, "commit (initial): first");
}

#[test]
fn test_reflog_missing_separator_fails() {
    assert!(parse_reflog(&format!("{A} no separator\n")).is_err());
}

// --- push ---

#[test]
fn test_push_output() {
    let text = "To https://example.com/repo.git\n\
                =\trefs/heads/main:refs/heads/main\t[up to date]\n\
                \x20\trefs/heads/dev:refs/heads/dev\t1111111..2222222\n\
                !\trefs/heads/old:refs/heads/old\t[rejected] (non-fast-forward)\n\
                *\trefs/heads/new:refs/heads/new\t[new branch]\n\
                Done\n";
    let results = parse_push_output(text).expect("parse");
    let kinds: Vec<PushResultType> = results.iter().map(|r| r.kind).collect();
    assert_eq!(
        kinds,
        [
            PushResultType::UpToDate,
            PushResultType::FastForward,
            PushResultType::Rejected,
            PushResultType::Created,
        ]
    );
    assert_eq!(results[2].summary, "[rejected] (non-fast-forward)");
    assert!(!results[0].kind.changed_remote());
    assert!(results[1].kind.changed_remote());
    let flags: String = kinds.iter().map(|kind| kind.flag()).collect();
    assert_eq!(flags, "= !*");
}

// --- version ---

#[test]
fn test_version_parse() {
    assert_eq!(
        GitVersion::parse("git version 2.43.0\n").expect("parse"),
        GitVersion::new(2, 43, 0, 0)
    );
    assert_eq!(
        GitVersion::parse("git version 2.41.0.windows.1").expect("parse"),
        GitVersion::new(2, 41, 0, 0)
    );
    assert_eq!(
        GitVersion::parse("git version 1.7.0.2").expect("parse"),
        MIN_VERSION
    );
    assert!(GitVersion::parse("hg version 6").is_err());
}

#[test]
fn test_version_support_boundary() {
    assert!(MIN_VERSION.is_supported());
    assert!(GitVersion::new(2, 0, 0, 0).is_supported());
    assert!(!GitVersion::new(1, 7, 0, 1).is_supported());
    assert_eq!(GitVersion::new(1, 7, 0, 2).to_string(), "1.7.0.2");
    assert_eq!(GitVersion::new(2, 43, 0, 0).to_string(), "2.43.0");
}
