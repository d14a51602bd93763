// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Remotes as configured under `remote.<name>.*`.

use serde::Serialize;

use crate::cache::{ObjectCell, domain_object};

/// Value of `remote.<name>.tagopt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TagFetchMode {
    /// Tags pointing into fetched history.
    #[default]
    Default,
    /// `--tags`
    AllTags,
    /// `--no-tags`
    NoTags,
}

impl TagFetchMode {
    #[must_use]
    pub fn from_config(value: &str) -> Self {
        match value {
            "--tags" => Self::AllTags,
            "--no-tags" => Self::NoTags,
            _ => Self::Default,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RemoteData {
    /// `remote.<name>.url`
    pub fetch_url: Option<String>,
    /// `remote.<name>.pushurl`, only when set explicitly.
    pub push_url: Option<String>,
    pub fetch_refspecs: Vec<String>,
    pub push_refspecs: Vec<String>,
    pub tag_fetch_mode: TagFetchMode,
    pub mirror: bool,
    pub skip_fetch_all: bool,
    pub proxy: Option<String>,
    pub receive_pack: Option<String>,
    pub upload_pack: Option<String>,
}

/// Configured remote repository.
pub struct Remote(ObjectCell<RemoteData>);

domain_object!(Remote, RemoteData, "remote");

impl Remote {
    #[must_use]
    pub fn fetch_url(&self) -> Option<String> {
        self.0.with(|data| data.fetch_url.clone())
    }

    /// URL git pushes to: the explicit push URL, else the fetch URL.
    #[must_use]
    pub fn push_url(&self) -> Option<String> {
        self.0
            .with(|data| data.push_url.clone().or_else(|| data.fetch_url.clone()))
    }

    /// True when `remote.<name>.pushurl` is set.
    #[must_use]
    pub fn has_explicit_push_url(&self) -> bool {
        self.0.with(|data| data.push_url.is_some())
    }

    #[must_use]
    pub fn fetch_refspecs(&self) -> Vec<String> {
        self.0.with(|data| data.fetch_refspecs.clone())
    }

    #[must_use]
    pub fn push_refspecs(&self) -> Vec<String> {
        self.0.with(|data| data.push_refspecs.clone())
    }

    #[must_use]
    pub fn tag_fetch_mode(&self) -> TagFetchMode {
        self.0.with(|data| data.tag_fetch_mode)
    }

    #[must_use]
    pub fn is_mirror(&self) -> bool {
        self.0.with(|data| data.mirror)
    }

    #[must_use]
    pub fn skips_fetch_all(&self) -> bool {
        self.0.with(|data| data.skip_fetch_all)
    }

    #[must_use]
    pub fn proxy(&self) -> Option<String> {
        self.0.with(|data| data.proxy.clone())
    }

    #[must_use]
    pub fn receive_pack(&self) -> Option<String> {
        self.0.with(|data| data.receive_pack.clone())
    }

    #[must_use]
    pub fn upload_pack(&self) -> Option<String> {
        self.0.with(|data| data.upload_pack.clone())
    }
}
