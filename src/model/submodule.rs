// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cache::{ObjectCell, domain_object};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmoduleData {
    /// Path relative to the work tree root.
    pub path: String,
    pub url: String,
    pub branch: Option<String>,
}

/// Submodule declared in `.gitmodules`, keyed by its name.
pub struct Submodule(ObjectCell<SubmoduleData>);

domain_object!(Submodule, SubmoduleData, "submodule");

impl Submodule {
    #[must_use]
    pub fn path(&self) -> String {
        self.0.with(|data| data.path.clone())
    }

    #[must_use]
    pub fn url(&self) -> String {
        self.0.with(|data| data.url.clone())
    }

    #[must_use]
    pub fn branch(&self) -> Option<String> {
        self.0.with(|data| data.branch.clone())
    }

    pub(crate) fn has_path(&self, path: &str) -> bool {
        self.0.with(|data| data.path == path)
    }

    pub(crate) fn has_url(&self, url: &str) -> bool {
        self.0.with(|data| data.url == url)
    }
}
