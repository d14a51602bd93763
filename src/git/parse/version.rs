// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `git --version` output.

use regex::Regex;

use crate::error::{ParseError, RepoResult};

/// Four-part git version; missing parts are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GitVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub build: u32,
}

/// Oldest git whose porcelain formats we rely on.
pub const MIN_VERSION: GitVersion = GitVersion::new(1, 7, 0, 2);

impl GitVersion {
    #[must_use]
    pub const fn new(major: u32, minor: u32, patch: u32, build: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            build,
        }
    }

    /// Parses `git version 2.43.0` and vendor variants such as
    /// `git version 2.39.3 (Apple Git-145)` or `2.41.0.windows.1`.
    ///
    /// # Errors
    ///
    /// `ParseError` if no version number is present.
    pub fn parse(text: &str) -> RepoResult<Self> {
        let regex = Regex::new(r"git version (\d+)\.(\d+)(?:\.(\d+))?(?:\.(\d+))?")
            .map_err(|e| ParseError::new("version", format!("invalid pattern: {e}")))?;
        let captures = regex.captures(text).ok_or_else(|| {
            ParseError::new("version", format!("unrecognized output '{}'", text.trim()))
        })?;

        let part = |index: usize| -> RepoResult<u32> {
            captures.get(index).map_or(Ok(0), |m| {
                m.as_str().parse().map_err(|_| {
                    ParseError::new("version", format!("number out of range '{}'", m.as_str()))
                        .into()
                })
            })
        };

        Ok(Self::new(part(1)?, part(2)?, part(3)?, part(4)?))
    }

    #[must_use]
    pub fn is_supported(self) -> bool {
        self >= MIN_VERSION
    }
}

impl std::fmt::Display for GitVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if self.build != 0 {
            write!(f, ".{}", self.build)?;
        }
        Ok(())
    }
}
