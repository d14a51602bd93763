// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git accessor: every read and write of repository state goes through here.
//!
//! ```text
//!          Repository
//!               |
//!        ,------v------,
//!        |   GitCli    |  executable (which), work dir, env, timeout
//!        '--+-------+--'
//!           |       |
//!     query.rs     cmd.rs
//!   for-each-ref   fetch/pull/push/remote prune
//!   config         remote add/remove/rename/set-url
//!   status         branch/tag, add/reset/checkout/rm
//!   reflog         update-index, submodule
//!           |       |
//!           v       v
//!      ProcessBuilder (core::process)
//!           |
//!           v
//!     parse/*  bytes --> typed records
//! ```
//!
//! Every invocation runs with `GIT_TERMINAL_PROMPT=0`, `GCM_INTERACTIVE=never`
//! and `LC_ALL=C` so git never blocks on a prompt and its messages stay
//! parseable.

mod accessor;
mod cmd;
pub mod parse;
mod query;

pub use accessor::GitCli;
pub use cmd::PushOptions;
pub use parse::{GitVersion, MIN_VERSION, PushResult, PushResultType, RefRecord};
