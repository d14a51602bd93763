// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |          refs / remote / status
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |         repository        |
//!              |  open, load, fetch/pull/  |
//!              |  push/prune, mutations    |
//!              '--+--------+--------+------'
//!                 |        |        |
//!                 v        v        v
//!              model     refs     notify
//!            Branch..  Snapshot   monitor +
//!               |       + diff    gate
//!               v
//!             cache  ObjectCollection, reconcile
//!
//!   +-----------------------------------------+
//!   |  git     GitCli, queries, output parse  |
//!   +-----------------------------------------+
//!   |  core    process, operation framework   |
//!   +-----------------------------------------+
//!   |  foundation  config, error, logging,    |
//!   |              utility                    |
//!   +-----------------------------------------+
//! ```

pub mod cache;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod git;
pub mod logging;
pub mod model;
pub mod notify;
pub mod refs;
pub mod repository;
pub mod utility;
