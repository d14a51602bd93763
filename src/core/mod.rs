// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core execution machinery.
//!
//! ```text
//!              core
//!               |
//!       +-------+--------+
//!       |                |
//!       v                v
//!    process         operation
//!       |                |
//!   ProcessBuilder   OperationRunner
//!   ProcessOutput    OperationHandle, ProgressMonitor
//!   execute()        CompletionExecutor (inline, foreground)
//! ```

pub mod operation;
pub mod process;
