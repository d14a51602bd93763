// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config (repograph.toml, --ini, env, --set) --> Logging
//!   --> Command Dispatch
//!   Version | Options | Inis | Refs | Status | Remotes | Submodules
//!   Reflog | Fetch | Pull | Push | Prune
//! ```

use std::process::ExitCode;

use repograph::cli::global::GlobalOptions;
use repograph::cli::{self, Command};
use repograph::cmd::config::{run_inis_command, run_options_command};
use repograph::cmd::open_repository;
use repograph::cmd::refs::{run_reflog_command, run_refs_command};
use repograph::cmd::remote::{
    DiffOperation, run_diff_command, run_push_command, run_remotes_command,
};
use repograph::cmd::status::run_status_command;
use repograph::cmd::submodule::run_submodules_command;
use repograph::config::{Config, ENV_PREFIX};
use repograph::config::loader::ConfigLoader;
use repograph::error::Result;
use repograph::logging::init_logging;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const DEFAULT_CONFIG_FILE: &str = "repograph.toml";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    if matches!(cli.command, Some(Command::Version)) {
        handle_version_command();
        return ExitCode::SUCCESS;
    }

    let config = match load_config(&cli.global) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_logging(&config.log.to_log_config()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    match dispatch_command(&cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn dispatch_command(cli: &cli::Cli, config: &Config) -> Result<()> {
    let Some(command) = &cli.command else {
        eprintln!("No command specified. Use --help for usage information.");
        anyhow::bail!("No command specified");
    };

    match command {
        Command::Version => {
            handle_version_command();
            return Ok(());
        }
        Command::Options => {
            run_options_command(config);
            return Ok(());
        }
        Command::Inis => {
            run_inis_command(&build_config_loader(&cli.global)?.format_loaded_files());
            return Ok(());
        }
        _ => {}
    }

    let repo = open_repository(&cli.global, config).await?;
    match command {
        Command::Refs(args) => run_refs_command(args, &repo).await,
        Command::Status => run_status_command(&repo).await,
        Command::Remotes => run_remotes_command(&repo).await,
        Command::Submodules(args) => run_submodules_command(args, &repo).await,
        Command::Reflog(args) => run_reflog_command(args, &repo).await,
        Command::Fetch(args) => run_diff_command(DiffOperation::Fetch, args, &repo).await,
        Command::Pull(args) => run_diff_command(DiffOperation::Pull, args, &repo).await,
        Command::Prune(args) => run_diff_command(DiffOperation::Prune, args, &repo).await,
        Command::Push(args) => run_push_command(args, &repo).await,
        Command::Version | Command::Options | Command::Inis => Ok(()),
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> Result<ConfigLoader> {
    let mut loader = ConfigLoader::new().add_toml_file_optional(DEFAULT_CONFIG_FILE);
    for ini_path in &global.inis {
        loader = loader.add_toml_file(ini_path);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);
    for assignment in global.to_config_overrides() {
        loader = loader.set_assignment(&assignment)?;
    }
    Ok(loader)
}

fn load_config(global: &GlobalOptions) -> Result<Config> {
    build_config_loader(global)?.build()
}
