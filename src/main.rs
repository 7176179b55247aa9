// vcs-inventory: Remote Working Copy Inventory
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Sync (default) | Show | Options | Configs | Version
//! ```

use std::process::ExitCode;

use vcs_inventory::cli::global::GlobalOptions;
use vcs_inventory::cli::sync::SyncArgs;
use vcs_inventory::cli::{self, Command};
use vcs_inventory::cmd::config::{run_configs_command, run_options_command};
use vcs_inventory::cmd::show::run_show_command;
use vcs_inventory::cmd::sync::run_sync_command;
use vcs_inventory::config::loader::ConfigLoader;
use vcs_inventory::config::{Config, DEFAULT_CONFIG_FILE, ENV_PREFIX};
use vcs_inventory::logging::{LogConfig, LogGuard, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

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

    let _log_guard: LogGuard = match init_logging(&LogConfig::from(&config.global)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, &config).await
}

async fn dispatch_command(cli: &cli::Cli, config: &Config) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Options) => {
            run_options_command(config);
            Ok(())
        }
        Some(Command::Configs) => build_config_loader(&cli.global).map(|loader| {
            run_configs_command(&loader.format_loaded_files());
        }),
        Some(Command::Show) => run_show_command(config),
        Some(Command::Sync(args)) => run_sync_command(args, config).await,
        None => run_sync_command(&SyncArgs::default(), config).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> vcs_inventory::error::Result<ConfigLoader> {
    let mut loader = ConfigLoader::new();
    if !global.no_default_config {
        loader = loader.add_toml_file_optional(DEFAULT_CONFIG_FILE);
    }
    for path in &global.configs {
        loader = loader.add_toml_file(path);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);
    for (key, value) in global.to_config_overrides() {
        loader = loader.set(key, value)?;
    }
    Ok(loader)
}

fn load_config(global: &GlobalOptions) -> vcs_inventory::error::Result<Config> {
    build_config_loader(global)?.build()
}
