// vcs-inventory: Remote Working Copy Inventory
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! vcs-inventory [global options] [command]
//! sync [-C CLUSTER]... [-w PATH]   (default)
//! show
//! options
//! configs
//! version
//! ```

pub mod global;
pub mod sync;

#[cfg(test)]
mod tests;

use crate::cli::global::GlobalOptions;
use crate::cli::sync::SyncArgs;
use clap::{Parser, Subcommand};

/// Remote working-copy inventory.
///
/// Probes working copies on remote hosts over SSH and records their Git or
/// Subversion branch and revision in a JSON inventory.
#[derive(Debug, Parser)]
#[command(
    name = "vcs-inventory",
    author,
    version,
    about = "Record remote working-copy VCS state in a JSON inventory",
    long_about = "Connects to every configured cluster over SSH, inspects the working\n\
                  copy there (Git first, then Subversion) and writes branch and revision\n\
                  back into the inventory file that also supplies the login details.\n\n\
                  Running without a command is the same as `vcs-inventory sync`.",
    after_help = "CONFIG FILES:\n\n\
                  `vcs-inventory.toml` in the current directory is loaded if present.\n\
                  Additional files can be given with --config, later files override\n\
                  earlier ones. VCSINV_<SECTION>__<KEY> environment variables override\n\
                  files, and command-line flags override everything."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Probes every cluster and updates the inventory.
    Sync(SyncArgs),

    /// Prints the inventory, one cluster per line.
    Show,

    /// Lists all options and their effective values.
    Options,

    /// Lists the configuration files that were loaded.
    Configs,

    /// Shows the version.
    Version,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
