// vcs-inventory: Remote Working Copy Inventory
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sync command arguments.

use clap::Args;

/// Arguments for the `sync` command.
#[derive(Debug, Clone, Default, Args)]
pub struct SyncArgs {
    /// Cluster to probe. Can be repeated; replaces the configured list.
    #[arg(short = 'C', long = "cluster", value_name = "ID", action = clap::ArgAction::Append)]
    pub clusters: Vec<String>,

    /// Working-copy path on the remote hosts.
    #[arg(short = 'w', long = "working-copy", value_name = "PATH")]
    pub working_copy: Option<String>,
}
