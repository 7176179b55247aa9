// vcs-inventory: Remote Working Copy Inventory
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cli::{Cli, Command};
use clap::Parser;
use std::path::PathBuf;

#[test]
fn test_no_command_is_accepted() {
    let cli = Cli::try_parse_from(["vcs-inventory"]).unwrap();
    assert!(cli.command.is_none());
    assert!(cli.global.to_config_overrides().is_empty());
}

#[test]
fn test_parse_sync_arguments() {
    let cli = Cli::try_parse_from([
        "vcs-inventory",
        "sync",
        "-C",
        "EU-CLUSTER",
        "--cluster",
        "AP-CLUSTER",
        "-w",
        "/srv/checkout",
    ])
    .unwrap();
    let Some(Command::Sync(args)) = cli.command else {
        panic!("expected sync command");
    };
    assert_eq!(args.clusters, ["EU-CLUSTER", "AP-CLUSTER"]);
    assert_eq!(args.working_copy.as_deref(), Some("/srv/checkout"));
}

#[test]
fn test_global_options_to_overrides() {
    let cli = Cli::try_parse_from([
        "vcs-inventory",
        "-l",
        "4",
        "-i",
        "/tmp/inventory.json",
        "-c",
        "a.toml",
        "-c",
        "b.toml",
        "show",
    ])
    .unwrap();
    assert_eq!(
        cli.global.configs,
        [PathBuf::from("a.toml"), PathBuf::from("b.toml")]
    );
    assert_eq!(
        cli.global.to_config_overrides(),
        [
            ("inventory.path", "/tmp/inventory.json".to_string()),
            ("global.output_log_level", "4".to_string()),
            ("global.file_log_level", "4".to_string()),
        ]
    );
}

#[test]
fn test_log_level_out_of_range_rejected() {
    assert!(Cli::try_parse_from(["vcs-inventory", "-l", "6"]).is_err());
}
