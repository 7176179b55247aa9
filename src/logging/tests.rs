// vcs-inventory: Remote Working Copy Inventory
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};

use tracing::{debug, info, info_span, warn};
use tracing_subscriber::layer::SubscriberExt;

use super::{LogConfig, LogLevel, console_layer, file_layer};
use crate::config::types::GlobalConfig;
use crate::test_utils::BufferMakeWriter;

#[test]
fn test_directives_quiet_ssh_stack_below_trace() {
    let directives: Vec<_> = (0..=5)
        .filter_map(LogLevel::from_u8)
        .map(LogLevel::directives)
        .collect();
    assert_eq!(
        directives,
        [
            "off",
            "error",
            "warn",
            "info,russh=warn,russh_keys=warn",
            "debug,russh=warn,russh_keys=warn",
            "trace",
        ]
    );
}

#[test]
fn test_log_level_bounds() {
    assert_eq!(LogLevel::new(5).unwrap(), LogLevel::Trace);
    assert_eq!(LogLevel::Debug.as_u8(), 4);
    let err = LogLevel::new(6).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"invalid value for 'log_level' in section '[global]': log level must be 0-5, got 6"
    );
}

#[test]
fn test_log_level_deserialize_rejects_out_of_range() {
    let ok: LogLevel = serde_json::from_str("4").unwrap();
    assert_eq!(ok, LogLevel::Debug);
    assert!(serde_json::from_str::<LogLevel>("9").is_err());
    assert_eq!(serde_json::to_string(&LogLevel::Warn).unwrap(), "2");
}

#[test]
fn test_log_config_from_global_section() {
    let global = GlobalConfig {
        output_log_level: LogLevel::Warn,
        file_log_level: LogLevel::Debug,
        log_file: Some(PathBuf::from("logs/sync.log")),
    };
    let config = LogConfig::from(&global);
    assert_eq!(config.console_level(), LogLevel::Warn);
    assert_eq!(config.file_level(), LogLevel::Debug);
    assert_eq!(config.log_file(), Some(Path::new("logs/sync.log")));

    let defaults = LogConfig::from(&GlobalConfig::default());
    assert_eq!(defaults.console_level(), LogLevel::Info);
    assert!(defaults.log_file().is_none());
}

#[test]
fn test_console_shows_cluster_span_and_hides_ssh_chatter() {
    let writer = BufferMakeWriter::default();
    let subscriber =
        tracing_subscriber::registry().with(console_layer(LogLevel::Info, writer.clone(), false));

    tracing::subscriber::with_default(subscriber, || {
        let _span = info_span!("cluster", id = %"EU-CLUSTER").entered();
        warn!("skipping cluster");
        info!(target: "russh::client", "kex done");
        debug!("probe finished");
    });

    let logs = writer.contents();
    assert!(
        logs.contains("WARN cluster{id=EU-CLUSTER}: skipping cluster"),
        "{logs}"
    );
    assert!(!logs.contains("vcs_inventory::logging"));
    assert!(!logs.contains("kex done"));
    assert!(!logs.contains("probe finished"));
}

#[test]
fn test_file_records_cluster_span_close() {
    let writer = BufferMakeWriter::default();
    let subscriber =
        tracing_subscriber::registry().with(file_layer(LogLevel::Info, writer.clone()));

    tracing::subscriber::with_default(subscriber, || {
        let _span = info_span!("cluster", id = %"NA-CLUSTER").entered();
        info!("inventory updated");
    });

    let logs = writer.contents();
    assert!(logs.contains("inventory updated"));
    assert!(logs.contains("close"));
}
