// vcs-inventory: Remote Working Copy Inventory
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration section types.
//!
//! ```text
//! Config: GlobalConfig, InventoryConfig, SyncConfig, SshConfig
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::logging::LogLevel;
use crate::remote::RetryPolicy;

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-5).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-5).
    pub file_log_level: LogLevel,
    /// Optional log file; console only when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::Info,
            file_log_level: LogLevel::Trace,
            log_file: None,
        }
    }
}

/// Location of the inventory document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InventoryConfig {
    pub path: PathBuf,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/inventory.json"),
        }
    }
}

/// What to probe and where.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    /// Working-copy path on the remote hosts. Expanded by the remote shell.
    pub working_copy: String,
    /// Cluster identifiers, processed in this order.
    pub clusters: Vec<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            working_copy: "~/bw/".to_string(),
            clusters: vec!["EU-CLUSTER".to_string(), "NA-CLUSTER".to_string()],
        }
    }
}

/// SSH connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SshConfig {
    pub port: u16,
    /// Total connection attempts per cluster.
    pub max_attempts: u32,
    /// Fixed pause between attempts.
    pub retry_delay_ms: u64,
    pub connect_timeout_secs: u64,
}

impl Default for SshConfig {
    fn default() -> Self {
        Self {
            port: 22,
            max_attempts: 4,
            retry_delay_ms: 1000,
            connect_timeout_secs: 30,
        }
    }
}

impl SshConfig {
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::builder()
            .with_max_attempts(self.max_attempts)
            .with_delay(Duration::from_millis(self.retry_delay_ms))
            .build()
    }

    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}
