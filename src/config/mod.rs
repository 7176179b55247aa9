// vcs-inventory: Remote Working Copy Inventory
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. vcs-inventory.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. VCSINV_* env vars
//! 5. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! VCSINV_INVENTORY__PATH=/srv/inv.json → inventory.path
//! VCSINV_SSH__MAX_ATTEMPTS=2           → ssh.max_attempts = 2
//! VCSINV_SYNC__CLUSTERS=EU,NA          → sync.clusters = ["EU", "NA"]
//! ```
//!
//! # Example
//!
//! ```toml
//! [inventory]
//! path = "data/inventory.json"
//!
//! [sync]
//! working_copy = "~/bw/"
//! clusters = ["EU-CLUSTER", "NA-CLUSTER"]
//!
//! [ssh]
//! max_attempts = 4
//! retry_delay_ms = 1000
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ConfigError, SyncResult};

use loader::ConfigLoader;
use types::{GlobalConfig, InventoryConfig, SshConfig, SyncConfig};

/// Default configuration file looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "vcs-inventory.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "VCSINV";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub global: GlobalConfig,
    pub inventory: InventoryConfig,
    pub sync: SyncConfig,
    pub ssh: SshConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use vcs_inventory::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("vcs-inventory.toml")
    ///     .with_env_prefix("VCSINV")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::error::Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> crate::error::Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Reject values the sync run cannot work with.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for an empty cluster list, an empty working
    /// copy, a zero port, or a zero attempt budget.
    pub fn validate(&self) -> SyncResult<()> {
        if self.sync.clusters.is_empty() {
            return Err(ConfigError::MissingKey {
                section: "sync".to_string(),
                key: "clusters".to_string(),
            }
            .into());
        }
        if self.sync.working_copy.trim().is_empty() {
            return Err(ConfigError::MissingKey {
                section: "sync".to_string(),
                key: "working_copy".to_string(),
            }
            .into());
        }
        if self.ssh.port == 0 {
            return Err(invalid("ssh", "port", "must be non-zero").into());
        }
        if self.ssh.max_attempts == 0 {
            return Err(invalid("ssh", "max_attempts", "must be at least 1").into());
        }
        Ok(())
    }

    /// Format configuration options for display, one `key = value` per line.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        options.insert(
            "global.output_log_level".to_string(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".to_string(),
            self.global.file_log_level.as_u8().to_string(),
        );
        if let Some(log_file) = &self.global.log_file {
            options.insert(
                "global.log_file".to_string(),
                log_file.display().to_string(),
            );
        }
        options.insert(
            "inventory.path".to_string(),
            self.inventory.path.display().to_string(),
        );
        options.insert(
            "sync.working_copy".to_string(),
            self.sync.working_copy.clone(),
        );
        options.insert("sync.clusters".to_string(), self.sync.clusters.join(", "));
        options.insert("ssh.port".to_string(), self.ssh.port.to_string());
        options.insert(
            "ssh.max_attempts".to_string(),
            self.ssh.max_attempts.to_string(),
        );
        options.insert(
            "ssh.retry_delay_ms".to_string(),
            self.ssh.retry_delay_ms.to_string(),
        );
        options.insert(
            "ssh.connect_timeout_secs".to_string(),
            self.ssh.connect_timeout_secs.to_string(),
        );

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}

fn invalid(section: &str, key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        message: message.to_string(),
    }
}
