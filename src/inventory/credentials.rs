// vcs-inventory: Remote Working Copy Inventory
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Credential resolution.
//!
//! ```text
//! hosts[cluster].user          --> principal   (required)
//! hosts[cluster].ssh_key_path  --> secret      (if present)
//!                  otherwise   --> secret = user (password login)
//!
//! secret contains ".pub" --> AuthMethod::KeyFile
//!                  else  --> AuthMethod::Password
//! ```

use std::path::PathBuf;

use tracing::warn;

use super::InventoryDocument;
use crate::error::InventoryError;

/// Login pair for one cluster. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub principal: String,
    pub secret: String,
}

/// How the secret is presented to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMethod {
    /// Private key file, derived from the configured key path.
    KeyFile(PathBuf),
    Password(String),
}

impl Credentials {
    /// Classify the secret.
    ///
    /// Any secret containing `.pub` is a key path. The private key is expected
    /// next to the public one, so a trailing `.pub` is dropped and a leading
    /// `~/` is expanded against the local home directory.
    #[must_use]
    pub fn auth_method(&self) -> AuthMethod {
        if self.secret.contains(".pub") {
            AuthMethod::KeyFile(private_key_path(&self.secret))
        } else {
            AuthMethod::Password(self.secret.clone())
        }
    }
}

fn private_key_path(configured: &str) -> PathBuf {
    let without_pub = configured.strip_suffix(".pub").unwrap_or(configured);
    match without_pub.strip_prefix("~/") {
        Some(rest) => dirs::home_dir().map_or_else(|| PathBuf::from(without_pub), |h| h.join(rest)),
        None => PathBuf::from(without_pub),
    }
}

/// Derive the credentials for `cluster`.
///
/// Without `ssh_key_path` the user name doubles as the password. That is
/// insecure and logged as a warning, but it is how existing inventories log in.
///
/// # Errors
///
/// Returns `InventoryError::MissingField` if the cluster or its `user` is
/// absent.
pub fn resolve(document: &InventoryDocument, cluster: &str) -> Result<Credentials, InventoryError> {
    let record = document.record(cluster)?;
    let principal = record.require_user(cluster)?.to_string();

    let secret = if let Some(key_path) = record.ssh_key_path {
        key_path
    } else {
        warn!(
            cluster,
            "no ssh_key_path for cluster, falling back to password login (not secure)"
        );
        principal.clone()
    };

    Ok(Credentials { principal, secret })
}
