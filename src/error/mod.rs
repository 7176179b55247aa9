// vcs-inventory: Remote Working Copy Inventory
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!                SyncError
//!                     |
//!        +------------+------------+
//!        |            |            |
//!        v            v            v
//!    Inventory     Session       Config
//!       Box          Box          Box
//!
//! Sub-errors (unboxed internally):
//!   Inventory  MissingField, Read, Parse, Malformed, Write
//!   Session    AuthenticationFailed, InvalidKey,
//!              TransportFailed, ProtocolFailed, ConnectionFailed
//!   Config     MissingKey, InvalidValue
//! ```
//!
//! Retry classification lives on [`SessionError::is_retryable`].

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`SyncError`].
pub type SyncResult<T> = std::result::Result<T, SyncError>;

/// Result type for a single remote session operation.
pub type SessionResult<T> = std::result::Result<T, SessionError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at two words on the stack.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Inventory file or record error.
    #[error("inventory error: {0}")]
    Inventory(#[from] Box<InventoryError>),

    /// Remote session error.
    #[error("session error: {0}")]
    Session(#[from] Box<SessionError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),
}

macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for SyncError {
                fn from(err: $error) -> Self {
                    SyncError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    InventoryError => Inventory,
    SessionError => Session,
    ConfigError => Config,
}

// --- Inventory Errors ---

/// Inventory document errors.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// A required key is absent for a cluster (or the cluster itself is absent).
    #[error("inventory has no '{field}' for cluster '{cluster}'")]
    MissingField { cluster: String, field: String },

    /// Failed to read the inventory file.
    #[error("failed to read inventory '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Inventory file is not valid JSON.
    #[error("failed to parse inventory '{location}': {source}")]
    Parse {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    /// Inventory is valid JSON but not shaped like an inventory.
    #[error("malformed inventory at '{location}': {message}")]
    Malformed { location: String, message: String },

    /// Failed to write the inventory file.
    #[error("failed to write inventory '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl InventoryError {
    /// Shorthand for [`InventoryError::MissingField`].
    pub fn missing(cluster: &str, field: impl Into<String>) -> Self {
        Self::MissingField {
            cluster: cluster.to_string(),
            field: field.into(),
        }
    }
}

// --- Session Errors ---

/// Remote session errors.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Server rejected the credentials.
    #[error("authentication failed for {user}@{host}")]
    AuthenticationFailed { host: String, user: String },

    /// Key file could not be loaded.
    #[error("cannot load key '{path}': {message}")]
    InvalidKey { path: String, message: String },

    /// TCP/socket level failure.
    #[error("transport failure reaching {host}: {message}")]
    TransportFailed { host: String, message: String },

    /// SSH handshake or protocol failure.
    #[error("ssh protocol failure with {host}: {message}")]
    ProtocolFailed { host: String, message: String },

    /// All connection attempts were used up.
    #[error("could not connect to {host} after {attempts} attempt(s): {last}")]
    ConnectionFailed {
        host: String,
        attempts: u32,
        last: String,
    },
}

impl SessionError {
    /// Whether another connection attempt may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::TransportFailed { .. } | Self::ProtocolFailed { .. }
        )
    }
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

#[cfg(test)]
mod tests;
