// vcs-inventory: Remote Working Copy Inventory
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Inventory document: cluster credentials in, discovered VCS state out.
//!
//! ```text
//! {
//!     "hosts": {
//!         "EU-CLUSTER": {
//!             "host": "eu1-vm-host",        <- required
//!             "user": "euuser",             <- required
//!             "ssh_key_path": "~/.ssh/..",  <- optional
//!             "git_branch": "main",         <- written back
//!             "git_revision": "42"          <- written back
//!         }
//!     }
//! }
//! ```
//!
//! The raw JSON object is kept as-is so keys this crate does not know about
//! (`title`, extra top-level sections) survive write-back in their original
//! order.

pub mod credentials;
pub mod store;


use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::error;

use crate::error::InventoryError;

/// Key of the top-level cluster map.
pub const HOSTS_KEY: &str = "hosts";

/// One of the four fields the sync run writes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeField {
    GitBranch,
    GitRevision,
    SvnBranch,
    SvnRevision,
}

impl ProbeField {
    pub const ALL: [Self; 4] = [
        Self::GitBranch,
        Self::GitRevision,
        Self::SvnBranch,
        Self::SvnRevision,
    ];

    /// JSON key in the host record.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::GitBranch => "git_branch",
            Self::GitRevision => "git_revision",
            Self::SvnBranch => "svn_branch",
            Self::SvnRevision => "svn_revision",
        }
    }
}

impl std::fmt::Display for ProbeField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Typed view of one cluster entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRecord {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub ssh_key_path: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub git_branch: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub git_revision: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub svn_branch: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub svn_revision: Option<String>,
}

/// Result fields are often hand-edited; `1187` reads the same as `"1187"`.
fn scalar_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a string or number, found {other}"
        ))),
    }
}

impl HostRecord {
    /// Current value of a written-back field.
    #[must_use]
    pub fn field(&self, field: ProbeField) -> Option<&str> {
        match field {
            ProbeField::GitBranch => self.git_branch.as_deref(),
            ProbeField::GitRevision => self.git_revision.as_deref(),
            ProbeField::SvnBranch => self.svn_branch.as_deref(),
            ProbeField::SvnRevision => self.svn_revision.as_deref(),
        }
    }

    /// Remote host name or address.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::MissingField` if `host` is absent.
    pub fn require_host(&self, cluster: &str) -> Result<&str, InventoryError> {
        self.host.as_deref().ok_or_else(|| {
            error!(cluster, "inventory does not contain 'host' for cluster");
            InventoryError::missing(cluster, "host")
        })
    }

    /// Login principal.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::MissingField` if `user` is absent.
    pub fn require_user(&self, cluster: &str) -> Result<&str, InventoryError> {
        self.user.as_deref().ok_or_else(|| {
            error!(cluster, "inventory does not contain 'user' for cluster");
            InventoryError::missing(cluster, "user")
        })
    }
}

/// The whole inventory file.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryDocument {
    root: Map<String, Value>,
}

impl InventoryDocument {
    /// Wrap a parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::Malformed` if the value is not an object or its
    /// `hosts` entry is not an object.
    pub fn from_value(value: Value, location: &str) -> Result<Self, InventoryError> {
        let Value::Object(root) = value else {
            return Err(InventoryError::Malformed {
                location: location.to_string(),
                message: "top-level value is not an object".to_string(),
            });
        };
        if root.get(HOSTS_KEY).is_some_and(|hosts| !hosts.is_object()) {
            return Err(InventoryError::Malformed {
                location: location.to_string(),
                message: format!("'{HOSTS_KEY}' is not an object"),
            });
        }
        Ok(Self { root })
    }

    /// Parse inventory JSON text.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::Parse` on invalid JSON, `Malformed` on a
    /// wrongly shaped document.
    pub fn parse(text: &str, location: &str) -> Result<Self, InventoryError> {
        let value = serde_json::from_str(text).map_err(|source| InventoryError::Parse {
            location: location.to_string(),
            source,
        })?;
        Self::from_value(value, location)
    }

    fn hosts(&self) -> Option<&Map<String, Value>> {
        self.root.get(HOSTS_KEY).and_then(Value::as_object)
    }

    /// Cluster identifiers in document order.
    #[must_use]
    pub fn cluster_ids(&self) -> Vec<&str> {
        self.hosts()
            .map(|hosts| hosts.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn contains(&self, cluster: &str) -> bool {
        self.hosts().is_some_and(|hosts| hosts.contains_key(cluster))
    }

    /// Typed record for a cluster.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::MissingField` if the cluster is absent and
    /// `Malformed` if its entry is not a record.
    pub fn record(&self, cluster: &str) -> Result<HostRecord, InventoryError> {
        let entry = self
            .hosts()
            .and_then(|hosts| hosts.get(cluster))
            .ok_or_else(|| {
                error!(cluster, "inventory does not contain cluster");
                InventoryError::missing(cluster, "hosts entry")
            })?;
        HostRecord::deserialize(entry).map_err(|e| InventoryError::Malformed {
            location: format!("{HOSTS_KEY}.{cluster}"),
            message: e.to_string(),
        })
    }

    /// Store a discovered value, trimmed, in the cluster's record.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::MissingField` if the cluster is absent and
    /// `Malformed` if its entry is not an object.
    pub fn set_field(
        &mut self,
        cluster: &str,
        field: ProbeField,
        value: &str,
    ) -> Result<(), InventoryError> {
        let entry = self
            .root
            .get_mut(HOSTS_KEY)
            .and_then(Value::as_object_mut)
            .and_then(|hosts| hosts.get_mut(cluster))
            .ok_or_else(|| InventoryError::missing(cluster, "hosts entry"))?;
        let Value::Object(record) = entry else {
            return Err(InventoryError::Malformed {
                location: format!("{HOSTS_KEY}.{cluster}"),
                message: "host entry is not an object".to_string(),
            });
        };
        record.insert(field.key().to_string(), Value::String(value.trim().to_string()));
        Ok(())
    }

    /// Render with a 4-space indent.
    ///
    /// # Errors
    ///
    /// Returns an error only if serialization itself fails.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.root.serialize(&mut serializer)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
