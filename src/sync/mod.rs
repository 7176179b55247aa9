// vcs-inventory: Remote Working Copy Inventory
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sync driver.
//!
//! ```text
//! for cluster in clusters (in order):
//!     load inventory
//!     remote::open  --> session
//!     probe(session, working_copy) --> ProbeResult (computed once)
//!     session.disconnect()
//!     for each non-empty field:
//!         store.update_field (load -> set -> save)
//!   any error --> logged, cluster marked failed, next cluster
//! ```
//!
//! One failing cluster never aborts the run.


use tracing::{Instrument, debug, info, info_span, warn};

use crate::error::SyncResult;
use crate::inventory::ProbeField;
use crate::inventory::store::InventoryStore;
use crate::probe::{self, ProbeResult};
use crate::remote::{self, RemoteShell, RetryPolicy, SessionFactory};

/// What happened to one cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClusterStatus {
    /// Probe succeeded; lists the fields written (possibly none).
    Updated(Vec<ProbeField>),
    /// Processing stopped with this error.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterOutcome {
    pub cluster: String,
    pub status: ClusterStatus,
}

/// Per-run summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub outcomes: Vec<ClusterOutcome>,
}

impl SyncReport {
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, ClusterStatus::Updated(_)))
            .count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    #[must_use]
    pub fn fields_written(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match &o.status {
                ClusterStatus::Updated(fields) => fields.len(),
                ClusterStatus::Failed(_) => 0,
            })
            .sum()
    }

    #[must_use]
    pub fn status(&self, cluster: &str) -> Option<&ClusterStatus> {
        self.outcomes
            .iter()
            .find(|o| o.cluster == cluster)
            .map(|o| &o.status)
    }
}

/// Write every non-empty probe value for `cluster`, one round trip per field.
///
/// # Errors
///
/// Stops at the first failed inventory update.
pub fn write_back(
    store: &InventoryStore,
    cluster: &str,
    result: &ProbeResult,
) -> SyncResult<Vec<ProbeField>> {
    let mut written = Vec::new();
    for (field, value) in result.discovered() {
        store.update_field(cluster, field, value)?;
        written.push(field);
    }
    Ok(written)
}

/// Runs the probe and write-back over a list of clusters.
pub struct SyncDriver<F> {
    factory: F,
    store: InventoryStore,
    policy: RetryPolicy,
}

impl<F: SessionFactory> SyncDriver<F> {
    pub const fn new(factory: F, store: InventoryStore, policy: RetryPolicy) -> Self {
        Self {
            factory,
            store,
            policy,
        }
    }

    /// Process `clusters` in order. Never fails; see [`SyncReport`].
    pub async fn run(&self, clusters: &[String], working_copy: &str) -> SyncReport {
        let mut report = SyncReport::default();

        for cluster in clusters {
            let span = info_span!("cluster", id = %cluster);
            let status = match self
                .sync_cluster(cluster, working_copy)
                .instrument(span)
                .await
            {
                Ok(fields) => ClusterStatus::Updated(fields),
                Err(e) => {
                    warn!(cluster = %cluster, error = %e, "skipping cluster");
                    ClusterStatus::Failed(e.to_string())
                }
            };
            report.outcomes.push(ClusterOutcome {
                cluster: cluster.clone(),
                status,
            });
        }

        report
    }

    async fn sync_cluster(&self, cluster: &str, working_copy: &str) -> SyncResult<Vec<ProbeField>> {
        let document = self.store.load()?;
        let mut session = remote::open(&self.factory, &document, cluster, &self.policy).await?;

        let probed = probe::probe(&mut session, working_copy).await;
        if let Err(e) = session.disconnect().await {
            debug!(error = %e, "disconnect failed");
        }
        let result = probed?;

        let written = write_back(&self.store, cluster, &result)?;
        if written.is_empty() {
            info!("no version control state discovered");
        } else {
            info!(fields = ?written, "inventory updated");
        }
        Ok(written)
    }
}
