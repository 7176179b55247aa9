// vcs-inventory: Remote Working Copy Inventory
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `sync` command: probe every cluster over SSH and write the results back.
//!
//! ```text
//! SyncArgs + Config
//!   clusters     = --cluster... or sync.clusters
//!   working_copy = --working-copy or sync.working_copy
//!        |
//!        v
//! SyncDriver<SshConnector>::run --> SyncReport --> summary
//! ```

use tracing::{info, warn};

use crate::cli::sync::SyncArgs;
use crate::config::Config;
use crate::error::Result;
use crate::inventory::store::InventoryStore;
use crate::remote::ssh::SshConnector;
use crate::sync::{ClusterStatus, SyncDriver, SyncReport};

/// Clusters and working copy for this run, CLI first.
#[must_use]
pub fn resolve_targets(args: &SyncArgs, config: &Config) -> (Vec<String>, String) {
    let clusters = if args.clusters.is_empty() {
        config.sync.clusters.clone()
    } else {
        args.clusters.clone()
    };
    let working_copy = args
        .working_copy
        .clone()
        .unwrap_or_else(|| config.sync.working_copy.clone());
    (clusters, working_copy)
}

/// Run the sync command.
///
/// Per-cluster failures are reported, not returned.
///
/// # Errors
///
/// Currently never fails; the signature matches the other handlers.
pub async fn run_sync_command(args: &SyncArgs, config: &Config) -> Result<()> {
    let (clusters, working_copy) = resolve_targets(args, config);

    let connector = SshConnector::new(config.ssh.port, config.ssh.connect_timeout());
    let store = InventoryStore::new(&config.inventory.path);
    let driver = SyncDriver::new(connector, store, config.ssh.retry_policy());

    info!(
        inventory = %config.inventory.path.display(),
        working_copy = %working_copy,
        clusters = clusters.len(),
        "starting sync"
    );
    let report = driver.run(&clusters, &working_copy).await;

    for line in summarize(&report) {
        println!("{line}");
    }
    if report.failed() > 0 {
        warn!(failed = report.failed(), "some clusters were skipped");
    }
    Ok(())
}

/// One line per cluster plus a totals line.
#[must_use]
pub fn summarize(report: &SyncReport) -> Vec<String> {
    let width = report
        .outcomes
        .iter()
        .map(|o| o.cluster.len())
        .max()
        .unwrap_or(0);

    let mut lines: Vec<String> = report
        .outcomes
        .iter()
        .map(|outcome| {
            let detail = match &outcome.status {
                ClusterStatus::Updated(fields) if fields.is_empty() => {
                    "ok (nothing discovered)".to_string()
                }
                ClusterStatus::Updated(fields) => {
                    let names: Vec<_> = fields.iter().map(ToString::to_string).collect();
                    format!("ok ({})", names.join(", "))
                }
                ClusterStatus::Failed(message) => format!("failed: {message}"),
            };
            format!("{:<width$}  {detail}", outcome.cluster)
        })
        .collect();

    lines.push(format!(
        "{} updated, {} failed, {} field(s) written",
        report.succeeded(),
        report.failed(),
        report.fields_written()
    ));
    lines
}
