// vcs-inventory: Remote Working Copy Inventory
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `show` command: prints the recorded VCS state per cluster.

use crate::config::Config;
use crate::error::Result;
use crate::inventory::store::InventoryStore;
use crate::inventory::{InventoryDocument, ProbeField};

/// Print one line per cluster in document order.
///
/// # Errors
///
/// Returns an error if the inventory cannot be read or is malformed.
pub fn run_show_command(config: &Config) -> Result<()> {
    let store = InventoryStore::new(&config.inventory.path);
    let document = store.load()?;
    for line in format_inventory(&document)? {
        println!("{line}");
    }
    Ok(())
}

/// Format the inventory as aligned rows.
///
/// ```text
/// EU-CLUSTER  euuser@eu1-vm-host  svn https://svn.example.com/repo/trunk r1187
/// NA-CLUSTER  nauser@na1-vm-host  git main r42
/// ```
///
/// # Errors
///
/// Returns an error if a cluster entry is not an object.
pub fn format_inventory(document: &InventoryDocument) -> Result<Vec<String>> {
    let mut rows = Vec::new();
    for cluster in document.cluster_ids() {
        let record = document.record(cluster)?;
        let login = format!(
            "{}@{}",
            record.user.as_deref().unwrap_or("?"),
            record.host.as_deref().unwrap_or("?")
        );
        let state = if let Some(branch) = record.field(ProbeField::GitBranch) {
            describe("git", branch, record.field(ProbeField::GitRevision))
        } else if let Some(branch) = record.field(ProbeField::SvnBranch) {
            describe("svn", branch, record.field(ProbeField::SvnRevision))
        } else {
            "-".to_string()
        };
        rows.push((cluster.to_string(), login, state));
    }

    let id_width = rows.iter().map(|(id, _, _)| id.len()).max().unwrap_or(0);
    let login_width = rows.iter().map(|(_, l, _)| l.len()).max().unwrap_or(0);

    Ok(rows
        .into_iter()
        .map(|(id, login, state)| format!("{id:<id_width$}  {login:<login_width$}  {state}"))
        .collect())
}

fn describe(vcs: &str, branch: &str, revision: Option<&str>) -> String {
    revision.map_or_else(
        || format!("{vcs} {branch}"),
        |revision| format!("{vcs} {branch} r{revision}"),
    )
}
