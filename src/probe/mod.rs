// vcs-inventory: Remote Working Copy Inventory
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Working-copy inspection over a remote shell.
//!
//! ```text
//! ls <path>                                   stderr? -> all empty
//!   |
//!   v
//! cd <path> && git branch --show-current      last line -> git_branch
//! cd <path> && git rev-list --count HEAD      last line -> git_revision
//!   |
//!   | git_branch empty?
//!   v
//! svn info <path>                             URL:      -> svn_branch
//!                                             Revision: -> svn_revision
//! ```
//!
//! A working copy is reported as exactly one of Git, Subversion or neither.

pub mod svn;


use tracing::{debug, error, warn};

use crate::error::SessionResult;
use crate::inventory::ProbeField;
use crate::remote::RemoteShell;

/// Discovered VCS state. Empty strings mean "not applicable".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeResult {
    pub git_branch: String,
    pub git_revision: String,
    pub svn_branch: String,
    pub svn_revision: String,
}

impl ProbeResult {
    #[must_use]
    pub fn get(&self, field: ProbeField) -> &str {
        match field {
            ProbeField::GitBranch => &self.git_branch,
            ProbeField::GitRevision => &self.git_revision,
            ProbeField::SvnBranch => &self.svn_branch,
            ProbeField::SvnRevision => &self.svn_revision,
        }
    }

    /// Fields carrying a value, in write-back order.
    pub fn discovered(&self) -> impl Iterator<Item = (ProbeField, &str)> {
        ProbeField::ALL
            .into_iter()
            .map(|field| (field, self.get(field)))
            .filter(|(_, value)| !value.is_empty())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.discovered().next().is_none()
    }
}

/// Inspect the working copy at `path` on the remote host.
///
/// `path` is passed to the remote shell unquoted so `~` expands there.
///
/// # Errors
///
/// Only transport failures are errors. A missing directory or a directory
/// under neither VCS yields empty fields.
pub async fn probe<S>(shell: &mut S, path: &str) -> SessionResult<ProbeResult>
where
    S: RemoteShell + ?Sized,
{
    let listing = shell.exec(&format!("ls {path}")).await?;
    if listing.has_stderr() {
        error!(path, "working copy directory does not exist");
        return Ok(ProbeResult::default());
    }

    let mut result = ProbeResult::default();

    let branch = shell
        .exec(&format!("cd {path} && git branch --show-current"))
        .await?;
    let current = branch
        .last_line()
        .map(str::trim_end)
        .filter(|line| !branch.has_stderr() && !line.is_empty());
    if let Some(line) = current {
        result.git_branch = line.to_string();
        let revision = shell
            .exec(&format!("cd {path} && git rev-list --count HEAD"))
            .await?;
        if let Some(line) = revision.last_line() {
            result.git_revision = line.trim_end().to_string();
        }
    }

    if result.git_branch.is_empty() {
        warn!(path, "working copy does not use git, checking subversion");
        let info = shell.exec(&format!("svn info {path}")).await?;
        if info.has_stderr() {
            error!(path, "working copy uses neither git nor subversion");
        } else {
            let parsed = svn::parse_info(&info.stdout);
            result.svn_branch = parsed.url;
            result.svn_revision = parsed.revision;
        }
    }

    debug!(path, ?result, "probe finished");
    Ok(result)
}
