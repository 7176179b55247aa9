// vcs-inventory: Remote Working Copy Inventory
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `svn info` output parsing.

use std::sync::LazyLock;

use regex::Regex;

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^URL:\s(\S+)").expect("URL pattern is valid"));

static REVISION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Revision:\s(\d+)").expect("Revision pattern is valid"));

/// Repository URL and revision of a Subversion working copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SvnInfo {
    pub url: String,
    pub revision: String,
}

/// Pull `URL:` and `Revision:` out of `svn info` output.
///
/// Absent lines leave the corresponding field empty. `Relative URL:` and
/// `Repository Root:` lines are not mistaken for `URL:`.
#[must_use]
pub fn parse_info(output: &str) -> SvnInfo {
    let mut info = SvnInfo::default();
    for line in output.lines() {
        if let Some(caps) = URL_RE.captures(line) {
            info.url = caps[1].to_string();
        } else if let Some(caps) = REVISION_RE.captures(line) {
            info.revision = caps[1].to_string();
        }
    }
    info
}
