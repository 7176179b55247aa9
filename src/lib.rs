// vcs-inventory: Remote Working Copy Inventory
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |          sync / show / config
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, env, CLI layers   |
//!              '-------------+-------------'
//!                            v
//!                          sync
//!                 per-cluster driver, report
//!                  |         |          |
//!                  v         v          v
//!              inventory   remote     probe
//!             JSON store  SSH+retry  git / svn
//!
//!   +-----------------------------------------+
//!   |  foundation   error, logging            |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod inventory;
pub mod logging;
pub mod probe;
pub mod remote;
pub mod sync;

#[cfg(test)]
mod test_utils;
