// vcs-inventory: Remote Working Copy Inventory
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   sync, show, config
//! ```

pub mod config;
pub mod show;
pub mod sync;
