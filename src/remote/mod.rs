// vcs-inventory: Remote Working Copy Inventory
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Remote sessions.
//!
//! ```text
//! open(factory, document, cluster, policy)
//!    |  host        <- hosts[cluster].host
//!    |  credentials <- inventory::credentials::resolve
//!    v
//! connect_with_retry
//!    |  attempt 1..=max_attempts
//!    |    Transport / Protocol failure  -> log, sleep(delay), retry
//!    |    Authentication / InvalidKey   -> log, give up
//!    v
//! SessionFactory::connect --> RemoteShell (exec, disconnect)
//!                                 ^
//!                        SshConnector / SshSession (russh)
//! ```

pub mod ssh;

#[cfg(test)]
mod tests;

use std::time::Duration;

use async_trait::async_trait;
use bon::Builder;
use tracing::{debug, error, warn};

use crate::error::{SessionError, SessionResult, SyncResult};
use crate::inventory::InventoryDocument;
use crate::inventory::credentials::{self, AuthMethod, Credentials};

/// Captured result of one remote command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_status: Option<u32>,
}

impl CommandOutput {
    /// Anything at all written to stderr.
    #[must_use]
    pub fn has_stderr(&self) -> bool {
        !self.stderr.is_empty()
    }

    /// Final stdout line, without its terminator.
    #[must_use]
    pub fn last_line(&self) -> Option<&str> {
        self.stdout.lines().last()
    }
}

/// An open shell session on a remote host.
#[async_trait]
pub trait RemoteShell: Send {
    /// Run one command line and collect its output streams.
    ///
    /// # Errors
    ///
    /// Returns a `SessionError` if the channel cannot be opened or breaks.
    async fn exec(&mut self, command: &str) -> SessionResult<CommandOutput>;

    /// Close the session.
    ///
    /// # Errors
    ///
    /// Returns a `SessionError` if the disconnect message cannot be sent.
    async fn disconnect(&mut self) -> SessionResult<()>;
}

/// Everything needed for one connection attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectTarget {
    pub host: String,
    pub user: String,
    pub auth: AuthMethod,
}

impl ConnectTarget {
    #[must_use]
    pub fn new(host: impl Into<String>, credentials: &Credentials) -> Self {
        Self {
            host: host.into(),
            user: credentials.principal.clone(),
            auth: credentials.auth_method(),
        }
    }
}

/// Makes a single connection attempt.
#[async_trait]
pub trait SessionFactory: Send + Sync {
    type Session: RemoteShell;

    /// # Errors
    ///
    /// Returns the classified `SessionError` of this one attempt.
    async fn connect(&self, target: &ConnectTarget) -> SessionResult<Self::Session>;
}

/// Bounded, fixed-delay retry.
#[derive(Debug, Clone, Builder)]
pub struct RetryPolicy {
    #[builder(setters(name = with_max_attempts), default = 4)]
    max_attempts: u32,
    #[builder(setters(name = with_delay), default = Duration::from_secs(1))]
    delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl RetryPolicy {
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

/// Connect, retrying transport and protocol failures under `policy`.
///
/// # Errors
///
/// Returns the first non-retryable error as-is, or
/// `SessionError::ConnectionFailed` once the attempt budget is spent.
pub async fn connect_with_retry<F>(
    factory: &F,
    target: &ConnectTarget,
    policy: &RetryPolicy,
) -> SessionResult<F::Session>
where
    F: SessionFactory + ?Sized,
{
    let max_attempts = policy.max_attempts();
    let mut last_error: Option<SessionError> = None;

    for attempt in 1..=max_attempts {
        match factory.connect(target).await {
            Ok(session) => {
                debug!(host = %target.host, user = %target.user, attempt, "session established");
                return Ok(session);
            }
            Err(e) if e.is_retryable() => {
                warn!(host = %target.host, attempt, max_attempts, error = %e, "connection attempt failed");
                last_error = Some(e);
                if attempt < max_attempts && !policy.delay().is_zero() {
                    tokio::time::sleep(policy.delay()).await;
                }
            }
            Err(e) => {
                error!(host = %target.host, user = %target.user, error = %e, "giving up on host");
                return Err(e);
            }
        }
    }

    Err(SessionError::ConnectionFailed {
        host: target.host.clone(),
        attempts: max_attempts,
        last: last_error.map_or_else(|| "no attempt made".to_string(), |e| e.to_string()),
    })
}

/// Open a session to the host recorded for `cluster`.
///
/// # Errors
///
/// Returns an inventory error if `host`, `user` or the cluster itself is
/// missing, or the session error from [`connect_with_retry`].
pub async fn open<F>(
    factory: &F,
    document: &InventoryDocument,
    cluster: &str,
    policy: &RetryPolicy,
) -> SyncResult<F::Session>
where
    F: SessionFactory + ?Sized,
{
    let host = document.record(cluster)?.require_host(cluster)?.to_string();
    let credentials = credentials::resolve(document, cluster)?;
    let target = ConnectTarget::new(host, &credentials);
    Ok(connect_with_retry(factory, &target, policy).await?)
}
