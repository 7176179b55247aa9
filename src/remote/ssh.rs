// vcs-inventory: Remote Working Copy Inventory
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! SSH transport on top of `russh`.
//!
//! ```text
//! SshConnector::connect(target)
//!   TcpStream::connect (bounded by connect_timeout)  -> TransportFailed
//!   russh handshake                                  -> ProtocolFailed
//!   password / key auth
//!     key unreadable                                 -> InvalidKey
//!     server says no                                 -> AuthenticationFailed
//!        |
//!        v
//!   SshSession::exec(cmd)  one channel per command
//! ```
//!
//! Server host keys are accepted without a `known_hosts` check.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use russh::{ChannelMsg, Disconnect, client};
use tokio::net::TcpStream;
use tracing::trace;

use super::{CommandOutput, ConnectTarget, RemoteShell, SessionFactory};
use crate::error::{SessionError, SessionResult};
use crate::inventory::credentials::AuthMethod;

struct AcceptAnyHostKey;

#[async_trait]
impl client::Handler for AcceptAnyHostKey {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        _server_public_key: &russh_keys::key::PublicKey,
    ) -> Result<bool, Self::Error> {
        Ok(true)
    }
}

fn classify(host: &str, err: russh::Error) -> SessionError {
    match err {
        russh::Error::IO(e) => SessionError::TransportFailed {
            host: host.to_string(),
            message: e.to_string(),
        },
        other => SessionError::ProtocolFailed {
            host: host.to_string(),
            message: other.to_string(),
        },
    }
}

/// Opens SSH sessions on a fixed port.
#[derive(Debug, Clone)]
pub struct SshConnector {
    port: u16,
    connect_timeout: Duration,
}

impl SshConnector {
    #[must_use]
    pub const fn new(port: u16, connect_timeout: Duration) -> Self {
        Self {
            port,
            connect_timeout,
        }
    }
}

#[async_trait]
impl SessionFactory for SshConnector {
    type Session = SshSession;

    async fn connect(&self, target: &ConnectTarget) -> SessionResult<SshSession> {
        let host = target.host.as_str();
        let transport = |message: String| SessionError::TransportFailed {
            host: host.to_string(),
            message,
        };

        let stream = tokio::time::timeout(
            self.connect_timeout,
            TcpStream::connect((host, self.port)),
        )
        .await
        .map_err(|_| {
            transport(format!(
                "connect timed out after {}s",
                self.connect_timeout.as_secs()
            ))
        })?
        .map_err(|e| transport(e.to_string()))?;

        let config = Arc::new(client::Config::default());
        let mut handle = client::connect_stream(config, stream, AcceptAnyHostKey)
            .await
            .map_err(|e| classify(host, e))?;

        let authenticated = match &target.auth {
            AuthMethod::Password(password) => {
                handle
                    .authenticate_password(target.user.as_str(), password.as_str())
                    .await
            }
            AuthMethod::KeyFile(path) => {
                let key = russh_keys::load_secret_key(path, None).map_err(|e| {
                    SessionError::InvalidKey {
                        path: path.display().to_string(),
                        message: e.to_string(),
                    }
                })?;
                handle
                    .authenticate_publickey(target.user.as_str(), Arc::new(key))
                    .await
            }
        }
        .map_err(|e| classify(host, e))?;

        if !authenticated {
            return Err(SessionError::AuthenticationFailed {
                host: host.to_string(),
                user: target.user.clone(),
            });
        }

        Ok(SshSession {
            handle,
            host: host.to_string(),
        })
    }
}

/// Authenticated SSH connection.
pub struct SshSession {
    handle: client::Handle<AcceptAnyHostKey>,
    host: String,
}

impl std::fmt::Debug for SshSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SshSession")
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl RemoteShell for SshSession {
    async fn exec(&mut self, command: &str) -> SessionResult<CommandOutput> {
        trace!(host = %self.host, command, "exec");
        let mut channel = self
            .handle
            .channel_open_session()
            .await
            .map_err(|e| classify(&self.host, e))?;
        channel
            .exec(true, command)
            .await
            .map_err(|e| classify(&self.host, e))?;

        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let mut exit_status = None;

        while let Some(msg) = channel.wait().await {
            match msg {
                ChannelMsg::Data { ref data } => stdout.extend_from_slice(data),
                ChannelMsg::ExtendedData { ref data, ext } if ext == 1 => {
                    stderr.extend_from_slice(data);
                }
                ChannelMsg::ExitStatus {
                    exit_status: status,
                } => exit_status = Some(status),
                ChannelMsg::Close => break,
                _ => {}
            }
        }

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&stdout).into_owned(),
            stderr: String::from_utf8_lossy(&stderr).into_owned(),
            exit_status,
        })
    }

    async fn disconnect(&mut self) -> SessionResult<()> {
        self.handle
            .disconnect(Disconnect::ByApplication, "", "en")
            .await
            .map_err(|e| classify(&self.host, e))
    }
}
