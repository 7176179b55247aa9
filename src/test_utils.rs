// vcs-inventory: Remote Working Copy Inventory
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shared test utilities.
//!
//! A scripted [`RemoteShell`] standing in for a live SSH session, and
//! log-capturing infrastructure for asserting on emitted warnings.

use std::collections::BTreeMap;
use std::io::Write;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

use crate::error::{SessionError, SessionResult};
use crate::remote::{CommandOutput, RemoteShell};

/// Answers commands from a fixed table; unknown commands write to stderr.
#[derive(Debug, Clone, Default)]
pub(crate) struct ScriptedShell {
    replies: BTreeMap<String, CommandOutput>,
    broken: Option<String>,
    pub(crate) executed: Arc<Mutex<Vec<String>>>,
    pub(crate) disconnected: Arc<Mutex<bool>>,
}

impl ScriptedShell {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(mut self, command: &str, stdout: &str) -> Self {
        self.replies.insert(
            command.to_string(),
            CommandOutput {
                stdout: stdout.to_string(),
                stderr: String::new(),
                exit_status: Some(0),
            },
        );
        self
    }

    pub(crate) fn fail(mut self, command: &str, stderr: &str) -> Self {
        self.replies.insert(
            command.to_string(),
            CommandOutput {
                stdout: String::new(),
                stderr: stderr.to_string(),
                exit_status: Some(1),
            },
        );
        self
    }

    /// Make `command` fail at the transport level.
    pub(crate) fn break_on(mut self, command: &str) -> Self {
        self.broken = Some(command.to_string());
        self
    }

    /// A Git working copy at `path`.
    pub(crate) fn git(path: &str, branch: &str, revision: &str) -> Self {
        Self::new()
            .reply(&format!("ls {path}"), "src\nREADME.md\n")
            .reply(
                &format!("cd {path} && git branch --show-current"),
                &format!("{branch}\n"),
            )
            .reply(
                &format!("cd {path} && git rev-list --count HEAD"),
                &format!("{revision}\n"),
            )
    }

    /// A Subversion working copy at `path`.
    pub(crate) fn svn(path: &str, url: &str, revision: &str) -> Self {
        Self::new()
            .reply(&format!("ls {path}"), "trunk\n")
            .fail(
                &format!("cd {path} && git branch --show-current"),
                "fatal: not a git repository (or any of the parent directories): .git\n",
            )
            .reply(
                &format!("svn info {path}"),
                &format!(
                    "Path: {path}\n\
                     Working Copy Root Path: /home/user/bw\n\
                     URL: {url}\n\
                     Relative URL: ^/trunk\n\
                     Repository Root: https://svn.example.com/repo\n\
                     Revision: {revision}\n\
                     Node Kind: directory\n\
                     Last Changed Rev: {revision}\n"
                ),
            )
    }

    pub(crate) fn executed(&self) -> Vec<String> {
        self.executed.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl RemoteShell for ScriptedShell {
    async fn exec(&mut self, command: &str) -> SessionResult<CommandOutput> {
        if let Ok(mut executed) = self.executed.lock() {
            executed.push(command.to_string());
        }
        if self.broken.as_deref() == Some(command) {
            return Err(SessionError::TransportFailed {
                host: "scripted".to_string(),
                message: "connection reset by peer".to_string(),
            });
        }
        Ok(self.replies.get(command).cloned().unwrap_or_else(|| CommandOutput {
            stdout: String::new(),
            stderr: format!("sh: {command}: command not found\n"),
            exit_status: Some(127),
        }))
    }

    async fn disconnect(&mut self) -> SessionResult<()> {
        if let Ok(mut disconnected) = self.disconnected.lock() {
            *disconnected = true;
        }
        Ok(())
    }
}

#[derive(Clone)]
pub(crate) struct BufferWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer
            .lock()
            .map_err(|_| std::io::Error::other("buffer poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// In-memory log sink for formatting layers under test.
#[derive(Clone, Default)]
pub(crate) struct BufferMakeWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl BufferMakeWriter {
    pub(crate) fn contents(&self) -> String {
        self.buffer
            .lock()
            .map(|guard| String::from_utf8_lossy(&guard).to_string())
            .unwrap_or_default()
    }
}

impl<'a> MakeWriter<'a> for BufferMakeWriter {
    type Writer = BufferWriter;

    fn make_writer(&'a self) -> Self::Writer {
        BufferWriter {
            buffer: self.buffer.clone(),
        }
    }
}

/// Runs an async closure while capturing tracing output at WARN and above.
///
/// Returns the closure's output and the captured log text.
pub(crate) async fn run_with_logs<F, Fut, T>(f: F) -> (T, String)
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = T>,
{
    let writer = BufferMakeWriter::default();
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_writer(writer.clone())
        .with_max_level(Level::WARN)
        .with_ansi(false)
        .with_target(false)
        .finish();

    let _guard = tracing::subscriber::set_default(subscriber);
    let output = f().await;

    let logs = writer.contents();
    (output, logs)
}
