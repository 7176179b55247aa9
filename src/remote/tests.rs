// vcs-inventory: Remote Working Copy Inventory
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{
    CommandOutput, ConnectTarget, RemoteShell, RetryPolicy, SessionFactory, connect_with_retry,
    open,
};
use crate::error::{InventoryError, SessionError, SessionResult, SyncError};
use crate::inventory::InventoryDocument;
use crate::inventory::credentials::AuthMethod;

struct NullShell;

#[async_trait]
impl RemoteShell for NullShell {
    async fn exec(&mut self, _command: &str) -> SessionResult<CommandOutput> {
        Ok(CommandOutput::default())
    }

    async fn disconnect(&mut self) -> SessionResult<()> {
        Ok(())
    }
}

/// Replays a fixed sequence of attempt outcomes; succeeds once it runs dry.
struct ScriptedFactory {
    failures: Mutex<VecDeque<SessionError>>,
    seen: Mutex<Vec<ConnectTarget>>,
}

impl ScriptedFactory {
    fn new(failures: impl IntoIterator<Item = SessionError>) -> Self {
        Self {
            failures: Mutex::new(failures.into_iter().collect()),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn attempts(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

#[async_trait]
impl SessionFactory for ScriptedFactory {
    type Session = NullShell;

    async fn connect(&self, target: &ConnectTarget) -> SessionResult<NullShell> {
        self.seen.lock().unwrap().push(target.clone());
        match self.failures.lock().unwrap().pop_front() {
            Some(err) => Err(err),
            None => Ok(NullShell),
        }
    }
}

fn transport() -> SessionError {
    SessionError::TransportFailed {
        host: "eu1-vm-host".to_string(),
        message: "connection refused".to_string(),
    }
}

fn protocol() -> SessionError {
    SessionError::ProtocolFailed {
        host: "eu1-vm-host".to_string(),
        message: "kex failed".to_string(),
    }
}

fn auth() -> SessionError {
    SessionError::AuthenticationFailed {
        host: "eu1-vm-host".to_string(),
        user: "euuser".to_string(),
    }
}

fn target() -> ConnectTarget {
    ConnectTarget {
        host: "eu1-vm-host".to_string(),
        user: "euuser".to_string(),
        auth: AuthMethod::Password("euuser".to_string()),
    }
}

fn no_delay(max_attempts: u32) -> RetryPolicy {
    RetryPolicy::builder()
        .with_max_attempts(max_attempts)
        .with_delay(Duration::ZERO)
        .build()
}

#[test]
fn test_command_output_helpers() {
    let output = CommandOutput {
        stdout: "first\nsecond\n".to_string(),
        stderr: String::new(),
        exit_status: Some(0),
    };
    assert_eq!(output.last_line(), Some("second"));
    assert!(!output.has_stderr());
    assert_eq!(CommandOutput::default().last_line(), None);
}

#[test]
fn test_retry_policy_defaults() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.max_attempts(), 4);
    assert_eq!(policy.delay(), Duration::from_secs(1));
}

#[tokio::test]
async fn test_transient_failures_are_retried() {
    let factory = ScriptedFactory::new([transport(), protocol(), transport()]);
    let result = connect_with_retry(&factory, &target(), &no_delay(4)).await;
    assert!(result.is_ok());
    assert_eq!(factory.attempts(), 4);
}

#[tokio::test]
async fn test_budget_exhaustion_is_connection_failed() {
    let factory = ScriptedFactory::new([protocol(), protocol(), protocol(), transport()]);
    let Err(err) = connect_with_retry(&factory, &target(), &no_delay(4)).await else {
        panic!("expected connection failure");
    };
    assert_eq!(factory.attempts(), 4);
    insta::assert_snapshot!(
        err.to_string(),
        @"could not connect to eu1-vm-host after 4 attempt(s): transport failure reaching eu1-vm-host: connection refused"
    );
}

#[tokio::test]
async fn test_authentication_failure_stops_immediately() {
    let factory = ScriptedFactory::new([auth(), transport()]);
    let Err(err) = connect_with_retry(&factory, &target(), &no_delay(4)).await else {
        panic!("expected authentication failure");
    };
    assert!(matches!(err, SessionError::AuthenticationFailed { .. }));
    assert_eq!(factory.attempts(), 1);
}

#[tokio::test]
async fn test_open_resolves_host_and_credentials() {
    let document = InventoryDocument::parse(
        r#"{"hosts": {"NA-CLUSTER": {"host": "na1-vm-host", "user": "nauser", "ssh_key_path": "/k/id.pub"}}}"#,
        "<test>",
    )
    .unwrap();
    let factory = ScriptedFactory::new([]);

    open(&factory, &document, "NA-CLUSTER", &no_delay(1))
        .await
        .unwrap();

    let seen = factory.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].host, "na1-vm-host");
    assert_eq!(seen[0].user, "nauser");
    assert_eq!(seen[0].auth, AuthMethod::KeyFile("/k/id".into()));
}

#[tokio::test]
async fn test_open_without_host_never_connects() {
    let document =
        InventoryDocument::parse(r#"{"hosts": {"NA-CLUSTER": {"user": "nauser"}}}"#, "<test>")
            .unwrap();
    let factory = ScriptedFactory::new([]);

    let Err(err) = open(&factory, &document, "NA-CLUSTER", &no_delay(1)).await else {
        panic!("expected missing host");
    };
    assert!(matches!(
        err,
        SyncError::Inventory(ref inner) if matches!(**inner, InventoryError::MissingField { .. })
    ));
    assert_eq!(factory.attempts(), 0);
}
