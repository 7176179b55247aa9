// vcs-inventory: Remote Working Copy Inventory
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{ConfigError, InventoryError, SessionError, SyncError, SyncResult};

#[test]
fn test_missing_field_display() {
    let err = InventoryError::missing("NA-CLUSTER", "user");
    insta::assert_snapshot!(err.to_string(), @"inventory has no 'user' for cluster 'NA-CLUSTER'");
}

#[test]
fn test_config_error_display() {
    let err = ConfigError::InvalidValue {
        section: "ssh".to_string(),
        key: "max_attempts".to_string(),
        message: "must be at least 1".to_string(),
    };
    insta::assert_snapshot!(
        err.to_string(),
        @"invalid value for 'max_attempts' in section '[ssh]': must be at least 1"
    );
}

#[test]
fn test_session_error_wraps_into_sync_error() {
    let err: SyncError = SessionError::ConnectionFailed {
        host: "eu1-vm-host".to_string(),
        attempts: 4,
        last: "connection refused".to_string(),
    }
    .into();
    insta::assert_snapshot!(
        err.to_string(),
        @"session error: could not connect to eu1-vm-host after 4 attempt(s): connection refused"
    );
}

#[test]
fn test_retryable_classification() {
    let transport = SessionError::TransportFailed {
        host: "h".to_string(),
        message: "refused".to_string(),
    };
    let protocol = SessionError::ProtocolFailed {
        host: "h".to_string(),
        message: "kex".to_string(),
    };
    let auth = SessionError::AuthenticationFailed {
        host: "h".to_string(),
        user: "u".to_string(),
    };
    let key = SessionError::InvalidKey {
        path: "/k".to_string(),
        message: "bad".to_string(),
    };

    assert!(transport.is_retryable());
    assert!(protocol.is_retryable());
    assert!(!auth.is_retryable());
    assert!(!key.is_retryable());
}

#[test]
fn test_sync_error_size() {
    let size = std::mem::size_of::<SyncError>();
    assert!(size <= 16, "SyncError is {size} bytes, expected <= 16");
}

#[test]
fn test_sync_result_size() {
    let size = std::mem::size_of::<SyncResult<()>>();
    assert!(size <= 16, "SyncResult<()> is {size} bytes, expected <= 16");
}
