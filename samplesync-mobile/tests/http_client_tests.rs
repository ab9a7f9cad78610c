// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! HTTP Client Tests
//!
//! The blocking client is only compiled with the core `http-client` feature,
//! which this crate always enables.

use std::time::Duration;

use samplesync_core::config::HttpConfig;
use samplesync_core::network::HttpSyncClient;
use samplesync_core::{Account, NetworkError, RemoteSyncService, TokenService};

fn create_unreachable_client() -> HttpSyncClient {
    // Port 1 on loopback refuses connections
    let mut config = HttpConfig::default().with_base_url("http://127.0.0.1:1/");
    config.timeout = Duration::from_secs(2);
    HttpSyncClient::new(config).unwrap()
}

/// Test: trailing slashes are dropped from the base URL
#[test]
fn test_base_url_is_normalized() {
    let client = create_unreachable_client();
    assert_eq!(client.base_url(), "http://127.0.0.1:1");
}

/// Test: a refused connection during sync is an io failure
#[test]
fn test_unreachable_server_is_io_error() {
    let client = create_unreachable_client();
    let result = client.sync_contacts(&Account::sample("alice"), "tok", 0, &[]);
    assert!(matches!(result, Err(NetworkError::Io(_))));
}

/// Test: a refused connection during token exchange is an io failure
#[test]
fn test_unreachable_auth_is_io_error() {
    let client = create_unreachable_client();
    assert!(matches!(
        client.authenticate("alice", "pw"),
        Err(NetworkError::Io(_))
    ));
}
