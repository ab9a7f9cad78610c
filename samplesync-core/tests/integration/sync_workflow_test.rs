// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sync Workflow Integration Tests
//!
//! Full passes through the account manager, authenticator and SQLite store.

use samplesync_core::{
    ContactStore, CredentialStore, NetworkError, RawContact, SyncEvent, SyncExtras, SyncHandler,
    SyncResult, AUTHTOKEN_TYPE,
};

use super::fakes::{create_server_contact, create_test_harness, init_test_logging};

/// Test: marker 100, dirty {A, B}, delta {C} with state 150
#[test]
fn test_documented_pass_example() {
    let h = create_test_harness(Some("secret"));
    h.set_marker(100);

    let a = h
        .storage
        .insert_local_contact(&h.account, &RawContact::builder().user_name("a").build())
        .unwrap();
    let b = h
        .storage
        .insert_local_contact(&h.account, &RawContact::builder().user_name("b").build())
        .unwrap();
    h.server
        .push_response(Ok(vec![create_server_contact(3, "c", 150)]));

    let mut result = SyncResult::new();
    h.adapter
        .on_perform_sync(&h.account, &SyncExtras::new(), &mut result);

    assert!(!result.has_error());
    assert_eq!(h.marker(), 150);

    // The server saw both local edits at the old marker
    let requests = h.server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].marker, 100);
    assert_eq!(requests[0].auth_token, "token-1");
    let sent: Vec<_> = requests[0]
        .dirty
        .iter()
        .map(|c| c.raw_contact_id)
        .collect();
    assert_eq!(sent, vec![Some(a), Some(b)]);

    // A and B acknowledged, C applied
    assert!(h.storage.dirty_contacts(&h.account).unwrap().is_empty());
    let names: Vec<_> = h
        .storage
        .contacts_for_account(&h.account)
        .unwrap()
        .into_iter()
        .filter_map(|c| c.user_name)
        .collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

/// Test: the first pass makes contacts visible, later passes never do
#[test]
fn test_visibility_toggled_only_on_first_pass() {
    let h = create_test_harness(Some("secret"));
    h.server
        .push_response(Ok(vec![create_server_contact(1, "bob", 10)]));

    let mut result = SyncResult::new();
    h.adapter
        .on_perform_sync(&h.account, &SyncExtras::new(), &mut result);
    assert_eq!(h.contacts.visibility_toggles(), 1);
    assert!(h.storage.is_ungrouped_visible(&h.account).unwrap());
    assert_eq!(h.marker(), 10);

    for _ in 0..3 {
        h.adapter
            .on_perform_sync(&h.account, &SyncExtras::new(), &mut result);
        assert!(!result.has_error());
    }
    assert_eq!(h.contacts.visibility_toggles(), 1);
}

/// Test: the token is fetched once and reused across passes
#[test]
fn test_token_reused_across_passes() {
    let h = create_test_harness(Some("secret"));
    let mut result = SyncResult::new();

    h.adapter
        .on_perform_sync(&h.account, &SyncExtras::new(), &mut result);
    h.adapter
        .on_perform_sync(&h.account, &SyncExtras::new(), &mut result);

    assert_eq!(h.tokens.calls(), 1);
    assert_eq!(h.server.requests().len(), 2);
}

/// Test: transport failure counts io and leaves the marker
#[test]
fn test_io_failure() {
    let h = create_test_harness(Some("secret"));
    h.set_marker(100);
    h.storage
        .insert_local_contact(&h.account, &RawContact::builder().user_name("a").build())
        .unwrap();
    h.server
        .push_response(Err(NetworkError::Io("connection reset".into())));

    let mut result = SyncResult::new();
    h.adapter
        .on_perform_sync(&h.account, &SyncExtras::new(), &mut result);

    assert_eq!(result.stats.num_io_exceptions, 1);
    assert_eq!(result.stats.total(), 1);
    assert_eq!(h.marker(), 100);
    // Unacknowledged edits stay dirty for the next pass
    assert_eq!(h.storage.dirty_contacts(&h.account).unwrap().len(), 1);
}

/// Test: server error statuses are io failures
#[test]
fn test_server_error_status() {
    let h = create_test_harness(Some("secret"));
    h.set_marker(100);
    h.server.push_response(Err(NetworkError::Server(503)));

    let mut result = SyncResult::new();
    h.adapter
        .on_perform_sync(&h.account, &SyncExtras::new(), &mut result);

    assert_eq!(result.stats.num_io_exceptions, 1);
    assert_eq!(h.marker(), 100);
}

/// Test: malformed response counts parse and leaves the marker
#[test]
fn test_parse_failure() {
    let h = create_test_harness(Some("secret"));
    h.set_marker(100);
    h.server
        .push_response(Err(NetworkError::Parse("unexpected end of input".into())));

    let mut result = SyncResult::new();
    h.adapter
        .on_perform_sync(&h.account, &SyncExtras::new(), &mut result);

    assert_eq!(result.stats.num_parse_exceptions, 1);
    assert_eq!(result.stats.total(), 1);
    assert_eq!(h.marker(), 100);
}

/// Test: missing credentials count auth and ask the host to notify the user
#[test]
fn test_auth_failure_without_password() {
    let h = create_test_harness(None);
    h.set_marker(100);

    let mut result = SyncResult::new();
    h.adapter
        .on_perform_sync(&h.account, &SyncExtras::new(), &mut result);

    assert_eq!(result.stats.num_auth_exceptions, 1);
    assert_eq!(result.stats.total(), 1);
    assert_eq!(h.marker(), 100);
    assert!(h.server.requests().is_empty());
    assert!(h
        .events
        .lock()
        .unwrap()
        .iter()
        .any(|e| matches!(e, SyncEvent::AuthFailureNotification { .. })));
}

/// Test: a rejected token is dropped and replaced on the next pass
#[test]
fn test_rejected_token_replaced_next_pass() {
    let h = create_test_harness(Some("secret"));
    h.set_marker(100);
    h.server
        .push_response(Err(NetworkError::Authentication("401".into())));

    let mut result = SyncResult::new();
    h.adapter
        .on_perform_sync(&h.account, &SyncExtras::new(), &mut result);
    assert_eq!(result.stats.num_auth_exceptions, 1);
    assert_eq!(h.marker(), 100);
    assert_eq!(
        h.storage.peek_auth_token(&h.account, AUTHTOKEN_TYPE).unwrap(),
        None
    );

    h.adapter
        .on_perform_sync(&h.account, &SyncExtras::new(), &mut result);
    assert!(!result.has_error());
    assert_eq!(h.tokens.calls(), 2);
}

/// Test: a local deletion is sent once and then purged
#[test]
fn test_local_deletion_purged_after_ack() {
    let h = create_test_harness(Some("secret"));
    h.set_marker(1);
    let id = h
        .storage
        .insert_local_contact(&h.account, &RawContact::builder().user_name("gone").build())
        .unwrap();
    h.storage.delete_local_contact(id).unwrap();

    let mut result = SyncResult::new();
    h.adapter
        .on_perform_sync(&h.account, &SyncExtras::new(), &mut result);

    assert!(!result.has_error());
    assert!(h.server.requests()[0].dirty[0].deleted);
    assert_eq!(h.storage.load_contact(id).unwrap(), None);
}

/// Test: events bracket a failed pass
#[test]
fn test_failure_events() {
    let h = create_test_harness(Some("secret"));
    h.server
        .push_response(Err(NetworkError::Io("offline".into())));

    let mut result = SyncResult::new();
    h.adapter
        .on_perform_sync(&h.account, &SyncExtras::new(), &mut result);

    let events = h.events.lock().unwrap();
    assert!(matches!(
        events.first(),
        Some(SyncEvent::SyncStarted { marker: 0, .. })
    ));
    assert!(matches!(events.last(), Some(SyncEvent::SyncFailed { .. })));
}

/// Test: the harness installs the test logger exactly once
#[test]
fn test_harness_installs_logger_once() {
    let h = create_test_harness(Some("secret"));
    assert!(!init_test_logging());

    let mut result = SyncResult::new();
    h.adapter
        .on_perform_sync(&h.account, &SyncExtras::new(), &mut result);
    assert!(!result.has_error());
}
