// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Storage Persistence Integration Tests
//!
//! Sync state surviving a reopen of the on-disk database.

use std::sync::Arc;

use samplesync_core::{
    ContactStore, CredentialStore, RawContact, Storage, SyncExtras, SyncHandler, SyncResult,
    AUTHTOKEN_TYPE,
};
use tempfile::TempDir;

use super::fakes::{create_server_contact, create_test_harness_on};

#[test]
fn test_sync_state_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("samplesync.db");

    {
        let storage = Arc::new(Storage::open(&db_path).unwrap());
        let h = create_test_harness_on(storage, Some("secret"));
        h.storage
            .insert_local_contact(&h.account, &RawContact::builder().user_name("a").build())
            .unwrap();
        h.server
            .push_response(Ok(vec![create_server_contact(5, "e", 77)]));

        let mut result = SyncResult::new();
        h.adapter
            .on_perform_sync(&h.account, &SyncExtras::new(), &mut result);
        assert!(!result.has_error());
    }

    let storage = Arc::new(Storage::open(&db_path).unwrap());
    assert_eq!(storage.schema_version().unwrap(), 3);

    let h = create_test_harness_on(storage, Some("secret"));
    assert_eq!(h.marker(), 77);
    assert_eq!(
        h.storage
            .peek_auth_token(&h.account, AUTHTOKEN_TYPE)
            .unwrap()
            .as_deref(),
        Some("token-1")
    );
    assert!(h.storage.dirty_contacts(&h.account).unwrap().is_empty());
    assert_eq!(h.storage.contacts_for_account(&h.account).unwrap().len(), 2);
    assert!(h.storage.is_ungrouped_visible(&h.account).unwrap());

    // Reopened store continues from the persisted marker
    let mut result = SyncResult::new();
    h.adapter
        .on_perform_sync(&h.account, &SyncExtras::new(), &mut result);
    assert_eq!(h.server.requests()[0].marker, 77);
    assert_eq!(h.contacts.visibility_toggles(), 0);
}
