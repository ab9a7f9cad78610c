// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shared fakes and fixtures for the integration tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use samplesync_core::{
    Account, AccountManager, Authenticator, CallbackHandler, ContactStore, EventDispatcher,
    NetworkError, RawContact, RemoteSyncService, Storage, StorageError, SyncAdapter, SyncConfig,
    SyncEvent, TokenService,
};

/// Token service answering every exchange with the same token.
pub struct FakeTokenService {
    pub token: Option<String>,
    pub calls: AtomicUsize,
}

impl FakeTokenService {
    pub fn issuing(token: &str) -> Arc<Self> {
        Arc::new(FakeTokenService {
            token: Some(token.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TokenService for FakeTokenService {
    fn authenticate(&self, _username: &str, _password: &str) -> Result<Option<String>, NetworkError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.token.clone())
    }
}

/// What the server was sent on one call.
#[derive(Debug, Clone)]
pub struct SyncRequest {
    pub auth_token: String,
    pub marker: i64,
    pub dirty: Vec<RawContact>,
}

/// Sync server replaying queued responses; an empty queue answers with no changes.
#[derive(Default)]
pub struct FakeSyncServer {
    responses: Mutex<VecDeque<Result<Vec<RawContact>, NetworkError>>>,
    requests: Mutex<Vec<SyncRequest>>,
}

impl FakeSyncServer {
    pub fn push_response(&self, response: Result<Vec<RawContact>, NetworkError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn requests(&self) -> Vec<SyncRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl RemoteSyncService for FakeSyncServer {
    fn sync_contacts(
        &self,
        _account: &Account,
        auth_token: &str,
        marker: i64,
        dirty_contacts: &[RawContact],
    ) -> Result<Vec<RawContact>, NetworkError> {
        self.requests.lock().unwrap().push(SyncRequest {
            auth_token: auth_token.to_string(),
            marker,
            dirty: dirty_contacts.to_vec(),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Contact store counting visibility toggles on top of SQLite.
pub struct CountingContactStore {
    pub inner: Arc<Storage>,
    pub visibility_toggles: AtomicUsize,
}

impl CountingContactStore {
    pub fn visibility_toggles(&self) -> usize {
        self.visibility_toggles.load(Ordering::SeqCst)
    }
}

impl ContactStore for CountingContactStore {
    fn set_account_contacts_visible(
        &self,
        account: &Account,
        visible: bool,
    ) -> Result<(), StorageError> {
        self.visibility_toggles.fetch_add(1, Ordering::SeqCst);
        self.inner.set_account_contacts_visible(account, visible)
    }

    fn ensure_group_exists(&self, account: &Account, title: &str) -> Result<i64, StorageError> {
        self.inner.ensure_group_exists(account, title)
    }

    fn dirty_contacts(&self, account: &Account) -> Result<Vec<RawContact>, StorageError> {
        self.inner.dirty_contacts(account)
    }

    fn update_contacts(
        &self,
        account: &Account,
        contacts: &[RawContact],
        group_id: i64,
        last_sync_marker: i64,
    ) -> Result<i64, StorageError> {
        self.inner
            .update_contacts(account, contacts, group_id, last_sync_marker)
    }

    fn update_status_messages(
        &self,
        account: &Account,
        contacts: &[RawContact],
    ) -> Result<(), StorageError> {
        self.inner.update_status_messages(account, contacts)
    }

    fn clear_sync_flags(&self, contacts: &[RawContact]) -> Result<(), StorageError> {
        self.inner.clear_sync_flags(contacts)
    }
}

/// The full stack wired the way a host would wire it.
pub struct SyncHarness {
    pub storage: Arc<Storage>,
    pub contacts: Arc<CountingContactStore>,
    pub tokens: Arc<FakeTokenService>,
    pub server: Arc<FakeSyncServer>,
    pub events: Arc<Mutex<Vec<SyncEvent>>>,
    pub adapter: SyncAdapter,
    pub account: Account,
}

impl SyncHarness {
    pub fn marker(&self) -> i64 {
        samplesync_core::sync::marker::read_marker(
            self.storage.as_ref(),
            &self.account,
            &SyncConfig::default().sync_marker_key,
        )
        .unwrap()
    }

    pub fn set_marker(&self, marker: i64) {
        samplesync_core::sync::marker::write_marker(
            self.storage.as_ref(),
            &self.account,
            &SyncConfig::default().sync_marker_key,
            marker,
        )
        .unwrap();
    }
}

/// Routes core logs to the test writer, filtered by `RUST_LOG`.
///
/// Only the first call installs the subscriber.
pub fn init_test_logging() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .is_ok()
}

/// Builds a harness on an existing store for an account with `password`.
pub fn create_test_harness_on(storage: Arc<Storage>, password: Option<&str>) -> SyncHarness {
    init_test_logging();

    let account = Account::sample("alice");
    storage.add_account(&account, password).unwrap();

    let config = SyncConfig::default();
    let tokens = FakeTokenService::issuing("token-1");
    let server = Arc::new(FakeSyncServer::default());
    let contacts = Arc::new(CountingContactStore {
        inner: storage.clone(),
        visibility_toggles: AtomicUsize::new(0),
    });

    let events = Arc::new(Mutex::new(Vec::new()));
    let seen = events.clone();
    let mut dispatcher = EventDispatcher::new();
    dispatcher.add_handler(Arc::new(CallbackHandler::new(move |e| {
        seen.lock().unwrap().push(e)
    })));
    let dispatcher = Arc::new(dispatcher);

    let authenticator = Arc::new(Authenticator::new(
        storage.clone(),
        tokens.clone(),
        config.clone(),
    ));
    let manager = Arc::new(AccountManager::new(
        storage.clone(),
        authenticator,
        dispatcher.clone(),
    ));
    let adapter = SyncAdapter::new(
        storage.clone(),
        contacts.clone(),
        server.clone(),
        manager,
        dispatcher,
        config,
    );

    SyncHarness {
        storage,
        contacts,
        tokens,
        server,
        events,
        adapter,
        account,
    }
}

/// Builds a harness on an in-memory store.
pub fn create_test_harness(password: Option<&str>) -> SyncHarness {
    create_test_harness_on(Arc::new(Storage::in_memory().unwrap()), password)
}

/// A contact as the server would send it.
pub fn create_server_contact(server_id: i64, user_name: &str, sync_state: i64) -> RawContact {
    RawContact::builder()
        .server_contact_id(server_id)
        .user_name(user_name)
        .sync_state(sync_state)
        .build()
}
