// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sync Adapter
//!
//! Runs one two-way contact sync pass per host invocation.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, error, info, trace, warn};

use super::cancel::CancellationFlag;
use super::error::SyncError;
use super::marker;
use super::result::SyncResult;
use crate::account::Account;
use crate::auth::TokenSource;
use crate::config::SyncConfig;
use crate::events::{EventDispatcher, SyncEvent};
use crate::network::RemoteSyncService;
use crate::storage::{ContactStore, CredentialStore};

/// Free-form options the host scheduler attaches to a sync request.
pub type SyncExtras = BTreeMap<String, String>;

/// Entry points the host scheduler calls.
pub trait SyncHandler: Send + Sync {
    /// Runs one sync pass for `account`, tallying failures in `result`.
    fn on_perform_sync(&self, account: &Account, extras: &SyncExtras, result: &mut SyncResult);

    /// Asks the pass in progress to stop at its next cancellation point.
    fn on_sync_canceled(&self);
}

/// What a successful pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PassSummary {
    new_marker: i64,
    uploaded: usize,
    downloaded: usize,
}

/// Two-way contact sync adapter.
pub struct SyncAdapter {
    credentials: Arc<dyn CredentialStore>,
    contacts: Arc<dyn ContactStore>,
    server: Arc<dyn RemoteSyncService>,
    tokens: Arc<dyn TokenSource>,
    events: Arc<EventDispatcher>,
    config: SyncConfig,
    cancel: CancellationFlag,
}

impl SyncAdapter {
    /// Creates a new SyncAdapter.
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        contacts: Arc<dyn ContactStore>,
        server: Arc<dyn RemoteSyncService>,
        tokens: Arc<dyn TokenSource>,
        events: Arc<EventDispatcher>,
        config: SyncConfig,
    ) -> Self {
        SyncAdapter {
            credentials,
            contacts,
            server,
            tokens,
            events,
            config,
            cancel: CancellationFlag::new(),
        }
    }

    /// Returns a handle that cancels the running pass from another thread.
    pub fn cancel_handle(&self) -> CancellationFlag {
        self.cancel.clone()
    }

    /// Returns the adapter configuration.
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    fn ensure_not_canceled(&self) -> Result<(), SyncError> {
        if self.cancel.is_canceled() {
            Err(SyncError::Canceled)
        } else {
            Ok(())
        }
    }

    fn run_pass(
        &self,
        account: &Account,
        last_marker: i64,
        auth_token: &mut Option<String>,
    ) -> Result<PassSummary, SyncError> {
        if last_marker == 0 {
            debug!("First sync for {}, making contacts visible", account.name);
            self.contacts.set_account_contacts_visible(account, true)?;
        }

        let token = self.tokens.blocking_get_auth_token(
            account,
            &self.config.auth_token_type,
            self.config.notify_auth_failure,
            &self.cancel,
        )?;
        *auth_token = Some(token.clone());
        self.ensure_not_canceled()?;

        let group_id = self
            .contacts
            .ensure_group_exists(account, &self.config.group_title)?;

        let dirty = self.contacts.dirty_contacts(account)?;
        debug!("Uploading {} dirty contacts for {}", dirty.len(), account.name);

        let delta = self
            .server
            .sync_contacts(account, &token, last_marker, &dirty)?;
        debug!("Received {} changed contacts for {}", delta.len(), account.name);

        let new_marker = self
            .contacts
            .update_contacts(account, &delta, group_id, last_marker)?;
        self.contacts.update_status_messages(account, &delta)?;

        marker::write_marker(
            self.credentials.as_ref(),
            account,
            &self.config.sync_marker_key,
            new_marker,
        )?;

        if !dirty.is_empty() {
            self.contacts.clear_sync_flags(&dirty)?;
        }

        Ok(PassSummary {
            new_marker,
            uploaded: dirty.len(),
            downloaded: delta.len(),
        })
    }

    fn handle_failure(
        &self,
        account: &Account,
        err: &SyncError,
        auth_token: Option<&str>,
        result: &mut SyncResult,
    ) {
        if let (SyncError::Authentication(_), Some(token)) = (err, auth_token) {
            if let Err(e) = self.tokens.invalidate_auth_token(account, token) {
                warn!("Failed to invalidate auth token for {}: {}", account.name, e);
            }
        }

        let counter = result.record(err);
        match counter {
            Some(counter) => error!("Sync failed for {} ({:?}): {}", account.name, counter, err),
            None => info!("Sync canceled for {}", account.name),
        }

        self.events.dispatch(SyncEvent::SyncFailed {
            account_name: account.name.clone(),
            counter,
            error: err.to_string(),
        });
    }
}

impl SyncHandler for SyncAdapter {
    fn on_perform_sync(&self, account: &Account, extras: &SyncExtras, result: &mut SyncResult) {
        trace!("on_perform_sync({}, {} extras)", account, extras.len());
        result.reset();
        self.cancel.reset();

        let last_marker = match marker::read_marker(
            self.credentials.as_ref(),
            account,
            &self.config.sync_marker_key,
        ) {
            Ok(marker) => marker,
            Err(e) => {
                self.handle_failure(account, &SyncError::from(e), None, result);
                return;
            }
        };

        self.events.dispatch(SyncEvent::SyncStarted {
            account_name: account.name.clone(),
            marker: last_marker,
        });

        let mut auth_token = None;
        match self.run_pass(account, last_marker, &mut auth_token) {
            Ok(summary) => {
                info!(
                    "Synced {}: marker {} -> {}, {} up, {} down",
                    account.name,
                    last_marker,
                    summary.new_marker,
                    summary.uploaded,
                    summary.downloaded
                );
                self.events.dispatch(SyncEvent::SyncCompleted {
                    account_name: account.name.clone(),
                    new_marker: summary.new_marker,
                    uploaded: summary.uploaded,
                    downloaded: summary.downloaded,
                });
            }
            Err(e) => self.handle_failure(account, &e, auth_token.as_deref(), result),
        }
    }

    fn on_sync_canceled(&self) {
        trace!("on_sync_canceled");
        self.cancel.cancel();
    }
}
