// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Platform Collaborators
//!
//! Callback interfaces the host implements in Kotlin (Android) or Swift
//! (iOS), and the bridges that adapt them to the core collaborator traits.

use std::sync::Arc;

use samplesync_core::{
    Account, ContactStore, CredentialStore, EventHandler, NetworkError, RawContact,
    RemoteSyncService, StorageError, SyncEvent, TokenService,
};

use crate::error::MobileError;
use crate::types::{from_mobile_contacts, to_mobile_contacts, MobileAccount, MobileSyncEvent};
use crate::MobileRawContact;

/// Account credentials held by the platform account manager.
#[uniffi::export(callback_interface)]
pub trait PlatformCredentialStore: Send + Sync {
    fn password(&self, account: MobileAccount) -> Result<Option<String>, MobileError>;

    fn user_data(&self, account: MobileAccount, key: String)
        -> Result<Option<String>, MobileError>;

    fn set_user_data(
        &self,
        account: MobileAccount,
        key: String,
        value: String,
    ) -> Result<(), MobileError>;

    /// Cached token, without prompting or hitting the network.
    fn peek_auth_token(
        &self,
        account: MobileAccount,
        token_type: String,
    ) -> Result<Option<String>, MobileError>;

    fn set_auth_token(
        &self,
        account: MobileAccount,
        token_type: String,
        token: String,
    ) -> Result<(), MobileError>;

    fn invalidate_auth_token(&self, account: MobileAccount, token: String)
        -> Result<(), MobileError>;
}

/// The platform contacts provider.
#[uniffi::export(callback_interface)]
pub trait PlatformContactStore: Send + Sync {
    fn set_account_contacts_visible(
        &self,
        account: MobileAccount,
        visible: bool,
    ) -> Result<(), MobileError>;

    /// Returns the group's id, creating the group first if needed.
    fn ensure_group_exists(&self, account: MobileAccount, title: String)
        -> Result<i64, MobileError>;

    fn dirty_contacts(&self, account: MobileAccount) -> Result<Vec<MobileRawContact>, MobileError>;

    /// Merges server changes; returns the new sync marker.
    fn update_contacts(
        &self,
        account: MobileAccount,
        contacts: Vec<MobileRawContact>,
        group_id: i64,
        last_sync_marker: i64,
    ) -> Result<i64, MobileError>;

    fn update_status_messages(
        &self,
        account: MobileAccount,
        contacts: Vec<MobileRawContact>,
    ) -> Result<(), MobileError>;

    fn clear_sync_flags(&self, contacts: Vec<MobileRawContact>) -> Result<(), MobileError>;
}

/// The sample server, reached through the platform's HTTP stack.
///
/// Return `MobileError::Authentication` when the server rejects the token
/// and `MobileError::Parse` for malformed responses; any other error counts
/// as a transport failure.
#[uniffi::export(callback_interface)]
pub trait PlatformSyncServer: Send + Sync {
    /// Exchanges credentials for a token; `None` if the server refused.
    fn authenticate(&self, username: String, password: String)
        -> Result<Option<String>, MobileError>;

    fn sync_contacts(
        &self,
        account: MobileAccount,
        auth_token: String,
        marker: i64,
        dirty_contacts: Vec<MobileRawContact>,
    ) -> Result<Vec<MobileRawContact>, MobileError>;
}

/// Receives sync events.
#[uniffi::export(callback_interface)]
pub trait PlatformSyncListener: Send + Sync {
    fn on_event(&self, event: MobileSyncEvent);
}

// === Bridges ===

pub(crate) struct CredentialBridge(pub Arc<dyn PlatformCredentialStore>);

impl CredentialStore for CredentialBridge {
    fn password(&self, account: &Account) -> Result<Option<String>, StorageError> {
        self.0
            .password(account.into())
            .map_err(MobileError::into_storage_error)
    }

    fn user_data(&self, account: &Account, key: &str) -> Result<Option<String>, StorageError> {
        self.0
            .user_data(account.into(), key.to_string())
            .map_err(MobileError::into_storage_error)
    }

    fn set_user_data(
        &self,
        account: &Account,
        key: &str,
        value: &str,
    ) -> Result<(), StorageError> {
        self.0
            .set_user_data(account.into(), key.to_string(), value.to_string())
            .map_err(MobileError::into_storage_error)
    }

    fn peek_auth_token(
        &self,
        account: &Account,
        token_type: &str,
    ) -> Result<Option<String>, StorageError> {
        self.0
            .peek_auth_token(account.into(), token_type.to_string())
            .map_err(MobileError::into_storage_error)
    }

    fn set_auth_token(
        &self,
        account: &Account,
        token_type: &str,
        token: &str,
    ) -> Result<(), StorageError> {
        self.0
            .set_auth_token(account.into(), token_type.to_string(), token.to_string())
            .map_err(MobileError::into_storage_error)
    }

    fn invalidate_auth_token(&self, account: &Account, token: &str) -> Result<(), StorageError> {
        self.0
            .invalidate_auth_token(account.into(), token.to_string())
            .map_err(MobileError::into_storage_error)
    }
}

pub(crate) struct ContactBridge(pub Arc<dyn PlatformContactStore>);

impl ContactStore for ContactBridge {
    fn set_account_contacts_visible(
        &self,
        account: &Account,
        visible: bool,
    ) -> Result<(), StorageError> {
        self.0
            .set_account_contacts_visible(account.into(), visible)
            .map_err(MobileError::into_storage_error)
    }

    fn ensure_group_exists(&self, account: &Account, title: &str) -> Result<i64, StorageError> {
        self.0
            .ensure_group_exists(account.into(), title.to_string())
            .map_err(MobileError::into_storage_error)
    }

    fn dirty_contacts(&self, account: &Account) -> Result<Vec<RawContact>, StorageError> {
        self.0
            .dirty_contacts(account.into())
            .map(from_mobile_contacts)
            .map_err(MobileError::into_storage_error)
    }

    fn update_contacts(
        &self,
        account: &Account,
        contacts: &[RawContact],
        group_id: i64,
        last_sync_marker: i64,
    ) -> Result<i64, StorageError> {
        self.0
            .update_contacts(
                account.into(),
                to_mobile_contacts(contacts),
                group_id,
                last_sync_marker,
            )
            .map_err(MobileError::into_storage_error)
    }

    fn update_status_messages(
        &self,
        account: &Account,
        contacts: &[RawContact],
    ) -> Result<(), StorageError> {
        self.0
            .update_status_messages(account.into(), to_mobile_contacts(contacts))
            .map_err(MobileError::into_storage_error)
    }

    fn clear_sync_flags(&self, contacts: &[RawContact]) -> Result<(), StorageError> {
        self.0
            .clear_sync_flags(to_mobile_contacts(contacts))
            .map_err(MobileError::into_storage_error)
    }
}

pub(crate) struct ServerBridge(pub Arc<dyn PlatformSyncServer>);

impl TokenService for ServerBridge {
    fn authenticate(&self, username: &str, password: &str) -> Result<Option<String>, NetworkError> {
        self.0
            .authenticate(username.to_string(), password.to_string())
            .map_err(MobileError::into_network_error)
    }
}

impl RemoteSyncService for ServerBridge {
    fn sync_contacts(
        &self,
        account: &Account,
        auth_token: &str,
        marker: i64,
        dirty_contacts: &[RawContact],
    ) -> Result<Vec<RawContact>, NetworkError> {
        self.0
            .sync_contacts(
                account.into(),
                auth_token.to_string(),
                marker,
                to_mobile_contacts(dirty_contacts),
            )
            .map(from_mobile_contacts)
            .map_err(MobileError::into_network_error)
    }
}

pub(crate) struct ListenerBridge(pub Arc<dyn PlatformSyncListener>);

impl EventHandler for ListenerBridge {
    fn on_event(&self, event: SyncEvent) {
        self.0.on_event(event.into());
    }
}
