// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mobile-friendly data types.
//!
//! These types are wrappers around samplesync-core types that are compatible
//! with UniFFI for cross-language bindings.

use samplesync_core::{
    Account, AuthenticatorReply, PromptRequest, RawContact, SyncCounter, SyncEvent, SyncResult,
};

/// Mobile-friendly account identity.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct MobileAccount {
    pub name: String,
    pub account_type: String,
}

impl From<&Account> for MobileAccount {
    fn from(account: &Account) -> Self {
        MobileAccount {
            name: account.name.clone(),
            account_type: account.account_type.clone(),
        }
    }
}

impl From<MobileAccount> for Account {
    fn from(account: MobileAccount) -> Self {
        Account::new(account.name, account.account_type)
    }
}

/// Mobile-friendly contact record.
#[derive(Debug, Clone, Default, PartialEq, Eq, uniffi::Record)]
pub struct MobileRawContact {
    pub user_name: Option<String>,
    pub full_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub cell_phone: Option<String>,
    pub office_phone: Option<String>,
    pub home_phone: Option<String>,
    pub email: Option<String>,
    pub status: Option<String>,
    pub avatar_url: Option<String>,
    pub deleted: bool,
    /// Id assigned by the server, if it has seen the contact.
    pub server_contact_id: Option<i64>,
    /// Local id on the device.
    pub raw_contact_id: Option<i64>,
    pub sync_state: i64,
    pub dirty: bool,
}

impl From<&RawContact> for MobileRawContact {
    fn from(c: &RawContact) -> Self {
        MobileRawContact {
            user_name: c.user_name.clone(),
            full_name: c.full_name.clone(),
            first_name: c.first_name.clone(),
            last_name: c.last_name.clone(),
            cell_phone: c.cell_phone.clone(),
            office_phone: c.office_phone.clone(),
            home_phone: c.home_phone.clone(),
            email: c.email.clone(),
            status: c.status.clone(),
            avatar_url: c.avatar_url.clone(),
            deleted: c.deleted,
            server_contact_id: c.server_contact_id,
            raw_contact_id: c.raw_contact_id,
            sync_state: c.sync_state,
            dirty: c.dirty,
        }
    }
}

impl From<MobileRawContact> for RawContact {
    fn from(c: MobileRawContact) -> Self {
        RawContact {
            user_name: c.user_name,
            full_name: c.full_name,
            first_name: c.first_name,
            last_name: c.last_name,
            cell_phone: c.cell_phone,
            office_phone: c.office_phone,
            home_phone: c.home_phone,
            email: c.email,
            status: c.status,
            avatar_url: c.avatar_url,
            deleted: c.deleted,
            server_contact_id: c.server_contact_id,
            raw_contact_id: c.raw_contact_id,
            sync_state: c.sync_state,
            dirty: c.dirty,
        }
    }
}

/// Converts a slice of core contacts for a callback.
pub(crate) fn to_mobile_contacts(contacts: &[RawContact]) -> Vec<MobileRawContact> {
    contacts.iter().map(MobileRawContact::from).collect()
}

/// Converts callback contacts back into core contacts.
pub(crate) fn from_mobile_contacts(contacts: Vec<MobileRawContact>) -> Vec<RawContact> {
    contacts.into_iter().map(RawContact::from).collect()
}

/// Failure counters of one sync pass.
///
/// The scheduler retries with backoff on `has_soft_error` and waits for the
/// user on `has_hard_error`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, uniffi::Record)]
pub struct MobileSyncStats {
    pub num_parse_exceptions: u64,
    pub num_io_exceptions: u64,
    pub num_auth_exceptions: u64,
    pub has_error: bool,
    pub has_hard_error: bool,
    pub has_soft_error: bool,
}

impl From<&SyncResult> for MobileSyncStats {
    fn from(result: &SyncResult) -> Self {
        MobileSyncStats {
            num_parse_exceptions: result.stats.num_parse_exceptions,
            num_io_exceptions: result.stats.num_io_exceptions,
            num_auth_exceptions: result.stats.num_auth_exceptions,
            has_error: result.has_error(),
            has_hard_error: result.has_hard_error(),
            has_soft_error: result.has_soft_error(),
        }
    }
}

/// Mobile-friendly authenticator reply.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum MobileAuthReply {
    Token {
        account_name: String,
        account_type: String,
        auth_token: String,
    },
    /// Show the credential-entry UI.
    LaunchPrompt {
        account_name: Option<String>,
        auth_token_type: Option<String>,
    },
    Error {
        message: String,
    },
    BooleanResult {
        value: bool,
    },
}

impl From<AuthenticatorReply> for MobileAuthReply {
    fn from(reply: AuthenticatorReply) -> Self {
        match reply {
            AuthenticatorReply::Token {
                account_name,
                account_type,
                auth_token,
            } => MobileAuthReply::Token {
                account_name,
                account_type,
                auth_token,
            },
            AuthenticatorReply::LaunchPrompt(PromptRequest {
                account_name,
                auth_token_type,
            }) => MobileAuthReply::LaunchPrompt {
                account_name,
                auth_token_type,
            },
            AuthenticatorReply::Error { message } => MobileAuthReply::Error { message },
            AuthenticatorReply::BooleanResult(value) => MobileAuthReply::BooleanResult { value },
        }
    }
}

/// Counter a failed pass was tallied under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum MobileSyncCounter {
    Auth,
    Io,
    Parse,
}

impl From<SyncCounter> for MobileSyncCounter {
    fn from(counter: SyncCounter) -> Self {
        match counter {
            SyncCounter::Auth => MobileSyncCounter::Auth,
            SyncCounter::Io => MobileSyncCounter::Io,
            SyncCounter::Parse => MobileSyncCounter::Parse,
        }
    }
}

/// Mobile-friendly sync event.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum MobileSyncEvent {
    SyncStarted {
        account_name: String,
        marker: i64,
    },
    SyncCompleted {
        account_name: String,
        new_marker: i64,
        uploaded: u64,
        downloaded: u64,
    },
    SyncFailed {
        account_name: String,
        counter: Option<MobileSyncCounter>,
        error: String,
    },
    AuthFailureNotification {
        account_name: String,
        auth_token_type: String,
    },
}

impl From<SyncEvent> for MobileSyncEvent {
    fn from(event: SyncEvent) -> Self {
        match event {
            SyncEvent::SyncStarted {
                account_name,
                marker,
            } => MobileSyncEvent::SyncStarted {
                account_name,
                marker,
            },
            SyncEvent::SyncCompleted {
                account_name,
                new_marker,
                uploaded,
                downloaded,
            } => MobileSyncEvent::SyncCompleted {
                account_name,
                new_marker,
                uploaded: uploaded as u64,
                downloaded: downloaded as u64,
            },
            SyncEvent::SyncFailed {
                account_name,
                counter,
                error,
            } => MobileSyncEvent::SyncFailed {
                account_name,
                counter: counter.map(MobileSyncCounter::from),
                error,
            },
            SyncEvent::AuthFailureNotification {
                account_name,
                auth_token_type,
            } => MobileSyncEvent::AuthFailureNotification {
                account_name,
                auth_token_type,
            },
        }
    }
}
