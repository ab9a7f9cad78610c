// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! SampleSync Core Library
//!
//! Account authenticator, two-way contact sync adapter and contact-view
//! notifier for the sample sync service. The host platform drives every
//! entry point through the callback traits [`AccountAuthenticator`] and
//! [`SyncHandler`]; all collaborators are passed in explicitly.

pub mod account;
pub mod auth;
pub mod config;
pub mod contact;
pub mod events;
pub mod network;
pub mod notifier;
pub mod storage;
pub mod sync;

pub use account::{Account, ACCOUNT_TYPE, AUTHTOKEN_TYPE, SYNC_MARKER_KEY};
pub use auth::{
    AccountAuthenticator, AccountManager, Authenticator, AuthenticatorError, AuthenticatorReply,
    CredentialError, PromptRequest, TokenSource,
};
pub use config::SyncConfig;
pub use contact::{RawContact, RawContactBuilder};
pub use events::{CallbackHandler, EventDispatcher, EventHandler, SyncEvent};
pub use network::{NetworkError, RemoteSyncService, TokenService};
pub use notifier::Notifier;
pub use storage::{ContactStore, CredentialStore, Storage, StorageError};
pub use sync::{
    CancellationFlag, SyncAdapter, SyncCounter, SyncError, SyncExtras, SyncHandler, SyncResult,
    SyncStats,
};
