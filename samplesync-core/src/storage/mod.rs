// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Persistent Storage Module
//!
//! Defines the two collaborator interfaces the authenticator and the sync
//! adapter depend on, [`CredentialStore`] and [`ContactStore`], and a SQLite
//! implementation of both.

#[cfg(feature = "testing")]
pub mod accounts;
#[cfg(not(feature = "testing"))]
mod accounts;

#[cfg(feature = "testing")]
pub mod contacts;
#[cfg(not(feature = "testing"))]
mod contacts;

#[cfg(feature = "testing")]
pub mod error;
#[cfg(not(feature = "testing"))]
mod error;

pub mod migration;

pub use error::StorageError;

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::Connection;

use crate::account::Account;
use crate::contact::RawContact;

/// Per-account credentials and user data.
///
/// Mirrors the host account manager: passwords, cached auth tokens and a
/// free-form key/value slot per account.
pub trait CredentialStore: Send + Sync {
    /// Returns the stored password, if any.
    fn password(&self, account: &Account) -> Result<Option<String>, StorageError>;

    /// Returns a user-data value, if set.
    fn user_data(&self, account: &Account, key: &str) -> Result<Option<String>, StorageError>;

    /// Sets a user-data value.
    fn set_user_data(&self, account: &Account, key: &str, value: &str)
        -> Result<(), StorageError>;

    /// Returns the cached auth token of the given type without contacting
    /// the authenticator.
    fn peek_auth_token(
        &self,
        account: &Account,
        token_type: &str,
    ) -> Result<Option<String>, StorageError>;

    /// Caches an auth token.
    fn set_auth_token(
        &self,
        account: &Account,
        token_type: &str,
        token: &str,
    ) -> Result<(), StorageError>;

    /// Drops a cached auth token the server no longer accepts.
    fn invalidate_auth_token(&self, account: &Account, token: &str) -> Result<(), StorageError>;
}

/// Local contact storage with per-record dirty flags.
pub trait ContactStore: Send + Sync {
    /// Shows or hides the account's ungrouped contacts in the contact list.
    fn set_account_contacts_visible(
        &self,
        account: &Account,
        visible: bool,
    ) -> Result<(), StorageError>;

    /// Returns the id of the group with the given title, creating it if absent.
    fn ensure_group_exists(&self, account: &Account, title: &str) -> Result<i64, StorageError>;

    /// Returns the account's contacts with local changes.
    fn dirty_contacts(&self, account: &Account) -> Result<Vec<RawContact>, StorageError>;

    /// Merges the server's changes and returns the new high-water mark.
    fn update_contacts(
        &self,
        account: &Account,
        contacts: &[RawContact],
        group_id: i64,
        last_sync_marker: i64,
    ) -> Result<i64, StorageError>;

    /// Stores the status messages carried by the server's changes.
    fn update_status_messages(
        &self,
        account: &Account,
        contacts: &[RawContact],
    ) -> Result<(), StorageError>;

    /// Marks the given contacts as acknowledged by the server.
    fn clear_sync_flags(&self, contacts: &[RawContact]) -> Result<(), StorageError>;
}

/// SQLite-based storage implementation.
///
/// `rusqlite::Connection` is not `Sync`, so the connection sits behind a
/// mutex; every operation holds the lock for its whole statement or
/// transaction.
pub struct Storage {
    conn: Mutex<Connection>,
}

impl Storage {
    /// Opens or creates a storage database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// Creates an in-memory storage (for testing).
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, StorageError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let storage = Storage {
            conn: Mutex::new(conn),
        };
        storage.run_migrations()?;
        Ok(storage)
    }

    /// Runs all pending schema migrations.
    fn run_migrations(&self) -> Result<(), StorageError> {
        let conn = self.conn()?;
        let migrations = migration::all_migrations();
        migration::MigrationRunner::run(&conn, &migrations)
    }

    /// Returns the current schema version.
    pub fn schema_version(&self) -> Result<u32, StorageError> {
        let conn = self.conn()?;
        migration::MigrationRunner::current_version(&conn)
    }

    pub(crate) fn conn(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn.lock().map_err(|_| StorageError::LockPoisoned)
    }
}
