// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sync marker persistence.
//!
//! The marker is the highest server change counter seen for an account,
//! stored as a decimal string in the account's user data. 0 means the
//! account has never synced.

use tracing::warn;

use crate::account::Account;
use crate::storage::{CredentialStore, StorageError};

/// Parses a stored marker. Absent, empty, negative or malformed values read as 0.
pub fn parse_marker(value: Option<&str>) -> i64 {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => match v.parse::<i64>() {
            Ok(marker) if marker >= 0 => marker,
            _ => {
                warn!("Ignoring malformed sync marker {:?}", v);
                0
            }
        },
        None => 0,
    }
}

/// Reads the account's marker.
pub fn read_marker(
    store: &dyn CredentialStore,
    account: &Account,
    key: &str,
) -> Result<i64, StorageError> {
    let value = store.user_data(account, key)?;
    Ok(parse_marker(value.as_deref()))
}

/// Persists the account's marker.
pub fn write_marker(
    store: &dyn CredentialStore,
    account: &Account,
    key: &str,
    marker: i64,
) -> Result<(), StorageError> {
    store.set_user_data(account, key, &marker.to_string())
}
