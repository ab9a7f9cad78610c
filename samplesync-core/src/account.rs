// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Account identity and the constants shared by the authenticator and the
//! sync adapter.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Account type registered by the sample sync service.
pub const ACCOUNT_TYPE: &str = "com.example.android.samplesync";

/// The only auth token type the authenticator hands out.
pub const AUTHTOKEN_TYPE: &str = "com.example.android.samplesync";

/// User-data key holding the per-account sync high-water mark.
pub const SYNC_MARKER_KEY: &str = "com.example.android.samplesync.marker";

/// An account known to the host's account subsystem.
///
/// Read-only to this crate; used as the key for every credential and
/// sync-state lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Account {
    /// Account name (the sample server's username).
    pub name: String,
    /// Account type, normally [`ACCOUNT_TYPE`].
    pub account_type: String,
}

impl Account {
    /// Creates an account with an explicit type.
    pub fn new(name: impl Into<String>, account_type: impl Into<String>) -> Self {
        Account {
            name: name.into(),
            account_type: account_type.into(),
        }
    }

    /// Creates an account of the sample account type.
    pub fn sample(name: impl Into<String>) -> Self {
        Account::new(name, ACCOUNT_TYPE)
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.account_type)
    }
}
