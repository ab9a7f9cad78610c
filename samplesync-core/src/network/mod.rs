// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Network Layer
//!
//! Interfaces to the sample server: the token exchange used by the
//! authenticator and the contact exchange used by the sync adapter.
//!
//! # Architecture
//!
//! - **TokenService**: username/password in, opaque bearer token out
//! - **RemoteSyncService**: local dirty contacts in, server-side delta out
//! - **HttpSyncClient** (`http-client` feature): blocking HTTP implementation
//!   of both against the sample server

mod error;
#[cfg(feature = "http-client")]
mod http;

pub use error::NetworkError;
#[cfg(feature = "http-client")]
pub use http::HttpSyncClient;

use crate::account::Account;
use crate::contact::RawContact;

/// Exchanges a username and password for a bearer token.
pub trait TokenService: Send + Sync {
    /// Returns `Ok(None)` when the server refuses the credentials.
    fn authenticate(&self, username: &str, password: &str) -> Result<Option<String>, NetworkError>;
}

/// Exchanges contact changes with the server.
pub trait RemoteSyncService: Send + Sync {
    /// Sends the local dirty contacts and returns every contact the server
    /// changed since `marker`.
    fn sync_contacts(
        &self,
        account: &Account,
        auth_token: &str,
        marker: i64,
        dirty_contacts: &[RawContact],
    ) -> Result<Vec<RawContact>, NetworkError>;
}
