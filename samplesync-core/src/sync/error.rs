// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sync error types and their mapping onto the reported counters.

use thiserror::Error;

use crate::auth::CredentialError;
use crate::network::NetworkError;
use crate::storage::StorageError;

/// Counter a failed pass is tallied under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncCounter {
    Auth,
    Io,
    Parse,
}

/// Every way a sync pass can end early.
#[derive(Error, Debug)]
pub enum SyncError {
    /// No auth token could be obtained.
    #[error("Authenticator error: {0}")]
    Authenticator(String),

    /// The server rejected the auth token.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The pass was canceled by the host.
    #[error("Sync canceled")]
    Canceled,

    /// Transport failure talking to the server.
    #[error("I/O error: {0}")]
    Io(String),

    /// The server's response was malformed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The server's JSON could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A local store failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl SyncError {
    /// Which counter this failure increments; `None` for cancellation.
    ///
    /// | variant            | counter |
    /// |--------------------|---------|
    /// | `Authenticator`    | auth    |
    /// | `Authentication`   | auth    |
    /// | `Io`               | io      |
    /// | `Storage(Corrupt)` | parse   |
    /// | `Storage(_)`       | io      |
    /// | `Parse`            | parse   |
    /// | `Json`             | parse   |
    /// | `Canceled`         | none    |
    pub fn counter(&self) -> Option<SyncCounter> {
        match self {
            SyncError::Authenticator(_) | SyncError::Authentication(_) => Some(SyncCounter::Auth),
            SyncError::Io(_) => Some(SyncCounter::Io),
            SyncError::Storage(StorageError::Corrupt(_)) => Some(SyncCounter::Parse),
            SyncError::Storage(_) => Some(SyncCounter::Io),
            SyncError::Parse(_) | SyncError::Json(_) => Some(SyncCounter::Parse),
            SyncError::Canceled => None,
        }
    }
}

impl From<NetworkError> for SyncError {
    fn from(err: NetworkError) -> Self {
        match err {
            NetworkError::Io(msg) => SyncError::Io(msg),
            NetworkError::Server(status) => {
                SyncError::Io(format!("server responded with HTTP {}", status))
            }
            NetworkError::Authentication(msg) => SyncError::Authentication(msg),
            NetworkError::Parse(msg) => SyncError::Parse(msg),
            NetworkError::Json(e) => SyncError::Json(e),
        }
    }
}

impl From<CredentialError> for SyncError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::Authenticator(msg) => SyncError::Authenticator(msg),
            CredentialError::Canceled => SyncError::Canceled,
            CredentialError::Storage(e) => SyncError::Storage(e),
        }
    }
}
