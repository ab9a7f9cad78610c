// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mobile-friendly error types.

use samplesync_core::{AuthenticatorError, NetworkError, StorageError};

/// Mobile-friendly error type.
///
/// Platform callbacks return it too; the bridges translate it back into the
/// core error of the layer they stand in for.
#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum MobileError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StorageError> for MobileError {
    fn from(err: StorageError) -> Self {
        MobileError::Storage(err.to_string())
    }
}

impl From<AuthenticatorError> for MobileError {
    fn from(err: AuthenticatorError) -> Self {
        match err {
            AuthenticatorError::Unsupported(op) => MobileError::Unsupported(op.to_string()),
            AuthenticatorError::Storage(e) => e.into(),
        }
    }
}

impl From<uniffi::UnexpectedUniFFICallbackError> for MobileError {
    fn from(err: uniffi::UnexpectedUniFFICallbackError) -> Self {
        MobileError::Internal(err.reason)
    }
}

impl MobileError {
    /// Maps a platform server failure onto the sync counters' categories.
    pub(crate) fn into_network_error(self) -> NetworkError {
        match self {
            MobileError::Authentication(msg) => NetworkError::Authentication(msg),
            MobileError::Parse(msg) => NetworkError::Parse(msg),
            other => NetworkError::Io(other.to_string()),
        }
    }

    /// Maps a platform store failure; unreadable data counts as corrupt.
    pub(crate) fn into_storage_error(self) -> StorageError {
        match self {
            MobileError::Parse(msg) => StorageError::Corrupt(msg),
            other => StorageError::Io(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_errors_keep_their_category() {
        assert!(matches!(
            MobileError::Authentication("401".into()).into_network_error(),
            NetworkError::Authentication(_)
        ));
        assert!(matches!(
            MobileError::Network("offline".into()).into_network_error(),
            NetworkError::Io(_)
        ));
        assert!(matches!(
            MobileError::Parse("bad row".into()).into_storage_error(),
            StorageError::Corrupt(_)
        ));
        assert!(matches!(
            MobileError::Storage("disk full".into()).into_storage_error(),
            StorageError::Io(_)
        ));
    }
}
