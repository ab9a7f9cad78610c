// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Authentication error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors raised by authenticator callbacks.
#[derive(Error, Debug)]
pub enum AuthenticatorError {
    /// The callback is deliberately not implemented.
    #[error("Unsupported operation: {0}")]
    Unsupported(&'static str),

    /// The credential store failed.
    #[error("Credential storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Errors raised while acquiring an auth token for a sync pass.
#[derive(Error, Debug)]
pub enum CredentialError {
    /// No usable token could be produced (missing or rejected credentials,
    /// unsupported token type, failed exchange).
    #[error("Authenticator error: {0}")]
    Authenticator(String),

    /// The pass was canceled while waiting for the token.
    #[error("Operation canceled")]
    Canceled,

    /// The credential store failed.
    #[error("Credential storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<AuthenticatorError> for CredentialError {
    fn from(err: AuthenticatorError) -> Self {
        match err {
            AuthenticatorError::Storage(e) => CredentialError::Storage(e),
            other => CredentialError::Authenticator(other.to_string()),
        }
    }
}
