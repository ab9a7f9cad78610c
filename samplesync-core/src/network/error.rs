// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Network error types.

use thiserror::Error;

/// Network error types.
#[derive(Error, Debug)]
pub enum NetworkError {
    /// Transport failure (connect, read, write, timeout).
    #[error("I/O error: {0}")]
    Io(String),

    /// The server answered with an unexpected status.
    #[error("Server error: HTTP {0}")]
    Server(u16),

    /// The server rejected the auth token.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The server's response could not be understood.
    #[error("Malformed response: {0}")]
    Parse(String),

    /// The server's JSON could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(feature = "http-client")]
impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            NetworkError::Parse(err.to_string())
        } else {
            NetworkError::Io(err.to_string())
        }
    }
}
