// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Storage error types.

use thiserror::Error;

/// Storage error types.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Migration error: {0}")]
    Migration(String),

    /// A host-provided store failed to read or write.
    #[error("I/O error: {0}")]
    Io(String),

    /// Stored data could not be interpreted.
    #[error("Corrupt data: {0}")]
    Corrupt(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage lock poisoned")]
    LockPoisoned,
}
