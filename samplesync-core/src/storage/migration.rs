// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Database Schema Migration Framework
//!
//! Versioned SQL migrations. The runner tracks applied versions in a
//! `schema_version` table and runs pending migrations in order within a
//! single transaction.

use rusqlite::Connection;
use tracing::debug;

use super::StorageError;

/// A single schema migration step.
pub struct Migration {
    /// Monotonically increasing version number (starting at 1).
    pub version: u32,
    /// Human-readable name for this migration.
    pub name: &'static str,
    /// SQL executed as one batch.
    pub sql: &'static str,
}

/// Runs schema migrations against a database connection.
pub struct MigrationRunner;

impl MigrationRunner {
    /// Runs all pending migrations in a transaction.
    ///
    /// Creates the `schema_version` table if it doesn't exist, then applies
    /// any migrations whose version is greater than the current schema version.
    /// If any migration fails, all changes are rolled back.
    pub fn run(conn: &Connection, migrations: &[Migration]) -> Result<(), StorageError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY,
                applied_at INTEGER NOT NULL
            );",
        )?;

        let current_version = Self::current_version(conn)?;

        let pending: Vec<&Migration> = migrations
            .iter()
            .filter(|m| m.version > current_version)
            .collect();

        if pending.is_empty() {
            return Ok(());
        }

        for window in pending.windows(2) {
            if window[0].version >= window[1].version {
                return Err(StorageError::Migration(format!(
                    "Migrations are not in order: v{} before v{}",
                    window[0].version, window[1].version
                )));
            }
        }

        conn.execute_batch("BEGIN EXCLUSIVE TRANSACTION;")?;

        for migration in &pending {
            debug!("Applying migration v{} '{}'", migration.version, migration.name);

            if let Err(e) = conn.execute_batch(migration.sql) {
                conn.execute_batch("ROLLBACK;")?;
                return Err(StorageError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e
                )));
            }

            let now = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0);

            if let Err(e) = conn.execute(
                "INSERT INTO schema_version (version, applied_at) VALUES (?1, ?2)",
                rusqlite::params![migration.version, now as i64],
            ) {
                conn.execute_batch("ROLLBACK;")?;
                return Err(StorageError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e
                )));
            }
        }

        conn.execute_batch("COMMIT;")?;
        Ok(())
    }

    /// Returns the current schema version, or 0 if no migrations have been applied.
    pub fn current_version(conn: &Connection) -> Result<u32, StorageError> {
        let table_exists: bool = conn.query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name='schema_version'",
            [],
            |row| row.get(0),
        )?;

        if !table_exists {
            return Ok(0);
        }

        let version: Option<u32> =
            conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
                row.get(0)
            })?;

        Ok(version.unwrap_or(0))
    }
}

/// Returns all registered migrations in version order.
///
/// This is the single source of truth for the database schema.
/// New migrations are appended to the end of this list.
pub fn all_migrations() -> Vec<Migration> {
    vec![
        Migration {
            version: 1,
            name: "accounts",
            sql: MIGRATION_V1_ACCOUNTS,
        },
        Migration {
            version: 2,
            name: "raw_contacts",
            sql: MIGRATION_V2_CONTACTS,
        },
        Migration {
            version: 3,
            name: "status_updates",
            sql: MIGRATION_V3_STATUS_UPDATES,
        },
    ]
}

const MIGRATION_V1_ACCOUNTS: &str = "
CREATE TABLE accounts (
    name TEXT NOT NULL,
    account_type TEXT NOT NULL,
    password TEXT,
    ungrouped_visible INTEGER NOT NULL DEFAULT 0,
    PRIMARY KEY (name, account_type)
);

CREATE TABLE account_user_data (
    account_name TEXT NOT NULL,
    account_type TEXT NOT NULL,
    key TEXT NOT NULL,
    value TEXT NOT NULL,
    PRIMARY KEY (account_name, account_type, key)
);

CREATE TABLE auth_tokens (
    account_name TEXT NOT NULL,
    account_type TEXT NOT NULL,
    token_type TEXT NOT NULL,
    token TEXT NOT NULL,
    PRIMARY KEY (account_name, account_type, token_type)
);
";

const MIGRATION_V2_CONTACTS: &str = "
CREATE TABLE contact_groups (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    account_name TEXT NOT NULL,
    account_type TEXT NOT NULL,
    title TEXT NOT NULL,
    UNIQUE (account_name, account_type, title)
);

CREATE TABLE raw_contacts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    account_name TEXT NOT NULL,
    account_type TEXT NOT NULL,
    server_contact_id INTEGER,
    user_name TEXT,
    full_name TEXT,
    first_name TEXT,
    last_name TEXT,
    cell_phone TEXT,
    office_phone TEXT,
    home_phone TEXT,
    email TEXT,
    avatar_url TEXT,
    group_id INTEGER REFERENCES contact_groups(id) ON DELETE SET NULL,
    sync_state INTEGER NOT NULL DEFAULT 0,
    dirty INTEGER NOT NULL DEFAULT 0,
    deleted INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX idx_raw_contacts_account ON raw_contacts(account_name, account_type);
CREATE INDEX idx_raw_contacts_server_id ON raw_contacts(account_name, account_type, server_contact_id);
";

const MIGRATION_V3_STATUS_UPDATES: &str = "
CREATE TABLE status_updates (
    raw_contact_id INTEGER PRIMARY KEY REFERENCES raw_contacts(id) ON DELETE CASCADE,
    status TEXT NOT NULL,
    updated_at INTEGER NOT NULL
);
";
