// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Account, credential and user-data storage operations.

use rusqlite::{params, OptionalExtension};

use super::{CredentialStore, Storage, StorageError};
use crate::account::Account;

impl Storage {
    // === Account Operations ===

    /// Adds an account, or updates the password of an existing one.
    pub fn add_account(
        &self,
        account: &Account,
        password: Option<&str>,
    ) -> Result<(), StorageError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO accounts (name, account_type, password) VALUES (?1, ?2, ?3)
             ON CONFLICT(name, account_type) DO UPDATE SET password = excluded.password",
            params![account.name, account.account_type, password],
        )?;
        Ok(())
    }

    /// Replaces (or clears) the stored password.
    pub fn set_password(
        &self,
        account: &Account,
        password: Option<&str>,
    ) -> Result<(), StorageError> {
        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE accounts SET password = ?3 WHERE name = ?1 AND account_type = ?2",
            params![account.name, account.account_type, password],
        )?;
        if updated == 0 {
            return Err(StorageError::NotFound(account.to_string()));
        }
        Ok(())
    }

    /// Returns whether the account's ungrouped contacts are visible.
    pub fn is_ungrouped_visible(&self, account: &Account) -> Result<bool, StorageError> {
        let conn = self.conn()?;
        let visible: Option<bool> = conn
            .query_row(
                "SELECT ungrouped_visible FROM accounts WHERE name = ?1 AND account_type = ?2",
                params![account.name, account.account_type],
                |row| row.get(0),
            )
            .optional()?;
        Ok(visible.unwrap_or(false))
    }
}

impl CredentialStore for Storage {
    fn password(&self, account: &Account) -> Result<Option<String>, StorageError> {
        let conn = self.conn()?;
        let password: Option<Option<String>> = conn
            .query_row(
                "SELECT password FROM accounts WHERE name = ?1 AND account_type = ?2",
                params![account.name, account.account_type],
                |row| row.get(0),
            )
            .optional()?;
        Ok(password.flatten())
    }

    fn user_data(&self, account: &Account, key: &str) -> Result<Option<String>, StorageError> {
        let conn = self.conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM account_user_data
                 WHERE account_name = ?1 AND account_type = ?2 AND key = ?3",
                params![account.name, account.account_type, key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_user_data(
        &self,
        account: &Account,
        key: &str,
        value: &str,
    ) -> Result<(), StorageError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT OR REPLACE INTO account_user_data (account_name, account_type, key, value)
             VALUES (?1, ?2, ?3, ?4)",
            params![account.name, account.account_type, key, value],
        )?;
        Ok(())
    }

    fn peek_auth_token(
        &self,
        account: &Account,
        token_type: &str,
    ) -> Result<Option<String>, StorageError> {
        let conn = self.conn()?;
        let token = conn
            .query_row(
                "SELECT token FROM auth_tokens
                 WHERE account_name = ?1 AND account_type = ?2 AND token_type = ?3",
                params![account.name, account.account_type, token_type],
                |row| row.get(0),
            )
            .optional()?;
        Ok(token)
    }

    fn set_auth_token(
        &self,
        account: &Account,
        token_type: &str,
        token: &str,
    ) -> Result<(), StorageError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT OR REPLACE INTO auth_tokens (account_name, account_type, token_type, token)
             VALUES (?1, ?2, ?3, ?4)",
            params![account.name, account.account_type, token_type, token],
        )?;
        Ok(())
    }

    fn invalidate_auth_token(&self, account: &Account, token: &str) -> Result<(), StorageError> {
        let conn = self.conn()?;
        conn.execute(
            "DELETE FROM auth_tokens WHERE account_name = ?1 AND account_type = ?2 AND token = ?3",
            params![account.name, account.account_type, token],
        )?;
        Ok(())
    }
}
