// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Contact storage operations.

use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, trace};

use super::{ContactStore, Storage, StorageError};
use crate::account::Account;
use crate::contact::RawContact;

const CONTACT_COLUMNS: &str = "id, server_contact_id, user_name, full_name, first_name, \
     last_name, cell_phone, office_phone, home_phone, email, avatar_url, sync_state, dirty, \
     deleted, (SELECT status FROM status_updates WHERE raw_contact_id = raw_contacts.id)";

fn row_to_contact(row: &Row<'_>) -> rusqlite::Result<RawContact> {
    Ok(RawContact {
        raw_contact_id: Some(row.get(0)?),
        server_contact_id: row.get(1)?,
        user_name: row.get(2)?,
        full_name: row.get(3)?,
        first_name: row.get(4)?,
        last_name: row.get(5)?,
        cell_phone: row.get(6)?,
        office_phone: row.get(7)?,
        home_phone: row.get(8)?,
        email: row.get(9)?,
        avatar_url: row.get(10)?,
        sync_state: row.get(11)?,
        dirty: row.get(12)?,
        deleted: row.get(13)?,
        status: row.get(14)?,
    })
}

fn current_timestamp() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Finds the local row for an incoming contact: by the client id the
/// server echoed back first, then by server id.
fn lookup_local_id(
    conn: &Connection,
    account: &Account,
    contact: &RawContact,
) -> Result<Option<i64>, StorageError> {
    if let Some(id) = contact.raw_contact_id {
        let found = conn
            .query_row(
                "SELECT id FROM raw_contacts WHERE id = ?1 AND account_name = ?2 AND account_type = ?3",
                params![id, account.name, account.account_type],
                |row| row.get(0),
            )
            .optional()?;
        if found.is_some() {
            return Ok(found);
        }
    }

    match contact.server_contact_id {
        Some(server_id) => Ok(conn
            .query_row(
                "SELECT id FROM raw_contacts
                 WHERE account_name = ?1 AND account_type = ?2 AND server_contact_id = ?3",
                params![account.name, account.account_type, server_id],
                |row| row.get(0),
            )
            .optional()?),
        None => Ok(None),
    }
}

impl Storage {
    // === Local Contact Operations ===

    /// Adds a contact created on the device. It starts dirty.
    pub fn insert_local_contact(
        &self,
        account: &Account,
        contact: &RawContact,
    ) -> Result<i64, StorageError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO raw_contacts
             (account_name, account_type, server_contact_id, user_name, full_name, first_name,
              last_name, cell_phone, office_phone, home_phone, email, avatar_url, sync_state,
              dirty, deleted)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, 1, 0)",
            params![
                account.name,
                account.account_type,
                contact.server_contact_id,
                contact.user_name,
                contact.full_name,
                contact.first_name,
                contact.last_name,
                contact.cell_phone,
                contact.office_phone,
                contact.home_phone,
                contact.email,
                contact.avatar_url,
                contact.sync_state,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Edits a contact on the device and marks it dirty.
    pub fn update_local_contact(&self, id: i64, contact: &RawContact) -> Result<(), StorageError> {
        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE raw_contacts SET
                user_name = ?2, full_name = ?3, first_name = ?4, last_name = ?5,
                cell_phone = ?6, office_phone = ?7, home_phone = ?8, email = ?9, dirty = 1
             WHERE id = ?1 AND deleted = 0",
            params![
                id,
                contact.user_name,
                contact.full_name,
                contact.first_name,
                contact.last_name,
                contact.cell_phone,
                contact.office_phone,
                contact.home_phone,
                contact.email,
            ],
        )?;
        if updated == 0 {
            return Err(StorageError::NotFound(format!("raw contact {}", id)));
        }
        Ok(())
    }

    /// Deletes a contact on the device. The row stays, flagged deleted and
    /// dirty, until the server has been told.
    pub fn delete_local_contact(&self, id: i64) -> Result<(), StorageError> {
        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE raw_contacts SET deleted = 1, dirty = 1 WHERE id = ?1",
            params![id],
        )?;
        if updated == 0 {
            return Err(StorageError::NotFound(format!("raw contact {}", id)));
        }
        Ok(())
    }

    /// Loads a contact by local id, deleted or not.
    pub fn load_contact(&self, id: i64) -> Result<Option<RawContact>, StorageError> {
        let conn = self.conn()?;
        let sql = format!("SELECT {} FROM raw_contacts WHERE id = ?1", CONTACT_COLUMNS);
        Ok(conn.query_row(&sql, params![id], row_to_contact).optional()?)
    }

    /// Lists the account's contacts that are not deleted.
    pub fn contacts_for_account(&self, account: &Account) -> Result<Vec<RawContact>, StorageError> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM raw_contacts
             WHERE account_name = ?1 AND account_type = ?2 AND deleted = 0
             ORDER BY id",
            CONTACT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let contacts = stmt
            .query_map(params![account.name, account.account_type], row_to_contact)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(contacts)
    }

    /// Returns the id of an existing group.
    pub fn group_id(&self, account: &Account, title: &str) -> Result<Option<i64>, StorageError> {
        let conn = self.conn()?;
        Ok(conn
            .query_row(
                "SELECT id FROM contact_groups
                 WHERE account_name = ?1 AND account_type = ?2 AND title = ?3",
                params![account.name, account.account_type, title],
                |row| row.get(0),
            )
            .optional()?)
    }
}

impl ContactStore for Storage {
    fn set_account_contacts_visible(
        &self,
        account: &Account,
        visible: bool,
    ) -> Result<(), StorageError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO accounts (name, account_type, ungrouped_visible) VALUES (?1, ?2, ?3)
             ON CONFLICT(name, account_type) DO UPDATE SET ungrouped_visible = excluded.ungrouped_visible",
            params![account.name, account.account_type, visible],
        )?;
        Ok(())
    }

    fn ensure_group_exists(&self, account: &Account, title: &str) -> Result<i64, StorageError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT OR IGNORE INTO contact_groups (account_name, account_type, title)
             VALUES (?1, ?2, ?3)",
            params![account.name, account.account_type, title],
        )?;
        let id = conn.query_row(
            "SELECT id FROM contact_groups
             WHERE account_name = ?1 AND account_type = ?2 AND title = ?3",
            params![account.name, account.account_type, title],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    fn dirty_contacts(&self, account: &Account) -> Result<Vec<RawContact>, StorageError> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM raw_contacts
             WHERE account_name = ?1 AND account_type = ?2 AND dirty = 1
             ORDER BY id",
            CONTACT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let contacts = stmt
            .query_map(params![account.name, account.account_type], row_to_contact)?
            .collect::<Result<Vec<_>, _>>()?;
        debug!("{} dirty contacts for {}", contacts.len(), account.name);
        Ok(contacts)
    }

    fn update_contacts(
        &self,
        account: &Account,
        contacts: &[RawContact],
        group_id: i64,
        last_sync_marker: i64,
    ) -> Result<i64, StorageError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let mut current_marker = last_sync_marker;

        for contact in contacts {
            current_marker = current_marker.max(contact.sync_state);

            match lookup_local_id(&tx, account, contact)? {
                Some(local_id) if contact.deleted => {
                    trace!("Deleting contact {}", local_id);
                    tx.execute("DELETE FROM raw_contacts WHERE id = ?1", params![local_id])?;
                }
                Some(local_id) => {
                    trace!("Updating contact {}", local_id);
                    tx.execute(
                        "UPDATE raw_contacts SET
                            server_contact_id = COALESCE(?2, server_contact_id),
                            user_name = COALESCE(?3, user_name),
                            first_name = COALESCE(?4, first_name),
                            last_name = COALESCE(?5, last_name),
                            cell_phone = COALESCE(?6, cell_phone),
                            office_phone = COALESCE(?7, office_phone),
                            home_phone = COALESCE(?8, home_phone),
                            email = COALESCE(?9, email),
                            avatar_url = COALESCE(?10, avatar_url),
                            sync_state = ?11
                         WHERE id = ?1",
                        params![
                            local_id,
                            contact.server_contact_id,
                            contact.user_name,
                            contact.first_name,
                            contact.last_name,
                            contact.cell_phone,
                            contact.office_phone,
                            contact.home_phone,
                            contact.email,
                            contact.avatar_url,
                            contact.sync_state,
                        ],
                    )?;
                }
                None if contact.deleted => {
                    trace!("Ignoring deletion of unknown contact {:?}", contact.server_contact_id);
                }
                None => {
                    trace!("Adding contact {:?}", contact.server_contact_id);
                    tx.execute(
                        "INSERT INTO raw_contacts
                         (account_name, account_type, server_contact_id, user_name, full_name,
                          first_name, last_name, cell_phone, office_phone, home_phone, email,
                          avatar_url, group_id, sync_state, dirty, deleted)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, 0, 0)",
                        params![
                            account.name,
                            account.account_type,
                            contact.server_contact_id,
                            contact.user_name,
                            contact.full_name,
                            contact.first_name,
                            contact.last_name,
                            contact.cell_phone,
                            contact.office_phone,
                            contact.home_phone,
                            contact.email,
                            contact.avatar_url,
                            group_id,
                            contact.sync_state,
                        ],
                    )?;
                }
            }
        }

        tx.commit()?;
        debug!(
            "Merged {} contacts for {}, marker {} -> {}",
            contacts.len(),
            account.name,
            last_sync_marker,
            current_marker
        );
        Ok(current_marker)
    }

    fn update_status_messages(
        &self,
        account: &Account,
        contacts: &[RawContact],
    ) -> Result<(), StorageError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let now = current_timestamp();

        for contact in contacts {
            let Some(status) = contact.status_text() else {
                continue;
            };
            if contact.deleted {
                continue;
            }
            if let Some(local_id) = lookup_local_id(&tx, account, contact)? {
                tx.execute(
                    "INSERT OR REPLACE INTO status_updates (raw_contact_id, status, updated_at)
                     VALUES (?1, ?2, ?3)",
                    params![local_id, status, now],
                )?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    fn clear_sync_flags(&self, contacts: &[RawContact]) -> Result<(), StorageError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        for contact in contacts {
            let Some(id) = contact.raw_contact_id else {
                continue;
            };
            if contact.deleted {
                tx.execute("DELETE FROM raw_contacts WHERE id = ?1", params![id])?;
            } else {
                tx.execute("UPDATE raw_contacts SET dirty = 0 WHERE id = ?1", params![id])?;
            }
        }

        tx.commit()?;
        Ok(())
    }
}
