// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Raw Contacts
//!
//! The record exchanged between the local contact store and the sample
//! server, plus its JSON wire encoding.

pub mod wire;

pub use wire::{decode_contacts, encode_contacts};

/// A contact as seen by one account.
///
/// `raw_contact_id` is the local row id, `server_contact_id` the id the
/// server assigned. Either may be missing: a contact created on the device
/// has no server id until the server echoes it back, and a contact received
/// from the server has no local id until it is merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawContact {
    pub user_name: Option<String>,
    pub full_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub cell_phone: Option<String>,
    pub office_phone: Option<String>,
    pub home_phone: Option<String>,
    pub email: Option<String>,
    pub status: Option<String>,
    pub avatar_url: Option<String>,
    /// Deleted locally (outgoing) or on the server (incoming).
    pub deleted: bool,
    pub server_contact_id: Option<i64>,
    pub raw_contact_id: Option<i64>,
    /// Server-side change counter for this contact.
    pub sync_state: i64,
    /// Has local changes the server has not acknowledged.
    pub dirty: bool,
}

impl RawContact {
    /// Starts building a contact.
    pub fn builder() -> RawContactBuilder {
        RawContactBuilder::default()
    }

    /// Returns the status message if it carries any text.
    pub fn status_text(&self) -> Option<&str> {
        self.status.as_deref().filter(|s| !s.trim().is_empty())
    }
}

/// Builder for [`RawContact`].
#[derive(Debug, Default)]
pub struct RawContactBuilder {
    contact: RawContact,
}

impl RawContactBuilder {
    pub fn user_name(mut self, value: &str) -> Self {
        self.contact.user_name = Some(value.to_string());
        self
    }

    pub fn full_name(mut self, value: &str) -> Self {
        self.contact.full_name = Some(value.to_string());
        self
    }

    pub fn name(mut self, first: &str, last: &str) -> Self {
        self.contact.first_name = Some(first.to_string());
        self.contact.last_name = Some(last.to_string());
        self
    }

    pub fn cell_phone(mut self, value: &str) -> Self {
        self.contact.cell_phone = Some(value.to_string());
        self
    }

    pub fn office_phone(mut self, value: &str) -> Self {
        self.contact.office_phone = Some(value.to_string());
        self
    }

    pub fn home_phone(mut self, value: &str) -> Self {
        self.contact.home_phone = Some(value.to_string());
        self
    }

    pub fn email(mut self, value: &str) -> Self {
        self.contact.email = Some(value.to_string());
        self
    }

    pub fn status(mut self, value: &str) -> Self {
        self.contact.status = Some(value.to_string());
        self
    }

    pub fn avatar_url(mut self, value: &str) -> Self {
        self.contact.avatar_url = Some(value.to_string());
        self
    }

    pub fn deleted(mut self, deleted: bool) -> Self {
        self.contact.deleted = deleted;
        self
    }

    pub fn server_contact_id(mut self, id: i64) -> Self {
        self.contact.server_contact_id = Some(id);
        self
    }

    pub fn raw_contact_id(mut self, id: i64) -> Self {
        self.contact.raw_contact_id = Some(id);
        self
    }

    pub fn sync_state(mut self, state: i64) -> Self {
        self.contact.sync_state = state;
        self
    }

    pub fn dirty(mut self, dirty: bool) -> Self {
        self.contact.dirty = dirty;
        self
    }

    pub fn build(self) -> RawContact {
        self.contact
    }
}
