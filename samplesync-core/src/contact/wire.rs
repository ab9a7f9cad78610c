// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! JSON wire format used by the sample server.
//!
//! Contacts travel as objects with single-letter keys. Outgoing objects carry
//! the editable fields plus the server id (`i`), the client id (`c`) and a
//! deletion flag (`d`, only when set). Incoming objects may also carry the
//! status message (`s`), avatar URL (`a`) and the server change counter (`x`).

use serde::{Deserialize, Serialize};

use super::RawContact;
use crate::network::NetworkError;

#[derive(Debug, Default, Serialize, Deserialize)]
struct WireContact {
    #[serde(rename = "u", default, skip_serializing_if = "Option::is_none")]
    user_name: Option<String>,
    #[serde(rename = "f", default, skip_serializing_if = "Option::is_none")]
    first_name: Option<String>,
    #[serde(rename = "l", default, skip_serializing_if = "Option::is_none")]
    last_name: Option<String>,
    #[serde(rename = "m", default, skip_serializing_if = "Option::is_none")]
    cell_phone: Option<String>,
    #[serde(rename = "o", default, skip_serializing_if = "Option::is_none")]
    office_phone: Option<String>,
    #[serde(rename = "h", default, skip_serializing_if = "Option::is_none")]
    home_phone: Option<String>,
    #[serde(rename = "e", default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(rename = "s", default, skip_serializing)]
    status: Option<String>,
    #[serde(rename = "a", default, skip_serializing)]
    avatar_url: Option<String>,
    #[serde(rename = "i", default, skip_serializing_if = "Option::is_none")]
    server_contact_id: Option<i64>,
    #[serde(rename = "c", default, skip_serializing_if = "Option::is_none")]
    client_id: Option<i64>,
    #[serde(rename = "d", default, skip_serializing_if = "Option::is_none")]
    deleted: Option<bool>,
    #[serde(rename = "x", default, skip_serializing)]
    sync_state: Option<i64>,
}

impl From<&RawContact> for WireContact {
    fn from(contact: &RawContact) -> Self {
        WireContact {
            user_name: contact.user_name.clone(),
            first_name: contact.first_name.clone(),
            last_name: contact.last_name.clone(),
            cell_phone: contact.cell_phone.clone(),
            office_phone: contact.office_phone.clone(),
            home_phone: contact.home_phone.clone(),
            email: contact.email.clone(),
            status: None,
            avatar_url: None,
            server_contact_id: contact.server_contact_id.filter(|id| *id > 0),
            client_id: contact.raw_contact_id.filter(|id| *id > 0),
            deleted: contact.deleted.then_some(true),
            sync_state: None,
        }
    }
}

impl From<WireContact> for RawContact {
    fn from(wire: WireContact) -> Self {
        RawContact {
            user_name: wire.user_name,
            full_name: None,
            first_name: wire.first_name,
            last_name: wire.last_name,
            cell_phone: wire.cell_phone,
            office_phone: wire.office_phone,
            home_phone: wire.home_phone,
            email: wire.email,
            status: wire.status,
            avatar_url: wire.avatar_url,
            deleted: wire.deleted.unwrap_or(false),
            server_contact_id: wire.server_contact_id.filter(|id| *id > 0),
            raw_contact_id: wire.client_id.filter(|id| *id > 0),
            sync_state: wire.sync_state.unwrap_or(0),
            dirty: false,
        }
    }
}

/// Encodes local contacts as the JSON array the server expects.
pub fn encode_contacts(contacts: &[RawContact]) -> Result<String, NetworkError> {
    let wire: Vec<WireContact> = contacts.iter().map(WireContact::from).collect();
    Ok(serde_json::to_string(&wire)?)
}

/// Decodes the server's JSON array of changed contacts.
pub fn decode_contacts(body: &str) -> Result<Vec<RawContact>, NetworkError> {
    let body = body.trim();
    if body.is_empty() {
        return Err(NetworkError::Parse("empty response body".into()));
    }
    let wire: Vec<WireContact> = serde_json::from_str(body)?;
    Ok(wire.into_iter().map(RawContact::from).collect())
}
