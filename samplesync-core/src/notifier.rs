// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Contact-view notifier.
//!
//! The host calls [`Notifier::on_contact_opened`] when the user opens one of
//! this account's contacts.

use tracing::{debug, info};

/// Receives contact-view notifications from the host.
#[derive(Debug, Default, Clone, Copy)]
pub struct Notifier;

impl Notifier {
    pub fn new() -> Self {
        Notifier
    }

    /// Logs the opened contact's URI. Returns true if it was logged.
    pub fn on_contact_opened(&self, uri: Option<&str>) -> bool {
        match uri.map(str::trim).filter(|u| !u.is_empty()) {
            Some(uri) => {
                info!("Contact opened: {}", uri);
                true
            }
            None => {
                debug!("Ignoring contact-opened notification without a URI");
                false
            }
        }
    }
}
