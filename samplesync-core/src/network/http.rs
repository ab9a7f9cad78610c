// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Blocking HTTP client for the sample server.

use reqwest::blocking::Client;
use reqwest::StatusCode;
use tracing::{debug, warn};

use super::{NetworkError, RemoteSyncService, TokenService};
use crate::account::Account;
use crate::config::HttpConfig;
use crate::contact::{decode_contacts, encode_contacts, RawContact};

/// Talks to the sample server over HTTP form posts.
pub struct HttpSyncClient {
    client: Client,
    config: HttpConfig,
}

impl HttpSyncClient {
    /// Create a new client from config
    pub fn new(config: HttpConfig) -> Result<Self, NetworkError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("SampleSync/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(HttpSyncClient { client, config })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}

impl TokenService for HttpSyncClient {
    fn authenticate(&self, username: &str, password: &str) -> Result<Option<String>, NetworkError> {
        let params = [("username", username), ("password", password)];
        let response = self
            .client
            .post(self.config.auth_url())
            .form(&params)
            .send()?;

        if response.status() != StatusCode::OK {
            warn!("Error authenticating: HTTP {}", response.status().as_u16());
            return Ok(None);
        }

        let token = response.text()?.trim().to_string();
        if token.is_empty() {
            warn!("Server returned an empty auth token");
            return Ok(None);
        }

        debug!("Successful authentication for {}", username);
        Ok(Some(token))
    }
}

impl RemoteSyncService for HttpSyncClient {
    fn sync_contacts(
        &self,
        account: &Account,
        auth_token: &str,
        marker: i64,
        dirty_contacts: &[RawContact],
    ) -> Result<Vec<RawContact>, NetworkError> {
        let contacts_json = encode_contacts(dirty_contacts)?;

        let mut params = vec![
            ("username", account.name.clone()),
            ("authtoken", auth_token.to_string()),
            ("contacts", contacts_json),
        ];
        if marker > 0 {
            params.push(("syncstate", marker.to_string()));
        }

        debug!(
            "Syncing to: {} ({} local changes)",
            self.config.sync_url(),
            dirty_contacts.len()
        );
        let response = self
            .client
            .post(self.config.sync_url())
            .form(&params)
            .send()?;

        match response.status() {
            StatusCode::OK => {
                let body = response.text()?;
                decode_contacts(&body)
            }
            StatusCode::UNAUTHORIZED => Err(NetworkError::Authentication(
                "Unauthorized token, unable to sync".into(),
            )),
            status => {
                warn!("Server error in sending dirty contacts: {}", status);
                Err(NetworkError::Server(status.as_u16()))
            }
        }
    }
}
