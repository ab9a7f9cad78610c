// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration for the authenticator, sync adapter and HTTP client.

use std::env;
use std::time::Duration;

use crate::account::{ACCOUNT_TYPE, AUTHTOKEN_TYPE, SYNC_MARKER_KEY};

/// Title of the contact group every synced contact is placed in.
pub const SAMPLE_GROUP_TITLE: &str = "Sample Group";

/// Default sample server.
pub const DEFAULT_SERVER_URL: &str = "https://samplesyncadapter2.appspot.com";

/// Settings shared by the authenticator and the sync adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Account type this service is registered for.
    pub account_type: String,
    /// The single supported auth token type.
    pub auth_token_type: String,
    /// User-data key the sync marker is stored under.
    pub sync_marker_key: String,
    /// Title of the contact group synced contacts belong to.
    pub group_title: String,
    /// Ask the host to notify the user when token acquisition needs a prompt.
    pub notify_auth_failure: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            account_type: ACCOUNT_TYPE.to_string(),
            auth_token_type: AUTHTOKEN_TYPE.to_string(),
            sync_marker_key: SYNC_MARKER_KEY.to_string(),
            group_title: SAMPLE_GROUP_TITLE.to_string(),
            notify_auth_failure: true,
        }
    }
}

impl SyncConfig {
    /// Loads the configuration, applying `SAMPLESYNC_*` environment overrides.
    ///
    /// Recognised variables: `SAMPLESYNC_ACCOUNT_TYPE`,
    /// `SAMPLESYNC_AUTHTOKEN_TYPE`, `SAMPLESYNC_MARKER_KEY`,
    /// `SAMPLESYNC_GROUP_TITLE` and `SAMPLESYNC_NOTIFY_AUTH_FAILURE`
    /// (`0`/`false` disables it).
    pub fn from_env() -> Self {
        let mut config = SyncConfig::default();

        if let Some(value) = non_empty_var("SAMPLESYNC_ACCOUNT_TYPE") {
            config.account_type = value;
        }
        if let Some(value) = non_empty_var("SAMPLESYNC_AUTHTOKEN_TYPE") {
            config.auth_token_type = value;
        }
        if let Some(value) = non_empty_var("SAMPLESYNC_MARKER_KEY") {
            config.sync_marker_key = value;
        }
        if let Some(value) = non_empty_var("SAMPLESYNC_GROUP_TITLE") {
            config.group_title = value;
        }
        if let Some(value) = non_empty_var("SAMPLESYNC_NOTIFY_AUTH_FAILURE") {
            config.notify_auth_failure = parse_flag(&value);
        }

        config
    }
}

/// Settings for the blocking HTTP client talking to the sample server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    /// Base URL; `/auth` and `/sync` are appended.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        HttpConfig {
            base_url: DEFAULT_SERVER_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl HttpConfig {
    /// Loads the configuration from `SAMPLESYNC_SERVER_URL` and
    /// `SAMPLESYNC_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let mut config = HttpConfig::default();

        if let Some(url) = non_empty_var("SAMPLESYNC_SERVER_URL") {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(secs) =
            non_empty_var("SAMPLESYNC_TIMEOUT_SECS").and_then(|v| v.parse::<u64>().ok())
        {
            config.timeout = Duration::from_secs(secs);
        }

        config
    }

    /// Configure with a custom server URL.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// URL of the token exchange endpoint.
    pub fn auth_url(&self) -> String {
        format!("{}/auth", self.base_url)
    }

    /// URL of the contact sync endpoint.
    pub fn sync_url(&self) -> String {
        format!("{}/sync", self.base_url)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
