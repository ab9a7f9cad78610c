// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! SampleSync Mobile Bindings
//!
//! UniFFI bindings for Android and iOS platforms.
//! The host keeps its own account manager and contacts provider and hands
//! them in as callback interfaces; the authenticator and sync pass logic
//! run in samplesync-core.

use std::collections::HashMap;
use std::sync::Arc;

use samplesync_core::config::HttpConfig;
use samplesync_core::network::HttpSyncClient;
use samplesync_core::{
    AccountAuthenticator, AccountManager, Authenticator, ContactStore, CredentialStore,
    EventDispatcher, Notifier, RemoteSyncService, SyncAdapter, SyncConfig, SyncExtras,
    SyncHandler, SyncResult, TokenService,
};

// === Modules ===

mod error;
mod platform;
mod types;

// Re-export public types
pub use error::MobileError;
pub use platform::{
    PlatformContactStore, PlatformCredentialStore, PlatformSyncListener, PlatformSyncServer,
};
pub use types::{
    MobileAccount, MobileAuthReply, MobileRawContact, MobileSyncCounter, MobileSyncEvent,
    MobileSyncStats,
};

use platform::{ContactBridge, CredentialBridge, ListenerBridge, ServerBridge};

uniffi::setup_scaffolding!();

// === Logging ===

/// Routes core log output to stderr, filtered by `RUST_LOG`.
///
/// Safe to call more than once; only the first call installs a subscriber.
#[uniffi::export]
pub fn init_logging() {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("samplesync_core=info")),
        )
        .try_init();
    if installed.is_ok() {
        tracing::debug!("Logging initialized");
    }
}

fn http_client(base_url: &str) -> Result<Arc<HttpSyncClient>, MobileError> {
    let config = HttpConfig::from_env().with_base_url(base_url);
    let client = HttpSyncClient::new(config).map_err(|e| MobileError::Network(e.to_string()))?;
    tracing::debug!("HTTP sync client for {}", client.base_url());
    Ok(Arc::new(client))
}

// === Authenticator ===

/// Account authenticator callbacks for the sample account type.
#[derive(uniffi::Object)]
pub struct MobileAuthenticator {
    inner: Authenticator,
}

#[uniffi::export]
impl MobileAuthenticator {
    /// Create an authenticator that exchanges passwords through the platform server.
    #[uniffi::constructor]
    pub fn new(
        credentials: Box<dyn PlatformCredentialStore>,
        server: Box<dyn PlatformSyncServer>,
    ) -> Arc<Self> {
        let credentials = Arc::new(CredentialBridge(Arc::from(credentials)));
        let server = Arc::new(ServerBridge(Arc::from(server)));
        Arc::new(MobileAuthenticator {
            inner: Authenticator::new(credentials, server, SyncConfig::from_env()),
        })
    }

    /// Create an authenticator talking to the sample server over HTTP.
    #[uniffi::constructor]
    pub fn with_http_server(
        credentials: Box<dyn PlatformCredentialStore>,
        base_url: String,
    ) -> Result<Arc<Self>, MobileError> {
        let credentials = Arc::new(CredentialBridge(Arc::from(credentials)));
        let server = http_client(&base_url)?;
        Ok(Arc::new(MobileAuthenticator {
            inner: Authenticator::new(credentials, server, SyncConfig::from_env()),
        }))
    }

    pub fn add_account(
        &self,
        account_type: String,
        auth_token_type: Option<String>,
        required_features: Vec<String>,
    ) -> Result<MobileAuthReply, MobileError> {
        let reply = self.inner.add_account(
            &account_type,
            auth_token_type.as_deref(),
            &required_features,
        )?;
        Ok(reply.into())
    }

    /// Returns `None` when the host should use its default behaviour.
    pub fn confirm_credentials(
        &self,
        account: MobileAccount,
    ) -> Result<Option<MobileAuthReply>, MobileError> {
        let reply = self.inner.confirm_credentials(&account.into())?;
        Ok(reply.map(MobileAuthReply::from))
    }

    /// Always fails with `MobileError::Unsupported`.
    pub fn edit_properties(&self, account_type: String) -> Result<MobileAuthReply, MobileError> {
        let reply = self.inner.edit_properties(&account_type)?;
        Ok(reply.into())
    }

    pub fn get_auth_token(
        &self,
        account: MobileAccount,
        auth_token_type: String,
    ) -> Result<MobileAuthReply, MobileError> {
        let reply = self
            .inner
            .get_auth_token(&account.into(), &auth_token_type)?;
        Ok(reply.into())
    }

    pub fn get_auth_token_label(&self, auth_token_type: String) -> Option<String> {
        self.inner.get_auth_token_label(&auth_token_type)
    }

    pub fn has_features(
        &self,
        account: MobileAccount,
        features: Vec<String>,
    ) -> Result<MobileAuthReply, MobileError> {
        let reply = self.inner.has_features(&account.into(), &features)?;
        Ok(reply.into())
    }

    pub fn update_credentials(
        &self,
        account: MobileAccount,
        auth_token_type: Option<String>,
    ) -> Result<Option<MobileAuthReply>, MobileError> {
        let reply = self
            .inner
            .update_credentials(&account.into(), auth_token_type.as_deref())?;
        Ok(reply.map(MobileAuthReply::from))
    }
}

// === Sync Adapter ===

/// Contact sync adapter driven by the platform scheduler.
///
/// `perform_sync` blocks; call it from the scheduler's worker thread and
/// `cancel_sync` from any other thread.
#[derive(uniffi::Object)]
pub struct MobileSyncAdapter {
    adapter: SyncAdapter,
}

impl MobileSyncAdapter {
    fn assemble(
        credentials: Arc<dyn CredentialStore>,
        contacts: Arc<dyn ContactStore>,
        token_service: Arc<dyn TokenService>,
        server: Arc<dyn RemoteSyncService>,
        listener: Option<Arc<dyn PlatformSyncListener>>,
    ) -> Self {
        let config = SyncConfig::from_env();

        let mut dispatcher = EventDispatcher::new();
        if let Some(listener) = listener {
            dispatcher.add_handler(Arc::new(ListenerBridge(listener)));
        }
        let events = Arc::new(dispatcher);

        let authenticator = Arc::new(Authenticator::new(
            credentials.clone(),
            token_service,
            config.clone(),
        ));
        let tokens = Arc::new(AccountManager::new(
            credentials.clone(),
            authenticator,
            events.clone(),
        ));

        MobileSyncAdapter {
            adapter: SyncAdapter::new(credentials, contacts, server, tokens, events, config),
        }
    }
}

#[uniffi::export]
impl MobileSyncAdapter {
    /// Create a sync adapter backed entirely by platform collaborators.
    #[uniffi::constructor]
    pub fn new(
        credentials: Box<dyn PlatformCredentialStore>,
        contacts: Box<dyn PlatformContactStore>,
        server: Box<dyn PlatformSyncServer>,
    ) -> Arc<Self> {
        let server = Arc::new(ServerBridge(Arc::from(server)));
        Arc::new(Self::assemble(
            Arc::new(CredentialBridge(Arc::from(credentials))),
            Arc::new(ContactBridge(Arc::from(contacts))),
            server.clone(),
            server,
            None,
        ))
    }

    /// Same as `new`, reporting sync events to `listener`.
    #[uniffi::constructor]
    pub fn with_listener(
        credentials: Box<dyn PlatformCredentialStore>,
        contacts: Box<dyn PlatformContactStore>,
        server: Box<dyn PlatformSyncServer>,
        listener: Box<dyn PlatformSyncListener>,
    ) -> Arc<Self> {
        let server = Arc::new(ServerBridge(Arc::from(server)));
        Arc::new(Self::assemble(
            Arc::new(CredentialBridge(Arc::from(credentials))),
            Arc::new(ContactBridge(Arc::from(contacts))),
            server.clone(),
            server,
            Some(Arc::from(listener)),
        ))
    }

    /// Create a sync adapter talking to the sample server over HTTP.
    #[uniffi::constructor]
    pub fn with_http_server(
        credentials: Box<dyn PlatformCredentialStore>,
        contacts: Box<dyn PlatformContactStore>,
        base_url: String,
        listener: Box<dyn PlatformSyncListener>,
    ) -> Result<Arc<Self>, MobileError> {
        let client = http_client(&base_url)?;
        Ok(Arc::new(Self::assemble(
            Arc::new(CredentialBridge(Arc::from(credentials))),
            Arc::new(ContactBridge(Arc::from(contacts))),
            client.clone(),
            client,
            Some(Arc::from(listener)),
        )))
    }

    /// Runs one sync pass and returns its failure counters.
    pub fn perform_sync(
        &self,
        account: MobileAccount,
        extras: HashMap<String, String>,
    ) -> MobileSyncStats {
        let extras: SyncExtras = extras.into_iter().collect();
        let mut result = SyncResult::new();
        self.adapter
            .on_perform_sync(&account.into(), &extras, &mut result);
        MobileSyncStats::from(&result)
    }

    /// Cancels the pass in progress, if any.
    pub fn cancel_sync(&self) {
        self.adapter.on_sync_canceled();
    }
}

// === Notifier ===

/// Receives contact-view notifications.
#[derive(uniffi::Object, Default)]
pub struct MobileNotifier {
    inner: Notifier,
}

#[uniffi::export]
impl MobileNotifier {
    #[uniffi::constructor]
    pub fn new() -> Arc<Self> {
        Arc::new(MobileNotifier::default())
    }

    /// Returns true if the URI was logged.
    pub fn on_contact_opened(&self, uri: Option<String>) -> bool {
        self.inner.on_contact_opened(uri.as_deref())
    }
}
