// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Account Manager
//!
//! Blocking token acquisition for sync passes.

use std::sync::Arc;

use tracing::{debug, warn};

use super::authenticator::{AccountAuthenticator, AuthenticatorReply};
use super::error::CredentialError;
use crate::account::Account;
use crate::events::{EventDispatcher, SyncEvent};
use crate::storage::CredentialStore;
use crate::sync::CancellationFlag;

/// Source of auth tokens for the sync adapter.
pub trait TokenSource: Send + Sync {
    /// Returns a usable token, blocking on a server round trip if needed.
    ///
    /// When no token can be produced without user interaction the call fails
    /// with [`CredentialError::Authenticator`]; with `notify_auth_failure`
    /// the host is also told to prompt the user.
    fn blocking_get_auth_token(
        &self,
        account: &Account,
        auth_token_type: &str,
        notify_auth_failure: bool,
        cancel: &CancellationFlag,
    ) -> Result<String, CredentialError>;

    /// Forgets a token the server rejected so the next pass fetches a new one.
    fn invalidate_auth_token(&self, account: &Account, token: &str)
        -> Result<(), CredentialError>;
}

/// Serves cached tokens and falls back to the authenticator.
pub struct AccountManager {
    credentials: Arc<dyn CredentialStore>,
    authenticator: Arc<dyn AccountAuthenticator>,
    events: Arc<EventDispatcher>,
}

impl AccountManager {
    /// Creates a new AccountManager.
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        authenticator: Arc<dyn AccountAuthenticator>,
        events: Arc<EventDispatcher>,
    ) -> Self {
        AccountManager {
            credentials,
            authenticator,
            events,
        }
    }

    fn ensure_not_canceled(cancel: &CancellationFlag) -> Result<(), CredentialError> {
        if cancel.is_canceled() {
            Err(CredentialError::Canceled)
        } else {
            Ok(())
        }
    }
}

impl TokenSource for AccountManager {
    fn blocking_get_auth_token(
        &self,
        account: &Account,
        auth_token_type: &str,
        notify_auth_failure: bool,
        cancel: &CancellationFlag,
    ) -> Result<String, CredentialError> {
        Self::ensure_not_canceled(cancel)?;

        if let Some(token) = self.credentials.peek_auth_token(account, auth_token_type)? {
            debug!("Using cached auth token for {}", account.name);
            return Ok(token);
        }

        let reply = self.authenticator.get_auth_token(account, auth_token_type)?;
        Self::ensure_not_canceled(cancel)?;

        match reply {
            AuthenticatorReply::Token { auth_token, .. } => {
                self.credentials
                    .set_auth_token(account, auth_token_type, &auth_token)?;
                Ok(auth_token)
            }
            AuthenticatorReply::LaunchPrompt(_) => {
                warn!("Credentials required for {}", account.name);
                if notify_auth_failure {
                    self.events.dispatch(SyncEvent::AuthFailureNotification {
                        account_name: account.name.clone(),
                        auth_token_type: auth_token_type.to_string(),
                    });
                }
                Err(CredentialError::Authenticator(format!(
                    "credentials required for {}",
                    account.name
                )))
            }
            AuthenticatorReply::Error { message } => Err(CredentialError::Authenticator(message)),
            AuthenticatorReply::BooleanResult(_) => Err(CredentialError::Authenticator(
                "unexpected authenticator reply".into(),
            )),
        }
    }

    fn invalidate_auth_token(
        &self,
        account: &Account,
        token: &str,
    ) -> Result<(), CredentialError> {
        self.credentials.invalidate_auth_token(account, token)?;
        Ok(())
    }
}
