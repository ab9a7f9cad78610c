// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Account Authenticator
//!
//! Host callbacks for the sample account type. Sync passes use auth tokens
//! rather than the password, so the password only travels when a token is
//! (re)issued.

use std::sync::Arc;

use tracing::{trace, warn};

use super::error::AuthenticatorError;
use crate::account::Account;
use crate::config::SyncConfig;
use crate::network::TokenService;
use crate::storage::CredentialStore;

/// Message returned for token types other than the supported one.
pub const INVALID_TOKEN_TYPE_MESSAGE: &str = "invalid authTokenType";

/// Asks the host to show its credential-entry UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    /// Account to prefill, `None` when adding a new account.
    pub account_name: Option<String>,
    /// Token type that was requested, if any.
    pub auth_token_type: Option<String>,
}

/// Result handed back to the host for an authenticator callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticatorReply {
    /// A usable token.
    Token {
        account_name: String,
        account_type: String,
        auth_token: String,
    },
    /// The user must (re-)enter credentials.
    LaunchPrompt(PromptRequest),
    /// The request itself was invalid.
    Error { message: String },
    /// Answer to a yes/no query.
    BooleanResult(bool),
}

/// Callbacks the host's account subsystem dispatches to.
///
/// `Ok(None)` means "not handled here, use the host's default behaviour".
pub trait AccountAuthenticator: Send + Sync {
    /// Starts adding a new account.
    fn add_account(
        &self,
        account_type: &str,
        auth_token_type: Option<&str>,
        required_features: &[String],
    ) -> Result<AuthenticatorReply, AuthenticatorError>;

    /// Verifies the user knows the account's credentials.
    fn confirm_credentials(
        &self,
        account: &Account,
    ) -> Result<Option<AuthenticatorReply>, AuthenticatorError>;

    /// Edits authenticator-wide properties.
    fn edit_properties(&self, account_type: &str)
        -> Result<AuthenticatorReply, AuthenticatorError>;

    /// Produces an auth token for the account, or a prompt request.
    fn get_auth_token(
        &self,
        account: &Account,
        auth_token_type: &str,
    ) -> Result<AuthenticatorReply, AuthenticatorError>;

    /// Human-readable label for a token type.
    fn get_auth_token_label(&self, auth_token_type: &str) -> Option<String>;

    /// Reports whether the account has all of the given features.
    fn has_features(
        &self,
        account: &Account,
        features: &[String],
    ) -> Result<AuthenticatorReply, AuthenticatorError>;

    /// Lets the user replace the account's credentials.
    fn update_credentials(
        &self,
        account: &Account,
        auth_token_type: Option<&str>,
    ) -> Result<Option<AuthenticatorReply>, AuthenticatorError>;
}

/// Authenticator for the sample account type.
pub struct Authenticator {
    credentials: Arc<dyn CredentialStore>,
    token_service: Arc<dyn TokenService>,
    config: SyncConfig,
}

impl Authenticator {
    /// Creates an authenticator backed by the given collaborators.
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        token_service: Arc<dyn TokenService>,
        config: SyncConfig,
    ) -> Self {
        Authenticator {
            credentials,
            token_service,
            config,
        }
    }

    /// Exchanges the stored password for a token. `None` when there is no
    /// password or the server did not issue a token.
    fn exchange_password(&self, account: &Account) -> Result<Option<String>, AuthenticatorError> {
        let Some(password) = self.credentials.password(account)? else {
            return Ok(None);
        };

        match self.token_service.authenticate(&account.name, &password) {
            Ok(Some(token)) if !token.is_empty() => Ok(Some(token)),
            Ok(_) => Ok(None),
            Err(e) => {
                warn!("Token exchange for {} failed: {}", account.name, e);
                Ok(None)
            }
        }
    }
}

impl AccountAuthenticator for Authenticator {
    fn add_account(
        &self,
        _account_type: &str,
        auth_token_type: Option<&str>,
        _required_features: &[String],
    ) -> Result<AuthenticatorReply, AuthenticatorError> {
        trace!("add_account()");
        Ok(AuthenticatorReply::LaunchPrompt(PromptRequest {
            account_name: None,
            auth_token_type: auth_token_type.map(str::to_string),
        }))
    }

    fn confirm_credentials(
        &self,
        _account: &Account,
    ) -> Result<Option<AuthenticatorReply>, AuthenticatorError> {
        trace!("confirm_credentials()");
        Ok(None)
    }

    fn edit_properties(
        &self,
        _account_type: &str,
    ) -> Result<AuthenticatorReply, AuthenticatorError> {
        trace!("edit_properties()");
        Err(AuthenticatorError::Unsupported("edit_properties"))
    }

    fn get_auth_token(
        &self,
        account: &Account,
        auth_token_type: &str,
    ) -> Result<AuthenticatorReply, AuthenticatorError> {
        trace!("get_auth_token()");

        if auth_token_type != self.config.auth_token_type {
            return Ok(AuthenticatorReply::Error {
                message: INVALID_TOKEN_TYPE_MESSAGE.to_string(),
            });
        }

        if let Some(auth_token) = self.exchange_password(account)? {
            return Ok(AuthenticatorReply::Token {
                account_name: account.name.clone(),
                account_type: self.config.account_type.clone(),
                auth_token,
            });
        }

        // No password, or it no longer works: the user has to log in again
        Ok(AuthenticatorReply::LaunchPrompt(PromptRequest {
            account_name: Some(account.name.clone()),
            auth_token_type: Some(auth_token_type.to_string()),
        }))
    }

    fn get_auth_token_label(&self, _auth_token_type: &str) -> Option<String> {
        // Single token type, no label
        trace!("get_auth_token_label()");
        None
    }

    fn has_features(
        &self,
        _account: &Account,
        _features: &[String],
    ) -> Result<AuthenticatorReply, AuthenticatorError> {
        trace!("has_features()");
        Ok(AuthenticatorReply::BooleanResult(false))
    }

    fn update_credentials(
        &self,
        _account: &Account,
        _auth_token_type: Option<&str>,
    ) -> Result<Option<AuthenticatorReply>, AuthenticatorError> {
        trace!("update_credentials()");
        Ok(None)
    }
}
