// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Authentication
//!
//! The account authenticator answers the host's token requests by
//! exchanging the stored password for a bearer token. The account manager
//! sits in front of it as the blocking token source the sync adapter uses:
//! it serves cached tokens, caches fresh ones, and tells the host when the
//! user has to re-enter credentials.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use samplesync_core::{Account, AccountAuthenticator, Authenticator, Storage, SyncConfig};
//!
//! let storage = Arc::new(Storage::open("accounts.db")?);
//! let authenticator = Authenticator::new(storage, token_service, SyncConfig::default());
//!
//! let reply = authenticator.get_auth_token(&Account::sample("alice"), AUTHTOKEN_TYPE)?;
//! ```

mod account_manager;
mod authenticator;
mod error;

pub use account_manager::{AccountManager, TokenSource};
pub use authenticator::{AccountAuthenticator, Authenticator, AuthenticatorReply, PromptRequest};
pub use error::{AuthenticatorError, CredentialError};
