// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Authenticator Workflow Integration Tests
//!
//! Host-facing authenticator callbacks against the SQLite credential store.

use std::sync::Arc;

use samplesync_core::{
    Account, AccountAuthenticator, Authenticator, AuthenticatorError, AuthenticatorReply,
    PromptRequest, Storage, SyncConfig, ACCOUNT_TYPE, AUTHTOKEN_TYPE,
};

use super::fakes::FakeTokenService;

fn create_test_authenticator(
    password: Option<&str>,
    token: &str,
) -> (Authenticator, Arc<FakeTokenService>, Account) {
    let storage = Arc::new(Storage::in_memory().unwrap());
    let account = Account::sample("carol");
    storage.add_account(&account, password).unwrap();

    let tokens = FakeTokenService::issuing(token);
    let authenticator = Authenticator::new(storage, tokens.clone(), SyncConfig::default());
    (authenticator, tokens, account)
}

/// Test: stored password is exchanged for a token
#[test]
fn test_get_auth_token_with_password() {
    let (authenticator, tokens, account) = create_test_authenticator(Some("hunter2"), "t-123");

    let reply = authenticator
        .get_auth_token(&account, AUTHTOKEN_TYPE)
        .unwrap();

    assert_eq!(
        reply,
        AuthenticatorReply::Token {
            account_name: "carol".into(),
            account_type: ACCOUNT_TYPE.into(),
            auth_token: "t-123".into(),
        }
    );
    assert_eq!(tokens.calls(), 1);
}

/// Test: a foreign token type never reaches the server
#[test]
fn test_get_auth_token_rejects_foreign_type() {
    let (authenticator, tokens, account) = create_test_authenticator(Some("hunter2"), "t-123");

    let reply = authenticator
        .get_auth_token(&account, "com.example.other")
        .unwrap();

    assert_eq!(
        reply,
        AuthenticatorReply::Error {
            message: "invalid authTokenType".into()
        }
    );
    assert_eq!(tokens.calls(), 0);
}

/// Test: no password asks the host for credentials
#[test]
fn test_get_auth_token_prompts_without_password() {
    let (authenticator, _, account) = create_test_authenticator(None, "t-123");

    let reply = authenticator
        .get_auth_token(&account, AUTHTOKEN_TYPE)
        .unwrap();

    assert_eq!(
        reply,
        AuthenticatorReply::LaunchPrompt(PromptRequest {
            account_name: Some("carol".into()),
            auth_token_type: Some(AUTHTOKEN_TYPE.into()),
        })
    );
}

/// Test: an empty token from the server also prompts
#[test]
fn test_get_auth_token_prompts_on_empty_token() {
    let (authenticator, _, account) = create_test_authenticator(Some("hunter2"), "");

    let reply = authenticator
        .get_auth_token(&account, AUTHTOKEN_TYPE)
        .unwrap();

    assert!(matches!(reply, AuthenticatorReply::LaunchPrompt(_)));
}

/// Test: passive callbacks
#[test]
fn test_passive_callbacks() {
    let (authenticator, _, account) = create_test_authenticator(Some("hunter2"), "t-123");

    assert_eq!(
        authenticator.has_features(&account, &[]).unwrap(),
        AuthenticatorReply::BooleanResult(false)
    );
    assert_eq!(
        authenticator
            .has_features(&account, &["sync".to_string(), "photos".to_string()])
            .unwrap(),
        AuthenticatorReply::BooleanResult(false)
    );
    assert_eq!(authenticator.get_auth_token_label(AUTHTOKEN_TYPE), None);
    assert_eq!(authenticator.confirm_credentials(&account).unwrap(), None);
    assert_eq!(
        authenticator
            .update_credentials(&account, Some(AUTHTOKEN_TYPE))
            .unwrap(),
        None
    );
    assert!(matches!(
        authenticator.edit_properties(ACCOUNT_TYPE),
        Err(AuthenticatorError::Unsupported(_))
    ));
}

/// Test: adding an account launches the login prompt
#[test]
fn test_add_account_launches_prompt() {
    let (authenticator, _, _) = create_test_authenticator(None, "t-123");

    let reply = authenticator
        .add_account(ACCOUNT_TYPE, Some(AUTHTOKEN_TYPE), &[])
        .unwrap();

    assert_eq!(
        reply,
        AuthenticatorReply::LaunchPrompt(PromptRequest {
            account_name: None,
            auth_token_type: Some(AUTHTOKEN_TYPE.into()),
        })
    );
}
