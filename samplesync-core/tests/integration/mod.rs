// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration Tests for SampleSync Core
//!
//! These tests wire the SQLite store, the authenticator, the account manager
//! and the sync adapter together with in-process fakes for the server.
//!
//! Run with: cargo test --test integration

mod authenticator_workflow_test;
mod fakes;
mod storage_persistence_test;
mod sync_property_test;
mod sync_workflow_test;
