// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sync Module
//!
//! Two-way contact synchronization between the local contact store and the
//! sample server. One call to [`SyncHandler::on_perform_sync`] runs one
//! linear pass; failures end the pass early and are tallied in the host's
//! [`SyncResult`].

mod adapter;
mod cancel;
mod error;
pub mod marker;
mod result;

pub use adapter::{SyncAdapter, SyncExtras, SyncHandler};
pub use cancel::CancellationFlag;
pub use error::{SyncCounter, SyncError};
pub use result::{SyncResult, SyncStats};
