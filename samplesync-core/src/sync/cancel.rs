// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Cooperative cancellation of a running sync pass.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag the host raises to cancel the pass in progress.
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag {
    canceled: Arc<AtomicBool>,
}

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.canceled.store(true, Ordering::SeqCst);
    }

    pub fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::SeqCst)
    }

    /// Clears a previous request before a new pass starts.
    pub fn reset(&self) {
        self.canceled.store(false, Ordering::SeqCst);
    }
}
