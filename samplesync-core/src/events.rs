// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Event System
//!
//! Callbacks for sync pass and credential events.

use std::sync::Arc;

use crate::sync::SyncCounter;

/// Events emitted while authenticating and syncing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// A sync pass started.
    SyncStarted {
        /// The account being synced.
        account_name: String,
        /// Marker the pass starts from.
        marker: i64,
    },

    /// A sync pass finished successfully.
    SyncCompleted {
        /// The account that was synced.
        account_name: String,
        /// Newly persisted marker.
        new_marker: i64,
        /// Local dirty contacts sent to the server.
        uploaded: usize,
        /// Contacts received from the server.
        downloaded: usize,
    },

    /// A sync pass ended early.
    SyncFailed {
        /// The account that was being synced.
        account_name: String,
        /// Counter the failure was tallied under, `None` for cancellation.
        counter: Option<SyncCounter>,
        /// Error description.
        error: String,
    },

    /// Token acquisition needs fresh credentials from the user.
    AuthFailureNotification {
        /// The account that needs credentials.
        account_name: String,
        /// The token type that was requested.
        auth_token_type: String,
    },
}

/// Event handler trait.
///
/// Implement this trait to receive sync events.
pub trait EventHandler: Send + Sync {
    /// Called when an event occurs.
    fn on_event(&self, event: SyncEvent);
}

/// Simple callback-based event handler.
///
/// Wraps a closure for easy event handling.
pub struct CallbackHandler<F>
where
    F: Fn(SyncEvent) + Send + Sync,
{
    callback: F,
}

impl<F> CallbackHandler<F>
where
    F: Fn(SyncEvent) + Send + Sync,
{
    /// Creates a new callback handler.
    pub fn new(callback: F) -> Self {
        CallbackHandler { callback }
    }
}

impl<F> EventHandler for CallbackHandler<F>
where
    F: Fn(SyncEvent) + Send + Sync,
{
    fn on_event(&self, event: SyncEvent) {
        (self.callback)(event);
    }
}

/// Event dispatcher for managing multiple handlers.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn EventHandler>>,
}

impl EventDispatcher {
    /// Creates a new event dispatcher.
    pub fn new() -> Self {
        EventDispatcher {
            handlers: Vec::new(),
        }
    }

    /// Adds an event handler.
    pub fn add_handler(&mut self, handler: Arc<dyn EventHandler>) {
        self.handlers.push(handler);
    }

    /// Dispatches an event to all handlers.
    pub fn dispatch(&self, event: SyncEvent) {
        for handler in &self.handlers {
            handler.on_event(event.clone());
        }
    }
}
