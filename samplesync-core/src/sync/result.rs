// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-pass failure counters reported back to the host scheduler.

use super::error::{SyncCounter, SyncError};

/// Failure counters for one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    /// Malformed server responses or corrupt local data.
    pub num_parse_exceptions: u64,
    /// Transport or local store failures.
    pub num_io_exceptions: u64,
    /// Token acquisition or token rejection failures.
    pub num_auth_exceptions: u64,
}

impl SyncStats {
    /// Increments the counter for `counter`.
    pub fn increment(&mut self, counter: SyncCounter) {
        match counter {
            SyncCounter::Auth => self.num_auth_exceptions += 1,
            SyncCounter::Io => self.num_io_exceptions += 1,
            SyncCounter::Parse => self.num_parse_exceptions += 1,
        }
    }

    /// Total failures recorded.
    pub fn total(&self) -> u64 {
        self.num_parse_exceptions + self.num_io_exceptions + self.num_auth_exceptions
    }
}

/// Result sink the host passes into each pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncResult {
    pub stats: SyncStats,
}

impl SyncResult {
    /// Creates a new, empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tallies a failure; cancellation is not counted.
    pub fn record(&mut self, error: &SyncError) -> Option<SyncCounter> {
        let counter = error.counter();
        if let Some(counter) = counter {
            self.stats.increment(counter);
        }
        counter
    }

    /// Returns true if the pass recorded any failure.
    pub fn has_error(&self) -> bool {
        self.stats.total() > 0
    }

    /// True when the failure needs the user (not just a later retry).
    pub fn has_hard_error(&self) -> bool {
        self.stats.num_auth_exceptions > 0 || self.stats.num_parse_exceptions > 0
    }

    /// True when a later retry may succeed on its own.
    pub fn has_soft_error(&self) -> bool {
        self.stats.num_io_exceptions > 0
    }

    /// Clears the counters.
    pub fn reset(&mut self) {
        self.stats = SyncStats::default();
    }
}
