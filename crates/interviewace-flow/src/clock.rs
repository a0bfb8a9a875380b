// SPDX-FileCopyrightText: 2026 InterviewAce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Millisecond time source used by the answer timer.

use std::sync::atomic::{AtomicI64, Ordering};

/// Source of wall-clock milliseconds since the Unix epoch.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// The real clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    millis: AtomicI64,
}

impl ManualClock {
    pub fn new(start_millis: i64) -> Self {
        Self {
            millis: AtomicI64::new(start_millis),
        }
    }

    pub fn set(&self, millis: i64) {
        self.millis.store(millis, Ordering::SeqCst);
    }

    pub fn advance(&self, delta_millis: i64) {
        self.millis.fetch_add(delta_millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.millis.load(Ordering::SeqCst)
    }
}

/// Whole seconds between `start` and `now`, rounded half up. Never negative.
pub fn elapsed_seconds(start_millis: i64, now_millis: i64) -> u64 {
    let elapsed = now_millis.saturating_sub(start_millis);
    if elapsed <= 0 {
        return 0;
    }
    (elapsed as u64).saturating_add(500) / 1000
}
