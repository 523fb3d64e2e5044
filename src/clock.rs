// ABOUTME: Time source abstraction supplying "now" and the local UTC offset
// ABOUTME: System clock for production, fixed clock for deterministic tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, FixedOffset, Local, NaiveDate, Offset, Utc};
use std::sync::{Arc, Mutex, PoisonError};

/// Source of the current instant and local offset
pub trait Clock: Send + Sync {
    /// Current instant
    fn now_utc(&self) -> DateTime<Utc>;

    /// Offset treated as local time
    fn offset(&self) -> FixedOffset;

    /// Current instant in local time
    fn now(&self) -> DateTime<FixedOffset> {
        self.now_utc().with_timezone(&self.offset())
    }

    /// Current local calendar day
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall clock with either a pinned or the system offset
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    offset: Option<FixedOffset>,
}

impl SystemClock {
    /// Use the operating system's current offset
    #[must_use]
    pub const fn new() -> Self {
        Self { offset: None }
    }

    /// Treat `offset` as local time
    #[must_use]
    pub const fn with_offset(offset: FixedOffset) -> Self {
        Self {
            offset: Some(offset),
        }
    }
}

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn offset(&self) -> FixedOffset {
        self.offset.unwrap_or_else(|| Local::now().offset().fix())
    }
}

/// Manually advanced clock
#[derive(Debug, Clone)]
pub struct FixedClock {
    instant: Arc<Mutex<DateTime<Utc>>>,
    offset: FixedOffset,
}

impl FixedClock {
    /// Clock frozen at `instant` in UTC
    #[must_use]
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self::with_offset(instant, Utc.fix())
    }

    /// Clock frozen at `instant` with a local offset
    #[must_use]
    pub fn with_offset(instant: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self {
            instant: Arc::new(Mutex::new(instant)),
            offset,
        }
    }

    /// Move to `instant`
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.instant.lock().unwrap_or_else(PoisonError::into_inner) = instant;
    }

    /// Move forward by `delta`
    pub fn advance(&self, delta: chrono::Duration) {
        let mut guard = self.instant.lock().unwrap_or_else(PoisonError::into_inner);
        *guard += delta;
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        *self.instant.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }
}
