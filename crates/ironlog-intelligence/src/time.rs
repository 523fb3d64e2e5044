// ABOUTME: Local calendar boundary helpers for analytics windows
// ABOUTME: Midnight truncation and Sunday-start weeks in a fixed UTC offset
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, Utc};

/// Instant of local midnight on `date` in `offset`
#[must_use]
pub fn local_midnight(date: NaiveDate, offset: FixedOffset) -> DateTime<Utc> {
    let local = date.and_time(NaiveTime::MIN);
    let utc = local - Duration::seconds(i64::from(offset.local_minus_utc()));
    DateTime::from_naive_utc_and_offset(utc, Utc)
}

/// Local midnight `days_back` days before `now`
#[must_use]
pub fn midnight_days_before(now: DateTime<FixedOffset>, days_back: i64) -> DateTime<Utc> {
    local_midnight(now.date_naive() - Duration::days(days_back), *now.offset())
}

/// Most recent Sunday on or before `date`
#[must_use]
pub fn sunday_on_or_before(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// Local midnight of the Sunday starting the week that contains `now`
#[must_use]
pub fn start_of_week(now: DateTime<FixedOffset>) -> DateTime<Utc> {
    local_midnight(sunday_on_or_before(now.date_naive()), *now.offset())
}

/// Calendar day of `instant` in `offset`
#[must_use]
pub fn local_date(instant: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    instant.with_timezone(&offset).date_naive()
}
