//! Calendar-day scoping for todo pages.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};

/// The half-open interval `[start, end)` covering one calendar day in UTC.
///
/// Page listings are scoped to the day a page was created: a page belongs to
/// the window iff `start <= created_at < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayWindow {
    /// Build the 24-hour window starting at midnight UTC of `date`.
    pub fn for_date(date: NaiveDate) -> Self {
        let start = date.and_time(NaiveTime::MIN).and_utc();
        Self {
            start,
            end: start + TimeDelta::days(1),
        }
    }

    /// Whether `ts` falls inside the window. Start is inclusive, end exclusive.
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.start <= ts && ts < self.end
    }
}
