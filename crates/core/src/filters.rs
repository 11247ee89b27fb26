//! Filter-input helpers used when turning view filters into list queries.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};

use crate::datetime::{DATE_FORMAT, DATE_TIME_FORMAT};
use crate::error::CoreError;

/// Trim a free-text filter, treating blank input as "no filter".
pub fn text_filter(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Same as [`text_filter`] for optional inputs.
pub fn opt_text_filter(raw: Option<&str>) -> Option<String> {
    raw.and_then(text_filter)
}

// ---------------------------------------------------------------------------
// DateRange
// ---------------------------------------------------------------------------

/// An inclusive two-endpoint range picked in a filter bar.
///
/// Construction rejects `start > end`, so a query builder holding a
/// `DateRange` can always render it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl DateRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, CoreError> {
        if start > end {
            return Err(CoreError::Validation(format!(
                "date range start {} is after end {}",
                start.format(DATE_TIME_FORMAT),
                end.format(DATE_TIME_FORMAT)
            )));
        }
        Ok(Self { start, end })
    }

    /// Whole days: from the start of `start` to the last second of `end`.
    pub fn days(start: NaiveDate, end: NaiveDate) -> Result<Self, CoreError> {
        let last_second = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
        Self::new(start.and_time(NaiveTime::MIN), end.and_time(last_second))
    }

    /// The `days` days leading up to and including `today`.
    pub fn last_days(days: u64, today: NaiveDate) -> Self {
        let start = today.checked_sub_days(Days::new(days)).unwrap_or(today);
        Self {
            start: start.and_time(NaiveTime::MIN),
            end: today
                .and_hms_opt(23, 59, 59)
                .unwrap_or(today.and_time(NaiveTime::MIN)),
        }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end.date()
    }

    /// `(startDate, endDate)` at day granularity.
    pub fn day_bounds(&self) -> (String, String) {
        (
            self.start.format(DATE_FORMAT).to_string(),
            self.end.format(DATE_FORMAT).to_string(),
        )
    }

    /// `(startTime, endTime)` at second granularity.
    pub fn second_bounds(&self) -> (String, String) {
        (
            self.start.format(DATE_TIME_FORMAT).to_string(),
            self.end.format(DATE_TIME_FORMAT).to_string(),
        )
    }

    /// Every calendar day covered by the range, in order.
    pub fn each_day(&self) -> Vec<NaiveDate> {
        self.start_date()
            .iter_days()
            .take_while(|d| *d <= self.end_date())
            .collect()
    }
}
