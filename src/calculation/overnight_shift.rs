//! Midnight-crossing handling for template intervals.
//!
//! A template whose end time is not after its start time runs past
//! midnight. This module splits such an interval into one segment per
//! calendar day so each part is classified against its own date.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{MINUTES_PER_DAY, WorkInterval};

/// A portion of a template interval lying within one calendar day.
///
/// # Example
///
/// ```
/// use coverage_engine::calculation::DaySegment;
/// use chrono::NaiveDate;
///
/// let segment = DaySegment {
///     date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
///     start_minute: 1320,
///     end_minute: 1440,
/// };
/// assert_eq!(segment.minutes(), 120);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySegment {
    /// The calendar date this segment falls on.
    pub date: NaiveDate,
    /// Start of the segment, minutes since that date's midnight.
    pub start_minute: u32,
    /// End of the segment, minutes since that date's midnight.
    pub end_minute: u32,
}

impl DaySegment {
    /// Length of the segment in minutes.
    pub fn minutes(&self) -> u32 {
        self.end_minute.saturating_sub(self.start_minute)
    }
}

/// Segments a template interval applied on `date` by calendar day.
///
/// # Behavior
///
/// - `end > start`: a single segment on `date`
/// - `end <= start`: `[start, 24:00)` on `date` and `[00:00, end)` on the
///   following date
/// - `end == start` is therefore a full 24 hours of coverage spread over
///   two dates
/// - segments are ordered chronologically; an empty second segment (end at
///   00:00) is still returned and contributes nothing
///
/// # Example
///
/// ```
/// use coverage_engine::calculation::segment_interval;
/// use coverage_engine::models::WorkInterval;
/// use chrono::NaiveDate;
///
/// // Saturday 22:00 to Sunday 06:00
/// let saturday = NaiveDate::from_ymd_opt(2025, 1, 11).unwrap();
/// let segments = segment_interval(
///     saturday,
///     WorkInterval { start_minute: 1320, end_minute: 360 },
/// );
///
/// assert_eq!(segments.len(), 2);
/// assert_eq!(segments[0].date, saturday);
/// assert_eq!(segments[0].minutes(), 120);
/// assert_eq!(segments[1].date, NaiveDate::from_ymd_opt(2025, 1, 12).unwrap());
/// assert_eq!(segments[1].minutes(), 360);
/// ```
pub fn segment_interval(date: NaiveDate, interval: WorkInterval) -> Vec<DaySegment> {
    if !interval.crosses_midnight() {
        return vec![DaySegment {
            date,
            start_minute: interval.start_minute,
            end_minute: interval.end_minute,
        }];
    }

    let mut segments = vec![DaySegment {
        date,
        start_minute: interval.start_minute,
        end_minute: MINUTES_PER_DAY,
    }];
    // NaiveDate::MAX has no successor; the tail is dropped there.
    if let Some(next) = date.checked_add_days(Days::new(1)) {
        segments.push(DaySegment {
            date: next,
            start_minute: 0,
            end_minute: interval.end_minute,
        });
    }
    segments
}
