//! Day detection logic.
//!
//! This module determines the day type (weekday, Sunday, holiday) of a
//! calendar date and the schedule template key consulted for it.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::{DayKey, Holiday};

/// Represents the type of day for hour bucketing.
///
/// The day type selects which bucket family (weekday, Sunday, holiday)
/// absorbs the hours worked on a calendar date.
///
/// # Example
///
/// ```
/// use coverage_engine::calculation::DayType;
///
/// let day_type = DayType::Holiday;
/// assert_eq!(format!("{}", day_type), "Holiday");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    /// Monday through Saturday, not a holiday.
    Weekday,
    /// Sunday, not a holiday.
    Sunday,
    /// A listed public holiday, whatever its weekday.
    Holiday,
}

impl std::fmt::Display for DayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayType::Weekday => write!(f, "Weekday"),
            DayType::Sunday => write!(f, "Sunday"),
            DayType::Holiday => write!(f, "Holiday"),
        }
    }
}

/// The set of holiday dates used for classification.
#[derive(Debug, Clone, Default)]
pub struct HolidayCalendar {
    dates: HashSet<NaiveDate>,
}

impl HolidayCalendar {
    /// Builds a calendar from holiday records. Labels are ignored.
    pub fn new(holidays: &[Holiday]) -> Self {
        Self {
            dates: holidays.iter().map(|h| h.date).collect(),
        }
    }

    /// Returns true if the date is a holiday.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }
}

/// Determines the day type for a given date.
///
/// Holidays take precedence over the weekday; otherwise Sunday is
/// [`DayType::Sunday`] and every other day is [`DayType::Weekday`].
///
/// # Example
///
/// ```
/// use coverage_engine::calculation::{classify_day, DayType, HolidayCalendar};
/// use coverage_engine::models::Holiday;
/// use chrono::NaiveDate;
///
/// let calendar = HolidayCalendar::new(&[Holiday {
///     date: NaiveDate::from_ymd_opt(2025, 4, 21).unwrap(),
///     label: "Lundi de Pâques".to_string(),
/// }]);
///
/// // 2025-04-21 is a Monday, but a holiday
/// let easter_monday = NaiveDate::from_ymd_opt(2025, 4, 21).unwrap();
/// assert_eq!(classify_day(easter_monday, &calendar), DayType::Holiday);
///
/// // 2025-04-20 is a Sunday
/// let sunday = NaiveDate::from_ymd_opt(2025, 4, 20).unwrap();
/// assert_eq!(classify_day(sunday, &calendar), DayType::Sunday);
///
/// // 2025-04-19 is a Saturday
/// let saturday = NaiveDate::from_ymd_opt(2025, 4, 19).unwrap();
/// assert_eq!(classify_day(saturday, &calendar), DayType::Weekday);
/// ```
pub fn classify_day(date: NaiveDate, calendar: &HolidayCalendar) -> DayType {
    if calendar.contains(date) {
        return DayType::Holiday;
    }
    match date.weekday() {
        Weekday::Sun => DayType::Sunday,
        _ => DayType::Weekday,
    }
}

/// Returns the schedule template key consulted for a classified date.
///
/// Holidays and Sundays use their override keys; other days use the
/// weekday name.
pub fn lookup_key(date: NaiveDate, day_type: DayType) -> DayKey {
    match day_type {
        DayType::Holiday => DayKey::Holiday,
        DayType::Sunday => DayKey::Sunday,
        DayType::Weekday => DayKey::from_weekday(date.weekday()),
    }
}
