//! Schedule template model and related types.
//!
//! This module defines the [`ScheduleTemplate`] row stored per post and day
//! key, the [`DayKey`] used to look rows up, and the [`WorkInterval`] a row
//! resolves to once its wall-clock times are parsed.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Number of minutes in a calendar day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// The key a schedule template is stored under.
///
/// Ordinary days are looked up by their weekday name. Sundays always use
/// [`DayKey::Sunday`], which doubles as the Sunday override row, and public
/// holidays use [`DayKey::Holiday`] whatever their weekday.
///
/// # Example
///
/// ```
/// use coverage_engine::models::DayKey;
///
/// let key: DayKey = "holiday".parse().unwrap();
/// assert_eq!(key, DayKey::Holiday);
/// assert_eq!(DayKey::Wednesday.to_string(), "wednesday");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayKey {
    /// Monday template.
    Monday,
    /// Tuesday template.
    Tuesday,
    /// Wednesday template.
    Wednesday,
    /// Thursday template.
    Thursday,
    /// Friday template.
    Friday,
    /// Saturday template.
    Saturday,
    /// Sunday template, used for every non-holiday Sunday.
    Sunday,
    /// Public holiday template, used whatever the weekday.
    Holiday,
}

impl DayKey {
    /// All keys in editor order (Monday first, holiday last).
    pub const ALL: [DayKey; 8] = [
        DayKey::Monday,
        DayKey::Tuesday,
        DayKey::Wednesday,
        DayKey::Thursday,
        DayKey::Friday,
        DayKey::Saturday,
        DayKey::Sunday,
        DayKey::Holiday,
    ];

    /// Returns the key for an ordinary (non-holiday) day of the given weekday.
    pub fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayKey::Monday,
            Weekday::Tue => DayKey::Tuesday,
            Weekday::Wed => DayKey::Wednesday,
            Weekday::Thu => DayKey::Thursday,
            Weekday::Fri => DayKey::Friday,
            Weekday::Sat => DayKey::Saturday,
            Weekday::Sun => DayKey::Sunday,
        }
    }

    /// Returns the lower-case name the key is stored under.
    pub fn as_str(&self) -> &'static str {
        match self {
            DayKey::Monday => "monday",
            DayKey::Tuesday => "tuesday",
            DayKey::Wednesday => "wednesday",
            DayKey::Thursday => "thursday",
            DayKey::Friday => "friday",
            DayKey::Saturday => "saturday",
            DayKey::Sunday => "sunday",
            DayKey::Holiday => "holiday",
        }
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DayKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("unknown day key '{}'", s))
    }
}

/// A nominal work interval within one day, in minutes since midnight.
///
/// When `end_minute` is not strictly after `start_minute` the interval
/// crosses midnight and continues on the following calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkInterval {
    /// Start of the interval, 0..=1440.
    pub start_minute: u32,
    /// End of the interval, 0..=1440.
    pub end_minute: u32,
}

impl WorkInterval {
    /// Returns true if the interval runs past midnight into the next day.
    pub fn crosses_midnight(&self) -> bool {
        self.end_minute <= self.start_minute
    }
}

/// One schedule template row for a post and day key.
///
/// A closed row, or a row missing either time, provides no coverage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleTemplate {
    /// The post this row belongs to.
    pub post_id: i64,
    /// The day key the row is stored under.
    #[serde(alias = "day_of_week")]
    pub day_key: DayKey,
    /// Nominal start time, "HH:MM".
    #[serde(default)]
    pub start_time: Option<String>,
    /// Nominal end time, "HH:MM".
    #[serde(default)]
    pub end_time: Option<String>,
    /// Whether the post is closed on this day key.
    #[serde(default)]
    pub is_closed: bool,
}

impl ScheduleTemplate {
    /// The row shown for a key a post has no stored row for: 08:00–16:00,
    /// closed on Saturday, Sunday and holidays.
    ///
    /// # Examples
    ///
    /// ```
    /// use coverage_engine::models::{DayKey, ScheduleTemplate};
    ///
    /// assert!(!ScheduleTemplate::default_for(4, DayKey::Friday).is_closed);
    /// assert!(ScheduleTemplate::default_for(4, DayKey::Holiday).is_closed);
    /// ```
    pub fn default_for(post_id: i64, day_key: DayKey) -> Self {
        Self {
            post_id,
            day_key,
            start_time: Some("08:00".to_string()),
            end_time: Some("16:00".to_string()),
            is_closed: matches!(
                day_key,
                DayKey::Saturday | DayKey::Sunday | DayKey::Holiday
            ),
        }
    }

    /// Resolves the row to its work interval.
    ///
    /// Returns `Ok(None)` for a closed row or when either time is missing,
    /// and an [`EngineError::InvalidTime`] when a present time is malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use coverage_engine::models::{DayKey, ScheduleTemplate};
    ///
    /// let row = ScheduleTemplate {
    ///     post_id: 1,
    ///     day_key: DayKey::Monday,
    ///     start_time: Some("22:00".to_string()),
    ///     end_time: Some("06:00".to_string()),
    ///     is_closed: false,
    /// };
    /// let interval = row.work_interval().unwrap().unwrap();
    /// assert_eq!(interval.start_minute, 1320);
    /// assert_eq!(interval.end_minute, 360);
    /// assert!(interval.crosses_midnight());
    /// ```
    pub fn work_interval(&self) -> EngineResult<Option<WorkInterval>> {
        if self.is_closed {
            return Ok(None);
        }
        let (Some(start), Some(end)) = (self.start_time.as_deref(), self.end_time.as_deref())
        else {
            return Ok(None);
        };
        Ok(Some(WorkInterval {
            start_minute: parse_time_of_day(start)?,
            end_minute: parse_time_of_day(end)?,
        }))
    }
}

/// Parses a wall-clock time into minutes since midnight.
///
/// Accepts `HH:MM` and `HH:MM:SS` (seconds are dropped). `24:00` is accepted
/// as the end of the day.
///
/// # Examples
///
/// ```
/// use coverage_engine::models::parse_time_of_day;
///
/// assert_eq!(parse_time_of_day("08:30").unwrap(), 510);
/// assert_eq!(parse_time_of_day("21:00:00").unwrap(), 1260);
/// assert_eq!(parse_time_of_day("24:00").unwrap(), 1440);
/// assert!(parse_time_of_day("8h30").is_err());
/// ```
pub fn parse_time_of_day(value: &str) -> EngineResult<u32> {
    let invalid = |message: &str| EngineError::InvalidTime {
        value: value.to_string(),
        message: message.to_string(),
    };

    let mut parts = value.trim().split(':');
    let hours = parts.next().ok_or_else(|| invalid("expected HH:MM"))?;
    let minutes = parts.next().ok_or_else(|| invalid("expected HH:MM"))?;
    let seconds = parts.next();
    if parts.next().is_some() {
        return Err(invalid("expected HH:MM"));
    }

    let hours: u32 = hours.parse().map_err(|_| invalid("hour is not a number"))?;
    let minutes: u32 = minutes
        .parse()
        .map_err(|_| invalid("minute is not a number"))?;
    let seconds: u32 = match seconds {
        Some(s) => s.parse().map_err(|_| invalid("second is not a number"))?,
        None => 0,
    };

    if minutes > 59 || seconds > 59 {
        return Err(invalid("minute or second out of range"));
    }
    match hours {
        0..=23 => Ok(hours * 60 + minutes),
        24 if minutes == 0 && seconds == 0 => Ok(MINUTES_PER_DAY),
        _ => Err(invalid("hour out of range")),
    }
}
