//! Reporting period and holiday models.
//!
//! This module contains the [`Period`] and [`Holiday`] types that define the
//! calendar context of a coverage computation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A public holiday.
///
/// The label is informational only; classification uses the date.
///
/// # Example
///
/// ```
/// use coverage_engine::models::Holiday;
/// use chrono::NaiveDate;
///
/// let holiday = Holiday {
///     date: NaiveDate::from_ymd_opt(2025, 7, 14).unwrap(),
///     label: "Fête nationale".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The name of the holiday (e.g., "Noël").
    #[serde(default)]
    pub label: String,
}

/// An inclusive date range over which coverage is computed.
///
/// # Example
///
/// ```
/// use coverage_engine::models::Period;
/// use chrono::NaiveDate;
///
/// let period = Period::new(
///     NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 1, 7).unwrap(),
/// )
/// .unwrap();
///
/// assert_eq!(period.days(), 7);
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2025, 1, 7).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// The first day of the period (inclusive).
    pub start_date: NaiveDate,
    /// The last day of the period (inclusive).
    pub end_date: NaiveDate,
}

impl Period {
    /// Creates a period, rejecting an end date before the start date.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRange`] when `end_date < start_date`.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> EngineResult<Self> {
        if end_date < start_date {
            return Err(EngineError::InvalidRange {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// Number of calendar days in the period, counting both endpoints.
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Checks if a given date falls within this period (inclusive).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Iterates every date of the period in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start_date
            .iter_days()
            .take_while(move |date| *date <= self.end_date)
    }
}
