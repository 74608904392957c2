//! Per-post minute accumulator.

use rust_decimal::Decimal;

use crate::models::HourBuckets;

use super::day_detection::DayType;
use super::interval_split::BandSplit;

const MINUTES_PER_HOUR: i64 = 60;

/// Staffed minutes per bucket for one post.
///
/// Minutes are summed as integers and converted to hours once, so hour
/// totals carry no accumulated division error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoverageTally {
    day_weekday: u64,
    night_weekday: u64,
    day_sunday: u64,
    night_sunday: u64,
    day_holiday: u64,
    night_holiday: u64,
}

impl CoverageTally {
    /// Adds a day/night split into the bucket family of `day_type`.
    pub fn add(&mut self, day_type: DayType, split: BandSplit) {
        let (day, night) = match day_type {
            DayType::Weekday => (&mut self.day_weekday, &mut self.night_weekday),
            DayType::Sunday => (&mut self.day_sunday, &mut self.night_sunday),
            DayType::Holiday => (&mut self.day_holiday, &mut self.night_holiday),
        };
        *day += u64::from(split.day_minutes);
        *night += u64::from(split.night_minutes);
    }

    /// Total staffed minutes across all buckets.
    pub fn total_minutes(&self) -> u64 {
        self.day_weekday
            + self.night_weekday
            + self.day_sunday
            + self.night_sunday
            + self.day_holiday
            + self.night_holiday
    }

    /// Converts the tally to hours. `total` is the sum of the six fields.
    pub fn to_hours(&self) -> HourBuckets {
        let mut buckets = HourBuckets {
            day_weekday: to_hours(self.day_weekday),
            night_weekday: to_hours(self.night_weekday),
            day_sunday: to_hours(self.day_sunday),
            night_sunday: to_hours(self.night_sunday),
            day_holiday: to_hours(self.day_holiday),
            night_holiday: to_hours(self.night_holiday),
            total: Decimal::ZERO,
        };
        buckets.refresh_total();
        buckets
    }
}

fn to_hours(minutes: u64) -> Decimal {
    Decimal::from(minutes) / Decimal::from(MINUTES_PER_HOUR)
}
