//! Day/night decomposition of work intervals.
//!
//! A day is cut into three fixed bands: night before dawn, day, and night
//! after dusk. This module measures how much of a single-day interval falls
//! into the day band and how much into the two night bands.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::MINUTES_PER_DAY;

/// Start of the day band: 06:00.
pub const DAWN_MINUTES: u32 = 6 * 60;

/// End of the day band: 21:00.
pub const DUSK_MINUTES: u32 = 21 * 60;

/// Boundaries of the day band, in minutes since midnight.
///
/// Night covers `[0, dawn)` and `[dusk, 1440)`; day covers `[dawn, dusk)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBands {
    /// First minute of the day band.
    pub dawn_minute: u32,
    /// First minute after the day band.
    pub dusk_minute: u32,
}

impl Default for DayBands {
    fn default() -> Self {
        Self {
            dawn_minute: DAWN_MINUTES,
            dusk_minute: DUSK_MINUTES,
        }
    }
}

impl DayBands {
    /// Creates bands, requiring `0 <= dawn <= dusk <= 1440`.
    pub fn new(dawn_minute: u32, dusk_minute: u32) -> EngineResult<Self> {
        if dawn_minute > dusk_minute || dusk_minute > MINUTES_PER_DAY {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "day band {}..{} must satisfy dawn <= dusk <= {}",
                    dawn_minute, dusk_minute, MINUTES_PER_DAY
                ),
            });
        }
        Ok(Self {
            dawn_minute,
            dusk_minute,
        })
    }
}

/// Minutes of an interval falling into day and night bands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandSplit {
    /// Minutes inside the day band.
    pub day_minutes: u32,
    /// Minutes inside either night band.
    pub night_minutes: u32,
}

impl BandSplit {
    /// Total minutes across both band families.
    pub fn total_minutes(&self) -> u32 {
        self.day_minutes + self.night_minutes
    }
}

/// Splits an interval `[start, end)` within one day against the bands.
///
/// Each of the three bands is intersected with the interval; an empty or
/// inverted intersection counts as zero. An interval with `end <= start`
/// therefore yields an empty split.
///
/// # Example
///
/// ```
/// use coverage_engine::calculation::{split_interval, DayBands};
///
/// // 05:00 to 22:00
/// let split = split_interval(300, 1320, &DayBands::default());
/// assert_eq!(split.night_minutes, 60 + 60);
/// assert_eq!(split.day_minutes, 15 * 60);
/// ```
pub fn split_interval(start_minute: u32, end_minute: u32, bands: &DayBands) -> BandSplit {
    let before_dawn = overlap(start_minute, end_minute, 0, bands.dawn_minute);
    let day = overlap(start_minute, end_minute, bands.dawn_minute, bands.dusk_minute);
    let after_dusk = overlap(start_minute, end_minute, bands.dusk_minute, MINUTES_PER_DAY);

    BandSplit {
        day_minutes: day,
        night_minutes: before_dawn + after_dusk,
    }
}

fn overlap(a_start: u32, a_end: u32, b_start: u32, b_end: u32) -> u32 {
    let start = a_start.max(b_start);
    let end = a_end.min(b_end);
    end.saturating_sub(start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_interval_inside_day_band() {
        // 08:00 to 16:00
        let split = split_interval(480, 960, &DayBands::default());
        assert_eq!(split.day_minutes, 480);
        assert_eq!(split.night_minutes, 0);
    }

    #[test]
    fn test_interval_after_dusk_is_night() {
        // 22:00 to 24:00
        let split = split_interval(1320, 1440, &DayBands::default());
        assert_eq!(split.day_minutes, 0);
        assert_eq!(split.night_minutes, 120);
    }

    #[test]
    fn test_interval_before_dawn_is_night() {
        // 00:00 to 06:00
        let split = split_interval(0, 360, &DayBands::default());
        assert_eq!(split.day_minutes, 0);
        assert_eq!(split.night_minutes, 360);
    }

    #[test]
    fn test_interval_spanning_all_bands() {
        let split = split_interval(0, 1440, &DayBands::default());
        assert_eq!(split.day_minutes, 900);
        assert_eq!(split.night_minutes, 540);
    }

    #[test]
    fn test_interval_on_band_boundaries() {
        // 06:00 to 21:00 is exactly the day band
        let split = split_interval(360, 1260, &DayBands::default());
        assert_eq!(split.day_minutes, 900);
        assert_eq!(split.night_minutes, 0);
    }

    #[test]
    fn test_inverted_interval_contributes_nothing() {
        let split = split_interval(960, 480, &DayBands::default());
        assert_eq!(split, BandSplit::default());
    }

    #[test]
    fn test_zero_length_interval_contributes_nothing() {
        let split = split_interval(600, 600, &DayBands::default());
        assert_eq!(split.total_minutes(), 0);
    }

    #[test]
    fn test_custom_bands() {
        let bands = DayBands::new(7 * 60, 19 * 60).unwrap();
        // 06:00 to 20:00
        let split = split_interval(360, 1200, &bands);
        assert_eq!(split.day_minutes, 12 * 60);
        assert_eq!(split.night_minutes, 120);
    }

    #[test]
    fn test_bands_must_be_ordered() {
        assert!(DayBands::new(1260, 360).is_err());
        assert!(DayBands::new(360, 1500).is_err());
        assert!(DayBands::new(0, 1440).is_ok());
    }

    proptest! {
        #[test]
        fn prop_bands_sum_to_interval_length(a in 0u32..=1440, b in 0u32..=1440) {
            let (start, end) = if a <= b { (a, b) } else { (b, a) };
            let split = split_interval(start, end, &DayBands::default());
            prop_assert_eq!(split.total_minutes(), end - start);
        }

        #[test]
        fn prop_bands_sum_with_any_valid_bands(
            a in 0u32..=1440,
            b in 0u32..=1440,
            dawn in 0u32..=1440,
            dusk in 0u32..=1440,
        ) {
            let (start, end) = if a <= b { (a, b) } else { (b, a) };
            let bands = DayBands::new(dawn.min(dusk), dawn.max(dusk)).unwrap();
            let split = split_interval(start, end, &bands);
            prop_assert_eq!(split.total_minutes(), end - start);
        }
    }
}
