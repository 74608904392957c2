//! Calculation logic for the coverage engine.
//!
//! This module contains the day classifier, the schedule template resolver,
//! the day/night interval splitter, midnight-crossing segmentation, FTE
//! derivation, and the period aggregator tying them together.

mod compute;
mod day_detection;
mod fte;
mod interval_split;
mod overnight_shift;
mod tally;
mod template_resolver;

pub use compute::{ComputeInput, compute, compute_with_settings, tally_post};
pub use day_detection::{DayType, HolidayCalendar, classify_day, lookup_key};
pub use fte::{
    ANNUAL_FTE_HOURS, DAYS_PER_YEAR, FTE_DECIMAL_PLACES, calculate_fte, period_full_hours,
};
pub use interval_split::{BandSplit, DAWN_MINUTES, DUSK_MINUTES, DayBands, split_interval};
pub use overnight_shift::{DaySegment, segment_interval};
pub use tally::CoverageTally;
pub use template_resolver::TemplateIndex;
