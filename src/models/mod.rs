//! Core data models for the coverage engine.
//!
//! This module contains all the domain models used throughout the engine.

mod coverage_result;
mod period;
mod post;
mod schedule;

pub use coverage_result::{ComputeResult, Fte, HourBuckets, PostResult, TOTALS_DECIMAL_PLACES};
pub use period::{Holiday, Period};
pub use post::{Device, Post};
pub use schedule::{DayKey, MINUTES_PER_DAY, ScheduleTemplate, WorkInterval, parse_time_of_day};
