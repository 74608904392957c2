//! Request types for the coverage engine API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::ComputeInput;
use crate::models::{Holiday, Post, ScheduleTemplate};

/// Request body for `POST /compute`.
///
/// Carries every record the engine reads, so the computation does not
/// touch the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputeRequest {
    /// Posts to report on, in output order.
    pub posts: Vec<Post>,
    /// Schedule template rows.
    #[serde(default)]
    pub templates: Vec<ScheduleTemplate>,
    /// Holiday calendar.
    #[serde(default)]
    pub holidays: Vec<Holiday>,
    /// First day of the period (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the period (inclusive).
    pub end_date: NaiveDate,
}

impl ComputeRequest {
    /// Splits the request into engine input and period bounds.
    pub fn into_parts(self) -> (ComputeInput, NaiveDate, NaiveDate) {
        let input = ComputeInput {
            posts: self.posts,
            templates: self.templates,
            holidays: self.holidays,
        };
        (input, self.start_date, self.end_date)
    }
}

/// Query string of the results and export endpoints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RangeQuery {
    /// First day of the period (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the period (inclusive).
    pub end_date: NaiveDate,
}

/// Request body for creating a device or a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameRequest {
    /// Display name of the new record.
    pub name: String,
}
