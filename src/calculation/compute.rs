//! Period iteration and aggregation.
//!
//! This is the engine entry point: it walks every date of the period for
//! each post, accumulates the staffed minutes of the applicable template,
//! and derives hour buckets, FTE metrics and grand totals.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineSettings;
use crate::error::EngineResult;
use crate::models::{ComputeResult, Holiday, HourBuckets, Period, Post, PostResult, ScheduleTemplate};

use super::day_detection::{HolidayCalendar, classify_day, lookup_key};
use super::fte::calculate_fte;
use super::interval_split::{DayBands, split_interval};
use super::overnight_shift::segment_interval;
use super::tally::CoverageTally;
use super::template_resolver::TemplateIndex;

/// Everything the engine reads for one device.
///
/// Templates belonging to posts outside `posts` are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputeInput {
    /// Posts to report on, in output order.
    pub posts: Vec<Post>,
    /// Schedule template rows.
    #[serde(default)]
    pub templates: Vec<ScheduleTemplate>,
    /// Holiday calendar.
    #[serde(default)]
    pub holidays: Vec<Holiday>,
}

impl ComputeInput {
    /// Runs [`compute_with_settings`] over this input.
    pub fn compute(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        settings: &EngineSettings,
    ) -> EngineResult<ComputeResult> {
        compute_with_settings(
            &self.posts,
            &self.templates,
            &self.holidays,
            start_date,
            end_date,
            settings,
        )
    }
}

/// Computes staffed hours and FTE per post with the default settings
/// (06:00–21:00 day band, 1645 hours per FTE).
///
/// # Errors
///
/// Returns [`crate::error::EngineError::InvalidRange`] when `end_date` is
/// before `start_date`.
///
/// # Example
///
/// ```
/// use coverage_engine::calculation::compute;
/// use coverage_engine::models::{DayKey, Post, ScheduleTemplate};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let posts = vec![Post { id: 1, device_id: 1, name: "Accueil".to_string() }];
/// let templates: Vec<ScheduleTemplate> = [
///     DayKey::Monday,
///     DayKey::Tuesday,
///     DayKey::Wednesday,
///     DayKey::Thursday,
///     DayKey::Friday,
/// ]
/// .into_iter()
/// .map(|day_key| ScheduleTemplate {
///     post_id: 1,
///     day_key,
///     start_time: Some("08:00".to_string()),
///     end_time: Some("16:00".to_string()),
///     is_closed: false,
/// })
/// .collect();
///
/// // Monday 2025-01-06 to Sunday 2025-01-12
/// let result = compute(
///     &posts,
///     &templates,
///     &[],
///     NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 1, 12).unwrap(),
/// )
/// .unwrap();
///
/// assert_eq!(result.period_days, 7);
/// assert_eq!(result.posts[0].hours.day_weekday, Decimal::from(40));
/// assert_eq!(result.totals.total, Decimal::from(40));
/// ```
pub fn compute(
    posts: &[Post],
    templates: &[ScheduleTemplate],
    holidays: &[Holiday],
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> EngineResult<ComputeResult> {
    compute_with_settings(
        posts,
        templates,
        holidays,
        start_date,
        end_date,
        &EngineSettings::default(),
    )
}

/// Computes staffed hours and FTE per post.
///
/// For every post, in input order, and every date of the inclusive period:
/// 1. Classify the date (holiday, Sunday, weekday)
/// 2. Look up the post's template for the matching key
/// 3. Split the template interval at midnight, classifying each part
///    against its own date
/// 4. Split each part into day and night minutes and accumulate them
///
/// The post's buckets then yield its FTE metrics and are added into the
/// grand totals, which are rounded to two decimals after each post.
pub fn compute_with_settings(
    posts: &[Post],
    templates: &[ScheduleTemplate],
    holidays: &[Holiday],
    start_date: NaiveDate,
    end_date: NaiveDate,
    settings: &EngineSettings,
) -> EngineResult<ComputeResult> {
    let period = Period::new(start_date, end_date)?;
    let period_days = period.days();
    let calendar = HolidayCalendar::new(holidays);
    let index = TemplateIndex::new(templates);

    let mut totals = HourBuckets::default();
    let mut results = Vec::with_capacity(posts.len());

    for post in posts {
        let tally = tally_post(post.id, &period, &index, &calendar, &settings.day_bands);
        let hours = tally.to_hours();
        let fte = calculate_fte(hours.total, period_days, settings.annual_fte_hours);

        debug!(
            post_id = post.id,
            post_name = %post.name,
            total_hours = %hours.total,
            period_fte = %fte.period_fte,
            "Post coverage computed"
        );

        totals.accumulate_rounded(&hours);
        results.push(PostResult {
            post_id: post.id,
            post_name: post.name.clone(),
            hours,
            fte,
        });
    }

    Ok(ComputeResult {
        period_days,
        posts: results,
        totals,
    })
}

/// Accumulates one post's staffed minutes over the period.
///
/// The part of a midnight-crossing template that spills past the last day
/// of the period is still counted, against the following date's day type.
pub fn tally_post(
    post_id: i64,
    period: &Period,
    index: &TemplateIndex<'_>,
    calendar: &HolidayCalendar,
    bands: &DayBands,
) -> CoverageTally {
    let mut tally = CoverageTally::default();

    for date in period.dates() {
        let day_type = classify_day(date, calendar);
        let Some(interval) = index.resolve(post_id, lookup_key(date, day_type)) else {
            continue;
        };

        for segment in segment_interval(date, interval) {
            let segment_type = if segment.date == date {
                day_type
            } else {
                classify_day(segment.date, calendar)
            };
            tally.add(
                segment_type,
                split_interval(segment.start_minute, segment.end_minute, bands),
            );
        }
    }

    tally
}
