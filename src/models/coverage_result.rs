//! Coverage result models.
//!
//! This module contains the [`ComputeResult`] type and its associated
//! structures: the six-way [`HourBuckets`] breakdown, the [`Fte`] metrics
//! and the per-post [`PostResult`].

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Decimal places kept on the running grand total.
pub const TOTALS_DECIMAL_PLACES: u32 = 2;

/// Staffed hours split by day/night and weekday/Sunday/holiday.
///
/// `total` is always the sum of the six category fields for a single post.
/// On the grand total it is the cumulatively rounded sum of the per-post
/// totals instead, see [`HourBuckets::accumulate_rounded`].
///
/// # Example
///
/// ```
/// use coverage_engine::models::HourBuckets;
/// use rust_decimal::Decimal;
///
/// let mut buckets = HourBuckets::default();
/// buckets.day_weekday = Decimal::from(40);
/// buckets.night_sunday = Decimal::from(6);
/// buckets.refresh_total();
/// assert_eq!(buckets.total, Decimal::from(46));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourBuckets {
    /// Hours between 06:00 and 21:00 on ordinary days.
    pub day_weekday: Decimal,
    /// Hours before 06:00 or after 21:00 on ordinary days.
    pub night_weekday: Decimal,
    /// Day hours on Sundays.
    pub day_sunday: Decimal,
    /// Night hours on Sundays.
    pub night_sunday: Decimal,
    /// Day hours on public holidays.
    pub day_holiday: Decimal,
    /// Night hours on public holidays.
    pub night_holiday: Decimal,
    /// Sum of all hours.
    pub total: Decimal,
}

impl HourBuckets {
    /// The six category values in display order, without the total.
    pub fn categories(&self) -> [Decimal; 6] {
        [
            self.day_weekday,
            self.night_weekday,
            self.day_sunday,
            self.night_sunday,
            self.day_holiday,
            self.night_holiday,
        ]
    }

    /// Recomputes `total` as the sum of the six categories.
    pub fn refresh_total(&mut self) {
        self.total = self.categories().into_iter().sum();
    }

    /// Adds another set of buckets field by field, rounding every field of
    /// `self` to two decimals after the addition.
    ///
    /// Rounding happens on each call, so a grand total built from several
    /// posts is the cumulatively rounded sum rather than a single rounding
    /// of the exact sum.
    ///
    /// # Example
    ///
    /// ```
    /// use coverage_engine::models::HourBuckets;
    /// use rust_decimal::Decimal;
    /// use std::str::FromStr;
    ///
    /// let mut totals = HourBuckets::default();
    /// let mut post = HourBuckets::default();
    /// post.day_weekday = Decimal::from_str("0.333333").unwrap();
    /// post.refresh_total();
    ///
    /// totals.accumulate_rounded(&post);
    /// totals.accumulate_rounded(&post);
    /// assert_eq!(totals.day_weekday, Decimal::from_str("0.66").unwrap());
    /// ```
    pub fn accumulate_rounded(&mut self, other: &HourBuckets) {
        let add = |acc: &mut Decimal, value: Decimal| {
            *acc = (*acc + value).round_dp_with_strategy(
                TOTALS_DECIMAL_PLACES,
                RoundingStrategy::MidpointAwayFromZero,
            );
        };
        add(&mut self.day_weekday, other.day_weekday);
        add(&mut self.night_weekday, other.night_weekday);
        add(&mut self.day_sunday, other.day_sunday);
        add(&mut self.night_sunday, other.night_sunday);
        add(&mut self.day_holiday, other.day_holiday);
        add(&mut self.night_holiday, other.night_holiday);
        add(&mut self.total, other.total);
    }
}

/// Full-time-equivalent metrics for one post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fte {
    /// Share of a full-time post covered during exactly this period.
    pub period_fte: Decimal,
    /// Coverage extrapolated to a full year.
    pub annualized_fte: Decimal,
}

/// Coverage of a single post over the period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResult {
    /// The post identifier.
    pub post_id: i64,
    /// The post display name.
    pub post_name: String,
    /// Staffed hours by category.
    pub hours: HourBuckets,
    /// FTE metrics derived from `hours.total`.
    pub fte: Fte,
}

/// The complete output of a coverage computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputeResult {
    /// Number of days in the period, both endpoints included.
    pub period_days: i64,
    /// Per-post results, in the order the posts were supplied.
    pub posts: Vec<PostResult>,
    /// Grand totals over all posts.
    pub totals: HourBuckets,
}
