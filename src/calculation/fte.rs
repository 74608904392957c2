//! Full-time-equivalent calculation.
//!
//! A full-time post is worth [`ANNUAL_FTE_HOURS`] staffed hours per year.
//! Two metrics are derived from a post's total hours over a period: the
//! share of a full-time post covered during that period, and the same
//! rhythm extrapolated to a whole year.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::Fte;

/// Nominal staffed hours of one full-time post per year.
pub const ANNUAL_FTE_HOURS: i64 = 1645;

/// Days per year used for period scaling.
pub const DAYS_PER_YEAR: i64 = 365;

/// Decimal places kept on FTE metrics.
pub const FTE_DECIMAL_PLACES: u32 = 3;

/// Hours a full-time post would be staffed over `period_days` days.
///
/// # Example
///
/// ```
/// use coverage_engine::calculation::period_full_hours;
/// use rust_decimal::Decimal;
///
/// assert_eq!(period_full_hours(365, Decimal::from(1645)), Decimal::from(1645));
/// ```
pub fn period_full_hours(period_days: i64, annual_fte_hours: Decimal) -> Decimal {
    (Decimal::from(period_days) / Decimal::from(DAYS_PER_YEAR)) * annual_fte_hours
}

/// Calculates both FTE metrics for a post's total hours.
///
/// - `period_fte = total / ((period_days / 365) × annual_fte_hours)`
/// - `annualized_fte = (total / period_days) × 365 / annual_fte_hours`
///
/// Both are rounded to three decimals, half away from zero. A non-positive
/// period length or annual hour count yields zero rather than a division
/// error.
///
/// # Example
///
/// ```
/// use coverage_engine::calculation::calculate_fte;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// // 40 hours over one week
/// let fte = calculate_fte(Decimal::from(40), 7, Decimal::from(1645));
/// assert_eq!(fte.period_fte, Decimal::from_str("1.268").unwrap());
/// assert_eq!(fte.annualized_fte, Decimal::from_str("1.268").unwrap());
/// ```
pub fn calculate_fte(total_hours: Decimal, period_days: i64, annual_fte_hours: Decimal) -> Fte {
    if period_days <= 0 || annual_fte_hours <= Decimal::ZERO {
        return Fte::default();
    }

    let period_full = period_full_hours(period_days, annual_fte_hours);
    let period_fte = total_hours
        .checked_div(period_full)
        .unwrap_or_default();
    let annualized_fte = (total_hours / Decimal::from(period_days)) * Decimal::from(DAYS_PER_YEAR)
        / annual_fte_hours;

    Fte {
        period_fte: round_fte(period_fte),
        annualized_fte: round_fte(annualized_fte),
    }
}

fn round_fte(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(FTE_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}
