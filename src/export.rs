//! CSV export of coverage results.
//!
//! The layout is the one spreadsheet users expect: a period line, a blank
//! line, a header, one row per post and a `TOTAL` row, separated by `;`.
//! Numbers are written in their shortest form (`40`, `1.33`) and the last
//! row has no line terminator.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};
use crate::models::{ComputeResult, HourBuckets, TOTALS_DECIMAL_PLACES};

/// Column headers of the export.
pub const CSV_HEADER: [&str; 10] = [
    "Poste",
    "Jour Sem.",
    "Nuit Sem.",
    "Jour Dim.",
    "Nuit Dim.",
    "Jour Fér.",
    "Nuit Fér.",
    "Total",
    "ETP période",
    "ETP annualisé",
];

/// Suggested download file name for a period.
///
/// # Example
///
/// ```
/// use coverage_engine::export::export_file_name;
/// use chrono::NaiveDate;
///
/// let name = export_file_name(
///     NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
/// );
/// assert_eq!(name, "heures_2025-01-01_2025-01-31.csv");
/// ```
pub fn export_file_name(start_date: NaiveDate, end_date: NaiveDate) -> String {
    format!("heures_{}_{}.csv", start_date, end_date)
}

/// Renders a result as `;`-separated CSV.
///
/// Hours are rounded to two decimals and FTE metrics written as computed,
/// both without trailing zeros. The `TOTAL` row leaves both FTE cells empty.
pub fn export_csv(
    result: &ComputeResult,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> EngineResult<String> {
    let preamble = format!("Période;{};au;{}\n\n", start_date, end_date);

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(preamble.into_bytes());

    writer.write_record(CSV_HEADER)?;

    for post in &result.posts {
        let mut record = vec![post.post_name.clone()];
        record.extend(hour_cells(&post.hours));
        record.push(post.fte.period_fte.normalize().to_string());
        record.push(post.fte.annualized_fte.normalize().to_string());
        writer.write_record(&record)?;
    }

    let mut total = vec!["TOTAL".to_string()];
    total.extend(hour_cells(&result.totals));
    total.push(String::new());
    total.push(String::new());
    writer.write_record(&total)?;

    let bytes = writer.into_inner().map_err(|e| EngineError::ExportError {
        message: e.to_string(),
    })?;
    let mut csv = String::from_utf8(bytes).map_err(|e| EngineError::ExportError {
        message: e.to_string(),
    })?;
    if csv.ends_with('\n') {
        csv.pop();
    }
    Ok(csv)
}

fn hour_cells(hours: &HourBuckets) -> impl Iterator<Item = String> {
    hours
        .categories()
        .into_iter()
        .chain(std::iter::once(hours.total))
        .map(format_hours)
}

fn format_hours(value: Decimal) -> String {
    value
        .round_dp_with_strategy(TOTALS_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Fte, PostResult};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn sample_result() -> ComputeResult {
        let mut hours = HourBuckets {
            day_weekday: dec("40"),
            night_sunday: dec("1.3333333"),
            ..HourBuckets::default()
        };
        hours.refresh_total();
        let mut totals = HourBuckets::default();
        totals.accumulate_rounded(&hours);

        ComputeResult {
            period_days: 7,
            posts: vec![PostResult {
                post_id: 1,
                post_name: "Accueil".to_string(),
                hours,
                fte: Fte {
                    period_fte: dec("1.310"),
                    annualized_fte: dec("1.310"),
                },
            }],
            totals,
        }
    }

    #[test]
    fn test_export_layout() {
        let csv = export_csv(&sample_result(), make_date(2025, 1, 6), make_date(2025, 1, 12))
            .unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "Période;2025-01-06;au;2025-01-12");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], CSV_HEADER.join(";"));
        assert_eq!(
            lines[3],
            "Accueil;40;0;0;1.33;0;0;41.33;1.31;1.31"
        );
        assert_eq!(lines[4], "TOTAL;40;0;0;1.33;0;0;41.33;;");
        assert_eq!(lines.len(), 5);
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn test_export_without_posts_has_zero_total_row() {
        let result = ComputeResult {
            period_days: 1,
            posts: Vec::new(),
            totals: HourBuckets::default(),
        };
        let csv = export_csv(&result, make_date(2025, 3, 1), make_date(2025, 3, 1)).unwrap();
        assert!(csv.ends_with("\nTOTAL;0;0;0;0;0;0;0;;"));
    }

    #[test]
    fn test_export_quotes_names_containing_delimiter() {
        let mut result = sample_result();
        result.posts[0].post_name = "Accueil; hall".to_string();
        let csv = export_csv(&result, make_date(2025, 1, 6), make_date(2025, 1, 12)).unwrap();
        assert!(csv.contains("\"Accueil; hall\";40;"));
    }

    #[test]
    fn test_hours_keep_significant_decimals_only() {
        assert_eq!(format_hours(dec("7.5")), "7.5");
        assert_eq!(format_hours(dec("0.005")), "0.01");
        assert_eq!(format_hours(dec("12.999")), "13");
        assert_eq!(format_hours(Decimal::ZERO), "0");
    }
}
