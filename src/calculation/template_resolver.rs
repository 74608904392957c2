//! Schedule template lookup.
//!
//! Indexes template rows by post and day key and resolves them to work
//! intervals.

use std::collections::HashMap;

use tracing::warn;

use crate::models::{DayKey, ScheduleTemplate, WorkInterval};

/// Template rows indexed by `(post_id, day_key)`.
///
/// When several rows share a key, the row appearing last in the input
/// wins, mirroring an upsert that overwrites on conflict.
///
/// # Example
///
/// ```
/// use coverage_engine::calculation::TemplateIndex;
/// use coverage_engine::models::{DayKey, ScheduleTemplate};
///
/// let rows = vec![ScheduleTemplate {
///     post_id: 1,
///     day_key: DayKey::Monday,
///     start_time: Some("08:00".to_string()),
///     end_time: Some("16:00".to_string()),
///     is_closed: false,
/// }];
/// let index = TemplateIndex::new(&rows);
///
/// let interval = index.resolve(1, DayKey::Monday).unwrap();
/// assert_eq!((interval.start_minute, interval.end_minute), (480, 960));
/// assert!(index.resolve(1, DayKey::Tuesday).is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TemplateIndex<'a> {
    rows: HashMap<(i64, DayKey), &'a ScheduleTemplate>,
}

impl<'a> TemplateIndex<'a> {
    /// Builds the index. Later rows overwrite earlier ones with the same key.
    pub fn new(templates: &'a [ScheduleTemplate]) -> Self {
        let mut rows = HashMap::with_capacity(templates.len());
        for template in templates {
            rows.insert((template.post_id, template.day_key), template);
        }
        Self { rows }
    }

    /// Returns the stored row for a post and key, if any.
    pub fn get(&self, post_id: i64, key: DayKey) -> Option<&'a ScheduleTemplate> {
        self.rows.get(&(post_id, key)).copied()
    }

    /// Resolves the work interval for a post and key.
    ///
    /// Returns `None` ("no coverage") when no row exists, the row is closed,
    /// either time is missing, or a time cannot be parsed.
    pub fn resolve(&self, post_id: i64, key: DayKey) -> Option<WorkInterval> {
        let template = self.get(post_id, key)?;
        match template.work_interval() {
            Ok(interval) => interval,
            Err(err) => {
                warn!(
                    post_id,
                    day_key = %key,
                    error = %err,
                    "Ignoring template with unparsable time"
                );
                None
            }
        }
    }

    /// Number of distinct `(post, key)` rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if no rows are indexed.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(post_id: i64, key: DayKey, start: &str, end: &str, is_closed: bool) -> ScheduleTemplate {
        ScheduleTemplate {
            post_id,
            day_key: key,
            start_time: Some(start.to_string()),
            end_time: Some(end.to_string()),
            is_closed,
        }
    }

    #[test]
    fn test_resolve_open_row() {
        let rows = vec![row(1, DayKey::Friday, "22:00", "06:00", false)];
        let index = TemplateIndex::new(&rows);
        assert_eq!(
            index.resolve(1, DayKey::Friday),
            Some(WorkInterval {
                start_minute: 1320,
                end_minute: 360,
            })
        );
    }

    #[test]
    fn test_resolve_closed_row_is_none() {
        let rows = vec![row(1, DayKey::Sunday, "08:00", "16:00", true)];
        let index = TemplateIndex::new(&rows);
        assert!(index.get(1, DayKey::Sunday).is_some());
        assert_eq!(index.resolve(1, DayKey::Sunday), None);
    }

    #[test]
    fn test_resolve_missing_time_is_none() {
        let rows = vec![ScheduleTemplate {
            post_id: 1,
            day_key: DayKey::Monday,
            start_time: Some("08:00".to_string()),
            end_time: None,
            is_closed: false,
        }];
        let index = TemplateIndex::new(&rows);
        assert_eq!(index.resolve(1, DayKey::Monday), None);
    }

    #[test]
    fn test_resolve_malformed_time_is_none() {
        let rows = vec![row(1, DayKey::Monday, "8h", "16:00", false)];
        let index = TemplateIndex::new(&rows);
        assert_eq!(index.resolve(1, DayKey::Monday), None);
    }

    #[test]
    fn test_resolve_is_scoped_to_post() {
        let rows = vec![row(1, DayKey::Monday, "08:00", "16:00", false)];
        let index = TemplateIndex::new(&rows);
        assert_eq!(index.resolve(2, DayKey::Monday), None);
    }

    #[test]
    fn test_duplicate_rows_last_one_wins() {
        let rows = vec![
            row(1, DayKey::Monday, "08:00", "16:00", false),
            row(1, DayKey::Monday, "09:00", "12:00", false),
        ];
        let index = TemplateIndex::new(&rows);
        assert_eq!(index.len(), 1);
        assert_eq!(
            index.resolve(1, DayKey::Monday),
            Some(WorkInterval {
                start_minute: 540,
                end_minute: 720,
            })
        );
    }

    #[test]
    fn test_duplicate_rows_later_closed_row_wins() {
        let rows = vec![
            row(1, DayKey::Holiday, "08:00", "16:00", false),
            row(1, DayKey::Holiday, "08:00", "16:00", true),
        ];
        let index = TemplateIndex::new(&rows);
        assert_eq!(index.resolve(1, DayKey::Holiday), None);
    }

    #[test]
    fn test_empty_index() {
        let index = TemplateIndex::new(&[]);
        assert!(index.is_empty());
        assert_eq!(index.resolve(1, DayKey::Monday), None);
    }
}
