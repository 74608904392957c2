//! In-memory record store.

use std::collections::BTreeMap;

use tracing::debug;

use crate::calculation::ComputeInput;
use crate::config::{ConfigLoader, ScheduleEntry};
use crate::error::{EngineError, EngineResult};
use crate::models::{DayKey, Device, Holiday, Post, ScheduleTemplate};

/// Devices, posts, template rows and holidays kept in memory.
///
/// Identifiers are assigned sequentially, starting after the highest id
/// seen so far. Template rows are keyed by post and day key, so a post has
/// at most one row per key.
///
/// # Example
///
/// ```
/// use coverage_engine::store::MemoryStore;
///
/// let mut store = MemoryStore::default();
/// let device = store.create_device("Site Est").unwrap();
/// let post = store.create_post(device.id, "Accueil").unwrap();
/// assert_eq!(store.posts(device.id).unwrap(), vec![post]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    devices: BTreeMap<i64, Device>,
    posts: BTreeMap<i64, Post>,
    schedules: BTreeMap<(i64, DayKey), ScheduleTemplate>,
    holidays: Vec<Holiday>,
    next_device_id: i64,
    next_post_id: i64,
}

impl MemoryStore {
    /// Seeds a store from loaded configuration.
    pub fn from_config(loader: &ConfigLoader) -> Self {
        let mut store = Self::default();

        for device in loader.devices() {
            store.insert_device(device.device.clone());
            for post in &device.posts {
                store.insert_post(post.clone());
            }
            for row in &device.templates {
                store
                    .schedules
                    .insert((row.post_id, row.day_key), row.clone());
            }
        }
        store.set_holidays(loader.holidays().to_vec());

        debug!(
            devices = store.devices.len(),
            posts = store.posts.len(),
            schedules = store.schedules.len(),
            "Store seeded from configuration"
        );
        store
    }

    fn insert_device(&mut self, device: Device) {
        self.next_device_id = self.next_device_id.max(device.id);
        self.devices.insert(device.id, device);
    }

    fn insert_post(&mut self, post: Post) {
        self.next_post_id = self.next_post_id.max(post.id);
        self.posts.insert(post.id, post);
    }

    /// Returns all devices, ordered by name.
    pub fn devices(&self) -> Vec<Device> {
        let mut devices: Vec<Device> = self.devices.values().cloned().collect();
        devices.sort_by(|a, b| a.name.cmp(&b.name));
        devices
    }

    /// Gets a device by id.
    pub fn device(&self, id: i64) -> EngineResult<&Device> {
        self.devices
            .get(&id)
            .ok_or(EngineError::DeviceNotFound { id })
    }

    /// Creates a device with the next free id.
    pub fn create_device(&mut self, name: &str) -> EngineResult<Device> {
        let device = Device {
            id: next_id(self.next_device_id, "device")?,
            name: name.to_string(),
        };
        self.insert_device(device.clone());
        Ok(device)
    }

    /// Deletes a device together with its posts and their template rows.
    pub fn delete_device(&mut self, id: i64) -> EngineResult<Device> {
        let device = self
            .devices
            .remove(&id)
            .ok_or(EngineError::DeviceNotFound { id })?;

        let post_ids: Vec<i64> = self
            .posts
            .values()
            .filter(|p| p.belongs_to(id))
            .map(|p| p.id)
            .collect();
        for post_id in post_ids {
            self.remove_post(post_id);
        }
        Ok(device)
    }

    /// Returns the posts of a device, ordered by name.
    pub fn posts(&self, device_id: i64) -> EngineResult<Vec<Post>> {
        self.device(device_id)?;
        let mut posts: Vec<Post> = self
            .posts
            .values()
            .filter(|p| p.belongs_to(device_id))
            .cloned()
            .collect();
        posts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(posts)
    }

    /// Gets a post by id.
    pub fn post(&self, id: i64) -> EngineResult<&Post> {
        self.posts.get(&id).ok_or(EngineError::PostNotFound { id })
    }

    /// Creates a post on an existing device.
    pub fn create_post(&mut self, device_id: i64, name: &str) -> EngineResult<Post> {
        self.device(device_id)?;
        let post = Post {
            id: next_id(self.next_post_id, "post")?,
            device_id,
            name: name.to_string(),
        };
        self.insert_post(post.clone());
        Ok(post)
    }

    /// Deletes a post together with its template rows.
    pub fn delete_post(&mut self, id: i64) -> EngineResult<Post> {
        self.remove_post(id).ok_or(EngineError::PostNotFound { id })
    }

    fn remove_post(&mut self, id: i64) -> Option<Post> {
        let post = self.posts.remove(&id)?;
        self.schedules.retain(|(post_id, _), _| *post_id != id);
        Some(post)
    }

    /// Returns one template row per day key, Monday first and holiday last.
    ///
    /// Keys without a stored row come back as [`ScheduleTemplate::default_for`].
    /// Defaults are not stored and do not count towards coverage.
    pub fn schedules(&self, post_id: i64) -> EngineResult<Vec<ScheduleTemplate>> {
        self.post(post_id)?;
        Ok(DayKey::ALL
            .into_iter()
            .map(|day_key| {
                self.schedules
                    .get(&(post_id, day_key))
                    .cloned()
                    .unwrap_or_else(|| ScheduleTemplate::default_for(post_id, day_key))
            })
            .collect())
    }

    /// Inserts or replaces template rows of a post, one per day key.
    ///
    /// Times of open rows are validated before anything is written; a
    /// malformed time rejects the whole batch.
    pub fn upsert_schedules(
        &mut self,
        post_id: i64,
        rows: Vec<ScheduleEntry>,
    ) -> EngineResult<Vec<ScheduleTemplate>> {
        self.post(post_id)?;

        let templates: Vec<ScheduleTemplate> = rows
            .into_iter()
            .map(|row| ScheduleTemplate {
                post_id,
                day_key: row.day_key,
                start_time: row.start_time,
                end_time: row.end_time,
                is_closed: row.is_closed,
            })
            .collect();
        for template in &templates {
            template.work_interval()?;
        }

        for template in templates {
            self.schedules
                .insert((post_id, template.day_key), template);
        }
        self.schedules(post_id)
    }

    /// Returns all holidays, ordered by date.
    pub fn holidays(&self) -> &[Holiday] {
        &self.holidays
    }

    /// Replaces the holiday calendar.
    pub fn set_holidays(&mut self, mut holidays: Vec<Holiday>) {
        holidays.sort_by(|a, b| a.date.cmp(&b.date));
        holidays.dedup_by(|a, b| a.date == b.date);
        self.holidays = holidays;
    }

    /// Snapshots everything the engine needs for one device.
    ///
    /// Posts come out ordered by name, which is also the report order.
    pub fn compute_input(&self, device_id: i64) -> EngineResult<ComputeInput> {
        let posts = self.posts(device_id)?;
        let templates = self
            .schedules
            .iter()
            .filter(|((post_id, _), _)| posts.iter().any(|p| p.id == *post_id))
            .map(|(_, row)| row.clone())
            .collect();

        Ok(ComputeInput {
            posts,
            templates,
            holidays: self.holidays.clone(),
        })
    }
}

fn next_id(last: i64, kind: &str) -> EngineResult<i64> {
    last.checked_add(1).ok_or_else(|| EngineError::InvalidConfig {
        message: format!("no {} id left after {}", kind, last),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn entry(day_key: DayKey, start: &str, end: &str) -> ScheduleEntry {
        ScheduleEntry {
            day_key,
            start_time: Some(start.to_string()),
            end_time: Some(end.to_string()),
            is_closed: false,
        }
    }

    fn seeded() -> MemoryStore {
        MemoryStore::from_config(&ConfigLoader::load("./config/default").unwrap())
    }

    #[test]
    fn test_from_config_seeds_devices_in_name_order() {
        let store = seeded();
        let names: Vec<String> = store.devices().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["Site Nord", "Site Sud"]);
        assert!(!store.holidays().is_empty());
    }

    #[test]
    fn test_posts_are_ordered_by_name() {
        let mut store = MemoryStore::default();
        let device = store.create_device("Site").unwrap();
        store.create_post(device.id, "Rondier").unwrap();
        store.create_post(device.id, "Accueil").unwrap();
        let names: Vec<String> = store
            .posts(device.id)
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Accueil", "Rondier"]);
    }

    #[test]
    fn test_ids_continue_after_seeded_records() {
        let mut store = seeded();
        let device = store.create_device("Site Est").unwrap();
        assert_eq!(device.id, 3);
        let post = store.create_post(device.id, "Accueil").unwrap();
        assert_eq!(post.id, 5);
    }

    #[test]
    fn test_create_post_on_unknown_device_fails() {
        let mut store = MemoryStore::default();
        assert!(matches!(
            store.create_post(42, "Accueil"),
            Err(EngineError::DeviceNotFound { id: 42 })
        ));
    }

    #[test]
    fn test_upsert_replaces_row_for_same_day_key() {
        let mut store = MemoryStore::default();
        let device = store.create_device("Site").unwrap();
        let post = store.create_post(device.id, "Accueil").unwrap();

        store
            .upsert_schedules(post.id, vec![entry(DayKey::Monday, "08:00", "16:00")])
            .unwrap();
        let rows = store
            .upsert_schedules(
                post.id,
                vec![
                    entry(DayKey::Holiday, "09:00", "12:00"),
                    entry(DayKey::Monday, "07:00", "15:00"),
                ],
            )
            .unwrap();

        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0].day_key, DayKey::Monday);
        assert_eq!(rows[0].start_time.as_deref(), Some("07:00"));
        assert_eq!(rows[7].day_key, DayKey::Holiday);
        assert_eq!(rows[7].start_time.as_deref(), Some("09:00"));
        assert!(!rows[7].is_closed);
    }

    #[test]
    fn test_missing_day_keys_get_default_rows() {
        let mut store = MemoryStore::default();
        let device = store.create_device("Site").unwrap();
        let post = store.create_post(device.id, "Accueil").unwrap();
        store
            .upsert_schedules(post.id, vec![entry(DayKey::Tuesday, "06:00", "14:00")])
            .unwrap();

        let rows = store.schedules(post.id).unwrap();
        let keys: Vec<DayKey> = rows.iter().map(|r| r.day_key).collect();
        assert_eq!(keys, DayKey::ALL.to_vec());
        assert_eq!(rows[1].start_time.as_deref(), Some("06:00"));
        assert_eq!(rows[0], ScheduleTemplate::default_for(post.id, DayKey::Monday));
        assert!(rows[5].is_closed);

        // Only the stored row feeds the engine.
        let input = store.compute_input(device.id).unwrap();
        assert_eq!(input.templates.len(), 1);
    }

    #[test]
    fn test_upsert_with_malformed_time_writes_nothing() {
        let mut store = MemoryStore::default();
        let device = store.create_device("Site").unwrap();
        let post = store.create_post(device.id, "Accueil").unwrap();

        let result = store.upsert_schedules(
            post.id,
            vec![
                entry(DayKey::Monday, "08:00", "16:00"),
                entry(DayKey::Tuesday, "8h", "16:00"),
            ],
        );
        assert!(matches!(result, Err(EngineError::InvalidTime { .. })));
        assert!(store.schedules.is_empty());
        let rows = store.schedules(post.id).unwrap();
        assert_eq!(rows[0], ScheduleTemplate::default_for(post.id, DayKey::Monday));
    }

    #[test]
    fn test_closed_rows_skip_time_validation() {
        let mut store = MemoryStore::default();
        let device = store.create_device("Site").unwrap();
        let post = store.create_post(device.id, "Accueil").unwrap();
        let closed = ScheduleEntry {
            day_key: DayKey::Sunday,
            start_time: Some("--".to_string()),
            end_time: None,
            is_closed: true,
        };
        let rows = store.upsert_schedules(post.id, vec![closed]).unwrap();
        assert_eq!(rows[6].start_time.as_deref(), Some("--"));
        assert_eq!(store.schedules.len(), 1);
    }

    #[test]
    fn test_exhausted_ids_are_rejected() {
        let mut store = MemoryStore::default();
        store.insert_device(Device { id: i64::MAX, name: "Site".to_string() });
        assert!(matches!(
            store.create_device("Site Est"),
            Err(EngineError::InvalidConfig { .. })
        ));

        store.insert_post(Post { id: i64::MAX, device_id: i64::MAX, name: "Accueil".to_string() });
        assert!(matches!(
            store.create_post(i64::MAX, "Rondier"),
            Err(EngineError::InvalidConfig { .. })
        ));
        assert_eq!(store.devices.len(), 1);
        assert_eq!(store.posts.len(), 1);
    }

    #[test]
    fn test_delete_device_cascades() {
        let mut store = seeded();
        store.delete_device(1).unwrap();

        assert!(matches!(store.posts(1), Err(EngineError::DeviceNotFound { .. })));
        assert!(matches!(store.schedules(1), Err(EngineError::PostNotFound { .. })));
        assert!(store.schedules.keys().all(|(post_id, _)| *post_id == 4));
    }

    #[test]
    fn test_delete_post_removes_its_schedules() {
        let mut store = seeded();
        store.delete_post(2).unwrap();
        assert!(store.schedules.keys().all(|(post_id, _)| *post_id != 2));
        assert!(matches!(store.delete_post(2), Err(EngineError::PostNotFound { id: 2 })));
    }

    #[test]
    fn test_set_holidays_sorts_and_dedups() {
        let mut store = MemoryStore::default();
        store.set_holidays(vec![
            Holiday { date: make_date(2025, 12, 25), label: "Noël".to_string() },
            Holiday { date: make_date(2025, 1, 1), label: String::new() },
            Holiday { date: make_date(2025, 12, 25), label: String::new() },
        ]);
        let dates: Vec<NaiveDate> = store.holidays().iter().map(|h| h.date).collect();
        assert_eq!(dates, vec![make_date(2025, 1, 1), make_date(2025, 12, 25)]);
    }

    #[test]
    fn test_compute_input_only_includes_device_posts() {
        let store = seeded();
        let input = store.compute_input(2).unwrap();
        assert_eq!(input.posts.len(), 1);
        assert!(input.templates.iter().all(|t| t.post_id == 4));
        assert_eq!(input.holidays.len(), store.holidays().len());
    }

    #[test]
    fn test_compute_over_seeded_device() {
        let store = seeded();
        let input = store.compute_input(1).unwrap();
        // Monday 2025-01-06 to Sunday 2025-01-12
        let result = input
            .compute(
                make_date(2025, 1, 6),
                make_date(2025, 1, 12),
                &Default::default(),
            )
            .unwrap();

        // Accueil, PC Sécurité, Rondier
        assert_eq!(result.posts[0].hours.total, Decimal::from(50));
        assert_eq!(result.posts[1].hours.total, Decimal::from(168));
        assert_eq!(result.posts[2].hours.total, Decimal::from(70));
    }
}
