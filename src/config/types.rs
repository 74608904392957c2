//! Configuration types for the coverage engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, and the aggregated
//! [`CoverageConfig`] built from them.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::calculation::{ANNUAL_FTE_HOURS, DayBands};
use crate::models::{DayKey, Device, Holiday, Post, ScheduleTemplate};

/// Metadata about the deployment.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineMetadata {
    /// The human-readable name of the deployment.
    pub name: String,
    /// The version of the configuration set.
    pub version: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
}

/// Engine configuration file structure (`engine.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct EngineFile {
    /// Deployment metadata.
    pub engine: EngineMetadata,
    /// Staffed hours per year of one full-time post.
    #[serde(default = "default_annual_fte_hours")]
    pub annual_fte_hours: Decimal,
    /// Start of the day band, "HH:MM".
    #[serde(default = "default_day_start")]
    pub day_start: String,
    /// End of the day band, "HH:MM".
    #[serde(default = "default_day_end")]
    pub day_end: String,
}

fn default_annual_fte_hours() -> Decimal {
    Decimal::from(ANNUAL_FTE_HOURS)
}

fn default_day_start() -> String {
    "06:00".to_string()
}

fn default_day_end() -> String {
    "21:00".to_string()
}

/// Holiday calendar file structure (`holidays.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct HolidaysFile {
    /// Holidays in any order.
    #[serde(default)]
    pub holidays: Vec<Holiday>,
}

/// One schedule row inside a device file.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleEntry {
    /// The day key the row applies to.
    #[serde(alias = "day_of_week")]
    pub day_key: DayKey,
    /// Nominal start time, "HH:MM".
    #[serde(default)]
    pub start_time: Option<String>,
    /// Nominal end time, "HH:MM".
    #[serde(default)]
    pub end_time: Option<String>,
    /// Whether the post is closed on this key.
    #[serde(default)]
    pub is_closed: bool,
}

/// One post inside a device file.
#[derive(Debug, Clone, Deserialize)]
pub struct PostEntry {
    /// Post identifier, unique across all devices.
    pub id: i64,
    /// Post display name.
    pub name: String,
    /// The post's schedule rows.
    #[serde(default)]
    pub schedules: Vec<ScheduleEntry>,
}

/// Device file structure (`devices/*.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceFile {
    /// The device record.
    pub device: Device,
    /// Posts attached to the device.
    #[serde(default)]
    pub posts: Vec<PostEntry>,
}

/// A device with its posts and template rows, flattened into records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceConfig {
    /// The device record.
    pub device: Device,
    /// Posts attached to the device.
    pub posts: Vec<Post>,
    /// Template rows of those posts.
    pub templates: Vec<ScheduleTemplate>,
}

impl From<DeviceFile> for DeviceConfig {
    fn from(file: DeviceFile) -> Self {
        let device_id = file.device.id;
        let mut posts = Vec::with_capacity(file.posts.len());
        let mut templates = Vec::new();

        for entry in file.posts {
            templates.extend(entry.schedules.into_iter().map(|s| ScheduleTemplate {
                post_id: entry.id,
                day_key: s.day_key,
                start_time: s.start_time,
                end_time: s.end_time,
                is_closed: s.is_closed,
            }));
            posts.push(Post {
                id: entry.id,
                device_id,
                name: entry.name,
            });
        }

        Self {
            device: file.device,
            posts,
            templates,
        }
    }
}

/// Tunable parameters of the coverage computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    /// Staffed hours per year of one full-time post.
    pub annual_fte_hours: Decimal,
    /// Day band boundaries.
    pub day_bands: DayBands,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            annual_fte_hours: default_annual_fte_hours(),
            day_bands: DayBands::default(),
        }
    }
}

/// The complete configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct CoverageConfig {
    metadata: EngineMetadata,
    settings: EngineSettings,
    holidays: Vec<Holiday>,
    devices: Vec<DeviceConfig>,
}

impl CoverageConfig {
    /// Creates a new CoverageConfig from its component parts.
    ///
    /// Holidays are sorted by date and devices by name.
    pub fn new(
        metadata: EngineMetadata,
        settings: EngineSettings,
        holidays: Vec<Holiday>,
        devices: Vec<DeviceConfig>,
    ) -> Self {
        let mut holidays = holidays;
        holidays.sort_by(|a, b| a.date.cmp(&b.date));
        let mut devices = devices;
        devices.sort_by(|a, b| a.device.name.cmp(&b.device.name));
        Self {
            metadata,
            settings,
            holidays,
            devices,
        }
    }

    /// Returns the deployment metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        &self.metadata
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns all holidays, ordered by date.
    pub fn holidays(&self) -> &[Holiday] {
        &self.holidays
    }

    /// Returns all devices, ordered by name.
    pub fn devices(&self) -> &[DeviceConfig] {
        &self.devices
    }
}
