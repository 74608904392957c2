//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! settings, the holiday calendar and seed device data from YAML files.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use tracing::info;

use crate::calculation::DayBands;
use crate::error::{EngineError, EngineResult};
use crate::models::{Holiday, parse_time_of_day};

use super::types::{
    CoverageConfig, DeviceConfig, DeviceFile, EngineFile, EngineMetadata, EngineSettings,
    HolidaysFile,
};

/// Loads and provides access to coverage configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/default/
/// ├── engine.yaml     # Metadata, FTE hours and day band
/// ├── holidays.yaml   # Holiday calendar
/// └── devices/        # Optional seed data
///     └── site-nord.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use coverage_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Loaded: {}", loader.metadata().name);
/// println!("Holidays: {}", loader.holidays().len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: CoverageConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `engine.yaml` or `holidays.yaml` is missing
    /// - Any file contains invalid YAML
    /// - The settings are inconsistent (day band out of order, non-positive
    ///   FTE hours) or device/post ids are duplicated
    /// - A seed template row has a malformed time or repeats a day key
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let engine_file = Self::load_yaml::<EngineFile>(&path.join("engine.yaml"))?;
        let settings = Self::settings_from(&engine_file)?;

        let holidays_file = Self::load_yaml::<HolidaysFile>(&path.join("holidays.yaml"))?;

        let devices = Self::load_devices(&path.join("devices"))?;
        Self::check_unique_ids(&devices)?;
        Self::check_schedules(&devices)?;

        info!(
            path = %path.display(),
            holidays = holidays_file.holidays.len(),
            devices = devices.len(),
            "Configuration loaded"
        );

        Ok(Self {
            config: CoverageConfig::new(
                engine_file.engine,
                settings,
                holidays_file.holidays,
                devices,
            ),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Builds validated settings from the engine file.
    fn settings_from(file: &EngineFile) -> EngineResult<EngineSettings> {
        if file.annual_fte_hours <= Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "annual_fte_hours must be positive, got {}",
                    file.annual_fte_hours
                ),
            });
        }

        let to_minutes = |field: &str, value: &str| {
            parse_time_of_day(value).map_err(|err| EngineError::InvalidConfig {
                message: format!("{}: {}", field, err),
            })
        };
        let day_bands = DayBands::new(
            to_minutes("day_start", &file.day_start)?,
            to_minutes("day_end", &file.day_end)?,
        )?;

        Ok(EngineSettings {
            annual_fte_hours: file.annual_fte_hours,
            day_bands,
        })
    }

    /// Loads every device file from the devices directory, in file name
    /// order. A missing directory means no seed devices.
    fn load_devices(devices_dir: &Path) -> EngineResult<Vec<DeviceConfig>> {
        if !devices_dir.exists() {
            return Ok(Vec::new());
        }

        let devices_dir_str = devices_dir.display().to_string();
        let entries = fs::read_dir(devices_dir).map_err(|_| EngineError::ConfigNotFound {
            path: devices_dir_str.clone(),
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: devices_dir_str.clone(),
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                paths.push(path);
            }
        }
        paths.sort();

        paths
            .iter()
            .map(|path| Self::load_yaml::<DeviceFile>(path).map(DeviceConfig::from))
            .collect()
    }

    /// Rejects duplicate device ids and post ids.
    fn check_unique_ids(devices: &[DeviceConfig]) -> EngineResult<()> {
        let mut device_ids = HashSet::new();
        let mut post_ids = HashSet::new();

        for device in devices {
            if !device_ids.insert(device.device.id) {
                return Err(EngineError::InvalidConfig {
                    message: format!("duplicate device id {}", device.device.id),
                });
            }
            for post in &device.posts {
                if !post_ids.insert(post.id) {
                    return Err(EngineError::InvalidConfig {
                        message: format!("duplicate post id {}", post.id),
                    });
                }
            }
        }
        Ok(())
    }

    /// Rejects seed template rows with malformed times, and a post listing
    /// the same day key twice.
    fn check_schedules(devices: &[DeviceConfig]) -> EngineResult<()> {
        let mut seen = HashSet::new();

        for template in devices.iter().flat_map(|d| &d.templates) {
            let key = (template.post_id, template.day_key);
            if !seen.insert(key) {
                return Err(EngineError::InvalidConfig {
                    message: format!(
                        "post {} has more than one {} row",
                        template.post_id, template.day_key
                    ),
                });
            }
            template
                .work_interval()
                .map_err(|err| EngineError::InvalidConfig {
                    message: format!("post {} {}: {}", template.post_id, template.day_key, err),
                })?;
        }
        Ok(())
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &CoverageConfig {
        &self.config
    }

    /// Returns the deployment metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        self.config.metadata()
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        self.config.settings()
    }

    /// Returns the holiday calendar, ordered by date.
    pub fn holidays(&self) -> &[Holiday] {
        self.config.holidays()
    }

    /// Returns the seed devices, ordered by name.
    pub fn devices(&self) -> &[DeviceConfig] {
        self.config.devices()
    }

    /// Gets a seed device by id.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use coverage_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// let device = loader.get_device(1)?;
    /// println!("{} has {} posts", device.device.name, device.posts.len());
    /// # Ok::<(), coverage_engine::error::EngineError>(())
    /// ```
    pub fn get_device(&self, id: i64) -> EngineResult<&DeviceConfig> {
        self.config
            .devices()
            .iter()
            .find(|d| d.device.id == id)
            .ok_or(EngineError::DeviceNotFound { id })
    }
}
