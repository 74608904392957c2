//! Configuration loading and management for the coverage engine.
//!
//! This module loads engine settings (FTE hours, day band), the holiday
//! calendar and optional seed devices from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use coverage_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CoverageConfig, DeviceConfig, DeviceFile, EngineFile, EngineMetadata, EngineSettings,
    HolidaysFile, PostEntry, ScheduleEntry,
};
