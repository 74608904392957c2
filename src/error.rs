//! Error types for the coverage engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading configuration,
//! managing records and computing coverage.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the coverage engine.
///
/// All fallible operations in the crate return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use coverage_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/engine.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/engine.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds inconsistent values.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the inconsistency.
        message: String,
    },

    /// The requested period ends before it starts.
    #[error("Invalid range: end date {end} is before start date {start}")]
    InvalidRange {
        /// The first day of the requested period.
        start: NaiveDate,
        /// The last day of the requested period.
        end: NaiveDate,
    },

    /// A wall-clock time could not be parsed.
    #[error("Invalid time '{value}': {message}")]
    InvalidTime {
        /// The raw value that was rejected.
        value: String,
        /// Why the value was rejected.
        message: String,
    },

    /// No device exists with the given id.
    #[error("Device not found: {id}")]
    DeviceNotFound {
        /// The missing device id.
        id: i64,
    },

    /// No post exists with the given id.
    #[error("Post not found: {id}")]
    PostNotFound {
        /// The missing post id.
        id: i64,
    },

    /// The result could not be rendered as CSV.
    #[error("Export error: {message}")]
    ExportError {
        /// A description of the export failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

impl From<csv::Error> for EngineError {
    fn from(err: csv::Error) -> Self {
        EngineError::ExportError {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/file.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/file.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_range_displays_both_dates() {
        let error = EngineError::InvalidRange {
            start: NaiveDate::from_ymd_opt(2025, 1, 7).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid range: end date 2025-01-01 is before start date 2025-01-07"
        );
    }

    #[test]
    fn test_invalid_time_displays_value_and_message() {
        let error = EngineError::InvalidTime {
            value: "25:00".to_string(),
            message: "hour out of range".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid time '25:00': hour out of range");
    }

    #[test]
    fn test_not_found_errors_display_id() {
        assert_eq!(
            EngineError::DeviceNotFound { id: 3 }.to_string(),
            "Device not found: 3"
        );
        assert_eq!(
            EngineError::PostNotFound { id: 12 }.to_string(),
            "Post not found: 12"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_post_not_found() -> EngineResult<()> {
            Err(EngineError::PostNotFound { id: 1 })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_post_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
