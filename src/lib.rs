//! Staffing coverage engine.
//!
//! This crate turns posts, their weekly schedule templates and a holiday
//! calendar into staffed hours over a date range, split between day and
//! night on weekdays, Sundays and public holidays, together with the
//! full-time-equivalent figures derived from them.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod store;
pub mod telemetry;
