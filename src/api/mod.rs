//! HTTP API module for the coverage engine.
//!
//! This module provides the REST endpoints for computing coverage, managing
//! devices, posts and schedule templates, and exporting results as CSV.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ComputeRequest, NameRequest, RangeQuery};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
