//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoints for running calculations,
//! browsing and pruning calculation history, and listing jurisdictions.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::CalculationRequest;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
