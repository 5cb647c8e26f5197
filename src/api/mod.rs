//! HTTP API module for the Payroll Engine.
//!
//! This module exposes the payroll calculations over a stateless REST API.
//! Each request carries the roster snapshot to compute against.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{DashboardRequest, NextIdRequest, PayrollRequest, PayslipRequest, TrendRequest};
pub use response::{ApiError, ApiErrorResponse, NextIdResponse, RosterOptions};
pub use state::AppState;
