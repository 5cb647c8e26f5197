//! Calculation logic for the Payroll Engine.
//!
//! This module contains the pure functions that derive payroll figures from
//! roster snapshots: role bucket resolution, filtered payroll line items,
//! per-bucket summaries, the salary trend, payslip resolution, id generation
//! and the dashboard overview. None of them perform I/O.

mod dashboard;
mod id_generator;
mod payroll;
mod payslip;
mod role_mapping;
mod rounding;
mod summary;
mod trend;

pub use dashboard::dashboard_overview;
pub use id_generator::{next_id, next_id_from_ids};
pub use payroll::compute_payroll;
pub use payslip::{default_components, resolve_payslip};
pub use role_mapping::{UNKNOWN_ROLE, normalize_role, resolve_role};
pub use rounding::{fraction_of, round_to_unit};
pub use summary::summarize;
pub use trend::{TREND_MONTHS, salary_trend, salary_trend_now};
