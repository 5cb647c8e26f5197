//! Core data models for the Payroll Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod diagnostic;
mod employee;
mod filters;
mod payroll;
mod payslip;
mod period;
mod report;
mod roster;

pub use diagnostic::Diagnostic;
pub use employee::{Employee, NOT_AVAILABLE, NewEmployee, decode_roster, record_id};
pub use filters::{ALL_ROLES, PayrollFilters};
pub use payroll::{
    BucketTotal, DashboardOverview, PayrollComputation, PayrollLineItem, PayrollSummary,
    SalaryTrend,
};
pub use payslip::{
    ComponentCategory, ComponentOverrides, PayComponent, PayComponents, Payslip, PayslipOverride,
    PayslipPeriod,
};
pub use period::YearMonth;
pub use report::PayrollReport;
pub use roster::RosterKind;
