//! Request types for the Payroll Engine API.
//!
//! The API keeps no state between requests, so every request carries the
//! roster snapshot it should be computed against. Rosters arrive as raw JSON
//! values and are decoded record by record, so one bad entry is reported
//! rather than rejecting the whole request.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{Employee, PayrollFilters, PayslipOverride, RosterKind, YearMonth};

/// Request body for `POST /payroll`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRequest {
    /// The roster the employees belong to.
    pub roster: RosterKind,
    /// The roster snapshot.
    #[serde(default)]
    pub employees: Vec<Value>,
    /// Filters to apply.
    #[serde(default)]
    pub filters: PayrollFilters,
}

/// Request body for `POST /trend`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrendRequest {
    /// The teaching roster snapshot.
    #[serde(default)]
    pub teaching: Vec<Value>,
    /// The non-teaching roster snapshot.
    #[serde(default)]
    pub non_teaching: Vec<Value>,
    /// Last month of the trend (`YYYY-MM`); defaults to the current month.
    #[serde(default)]
    pub anchor_month: Option<YearMonth>,
}

/// Request body for `POST /payslip`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayslipRequest {
    /// The employee the payslip is for.
    pub employee: Employee,
    /// Values previously saved for this employee.
    #[serde(default)]
    pub saved: Option<PayslipOverride>,
}

/// Request body for `POST /next-id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NextIdRequest {
    /// The roster snapshot.
    #[serde(default)]
    pub employees: Vec<Value>,
    /// Id prefix; defaults to the organisation's prefix.
    #[serde(default)]
    pub prefix: Option<String>,
}

/// Request body for `POST /dashboard`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardRequest {
    /// The teaching roster snapshot.
    #[serde(default)]
    pub teaching: Vec<Value>,
    /// The non-teaching roster snapshot.
    #[serde(default)]
    pub non_teaching: Vec<Value>,
    /// Reference date; defaults to today.
    #[serde(default)]
    pub today: Option<NaiveDate>,
}
