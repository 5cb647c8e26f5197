//! Payroll report models.
//!
//! This module contains the derived [`PayrollLineItem`] produced for every
//! matching employee, the per-bucket [`PayrollSummary`] used for charts, and
//! the trend and dashboard series.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Diagnostic;

/// A single payroll row derived from an employee record.
///
/// Line items are recomputed on every query and never stored.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayrollLineItem;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let item = PayrollLineItem {
///     id: "EMP001".to_string(),
///     name: "A".to_string(),
///     role: "Administrative".to_string(),
///     department: "Office".to_string(),
///     designation: "Clerk".to_string(),
///     gross_salary: Decimal::new(10000, 0),
///     deductions: Decimal::new(1000, 0),
///     net_pay: Decimal::new(9000, 0),
///     hire_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     profile_pic: "https://example.com/a.jpg".to_string(),
/// };
/// assert_eq!(item.gross_salary - item.deductions, item.net_pay);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollLineItem {
    /// Employee id.
    pub id: String,
    /// Employee name.
    pub name: String,
    /// Role bucket label (e.g. "Senior Faculty"), or "Unknown".
    pub role: String,
    /// Department, or "N/A".
    pub department: String,
    /// Designation, or "N/A".
    pub designation: String,
    /// Salary before deductions.
    pub gross_salary: Decimal,
    /// Flat payroll deduction, rounded to whole units.
    pub deductions: Decimal,
    /// Gross salary minus deductions.
    pub net_pay: Decimal,
    /// Hire date.
    pub hire_date: NaiveDate,
    /// Profile picture URL.
    pub profile_pic: String,
}

/// Output of the payroll calculator: the matching line items plus any
/// records that were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollComputation {
    /// Line items in roster order.
    pub items: Vec<PayrollLineItem>,
    /// Problems with individual records or filters.
    pub diagnostics: Vec<Diagnostic>,
}

/// Total gross salary for one role bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketTotal {
    /// Normalized bucket key (e.g. "support_staff").
    pub key: String,
    /// Display label (e.g. "Support Staff").
    pub label: String,
    /// Sum of gross salaries in this bucket.
    pub total_gross: Decimal,
}

/// Gross salary totals per role bucket, in configured bucket order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSummary {
    /// One entry per configured bucket, including empty ones.
    pub buckets: Vec<BucketTotal>,
}

impl PayrollSummary {
    /// Returns the total for a normalized bucket key.
    pub fn total(&self, key: &str) -> Option<Decimal> {
        self.buckets
            .iter()
            .find(|b| b.key == key)
            .map(|b| b.total_gross)
    }

    /// Sum over all buckets.
    pub fn grand_total(&self) -> Decimal {
        self.buckets.iter().map(|b| b.total_gross).sum()
    }
}

/// Cumulative salary series for the two rosters over five months.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryTrend {
    /// Month labels, oldest first (e.g. "Apr, 25").
    pub months: Vec<String>,
    /// Teaching payroll per month.
    pub teaching_salaries: Vec<Decimal>,
    /// Non-teaching payroll per month.
    pub non_teaching_salaries: Vec<Decimal>,
}

/// Headline figures for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardOverview {
    /// Number of teaching employees.
    pub teaching_count: usize,
    /// Number of non-teaching employees.
    pub non_teaching_count: usize,
    /// Combined salary of everyone hired on or before today.
    pub current_month_salary: Decimal,
    /// Combined salary of everyone hired by the end of last month.
    pub last_month_salary: Decimal,
}
