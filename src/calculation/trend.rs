//! Salary trend estimation.
//!
//! The trend is an estimate built from hire dates alone: for each month, the
//! payroll is the sum of salaries of everyone hired by the end of that month.
//! Terminations and salary changes are not modelled, so the series never
//! decreases.

use chrono::Local;
use rust_decimal::Decimal;

use crate::models::{Employee, SalaryTrend, YearMonth};

/// Number of months in the trend, including the anchor month.
pub const TREND_MONTHS: usize = 5;

fn payroll_as_of(roster: &[Employee], month: YearMonth) -> Decimal {
    let cutoff = month.last_day();
    roster
        .iter()
        .filter(|e| e.hired_on_or_before(cutoff))
        .map(|e| e.salary)
        .sum()
}

/// Builds the five-month salary trend ending at `anchor`.
///
/// Months are listed oldest first with labels such as "Apr, 25".
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::salary_trend;
/// use payroll_engine::models::YearMonth;
///
/// let trend = salary_trend(&[], &[], YearMonth::new(2025, 2).unwrap());
/// assert_eq!(trend.months, vec!["Oct, 24", "Nov, 24", "Dec, 24", "Jan, 25", "Feb, 25"]);
/// ```
pub fn salary_trend(teaching: &[Employee], non_teaching: &[Employee], anchor: YearMonth) -> SalaryTrend {
    let mut months = Vec::with_capacity(TREND_MONTHS);
    let mut current = Some(anchor);
    while let Some(month) = current {
        months.push(month);
        if months.len() == TREND_MONTHS {
            break;
        }
        current = month.pred();
    }
    months.reverse();

    SalaryTrend {
        months: months.iter().map(YearMonth::label).collect(),
        teaching_salaries: months.iter().map(|m| payroll_as_of(teaching, *m)).collect(),
        non_teaching_salaries: months
            .iter()
            .map(|m| payroll_as_of(non_teaching, *m))
            .collect(),
    }
}

/// Builds the salary trend ending at the current local month.
pub fn salary_trend_now(teaching: &[Employee], non_teaching: &[Employee]) -> SalaryTrend {
    let anchor = YearMonth::from_date(Local::now().date_naive());
    salary_trend(teaching, non_teaching, anchor)
}
