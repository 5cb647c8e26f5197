//! Dashboard headline figures.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{DashboardOverview, Employee, YearMonth};

fn payroll_through(rosters: [&[Employee]; 2], cutoff: NaiveDate) -> Decimal {
    rosters
        .into_iter()
        .flatten()
        .filter(|e| e.hired_on_or_before(cutoff))
        .map(|e| e.salary)
        .sum()
}

/// Computes head counts and the current and previous month's payroll.
///
/// The current figure covers everyone hired on or before `today`; the
/// previous one covers everyone hired by the last day of the previous month.
/// Earlier dashboards cut the previous figure off at the first day of that
/// month, so hires made later in the month now count toward it.
pub fn dashboard_overview(
    teaching: &[Employee],
    non_teaching: &[Employee],
    today: NaiveDate,
) -> DashboardOverview {
    let last_month_end = YearMonth::from_date(today)
        .pred()
        .map(|m| m.last_day())
        .unwrap_or(NaiveDate::MIN);

    DashboardOverview {
        teaching_count: teaching.len(),
        non_teaching_count: non_teaching.len(),
        current_month_salary: payroll_through([teaching, non_teaching], today),
        last_month_salary: payroll_through([teaching, non_teaching], last_month_end),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hired(salary: i64, date: &str) -> Employee {
        Employee {
            id: "EMP001".to_string(),
            name: "A".to_string(),
            department: String::new(),
            designation: None,
            salary: Decimal::new(salary, 0),
            hire_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            profile_pic: String::new(),
            kind: None,
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_counts_and_totals() {
        let teaching = vec![hired(100, "2024-01-01"), hired(50, "2025-04-10")];
        let non_teaching = vec![hired(30, "2025-03-31"), hired(70, "2025-04-20")];

        let overview = dashboard_overview(&teaching, &non_teaching, date("2025-04-15"));

        assert_eq!(overview.teaching_count, 2);
        assert_eq!(overview.non_teaching_count, 2);
        assert_eq!(overview.current_month_salary, Decimal::new(180, 0));
        assert_eq!(overview.last_month_salary, Decimal::new(130, 0));
    }

    #[test]
    fn test_january_looks_back_to_december() {
        let teaching = vec![hired(10, "2024-12-31"), hired(5, "2025-01-01")];
        let overview = dashboard_overview(&teaching, &[], date("2025-01-20"));

        assert_eq!(overview.current_month_salary, Decimal::new(15, 0));
        assert_eq!(overview.last_month_salary, Decimal::new(10, 0));
    }

    #[test]
    fn test_previous_month_includes_mid_month_hires() {
        let teaching = vec![hired(40, "2025-03-01"), hired(25, "2025-03-18")];
        let overview = dashboard_overview(&teaching, &[], date("2025-04-02"));

        assert_eq!(overview.last_month_salary, Decimal::new(65, 0));
    }

    #[test]
    fn test_empty_rosters() {
        let overview = dashboard_overview(&[], &[], date("2025-04-15"));
        assert_eq!(overview.teaching_count, 0);
        assert!(overview.current_month_salary.is_zero());
    }
}
