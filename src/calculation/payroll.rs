//! Payroll calculation.
//!
//! This module derives payroll line items from a roster snapshot, applying
//! the role, department, designation, hire-date and free-text filters.

use chrono::Datelike;
use tracing::{debug, warn};

use crate::config::{OrganisationConfig, RosterConfig};
use crate::models::{
    Diagnostic, Employee, NOT_AVAILABLE, PayrollComputation, PayrollFilters, PayrollLineItem,
};

use super::role_mapping::{UNKNOWN_ROLE, normalize_role, resolve_role};
use super::rounding::fraction_of;

/// Computes payroll line items for a roster.
///
/// Employees are kept in roster order when they pass every supplied filter:
///
/// - **role**: the employee's role bucket (designation, falling back to
///   department, through the roster's role mapping) normalizes to the filter
///   value. Unmapped employees never match a specific role but are kept when
///   the filter is unset or "all".
/// - **department** / **designation**: exact match.
/// - **month**: hired in that calendar month (of any year).
/// - **year**: hired in or before that year.
/// - **hired_by**: hired on or before the last day of that month.
/// - **search**: case-insensitive substring of the name or the id.
///
/// Records without an id or a name are skipped and reported in
/// [`PayrollComputation::diagnostics`]; they never fail the call. The input
/// roster is not modified.
///
/// Each line item carries `deductions = round(gross * rate)` using the
/// organisation's payroll deduction rate, and `net_pay = gross - deductions`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_payroll;
/// use payroll_engine::config::EngineConfig;
/// use payroll_engine::models::{Employee, PayrollFilters, RosterKind};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let config = EngineConfig::builtin();
/// let roster = vec![Employee {
///     id: "EMP001".to_string(),
///     name: "A".to_string(),
///     department: "Office".to_string(),
///     designation: Some("Clerk".to_string()),
///     salary: Decimal::new(10000, 0),
///     hire_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     profile_pic: String::new(),
///     kind: None,
/// }];
///
/// let result = compute_payroll(
///     &roster,
///     &PayrollFilters::default().with_role("all"),
///     config.roster(RosterKind::NonTeaching),
///     config.organisation(),
/// );
///
/// let item = &result.items[0];
/// assert_eq!(item.role, "Administrative");
/// assert_eq!(item.deductions, Decimal::new(1000, 0));
/// assert_eq!(item.net_pay, Decimal::new(9000, 0));
/// ```
pub fn compute_payroll(
    roster: &[Employee],
    filters: &PayrollFilters,
    roster_config: &RosterConfig,
    organisation: &OrganisationConfig,
) -> PayrollComputation {
    let mut diagnostics = Vec::new();

    if let Some(month) = filters.month.filter(|m| !(1..=12).contains(m)) {
        warn!(month, "Ignoring payroll query with invalid month filter");
        diagnostics.push(Diagnostic::new(
            "invalid_filter",
            format!("month must be between 1 and 12, got {}", month),
        ));
        return PayrollComputation {
            items: Vec::new(),
            diagnostics,
        };
    }

    let role_filter = filters.role().map(normalize_role);
    let department_filter = filters.department();
    let designation_filter = filters.designation();
    let search = filters.search();

    let mut items = Vec::new();

    for employee in roster {
        if !employee.is_identified() {
            warn!(
                id = %employee.id,
                name = %employee.name,
                "Skipping employee without id or name"
            );
            let message = "employee is missing an id or a name".to_string();
            diagnostics.push(if employee.id.trim().is_empty() {
                Diagnostic::new("missing_id", message)
            } else {
                Diagnostic::for_record("missing_name", message, employee.id.clone())
            });
            continue;
        }

        let role = resolve_role(employee, &roster_config.role_mapping);

        if let Some(wanted) = &role_filter {
            match role {
                Some(label) if normalize_role(label) == *wanted => {}
                Some(_) => continue,
                None => {
                    debug!(
                        id = %employee.id,
                        designation = ?employee.designation,
                        department = %employee.department,
                        "No role mapping for employee"
                    );
                    continue;
                }
            }
        }

        if let Some(department) = department_filter {
            if employee.department.trim() != department {
                continue;
            }
        }

        if let Some(designation) = designation_filter {
            if employee.designation() != Some(designation) {
                continue;
            }
        }

        if let Some(month) = filters.month {
            if employee.hire_date.month() != month {
                continue;
            }
        }

        if let Some(year) = filters.year {
            if employee.hire_date.year() > year {
                continue;
            }
        }

        if let Some(hired_by) = filters.hired_by {
            if !employee.hired_on_or_before(hired_by.last_day()) {
                continue;
            }
        }

        if let Some(needle) = &search {
            let matches = employee.name.to_lowercase().contains(needle.as_str())
                || employee.id.to_lowercase().contains(needle.as_str());
            if !matches {
                continue;
            }
        }

        items.push(line_item(employee, role.unwrap_or(UNKNOWN_ROLE), organisation));
    }

    debug!(
        roster = %roster_config.kind,
        input = roster.len(),
        matched = items.len(),
        skipped = diagnostics.len(),
        "Computed payroll"
    );

    PayrollComputation { items, diagnostics }
}

fn line_item(employee: &Employee, role: &str, organisation: &OrganisationConfig) -> PayrollLineItem {
    let gross_salary = employee.salary;
    let deductions = fraction_of(gross_salary, organisation.payroll_deduction_rate);

    let department = match employee.department.trim() {
        "" => NOT_AVAILABLE,
        department => department,
    };

    let profile_pic = match employee.profile_pic.trim() {
        "" => organisation.default_profile_pic.as_str(),
        pic => pic,
    };

    PayrollLineItem {
        id: employee.id.clone(),
        name: employee.name.clone(),
        role: role.to_string(),
        department: department.to_string(),
        designation: employee.designation().unwrap_or(NOT_AVAILABLE).to_string(),
        gross_salary,
        deductions,
        net_pay: gross_salary - deductions,
        hire_date: employee.hire_date,
        profile_pic: profile_pic.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::models::{RosterKind, YearMonth};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn employee(id: &str, name: &str, designation: &str, salary: i64, hired: &str) -> Employee {
        Employee {
            id: id.to_string(),
            name: name.to_string(),
            department: "CSE".to_string(),
            designation: Some(designation.to_string()),
            salary: Decimal::new(salary, 0),
            hire_date: NaiveDate::parse_from_str(hired, "%Y-%m-%d").unwrap(),
            profile_pic: String::new(),
            kind: None,
        }
    }

    fn teaching_roster() -> Vec<Employee> {
        vec![
            employee("EMP001", "Anita Rao", "Associate Professor", 90000, "2020-06-15"),
            employee("EMP002", "Vikram Shah", "Assistant Professor", 60000, "2023-04-01"),
            employee("EMP003", "Priya Nair", "Assistant Professor", 62000, "2025-04-30"),
            employee("EMP004", "Guest Lecturer", "Visiting Faculty", 20000, "2025-05-01"),
        ]
    }

    fn run(roster: &[Employee], filters: &PayrollFilters) -> PayrollComputation {
        let config = EngineConfig::builtin();
        compute_payroll(
            roster,
            filters,
            config.roster(RosterKind::Teaching),
            config.organisation(),
        )
    }

    fn ids(result: &PayrollComputation) -> Vec<&str> {
        result.items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_clerk_scenario_non_teaching() {
        let config = EngineConfig::builtin();
        let mut clerk = employee("EMP001", "A", "Clerk", 10000, "2024-01-01");
        clerk.department = String::new();

        let result = compute_payroll(
            &[clerk],
            &PayrollFilters::default().with_role("all"),
            config.roster(RosterKind::NonTeaching),
            config.organisation(),
        );

        assert_eq!(result.items.len(), 1);
        let item = &result.items[0];
        assert_eq!(item.gross_salary, Decimal::new(10000, 0));
        assert_eq!(item.deductions, Decimal::new(1000, 0));
        assert_eq!(item.net_pay, Decimal::new(9000, 0));
        assert_eq!(item.role, "Administrative");
        assert_eq!(item.department, "N/A");
        assert_eq!(item.profile_pic, config.organisation().default_profile_pic);
    }

    #[test]
    fn test_no_filters_keeps_roster_order_and_unknown_roles() {
        let result = run(&teaching_roster(), &PayrollFilters::default());
        assert_eq!(ids(&result), vec!["EMP001", "EMP002", "EMP003", "EMP004"]);
        assert_eq!(result.items[3].role, "Unknown");
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_role_filter_is_exclusive() {
        let result = run(&teaching_roster(), &PayrollFilters::default().with_role("junior_faculty"));
        assert_eq!(ids(&result), vec!["EMP002", "EMP003"]);
        assert!(result.items.iter().all(|i| i.role == "Junior Faculty"));
    }

    #[test]
    fn test_role_filter_accepts_display_label() {
        let result = run(&teaching_roster(), &PayrollFilters::default().with_role("Senior Faculty"));
        assert_eq!(ids(&result), vec!["EMP001"]);
    }

    #[test]
    fn test_unmapped_roles_excluded_under_specific_filter() {
        let result = run(&teaching_roster(), &PayrollFilters::default().with_role("unknown"));
        assert!(result.items.is_empty());
    }

    #[test]
    fn test_deductions_round_half_up() {
        let roster = vec![employee("EMP010", "R", "Associate Professor", 12345, "2020-01-01")];
        let result = run(&roster, &PayrollFilters::default());
        assert_eq!(result.items[0].deductions, Decimal::new(1235, 0));
        assert_eq!(result.items[0].net_pay, Decimal::new(11110, 0));
    }

    #[test]
    fn test_hired_by_includes_last_day_of_month() {
        let filters = PayrollFilters::default().with_hired_by(YearMonth::new(2025, 4).unwrap());
        let result = run(&teaching_roster(), &filters);
        // EMP003 hired 2025-04-30 is in, EMP004 hired 2025-05-01 is out
        assert_eq!(ids(&result), vec!["EMP001", "EMP002", "EMP003"]);
    }

    #[test]
    fn test_hired_by_excludes_first_day_of_next_month() {
        let filters = PayrollFilters::default().with_hired_by(YearMonth::new(2025, 3).unwrap());
        let result = run(&teaching_roster(), &filters);
        assert_eq!(ids(&result), vec!["EMP001", "EMP002"]);
    }

    #[test]
    fn test_month_filter_matches_calendar_month() {
        let result = run(&teaching_roster(), &PayrollFilters::default().with_month(4));
        assert_eq!(ids(&result), vec!["EMP002", "EMP003"]);

        let result = run(&teaching_roster(), &PayrollFilters::default().with_month(5));
        assert_eq!(ids(&result), vec!["EMP004"]);
    }

    #[test]
    fn test_year_filter_is_on_or_before() {
        let result = run(&teaching_roster(), &PayrollFilters::default().with_year(2023));
        assert_eq!(ids(&result), vec!["EMP001", "EMP002"]);
    }

    #[test]
    fn test_month_and_year_combine_with_and() {
        let filters = PayrollFilters::default().with_month(4).with_year(2024);
        let result = run(&teaching_roster(), &filters);
        assert_eq!(ids(&result), vec!["EMP002"]);
    }

    #[test]
    fn test_invalid_month_degrades_to_empty_with_diagnostic() {
        let result = run(&teaching_roster(), &PayrollFilters::default().with_month(13));
        assert!(result.items.is_empty());
        assert_eq!(result.diagnostics[0].code, "invalid_filter");
    }

    #[test]
    fn test_search_matches_name_or_id_case_insensitively() {
        let result = run(&teaching_roster(), &PayrollFilters::default().with_search("PRIYA"));
        assert_eq!(ids(&result), vec!["EMP003"]);

        let result = run(&teaching_roster(), &PayrollFilters::default().with_search("emp00"));
        assert_eq!(result.items.len(), 4);
    }

    #[test]
    fn test_department_and_designation_filters() {
        let mut roster = teaching_roster();
        roster[1].department = "ECE".to_string();

        let result = run(&roster, &PayrollFilters::default().with_department("ECE"));
        assert_eq!(ids(&result), vec!["EMP002"]);

        let result = run(
            &roster,
            &PayrollFilters::default().with_designation("Assistant Professor"),
        );
        assert_eq!(ids(&result), vec!["EMP002", "EMP003"]);
    }

    #[test]
    fn test_records_without_id_or_name_are_reported() {
        let mut roster = teaching_roster();
        roster[0].id = String::new();
        roster[1].name = " ".to_string();

        let result = run(&roster, &PayrollFilters::default());
        assert_eq!(ids(&result), vec!["EMP003", "EMP004"]);
        assert_eq!(result.diagnostics.len(), 2);
        assert_eq!(result.diagnostics[0].code, "missing_id");
        assert_eq!(result.diagnostics[1].record_id.as_deref(), Some("EMP002"));
    }

    #[test]
    fn test_is_idempotent_and_does_not_mutate_roster() {
        let roster = teaching_roster();
        let snapshot = roster.clone();
        let filters = PayrollFilters::default().with_role("junior_faculty").with_year(2025);

        let first = run(&roster, &filters);
        let second = run(&roster, &filters);

        assert_eq!(first, second);
        assert_eq!(roster, snapshot);
    }
}
