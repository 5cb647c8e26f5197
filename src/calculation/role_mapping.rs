//! Role bucket resolution.
//!
//! This module maps an employee's designation (falling back to their
//! department) onto the coarse role buckets used for filtering and charts.

use std::collections::HashMap;

use crate::models::Employee;

/// Label given to employees whose designation and department are unmapped.
pub const UNKNOWN_ROLE: &str = "Unknown";

/// Normalizes a role label into a filter key.
///
/// Lowercases and joins words with underscores.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::normalize_role;
///
/// assert_eq!(normalize_role("Senior Faculty"), "senior_faculty");
/// assert_eq!(normalize_role("  Support   Staff "), "support_staff");
/// assert_eq!(normalize_role("administrative"), "administrative");
/// ```
pub fn normalize_role(label: &str) -> String {
    label
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

fn lookup<'a>(mapping: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    mapping
        .get(key)
        .or_else(|| {
            mapping
                .iter()
                .find(|(from, _)| from.eq_ignore_ascii_case(key))
                .map(|(_, to)| to)
        })
        .map(String::as_str)
}

/// Resolves the role bucket label for an employee.
///
/// The designation is looked up first, then the department. Exact matches
/// win over case-insensitive ones. Returns `None` when neither is mapped.
pub fn resolve_role<'a>(
    employee: &Employee,
    mapping: &'a HashMap<String, String>,
) -> Option<&'a str> {
    employee
        .designation()
        .and_then(|designation| lookup(mapping, designation))
        .or_else(|| lookup(mapping, &employee.department))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn non_teaching_mapping() -> HashMap<String, String> {
        [
            ("Clerk", "Administrative"),
            ("Accounts", "Administrative"),
            ("Peon", "Support Staff"),
            ("Maintenance", "Support Staff"),
        ]
        .iter()
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .collect()
    }

    fn employee(designation: Option<&str>, department: &str) -> Employee {
        Employee {
            id: "EMP001".to_string(),
            name: "A".to_string(),
            department: department.to_string(),
            designation: designation.map(str::to_string),
            salary: Decimal::new(1000, 0),
            hire_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            profile_pic: String::new(),
            kind: None,
        }
    }

    #[test]
    fn test_designation_takes_precedence() {
        let mapping = non_teaching_mapping();
        let e = employee(Some("Peon"), "Accounts");
        assert_eq!(resolve_role(&e, &mapping), Some("Support Staff"));
    }

    #[test]
    fn test_falls_back_to_department() {
        let mapping = non_teaching_mapping();
        let e = employee(None, "Maintenance");
        assert_eq!(resolve_role(&e, &mapping), Some("Support Staff"));

        let e = employee(Some("Driver"), "Accounts");
        assert_eq!(resolve_role(&e, &mapping), Some("Administrative"));
    }

    #[test]
    fn test_case_insensitive_match() {
        let mapping = non_teaching_mapping();
        let e = employee(Some("clerk"), "");
        assert_eq!(resolve_role(&e, &mapping), Some("Administrative"));
    }

    #[test]
    fn test_unmapped_returns_none() {
        let mapping = non_teaching_mapping();
        let e = employee(Some("Driver"), "Transport");
        assert_eq!(resolve_role(&e, &mapping), None);
    }

    #[test]
    fn test_normalize_handles_single_word() {
        assert_eq!(normalize_role("Unknown"), "unknown");
        assert_eq!(normalize_role(""), "");
    }
}
