//! Payroll filter state.

use serde::{Deserialize, Serialize};

use super::YearMonth;

/// Role filter value that disables role filtering.
pub const ALL_ROLES: &str = "all";

/// The filters applied by the payroll calculator.
///
/// Every field is optional and blank strings count as "not supplied", so the
/// raw values of a filter form can be passed straight through. Supplied
/// predicates are combined with AND.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayrollFilters;
///
/// let filters = PayrollFilters::default()
///     .with_role("senior_faculty")
///     .with_search("anita");
/// assert_eq!(filters.role(), Some("senior_faculty"));
/// assert_eq!(filters.department(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollFilters {
    /// Normalized role bucket (e.g. "senior_faculty"), or "all".
    pub role: Option<String>,
    /// Exact department match.
    pub department: Option<String>,
    /// Exact designation match.
    pub designation: Option<String>,
    /// Hire month (1-12); matches employees hired in that calendar month.
    pub month: Option<u32>,
    /// Matches employees hired in or before this year.
    pub year: Option<i32>,
    /// Matches employees hired on or before the last day of this month.
    pub hired_by: Option<YearMonth>,
    /// Case-insensitive substring of the employee name or id.
    pub search: Option<String>,
}

fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl PayrollFilters {
    /// Sets the role filter.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Sets the department filter.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Sets the designation filter.
    pub fn with_designation(mut self, designation: impl Into<String>) -> Self {
        self.designation = Some(designation.into());
        self
    }

    /// Sets the hire month filter.
    pub fn with_month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }

    /// Sets the hire year filter.
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Sets the hired-by month filter.
    pub fn with_hired_by(mut self, month: YearMonth) -> Self {
        self.hired_by = Some(month);
        self
    }

    /// Sets the free-text search.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// The active role filter, or `None` when unset, blank or "all".
    pub fn role(&self) -> Option<&str> {
        supplied(&self.role).filter(|r| !r.eq_ignore_ascii_case(ALL_ROLES))
    }

    /// The active department filter.
    pub fn department(&self) -> Option<&str> {
        supplied(&self.department)
    }

    /// The active designation filter.
    pub fn designation(&self) -> Option<&str> {
        supplied(&self.designation)
    }

    /// The active search text, lowercased.
    pub fn search(&self) -> Option<String> {
        supplied(&self.search).map(str::to_lowercase)
    }
}
