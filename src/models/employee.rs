//! Employee model and related types.
//!
//! This module defines the [`Employee`] record stored in each roster, the
//! [`NewEmployee`] form used for manual entry, and [`decode_roster`], which
//! turns raw stored JSON into employees one record at a time so a single bad
//! entry never loses the whole roster.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::{Diagnostic, RosterKind};

/// Placeholder rendered for missing department or designation values.
pub const NOT_AVAILABLE: &str = "N/A";

/// Represents an employee on one of the rosters.
///
/// Records written by older tooling use camelCase keys (`hireDate`,
/// `profilePic`); both spellings are accepted when reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier within the roster (e.g., "EMP001").
    #[serde(default)]
    pub id: String,
    /// Full name.
    #[serde(default)]
    pub name: String,
    /// Department (e.g., "CSE", "Accounts").
    #[serde(default)]
    pub department: String,
    /// Designation (e.g., "Associate Professor", "Clerk").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    /// Monthly salary.
    #[serde(default)]
    pub salary: Decimal,
    /// The date the employee was hired.
    #[serde(alias = "hireDate")]
    pub hire_date: NaiveDate,
    /// URL of the profile picture.
    #[serde(default, alias = "profilePic")]
    pub profile_pic: String,
    /// The roster this employee belongs to.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<RosterKind>,
}

impl Employee {
    /// Returns true if the record carries both an id and a name.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::Employee;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: "EMP001".to_string(),
    ///     name: "  ".to_string(),
    ///     department: "CSE".to_string(),
    ///     designation: None,
    ///     salary: Decimal::new(50000, 0),
    ///     hire_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    ///     profile_pic: String::new(),
    ///     kind: None,
    /// };
    /// assert!(!employee.is_identified());
    /// ```
    pub fn is_identified(&self) -> bool {
        !self.id.trim().is_empty() && !self.name.trim().is_empty()
    }

    /// Returns the designation if it is present and not blank.
    pub fn designation(&self) -> Option<&str> {
        self.designation
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }

    /// Returns true if the employee was hired on or before `date`.
    pub fn hired_on_or_before(&self, date: NaiveDate) -> bool {
        self.hire_date <= date
    }

    /// Normalizes the record for storage in the given roster.
    ///
    /// Trims identifying text, stamps the roster kind, and substitutes the
    /// default profile picture when none is set.
    pub fn normalized(mut self, kind: RosterKind, default_pic: &str) -> Self {
        self.id = self.id.trim().to_string();
        self.name = self.name.trim().to_string();
        self.department = self.department.trim().to_string();
        self.designation = self.designation().map(str::to_string);
        if self.profile_pic.trim().is_empty() {
            self.profile_pic = default_pic.to_string();
        }
        self.kind = Some(kind);
        self
    }
}

/// Input for manually adding an employee.
///
/// When `id` is `None` the store assigns the next free id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEmployee {
    /// Explicit id, or `None` to generate one.
    #[serde(default)]
    pub id: Option<String>,
    /// Full name (required).
    pub name: String,
    /// Department (required).
    pub department: String,
    /// Designation.
    #[serde(default)]
    pub designation: Option<String>,
    /// Monthly salary; must be positive.
    pub salary: Decimal,
    /// Hire date.
    pub hire_date: NaiveDate,
    /// Profile picture URL; the configured default is used when absent.
    #[serde(default)]
    pub profile_pic: Option<String>,
}

impl NewEmployee {
    /// Builds an employee record with the given id.
    pub fn into_employee(self, id: String) -> Employee {
        Employee {
            id,
            name: self.name,
            department: self.department,
            designation: self.designation,
            salary: self.salary,
            hire_date: self.hire_date,
            profile_pic: self.profile_pic.unwrap_or_default(),
            kind: None,
        }
    }
}

/// Returns the trimmed id of a raw roster entry, if it carries a non-blank one.
///
/// Works on entries that do not decode as an [`Employee`], so stores and id
/// generation can still see ids held by damaged records.
pub fn record_id(value: &Value) -> Option<&str> {
    value
        .get("id")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|id| !id.is_empty())
}

/// Decodes raw roster entries one at a time.
///
/// Entries that are not objects or fail to decode (for example an
/// unparseable hire date) or carry a negative salary are skipped and
/// reported as diagnostics; the remaining entries keep their original order.
pub fn decode_roster(values: Vec<Value>) -> (Vec<Employee>, Vec<Diagnostic>) {
    let mut employees = Vec::with_capacity(values.len());
    let mut diagnostics = Vec::new();

    for (index, value) in values.into_iter().enumerate() {
        let raw_id = record_id(&value).map(str::to_string);

        if !value.is_object() {
            warn!(index, "Skipping roster entry that is not an object");
            diagnostics.push(Diagnostic::new(
                "invalid_record",
                format!("entry {} is not an object", index),
            ));
            continue;
        }

        match serde_json::from_value::<Employee>(value) {
            Ok(employee) if employee.salary < Decimal::ZERO => {
                warn!(index, id = %employee.id, "Skipping roster entry with negative salary");
                diagnostics.push(Diagnostic::for_record(
                    "invalid_record",
                    format!("entry {} has a negative salary", index),
                    employee.id,
                ));
            }
            Ok(employee) => employees.push(employee),
            Err(err) => {
                warn!(index, error = %err, "Skipping undecodable roster entry");
                let message = format!("entry {} could not be decoded: {}", index, err);
                diagnostics.push(match raw_id {
                    Some(id) => Diagnostic::for_record("invalid_record", message, id),
                    None => Diagnostic::new("invalid_record", message),
                });
            }
        }
    }

    (employees, diagnostics)
}
