//! Configuration types for payroll computation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, plus the built-in
//! defaults used when no configuration directory is supplied.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::normalize_role;
use crate::models::{PayComponent, RosterKind};

/// Default profile picture used when an employee has none.
pub const DEFAULT_PROFILE_PIC: &str = "https://randomuser.me/api/portraits/lego/1.jpg";

/// Organisation-wide settings.
#[derive(Debug, Clone, Deserialize)]
pub struct OrganisationConfig {
    /// The organisation name.
    pub name: String,
    /// Currency symbol used by the formatting helpers.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Profile picture substituted when an employee has none.
    #[serde(default = "default_profile_pic")]
    pub default_profile_pic: String,
    /// Prefix for generated employee ids.
    #[serde(default = "default_id_prefix")]
    pub id_prefix: String,
    /// Flat fraction of gross salary reported as payroll deductions.
    #[serde(default = "default_deduction_rate")]
    pub payroll_deduction_rate: Decimal,
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

fn default_profile_pic() -> String {
    DEFAULT_PROFILE_PIC.to_string()
}

fn default_id_prefix() -> String {
    "EMP".to_string()
}

fn default_deduction_rate() -> Decimal {
    Decimal::new(10, 2)
}

/// A role filter choice offered to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleOption {
    /// Normalized filter value (e.g. "senior_faculty" or "all").
    pub value: String,
    /// Display label.
    pub label: String,
}

/// Settings for one roster.
///
/// Teaching and non-teaching rosters share every code path; everything that
/// differs between them lives here.
#[derive(Debug, Clone, Deserialize)]
pub struct RosterConfig {
    /// Which roster this configures.
    pub kind: RosterKind,
    /// Storage key holding the roster array.
    pub storage_key: String,
    /// Map of designation or department to role bucket label.
    pub role_mapping: HashMap<String, String>,
    /// Role bucket labels shown in the payroll summary, in chart order.
    pub summary_buckets: Vec<String>,
    /// Departments offered when adding or filtering employees.
    #[serde(default)]
    pub departments: Vec<String>,
    /// Designations offered when adding or filtering employees.
    #[serde(default)]
    pub designations: Vec<String>,
}

impl RosterConfig {
    /// Role filter choices: "All Roles" followed by every summary bucket.
    pub fn role_options(&self) -> Vec<RoleOption> {
        std::iter::once(RoleOption {
            value: crate::models::ALL_ROLES.to_string(),
            label: "All Roles".to_string(),
        })
        .chain(self.summary_buckets.iter().map(|label| RoleOption {
            value: normalize_role(label),
            label: label.clone(),
        }))
        .collect()
    }

    fn builtin_teaching() -> Self {
        Self {
            kind: RosterKind::Teaching,
            storage_key: "teachingEmployees".to_string(),
            role_mapping: mapping(&[
                ("Associate Professor", "Senior Faculty"),
                ("Assistant Professor", "Junior Faculty"),
            ]),
            summary_buckets: vec!["Senior Faculty".to_string(), "Junior Faculty".to_string()],
            departments: strings(&["CSE", "ECE", "MECH", "EEE"]),
            designations: strings(&["Associate Professor", "Assistant Professor"]),
        }
    }

    fn builtin_non_teaching() -> Self {
        Self {
            kind: RosterKind::NonTeaching,
            storage_key: "nonTeachingEmployees".to_string(),
            role_mapping: mapping(&[
                ("Admin", "Administrative"),
                ("Accounts", "Administrative"),
                ("Clerk", "Administrative"),
                ("Maintenance", "Support Staff"),
                ("Peon", "Support Staff"),
                ("Cleaner", "Support Staff"),
            ]),
            summary_buckets: vec!["Administrative".to_string(), "Support Staff".to_string()],
            departments: strings(&["Admin", "Accounts", "Maintenance"]),
            designations: strings(&["Clerk", "Peon", "Cleaner"]),
        }
    }
}

fn mapping(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Defaults used to build a payslip from an employee's salary.
#[derive(Debug, Clone, Deserialize)]
pub struct PayslipTemplate {
    /// Period label used when a saved payslip does not set one.
    #[serde(default)]
    pub default_period: Option<String>,
    /// Days worked used when a saved payslip does not set one.
    pub default_days_worked: u32,
    /// Days in period used when a saved payslip does not set one.
    pub default_days_in_period: u32,
    /// Fraction of salary for each defaulted component; others default to 0.
    pub fractions: HashMap<PayComponent, Decimal>,
}

impl PayslipTemplate {
    /// Returns the configured fraction for a component (zero if unset).
    pub fn fraction(&self, component: PayComponent) -> Decimal {
        self.fractions
            .get(&component)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}

impl Default for PayslipTemplate {
    fn default() -> Self {
        Self {
            default_period: None,
            default_days_worked: 30,
            default_days_in_period: 30,
            fractions: [
                (PayComponent::Basic, Decimal::new(50, 2)),
                (PayComponent::Hra, Decimal::new(30, 2)),
                (PayComponent::Da, Decimal::new(20, 2)),
                (PayComponent::IncomeTax, Decimal::new(10, 2)),
                (PayComponent::ProvidentFund, Decimal::new(12, 2)),
            ]
            .into_iter()
            .collect(),
        }
    }
}

/// The complete engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    organisation: OrganisationConfig,
    teaching: RosterConfig,
    non_teaching: RosterConfig,
    payslip: PayslipTemplate,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(
        organisation: OrganisationConfig,
        teaching: RosterConfig,
        non_teaching: RosterConfig,
        payslip: PayslipTemplate,
    ) -> Self {
        Self {
            organisation,
            teaching,
            non_teaching,
            payslip,
        }
    }

    /// The built-in configuration: the two standard rosters with their fixed
    /// role mappings, a 10% payroll deduction and the standard payslip
    /// fractions.
    pub fn builtin() -> Self {
        Self::new(
            OrganisationConfig {
                name: "College".to_string(),
                currency_symbol: default_currency_symbol(),
                default_profile_pic: default_profile_pic(),
                id_prefix: default_id_prefix(),
                payroll_deduction_rate: default_deduction_rate(),
            },
            RosterConfig::builtin_teaching(),
            RosterConfig::builtin_non_teaching(),
            PayslipTemplate::default(),
        )
    }

    /// Returns the organisation settings.
    pub fn organisation(&self) -> &OrganisationConfig {
        &self.organisation
    }

    /// Returns the settings for a roster.
    pub fn roster(&self, kind: RosterKind) -> &RosterConfig {
        match kind {
            RosterKind::Teaching => &self.teaching,
            RosterKind::NonTeaching => &self.non_teaching,
        }
    }

    /// Returns the payslip template.
    pub fn payslip(&self) -> &PayslipTemplate {
        &self.payslip
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::builtin()
    }
}
