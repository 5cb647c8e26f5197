//! Payslip models.
//!
//! A payslip uses a fixed schema of fifteen pay components, each of which is
//! either an earning or a deduction:
//!
//! | Earnings            | Deductions               |
//! |---------------------|--------------------------|
//! | `basic`             | `lop` (loss of pay)      |
//! | `hra`               | `income_tax` (`tax`)     |
//! | `da`                | `provident_fund` (`epf`) |
//! | `conveyance`        | `professional_tax`       |
//! | `medical`           | `esi`                    |
//! | `special_allowance` | `loan_recovery`          |
//! | `bonus`             | `other_deductions`       |
//! | `other_earnings`    |                          |
//!
//! Saved per-employee overrides ([`PayslipOverride`]) replace any subset of
//! the computed defaults; the resolved record is a [`Payslip`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, de};

use crate::error::{EngineError, EngineResult};

/// Whether a pay component adds to or subtracts from pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentCategory {
    /// Counted in gross earnings.
    Earning,
    /// Counted in total deductions.
    Deduction,
}

/// One line of a payslip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayComponent {
    /// Basic pay.
    Basic,
    /// House rent allowance.
    Hra,
    /// Dearness allowance.
    Da,
    /// Conveyance allowance.
    Conveyance,
    /// Medical allowance.
    Medical,
    /// Special allowance.
    SpecialAllowance,
    /// Bonus.
    Bonus,
    /// Any other earning.
    OtherEarnings,
    /// Loss of pay.
    Lop,
    /// Income tax withheld.
    #[serde(alias = "tax")]
    IncomeTax,
    /// Employee provident fund contribution.
    #[serde(alias = "epf")]
    ProvidentFund,
    /// Professional tax.
    ProfessionalTax,
    /// Employee state insurance.
    Esi,
    /// Loan or advance recovery.
    LoanRecovery,
    /// Any other deduction.
    OtherDeductions,
}

impl PayComponent {
    /// Every component, earnings first, in payslip display order.
    pub const ALL: [PayComponent; 15] = [
        PayComponent::Basic,
        PayComponent::Hra,
        PayComponent::Da,
        PayComponent::Conveyance,
        PayComponent::Medical,
        PayComponent::SpecialAllowance,
        PayComponent::Bonus,
        PayComponent::OtherEarnings,
        PayComponent::Lop,
        PayComponent::IncomeTax,
        PayComponent::ProvidentFund,
        PayComponent::ProfessionalTax,
        PayComponent::Esi,
        PayComponent::LoanRecovery,
        PayComponent::OtherDeductions,
    ];

    /// Returns whether this component is an earning or a deduction.
    pub fn category(&self) -> ComponentCategory {
        match self {
            PayComponent::Basic
            | PayComponent::Hra
            | PayComponent::Da
            | PayComponent::Conveyance
            | PayComponent::Medical
            | PayComponent::SpecialAllowance
            | PayComponent::Bonus
            | PayComponent::OtherEarnings => ComponentCategory::Earning,
            PayComponent::Lop
            | PayComponent::IncomeTax
            | PayComponent::ProvidentFund
            | PayComponent::ProfessionalTax
            | PayComponent::Esi
            | PayComponent::LoanRecovery
            | PayComponent::OtherDeductions => ComponentCategory::Deduction,
        }
    }

    /// The snake_case field name.
    pub fn key(&self) -> &'static str {
        match self {
            PayComponent::Basic => "basic",
            PayComponent::Hra => "hra",
            PayComponent::Da => "da",
            PayComponent::Conveyance => "conveyance",
            PayComponent::Medical => "medical",
            PayComponent::SpecialAllowance => "special_allowance",
            PayComponent::Bonus => "bonus",
            PayComponent::OtherEarnings => "other_earnings",
            PayComponent::Lop => "lop",
            PayComponent::IncomeTax => "income_tax",
            PayComponent::ProvidentFund => "provident_fund",
            PayComponent::ProfessionalTax => "professional_tax",
            PayComponent::Esi => "esi",
            PayComponent::LoanRecovery => "loan_recovery",
            PayComponent::OtherDeductions => "other_deductions",
        }
    }

    /// Printed label.
    pub fn label(&self) -> &'static str {
        match self {
            PayComponent::Basic => "Basic Salary",
            PayComponent::Hra => "House Rent Allowance",
            PayComponent::Da => "Dearness Allowance",
            PayComponent::Conveyance => "Conveyance Allowance",
            PayComponent::Medical => "Medical Allowance",
            PayComponent::SpecialAllowance => "Special Allowance",
            PayComponent::Bonus => "Bonus",
            PayComponent::OtherEarnings => "Other Earnings",
            PayComponent::Lop => "Loss of Pay",
            PayComponent::IncomeTax => "Income Tax",
            PayComponent::ProvidentFund => "Provident Fund",
            PayComponent::ProfessionalTax => "Professional Tax",
            PayComponent::Esi => "ESI",
            PayComponent::LoanRecovery => "Loan Recovery",
            PayComponent::OtherDeductions => "Other Deductions",
        }
    }

    /// Returns true if this component is an earning.
    pub fn is_earning(&self) -> bool {
        self.category() == ComponentCategory::Earning
    }
}

/// Amounts for every pay component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayComponents {
    /// Basic pay.
    pub basic: Decimal,
    /// House rent allowance.
    pub hra: Decimal,
    /// Dearness allowance.
    pub da: Decimal,
    /// Conveyance allowance.
    pub conveyance: Decimal,
    /// Medical allowance.
    pub medical: Decimal,
    /// Special allowance.
    pub special_allowance: Decimal,
    /// Bonus.
    pub bonus: Decimal,
    /// Other earnings.
    pub other_earnings: Decimal,
    /// Loss of pay.
    pub lop: Decimal,
    /// Income tax.
    pub income_tax: Decimal,
    /// Provident fund.
    pub provident_fund: Decimal,
    /// Professional tax.
    pub professional_tax: Decimal,
    /// Employee state insurance.
    pub esi: Decimal,
    /// Loan recovery.
    pub loan_recovery: Decimal,
    /// Other deductions.
    pub other_deductions: Decimal,
}

impl PayComponents {
    /// Returns the amount for a component.
    pub fn get(&self, component: PayComponent) -> Decimal {
        match component {
            PayComponent::Basic => self.basic,
            PayComponent::Hra => self.hra,
            PayComponent::Da => self.da,
            PayComponent::Conveyance => self.conveyance,
            PayComponent::Medical => self.medical,
            PayComponent::SpecialAllowance => self.special_allowance,
            PayComponent::Bonus => self.bonus,
            PayComponent::OtherEarnings => self.other_earnings,
            PayComponent::Lop => self.lop,
            PayComponent::IncomeTax => self.income_tax,
            PayComponent::ProvidentFund => self.provident_fund,
            PayComponent::ProfessionalTax => self.professional_tax,
            PayComponent::Esi => self.esi,
            PayComponent::LoanRecovery => self.loan_recovery,
            PayComponent::OtherDeductions => self.other_deductions,
        }
    }

    /// Sets the amount for a component.
    pub fn set(&mut self, component: PayComponent, amount: Decimal) {
        let slot = match component {
            PayComponent::Basic => &mut self.basic,
            PayComponent::Hra => &mut self.hra,
            PayComponent::Da => &mut self.da,
            PayComponent::Conveyance => &mut self.conveyance,
            PayComponent::Medical => &mut self.medical,
            PayComponent::SpecialAllowance => &mut self.special_allowance,
            PayComponent::Bonus => &mut self.bonus,
            PayComponent::OtherEarnings => &mut self.other_earnings,
            PayComponent::Lop => &mut self.lop,
            PayComponent::IncomeTax => &mut self.income_tax,
            PayComponent::ProvidentFund => &mut self.provident_fund,
            PayComponent::ProfessionalTax => &mut self.professional_tax,
            PayComponent::Esi => &mut self.esi,
            PayComponent::LoanRecovery => &mut self.loan_recovery,
            PayComponent::OtherDeductions => &mut self.other_deductions,
        };
        *slot = amount;
    }

    /// Sum of all components in the given category.
    pub fn total(&self, category: ComponentCategory) -> Decimal {
        PayComponent::ALL
            .iter()
            .filter(|c| c.category() == category)
            .map(|c| self.get(*c))
            .sum()
    }
}

/// Reads a day count given either as a number or as a numeric string.
/// A blank string counts as absent.
fn day_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(days)) => Ok(Some(days)),
        Some(Raw::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse()
                .map(Some)
                .map_err(|_| de::Error::custom(format!("invalid day count '{}'", text)))
        }
    }
}

/// Optional amounts for every pay component, as saved in an override.
///
/// Older saved records use `tax` and `epf`; both are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    basic: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hra: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    da: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    conveyance: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    medical: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    special_allowance: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bonus: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    other_earnings: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lop: Option<Decimal>,
    #[serde(alias = "tax", skip_serializing_if = "Option::is_none")]
    income_tax: Option<Decimal>,
    #[serde(alias = "epf", skip_serializing_if = "Option::is_none")]
    provident_fund: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    professional_tax: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    esi: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    loan_recovery: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    other_deductions: Option<Decimal>,
}

impl ComponentOverrides {
    /// Returns the overridden amount for a component, if any.
    pub fn get(&self, component: PayComponent) -> Option<Decimal> {
        match component {
            PayComponent::Basic => self.basic,
            PayComponent::Hra => self.hra,
            PayComponent::Da => self.da,
            PayComponent::Conveyance => self.conveyance,
            PayComponent::Medical => self.medical,
            PayComponent::SpecialAllowance => self.special_allowance,
            PayComponent::Bonus => self.bonus,
            PayComponent::OtherEarnings => self.other_earnings,
            PayComponent::Lop => self.lop,
            PayComponent::IncomeTax => self.income_tax,
            PayComponent::ProvidentFund => self.provident_fund,
            PayComponent::ProfessionalTax => self.professional_tax,
            PayComponent::Esi => self.esi,
            PayComponent::LoanRecovery => self.loan_recovery,
            PayComponent::OtherDeductions => self.other_deductions,
        }
    }

    /// Overrides the amount for a component.
    pub fn set(&mut self, component: PayComponent, amount: Decimal) {
        let slot = match component {
            PayComponent::Basic => &mut self.basic,
            PayComponent::Hra => &mut self.hra,
            PayComponent::Da => &mut self.da,
            PayComponent::Conveyance => &mut self.conveyance,
            PayComponent::Medical => &mut self.medical,
            PayComponent::SpecialAllowance => &mut self.special_allowance,
            PayComponent::Bonus => &mut self.bonus,
            PayComponent::OtherEarnings => &mut self.other_earnings,
            PayComponent::Lop => &mut self.lop,
            PayComponent::IncomeTax => &mut self.income_tax,
            PayComponent::ProvidentFund => &mut self.provident_fund,
            PayComponent::ProfessionalTax => &mut self.professional_tax,
            PayComponent::Esi => &mut self.esi,
            PayComponent::LoanRecovery => &mut self.loan_recovery,
            PayComponent::OtherDeductions => &mut self.other_deductions,
        };
        *slot = Some(amount);
    }
}

/// A saved per-employee payslip record.
///
/// Every field is optional; present fields replace the computed defaults when
/// the payslip is resolved.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{PayComponent, PayslipOverride};
/// use rust_decimal::Decimal;
///
/// let saved: PayslipOverride =
///     serde_json::from_str(r#"{"period": "May 2025", "hra": 9000, "tax": 0}"#).unwrap();
/// assert_eq!(saved.components.get(PayComponent::Hra), Some(Decimal::new(9000, 0)));
/// assert_eq!(saved.components.get(PayComponent::IncomeTax), Some(Decimal::ZERO));
/// assert_eq!(saved.components.get(PayComponent::Basic), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayslipOverride {
    /// Date the payslip was issued.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pay_date: Option<NaiveDate>,
    /// Pay month (1-12).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    /// Pay year.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Free-text period label (e.g. "April 2025").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    /// Days worked in the period. Older records store this as `days`,
    /// often as a string.
    #[serde(
        alias = "days",
        deserialize_with = "day_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub days_worked: Option<u32>,
    /// Days in the period.
    #[serde(deserialize_with = "day_count", skip_serializing_if = "Option::is_none")]
    pub days_in_period: Option<u32>,
    /// Overridden component amounts.
    #[serde(flatten)]
    pub components: ComponentOverrides,
}

impl PayslipOverride {
    /// Checks that the override can be saved.
    ///
    /// Component amounts must be non-negative, the month must be 1-12 and
    /// days worked cannot exceed days in the period.
    pub fn validate(&self) -> EngineResult<()> {
        for component in PayComponent::ALL {
            if self
                .components
                .get(component)
                .is_some_and(|amount| amount < Decimal::ZERO)
            {
                return Err(EngineError::InvalidPayslip {
                    field: component.key().to_string(),
                    message: "cannot be negative".to_string(),
                });
            }
        }

        if let Some(month) = self.month.filter(|m| !(1..=12).contains(m)) {
            return Err(EngineError::InvalidPayslip {
                field: "month".to_string(),
                message: format!("must be between 1 and 12, got {}", month),
            });
        }

        if let (Some(worked), Some(total)) = (self.days_worked, self.days_in_period) {
            if worked > total {
                return Err(EngineError::InvalidPayslip {
                    field: "days_worked".to_string(),
                    message: format!("{} exceeds the {} days in the period", worked, total),
                });
            }
        }

        Ok(())
    }
}

/// The pay period printed on a payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipPeriod {
    /// Issue date, if recorded.
    pub pay_date: Option<NaiveDate>,
    /// Pay month (1-12), if recorded.
    pub month: Option<u32>,
    /// Pay year, if recorded.
    pub year: Option<i32>,
    /// Display label.
    pub label: String,
}

/// A fully resolved payslip.
///
/// `net_pay` may be negative when deductions exceed earnings; that is shown
/// as-is rather than treated as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payslip {
    /// Employee id.
    pub employee_id: String,
    /// Employee name.
    pub name: String,
    /// Department, or "N/A".
    pub department: String,
    /// Designation, or "N/A".
    pub designation: String,
    /// Pay period.
    pub period: PayslipPeriod,
    /// Days worked.
    pub days_worked: u32,
    /// Days in the period.
    pub days_in_period: u32,
    /// Component amounts.
    pub components: PayComponents,
    /// Sum of all earnings.
    pub gross_earnings: Decimal,
    /// Sum of all deductions.
    pub total_deductions: Decimal,
    /// Gross earnings minus total deductions.
    pub net_pay: Decimal,
}

impl Payslip {
    /// Earning lines in display order.
    pub fn earnings(&self) -> Vec<(PayComponent, Decimal)> {
        self.lines(ComponentCategory::Earning)
    }

    /// Deduction lines in display order.
    pub fn deductions(&self) -> Vec<(PayComponent, Decimal)> {
        self.lines(ComponentCategory::Deduction)
    }

    fn lines(&self, category: ComponentCategory) -> Vec<(PayComponent, Decimal)> {
        PayComponent::ALL
            .iter()
            .filter(|c| c.category() == category)
            .map(|c| (*c, self.components.get(*c)))
            .collect()
    }
}
