//! Payslip resolution.
//!
//! A payslip starts from template defaults derived from the employee's
//! salary, then takes any values saved for that employee. Totals are always
//! recomputed from the merged components.

use tracing::debug;

use crate::config::PayslipTemplate;
use crate::models::{
    ComponentCategory, Employee, NOT_AVAILABLE, PayComponent, PayComponents, Payslip,
    PayslipOverride, PayslipPeriod, YearMonth,
};

use super::rounding::fraction_of;

/// Computes the template default for every component.
///
/// Each component is `round(salary * fraction)`; components without a
/// configured fraction are zero.
pub fn default_components(employee: &Employee, template: &PayslipTemplate) -> PayComponents {
    let mut components = PayComponents::default();
    for component in PayComponent::ALL {
        components.set(
            component,
            fraction_of(employee.salary, template.fraction(component)),
        );
    }
    components
}

fn resolve_period(saved: Option<&PayslipOverride>, template: &PayslipTemplate) -> PayslipPeriod {
    let pay_date = saved.and_then(|s| s.pay_date);
    let month = saved.and_then(|s| s.month);
    let year = saved.and_then(|s| s.year);

    let label = saved
        .and_then(|s| s.period.as_deref())
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .or_else(|| {
            year.zip(month)
                .and_then(|(y, m)| YearMonth::new(y, m))
                .map(|ym| ym.long_label())
        })
        .or_else(|| template.default_period.clone())
        .unwrap_or_default();

    PayslipPeriod {
        pay_date,
        month,
        year,
        label,
    }
}

/// Resolves the payslip for an employee.
///
/// Fields present in `saved` replace the template defaults one by one;
/// absent fields keep their defaults. `gross_earnings` and
/// `total_deductions` are the sums over the merged earning and deduction
/// components, and `net_pay` is their difference, which may be negative.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::resolve_payslip;
/// use payroll_engine::config::PayslipTemplate;
/// use payroll_engine::models::Employee;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "EMP001".to_string(),
///     name: "A".to_string(),
///     department: "CSE".to_string(),
///     designation: None,
///     salary: Decimal::new(50000, 0),
///     hire_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     profile_pic: String::new(),
///     kind: None,
/// };
///
/// let payslip = resolve_payslip(&employee, None, &PayslipTemplate::default());
/// assert_eq!(payslip.gross_earnings, Decimal::new(50000, 0));
/// assert_eq!(payslip.total_deductions, Decimal::new(11000, 0));
/// assert_eq!(payslip.net_pay, Decimal::new(39000, 0));
/// ```
pub fn resolve_payslip(
    employee: &Employee,
    saved: Option<&PayslipOverride>,
    template: &PayslipTemplate,
) -> Payslip {
    let mut components = default_components(employee, template);

    if let Some(saved) = saved {
        for component in PayComponent::ALL {
            if let Some(amount) = saved.components.get(component) {
                components.set(component, amount);
            }
        }
        debug!(id = %employee.id, "Applied saved payslip values");
    }

    let gross_earnings = components.total(ComponentCategory::Earning);
    let total_deductions = components.total(ComponentCategory::Deduction);

    let department = match employee.department.trim() {
        "" => NOT_AVAILABLE,
        department => department,
    };

    Payslip {
        employee_id: employee.id.clone(),
        name: employee.name.clone(),
        department: department.to_string(),
        designation: employee.designation().unwrap_or(NOT_AVAILABLE).to_string(),
        period: resolve_period(saved, template),
        days_worked: saved
            .and_then(|s| s.days_worked)
            .unwrap_or(template.default_days_worked),
        days_in_period: saved
            .and_then(|s| s.days_in_period)
            .unwrap_or(template.default_days_in_period),
        components,
        gross_earnings,
        total_deductions,
        net_pay: gross_earnings - total_deductions,
    }
}
