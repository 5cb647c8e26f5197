//! Per-bucket payroll totals.

use rust_decimal::Decimal;

use crate::models::{BucketTotal, PayrollLineItem, PayrollSummary};

use super::role_mapping::normalize_role;

/// Sums gross salaries per role bucket.
///
/// The result lists every configured bucket, in configured order, starting
/// from zero. Line items whose role is not one of `buckets` (including
/// "Unknown") are dropped.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::summarize;
///
/// let buckets = vec!["Administrative".to_string(), "Support Staff".to_string()];
/// let summary = summarize(&[], &buckets);
///
/// assert_eq!(summary.buckets.len(), 2);
/// assert_eq!(summary.buckets[1].key, "support_staff");
/// assert!(summary.grand_total().is_zero());
/// ```
pub fn summarize(items: &[PayrollLineItem], buckets: &[String]) -> PayrollSummary {
    let mut totals: Vec<BucketTotal> = buckets
        .iter()
        .map(|label| BucketTotal {
            key: normalize_role(label),
            label: label.clone(),
            total_gross: Decimal::ZERO,
        })
        .collect();

    for item in items {
        let key = normalize_role(&item.role);
        if let Some(bucket) = totals.iter_mut().find(|b| b.key == key) {
            bucket.total_gross += item.gross_salary;
        }
    }

    PayrollSummary { buckets: totals }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn item(role: &str, gross: i64) -> PayrollLineItem {
        PayrollLineItem {
            id: "EMP001".to_string(),
            name: "A".to_string(),
            role: role.to_string(),
            department: "Office".to_string(),
            designation: "Clerk".to_string(),
            gross_salary: Decimal::new(gross, 0),
            deductions: Decimal::ZERO,
            net_pay: Decimal::new(gross, 0),
            hire_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            profile_pic: String::new(),
        }
    }

    fn non_teaching_buckets() -> Vec<String> {
        vec!["Administrative".to_string(), "Support Staff".to_string()]
    }

    #[test]
    fn test_sums_per_bucket() {
        let items = vec![
            item("Administrative", 100),
            item("Administrative", 200),
            item("Support Staff", 50),
        ];
        let summary = summarize(&items, &non_teaching_buckets());

        assert_eq!(summary.total("administrative"), Some(Decimal::new(300, 0)));
        assert_eq!(summary.total("support_staff"), Some(Decimal::new(50, 0)));
    }

    #[test]
    fn test_empty_buckets_are_zero_and_ordered() {
        let items = vec![item("Support Staff", 75)];
        let summary = summarize(&items, &non_teaching_buckets());

        let keys: Vec<&str> = summary.buckets.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, vec!["administrative", "support_staff"]);
        assert_eq!(summary.buckets[0].total_gross, Decimal::ZERO);
        assert_eq!(summary.buckets[0].label, "Administrative");
    }

    #[test]
    fn test_unknown_roles_are_dropped() {
        let items = vec![item("Unknown", 999), item("Administrative", 1)];
        let summary = summarize(&items, &non_teaching_buckets());

        assert_eq!(summary.total("unknown"), None);
        assert_eq!(summary.grand_total(), Decimal::new(1, 0));
    }
}
