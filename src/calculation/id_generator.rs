//! Employee id generation.

use crate::models::Employee;

/// Returns the next free id for a roster.
///
/// Only ids made of `prefix` followed by ASCII digits are considered; the
/// result is the prefix plus the largest number found, plus one, zero-padded
/// to three digits. Wider numbers are kept as-is.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::next_id;
///
/// assert_eq!(next_id(&[], "EMP"), "EMP001");
/// ```
pub fn next_id(roster: &[Employee], prefix: &str) -> String {
    next_id_from_ids(roster.iter().map(|e| e.id.as_str()), prefix)
}

/// Returns the next free id given the raw ids already in use.
///
/// Takes plain ids so that records which no longer decode still reserve
/// their numbers.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::next_id_from_ids;
///
/// assert_eq!(next_id_from_ids(["EMP009", "EMP002"], "EMP"), "EMP010");
/// ```
pub fn next_id_from_ids<'a, I>(ids: I, prefix: &str) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let max = ids
        .into_iter()
        .filter_map(|id| id.strip_prefix(prefix))
        .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
        .filter_map(|digits| digits.parse::<u64>().ok())
        .max()
        .unwrap_or(0);

    format!("{}{:03}", prefix, max.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn with_ids(ids: &[&str]) -> Vec<Employee> {
        ids.iter()
            .map(|id| Employee {
                id: id.to_string(),
                name: "A".to_string(),
                department: String::new(),
                designation: None,
                salary: Decimal::ONE,
                hire_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                profile_pic: String::new(),
                kind: None,
            })
            .collect()
    }

    #[test]
    fn test_uses_max_suffix_not_count() {
        assert_eq!(next_id(&with_ids(&["EMP001", "EMP003"]), "EMP"), "EMP004");
    }

    #[test]
    fn test_ignores_foreign_ids() {
        let roster = with_ids(&["EMP002", "T100", "EMPX9", "EMP", "emp050"]);
        assert_eq!(next_id(&roster, "EMP"), "EMP003");
    }

    #[test]
    fn test_grows_past_three_digits() {
        assert_eq!(next_id(&with_ids(&["EMP999"]), "EMP"), "EMP1000");
    }

    #[test]
    fn test_custom_prefix() {
        assert_eq!(next_id(&with_ids(&["NT007"]), "NT"), "NT008");
    }

    #[test]
    fn test_result_not_in_roster() {
        let roster = with_ids(&["EMP001", "EMP010", "EMP002"]);
        let id = next_id(&roster, "EMP");
        assert!(roster.iter().all(|e| e.id != id));
    }

    #[test]
    fn test_from_raw_ids() {
        let ids = vec!["EMP001", "EMP009", "NT400"];
        assert_eq!(next_id_from_ids(ids.iter().copied(), "EMP"), "EMP010");
        assert_eq!(next_id_from_ids(Vec::<&str>::new(), "NT"), "NT001");
    }
}
