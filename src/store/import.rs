//! Bulk import of employee rows.
//!
//! Rows come from a spreadsheet or CSV export already split into cells. The
//! first row names the columns; every later row is one employee.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{Diagnostic, Employee, RosterKind};

/// Columns every import must have.
pub const REQUIRED_HEADERS: [&str; 6] = ["id", "name", "department", "salary", "hiredate", "type"];

/// Parsed import rows, split by roster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportBatch {
    /// Teaching rows in file order.
    pub teaching: Vec<Employee>,
    /// Non-teaching rows in file order.
    pub non_teaching: Vec<Employee>,
    /// Rows that were rejected.
    pub skipped: Vec<Diagnostic>,
}

impl ImportBatch {
    /// Returns the rows for one roster.
    pub fn rows(&self, kind: RosterKind) -> &[Employee] {
        match kind {
            RosterKind::Teaching => &self.teaching,
            RosterKind::NonTeaching => &self.non_teaching,
        }
    }

    /// Number of accepted rows.
    pub fn accepted(&self) -> usize {
        self.teaching.len() + self.non_teaching.len()
    }
}

/// Outcome of applying an [`ImportBatch`] to the stored rosters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    /// Rows whose id was new to the roster.
    pub inserted: usize,
    /// Rows that replaced an existing record.
    pub updated: usize,
    /// Rows rejected while parsing.
    pub skipped: usize,
}

struct Columns {
    width: usize,
    index: HashMap<String, usize>,
}

impl Columns {
    fn cell<'a>(&self, row: &'a [String], name: &str) -> &'a str {
        self.index
            .get(name)
            .and_then(|&i| row.get(i))
            .map(|c| c.trim())
            .unwrap_or("")
    }
}

fn parse_header(header: &[String]) -> EngineResult<Columns> {
    let mut index = HashMap::new();
    for (i, name) in header.iter().enumerate() {
        index.entry(name.trim().to_lowercase()).or_insert(i);
    }

    let missing: Vec<&str> = REQUIRED_HEADERS
        .iter()
        .copied()
        .filter(|h| !index.contains_key(*h))
        .collect();

    if !missing.is_empty() {
        return Err(EngineError::InvalidImport {
            message: format!("missing required headers: {}", missing.join(", ")),
        });
    }

    Ok(Columns {
        width: header.len(),
        index,
    })
}

fn is_iso_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

fn parse_row(
    columns: &Columns,
    row: &[String],
    line: usize,
    default_pic: &str,
) -> Result<(RosterKind, Employee), Diagnostic> {
    let id = columns.cell(row, "id");
    let reject = |code: &str, message: String| {
        if id.is_empty() {
            Diagnostic::new(code, message)
        } else {
            Diagnostic::for_record(code, message, id)
        }
    };

    if row.len() < columns.width {
        return Err(reject(
            "short_row",
            format!("row {} has {} of {} columns", line, row.len(), columns.width),
        ));
    }

    if let Some(field) = REQUIRED_HEADERS
        .iter()
        .find(|h| columns.cell(row, h).is_empty())
    {
        return Err(reject(
            "missing_field",
            format!("row {} is missing '{}'", line, field),
        ));
    }

    let raw_salary = columns.cell(row, "salary");
    let salary = Decimal::from_str(raw_salary)
        .ok()
        .filter(|s| *s > Decimal::ZERO)
        .ok_or_else(|| {
            reject(
                "invalid_salary",
                format!("row {} has invalid salary '{}'", line, raw_salary),
            )
        })?;

    let raw_date = columns.cell(row, "hiredate");
    let hire_date = Some(raw_date)
        .filter(|d| is_iso_date(d))
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .ok_or_else(|| {
            reject(
                "invalid_date",
                format!("row {} has invalid hire date '{}'", line, raw_date),
            )
        })?;

    let raw_kind = columns.cell(row, "type");
    let kind = RosterKind::from_str(raw_kind).map_err(|_| {
        reject(
            "unknown_type",
            format!("row {} has unknown type '{}'", line, raw_kind),
        )
    })?;

    let employee = Employee {
        id: id.to_string(),
        name: columns.cell(row, "name").to_string(),
        department: columns.cell(row, "department").to_string(),
        designation: Some(columns.cell(row, "designation").to_string()),
        salary,
        hire_date,
        profile_pic: columns.cell(row, "profilepic").to_string(),
        kind: None,
    }
    .normalized(kind, default_pic);

    Ok((kind, employee))
}

/// Parses spreadsheet rows into import batches.
///
/// The first row is the header; names are matched after trimming and
/// lowercasing, so `hireDate` and ` HIREDATE ` both work. Blank rows are
/// ignored. Rows that are short, miss a required value, or have a bad
/// salary, date or type are reported in [`ImportBatch::skipped`] while the
/// rest of the file is still imported.
///
/// # Errors
///
/// Returns `InvalidImport` if `rows` is empty or the header lacks any of
/// [`REQUIRED_HEADERS`].
///
/// # Examples
///
/// ```
/// use payroll_engine::store::parse_import_rows;
///
/// let rows: Vec<Vec<String>> = [
///     vec!["id", "name", "department", "salary", "hireDate", "type"],
///     vec!["EMP010", "Ravi", "Accounts", "25000", "2023-03-15", "nonteaching"],
///     vec!["EMP011", "Meena", "CSE", "-5", "2023-03-15", "teaching"],
/// ]
/// .iter()
/// .map(|r| r.iter().map(|c| c.to_string()).collect())
/// .collect();
///
/// let batch = parse_import_rows(&rows, "https://example.com/default.jpg").unwrap();
/// assert_eq!(batch.non_teaching.len(), 1);
/// assert_eq!(batch.skipped.len(), 1);
/// ```
pub fn parse_import_rows(rows: &[Vec<String>], default_pic: &str) -> EngineResult<ImportBatch> {
    let (header, body) = rows.split_first().ok_or_else(|| EngineError::InvalidImport {
        message: "file is empty".to_string(),
    })?;
    let columns = parse_header(header)?;

    let mut batch = ImportBatch::default();

    for (offset, row) in body.iter().enumerate() {
        if row.iter().all(|c| c.trim().is_empty()) {
            continue;
        }

        let line = offset + 2;
        match parse_row(&columns, row, line, default_pic) {
            Ok((RosterKind::Teaching, employee)) => batch.teaching.push(employee),
            Ok((RosterKind::NonTeaching, employee)) => batch.non_teaching.push(employee),
            Err(diagnostic) => {
                warn!(line, code = %diagnostic.code, "Skipping import row");
                batch.skipped.push(diagnostic);
            }
        }
    }

    info!(
        teaching = batch.teaching.len(),
        non_teaching = batch.non_teaching.len(),
        skipped = batch.skipped.len(),
        "Parsed import rows"
    );

    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PIC: &str = "https://example.com/default.jpg";

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    const HEADER: &[&str] = &["id", "name", "department", "salary", "hireDate", "type"];

    #[test]
    fn test_empty_input_is_rejected() {
        assert!(matches!(
            parse_import_rows(&[], PIC),
            Err(EngineError::InvalidImport { .. })
        ));
    }

    #[test]
    fn test_missing_header_is_rejected() {
        let data = rows(&[&["id", "name", "department", "salary", "type"]]);
        match parse_import_rows(&data, PIC) {
            Err(EngineError::InvalidImport { message }) => assert!(message.contains("hiredate")),
            other => panic!("Expected InvalidImport, got {:?}", other),
        }
    }

    #[test]
    fn test_headers_are_case_insensitive_and_trimmed() {
        let data = rows(&[
            &[" ID ", "Name", "DEPARTMENT", "Salary", "HireDate", "Type", "ProfilePic"],
            &["EMP001", "Anita", "CSE", "90000", "2020-06-15", "Teaching", "https://x/a.jpg"],
        ]);
        let batch = parse_import_rows(&data, PIC).unwrap();

        assert_eq!(batch.teaching.len(), 1);
        let employee = &batch.teaching[0];
        assert_eq!(employee.profile_pic, "https://x/a.jpg");
        assert_eq!(employee.kind, Some(RosterKind::Teaching));
        assert_eq!(employee.designation, None);
    }

    #[test]
    fn test_rows_split_by_type() {
        let data = rows(&[
            HEADER,
            &["EMP001", "Anita", "CSE", "90000", "2020-06-15", "teaching"],
            &["EMP002", "Ravi", "Accounts", "25000", "2023-03-15", "nonteaching"],
            &["EMP003", "Sita", "Office", "20000", "2023-03-15", "Non-Teaching"],
        ]);
        let batch = parse_import_rows(&data, PIC).unwrap();

        assert_eq!(batch.teaching.len(), 1);
        assert_eq!(batch.non_teaching.len(), 2);
        assert_eq!(batch.non_teaching[0].profile_pic, PIC);
        assert_eq!(batch.accepted(), 3);
    }

    #[test]
    fn test_bad_rows_are_skipped_with_reasons() {
        let data = rows(&[
            HEADER,
            &["EMP001", "Anita", "CSE", "90000"],
            &["EMP002", "", "CSE", "90000", "2020-06-15", "teaching"],
            &["EMP003", "B", "CSE", "abc", "2020-06-15", "teaching"],
            &["EMP004", "C", "CSE", "0", "2020-06-15", "teaching"],
            &["EMP005", "D", "CSE", "100", "15/06/2020", "teaching"],
            &["EMP006", "E", "CSE", "100", "2020-02-30", "teaching"],
            &["EMP007", "F", "CSE", "100", "2020-06-15", "contract"],
            &["EMP008", "G", "CSE", "100", "2020-06-15", "teaching"],
        ]);
        let batch = parse_import_rows(&data, PIC).unwrap();

        let codes: Vec<&str> = batch.skipped.iter().map(|d| d.code.as_str()).collect();
        assert_eq!(
            codes,
            vec![
                "short_row",
                "missing_field",
                "invalid_salary",
                "invalid_salary",
                "invalid_date",
                "invalid_date",
                "unknown_type"
            ]
        );
        assert_eq!(batch.skipped[2].record_id.as_deref(), Some("EMP003"));
        assert_eq!(batch.teaching.len(), 1);
        assert_eq!(batch.teaching[0].id, "EMP008");
    }

    #[test]
    fn test_blank_rows_are_ignored() {
        let data = rows(&[HEADER, &["", "", "", "", "", ""], &[]]);
        let batch = parse_import_rows(&data, PIC).unwrap();
        assert_eq!(batch.accepted(), 0);
        assert!(batch.skipped.is_empty());
    }

    #[test]
    fn test_iso_date_shape() {
        assert!(is_iso_date("2025-04-30"));
        assert!(!is_iso_date("2025-4-30"));
        assert!(!is_iso_date("2025/04/30"));
    }
}
