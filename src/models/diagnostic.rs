//! Record-level diagnostics.

use serde::{Deserialize, Serialize};

/// A problem with a single record that was skipped or degraded while the
/// rest of the batch was processed.
///
/// # Example
///
/// ```
/// use payroll_engine::models::Diagnostic;
///
/// let diagnostic = Diagnostic::for_record("missing_name", "employee has no name", "EMP009");
/// assert_eq!(diagnostic.record_id.as_deref(), Some("EMP009"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// A code identifying the kind of problem (e.g. "missing_id").
    pub code: String,
    /// A human-readable description of the problem.
    pub message: String,
    /// The id of the affected record, when it has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
}

impl Diagnostic {
    /// Creates a diagnostic that is not tied to an identifiable record.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            record_id: None,
        }
    }

    /// Creates a diagnostic for the record with the given id.
    pub fn for_record(
        code: impl Into<String>,
        message: impl Into<String>,
        record_id: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            record_id: Some(record_id.into()),
        }
    }
}
