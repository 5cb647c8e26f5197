//! Payroll report model.
//!
//! A [`PayrollReport`] is the envelope returned for a payroll query: the
//! line items and bucket totals for one roster, stamped with an id, a
//! timestamp and the engine version that produced them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Diagnostic, PayrollComputation, PayrollLineItem, PayrollSummary, RosterKind};

/// The result of a payroll query.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{PayrollComputation, PayrollReport, PayrollSummary, RosterKind};
///
/// let report = PayrollReport::new(
///     RosterKind::Teaching,
///     PayrollComputation::default(),
///     PayrollSummary::default(),
/// );
/// assert!(report.items.is_empty());
/// assert_eq!(report.engine_version, env!("CARGO_PKG_VERSION"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollReport {
    /// Unique identifier for this report.
    pub report_id: Uuid,
    /// When the report was produced.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that produced the report.
    pub engine_version: String,
    /// The roster the report covers.
    pub roster: RosterKind,
    /// Matching line items in roster order.
    pub items: Vec<PayrollLineItem>,
    /// Gross totals per role bucket.
    pub summary: PayrollSummary,
    /// Records that were skipped and filter problems.
    pub diagnostics: Vec<Diagnostic>,
}

impl PayrollReport {
    /// Wraps a computation and its summary in a freshly stamped report.
    pub fn new(roster: RosterKind, computation: PayrollComputation, summary: PayrollSummary) -> Self {
        Self {
            report_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            roster,
            items: computation.items,
            summary,
            diagnostics: computation.diagnostics,
        }
    }

    /// Prepends diagnostics produced before the computation ran, such as
    /// records that could not be decoded.
    pub fn with_leading_diagnostics(mut self, mut leading: Vec<Diagnostic>) -> Self {
        leading.append(&mut self.diagnostics);
        self.diagnostics = leading;
        self
    }
}
