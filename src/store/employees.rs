//! Roster persistence.
//!
//! [`EmployeeStore`] keeps each roster as a JSON array under the storage key
//! configured for it. Reads are forgiving: a missing, corrupt or oddly shaped
//! document reads as an empty roster, and individual records that fail to
//! decode are left out of the result with a warning.
//!
//! Mutations work on the stored entries as they are. An entry that no longer
//! decodes is written back untouched and its id stays reserved; only
//! [`EmployeeStore::delete_employee`] removes an entry. A roster document
//! that cannot be read at all is never overwritten by a mutation. Failed
//! writes are logged rather than surfaced, matching how the rosters were
//! kept in browser storage.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::calculation::{next_id_from_ids, resolve_payslip};
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Diagnostic, Employee, NewEmployee, Payslip, RosterKind, decode_roster, record_id,
};

use super::import::{ImportBatch, ImportSummary};
use super::kv::KeyValueStore;
use super::payslips::{PayslipStore, load_overrides};

/// Rosters and saved payslips on top of a key-value store.
///
/// # Example
///
/// ```
/// use payroll_engine::config::EngineConfig;
/// use payroll_engine::models::{NewEmployee, RosterKind};
/// use payroll_engine::store::{EmployeeStore, MemoryStore};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let mut store = EmployeeStore::new(MemoryStore::new(), EngineConfig::builtin());
/// let added = store
///     .add_employee(
///         RosterKind::NonTeaching,
///         NewEmployee {
///             id: None,
///             name: "Ravi".to_string(),
///             department: "Accounts".to_string(),
///             designation: Some("Clerk".to_string()),
///             salary: Decimal::new(25000, 0),
///             hire_date: NaiveDate::from_ymd_opt(2023, 3, 15).unwrap(),
///             profile_pic: None,
///         },
///     )
///     .unwrap();
///
/// assert_eq!(added.id, "EMP001");
/// assert_eq!(store.roster(RosterKind::NonTeaching).len(), 1);
/// ```
pub struct EmployeeStore<S> {
    kv: S,
    config: EngineConfig,
}

impl<S: KeyValueStore> EmployeeStore<S> {
    /// Creates a store over `kv` using the given configuration.
    pub fn new(kv: S, config: EngineConfig) -> Self {
        Self { kv, config }
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the underlying key-value store.
    pub fn kv(&self) -> &S {
        &self.kv
    }

    /// Consumes the store, returning the key-value store.
    pub fn into_inner(self) -> S {
        self.kv
    }

    fn storage_key(&self, kind: RosterKind) -> &str {
        &self.config.roster(kind).storage_key
    }

    fn default_pic(&self) -> &str {
        &self.config.organisation().default_profile_pic
    }

    /// Loads a roster along with diagnostics for records that were dropped.
    pub fn load_roster(&self, kind: RosterKind) -> (Vec<Employee>, Vec<Diagnostic>) {
        let key = self.storage_key(kind);

        let values = match self.kv.get(key) {
            Ok(Some(Value::Array(values))) => values,
            Ok(None) => return (Vec::new(), Vec::new()),
            Ok(Some(_)) => {
                warn!(roster = %kind, key, "Stored roster is not an array, treating as empty");
                let diagnostic = Diagnostic::new(
                    "invalid_roster",
                    format!("stored value for '{}' is not an array", key),
                );
                return (Vec::new(), vec![diagnostic]);
            }
            Err(err) => {
                error!(roster = %kind, key, error = %err, "Failed to read roster");
                return (Vec::new(), vec![Diagnostic::new("invalid_roster", err.to_string())]);
            }
        };

        decode_roster(values)
    }

    /// Loads a roster, dropping anything that cannot be read.
    pub fn roster(&self, kind: RosterKind) -> Vec<Employee> {
        self.load_roster(kind).0
    }

    /// Replaces a stored roster.
    ///
    /// Write failures are logged and otherwise ignored.
    pub fn save_roster(&mut self, kind: RosterKind, employees: &[Employee]) {
        let values: EngineResult<Vec<Value>> = employees.iter().map(encode).collect();
        match values {
            Ok(values) => self.write_raw(kind, values),
            Err(err) => error!(roster = %kind, error = %err, "Failed to encode roster"),
        }
    }

    /// Reads the stored entries of a roster without decoding them.
    fn raw_roster(&self, kind: RosterKind) -> EngineResult<Vec<Value>> {
        let key = self.storage_key(kind);
        match self.kv.get(key)? {
            None => Ok(Vec::new()),
            Some(Value::Array(values)) => Ok(values),
            Some(_) => Err(EngineError::StorageRead {
                key: key.to_string(),
                message: "stored roster is not an array".to_string(),
            }),
        }
    }

    fn write_raw(&mut self, kind: RosterKind, values: Vec<Value>) {
        let key = self.storage_key(kind).to_string();
        if let Err(err) = self.kv.set(&key, Value::Array(values)) {
            error!(roster = %kind, key = %key, error = %err, "Failed to save roster");
        }
    }

    /// Finds an employee by id.
    ///
    /// # Errors
    ///
    /// Returns `EmployeeNotFound` if no employee in the roster has `id`.
    pub fn find(&self, kind: RosterKind, id: &str) -> EngineResult<Employee> {
        self.roster(kind)
            .into_iter()
            .find(|e| e.id == id)
            .ok_or_else(|| EngineError::EmployeeNotFound { id: id.to_string() })
    }

    /// Adds a new employee from the manual entry form.
    ///
    /// A missing or blank id is replaced by the next free id for the
    /// organisation's prefix. Ids held by stored entries that no longer
    /// decode count as taken.
    ///
    /// # Errors
    ///
    /// Returns `InvalidEmployee` if the name or department is blank, the
    /// salary is not positive, or the id is already taken, and
    /// `StorageRead` if the stored roster cannot be read.
    pub fn add_employee(&mut self, kind: RosterKind, new: NewEmployee) -> EngineResult<Employee> {
        if new.name.trim().is_empty() {
            return Err(invalid("name", "is required"));
        }
        if new.department.trim().is_empty() {
            return Err(invalid("department", "is required"));
        }
        if new.salary <= Decimal::ZERO {
            return Err(invalid("salary", "must be positive"));
        }

        let mut raw = self.raw_roster(kind)?;

        let id = match new.id.as_deref().map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => {
                if raw.iter().filter_map(record_id).any(|taken| taken == id) {
                    return Err(invalid("id", &format!("'{}' already exists", id)));
                }
                id.to_string()
            }
            None => next_id_from_ids(
                raw.iter().filter_map(record_id),
                &self.config.organisation().id_prefix,
            ),
        };

        let employee = new.into_employee(id).normalized(kind, self.default_pic());
        raw.push(encode(&employee)?);
        self.write_raw(kind, raw);

        info!(roster = %kind, id = %employee.id, "Added employee");
        Ok(employee)
    }

    /// Inserts or replaces an employee by id; returns true if it was new.
    ///
    /// A stored entry with the same id is replaced even if it no longer
    /// decodes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidEmployee` if the record has no id or name or its
    /// salary is negative, and `StorageRead` if the stored roster cannot be
    /// read.
    pub fn upsert_employee(&mut self, kind: RosterKind, employee: Employee) -> EngineResult<bool> {
        if !employee.is_identified() {
            return Err(invalid("id", "employee must have an id and a name"));
        }
        if employee.salary < Decimal::ZERO {
            return Err(invalid("salary", "cannot be negative"));
        }

        let employee = employee.normalized(kind, self.default_pic());
        let mut raw = self.raw_roster(kind)?;
        let inserted = upsert(&mut raw, &employee.id, encode(&employee)?);
        self.write_raw(kind, raw);

        Ok(inserted)
    }

    /// Removes an employee; returns false if no record had that id.
    ///
    /// Matches on the stored id, so an entry that no longer decodes can
    /// still be deleted. Saved payslips for the employee are kept; see
    /// [`prune_orphaned_payslips`](Self::prune_orphaned_payslips).
    pub fn delete_employee(&mut self, kind: RosterKind, id: &str) -> bool {
        let mut raw = match self.raw_roster(kind) {
            Ok(raw) => raw,
            Err(err) => {
                error!(roster = %kind, id, error = %err, "Cannot delete from unreadable roster");
                return false;
            }
        };

        let id = id.trim();
        let before = raw.len();
        raw.retain(|value| record_id(value) != Some(id));

        if raw.len() == before {
            return false;
        }

        self.write_raw(kind, raw);
        info!(roster = %kind, id, "Deleted employee");
        true
    }

    /// Applies an import batch to both rosters.
    ///
    /// Rows are upserted in order, so a later row with the same id replaces
    /// an earlier one. When a roster cannot be read its rows are counted as
    /// skipped and the stored document is left alone.
    pub fn import(&mut self, batch: &ImportBatch) -> ImportSummary {
        let mut summary = ImportSummary {
            skipped: batch.skipped.len(),
            ..Default::default()
        };

        for kind in RosterKind::ALL {
            let rows = batch.rows(kind);
            if rows.is_empty() {
                continue;
            }

            let mut raw = match self.raw_roster(kind) {
                Ok(raw) => raw,
                Err(err) => {
                    error!(roster = %kind, error = %err, "Skipping import into unreadable roster");
                    summary.skipped += rows.len();
                    continue;
                }
            };

            for row in rows {
                let employee = row.clone().normalized(kind, self.default_pic());
                let value = match encode(&employee) {
                    Ok(value) => value,
                    Err(err) => {
                        error!(roster = %kind, id = %employee.id, error = %err, "Failed to encode row");
                        summary.skipped += 1;
                        continue;
                    }
                };

                if upsert(&mut raw, &employee.id, value) {
                    summary.inserted += 1;
                } else {
                    summary.updated += 1;
                }
            }
            self.write_raw(kind, raw);
        }

        info!(
            inserted = summary.inserted,
            updated = summary.updated,
            skipped = summary.skipped,
            "Imported employees"
        );
        summary
    }

    /// Access to saved payslips.
    pub fn payslips(&mut self) -> PayslipStore<'_, S> {
        PayslipStore::new(&mut self.kv)
    }

    /// Resolves the payslip for an employee, applying any saved values.
    ///
    /// # Errors
    ///
    /// Returns `EmployeeNotFound` if the employee is not in the roster.
    pub fn payslip_for(&self, kind: RosterKind, id: &str) -> EngineResult<Payslip> {
        let employee = self.find(kind, id)?;
        let saved = load_overrides(&self.kv).remove(id);
        Ok(resolve_payslip(&employee, saved.as_ref(), self.config.payslip()))
    }

    /// Deletes saved payslips whose employee is on neither roster; returns
    /// how many were removed.
    ///
    /// Stored entries that no longer decode still count as employees.
    ///
    /// # Errors
    ///
    /// Returns `StorageRead` if either roster cannot be read, in which case
    /// nothing is pruned.
    pub fn prune_orphaned_payslips(&mut self) -> EngineResult<usize> {
        let mut known: HashSet<String> = HashSet::new();
        for kind in RosterKind::ALL {
            let raw = self.raw_roster(kind)?;
            known.extend(raw.iter().filter_map(record_id).map(str::to_string));
        }

        let removed = self.payslips().retain(|id| known.contains(id))?;
        if removed > 0 {
            info!(removed, "Pruned orphaned payslips");
        }
        Ok(removed)
    }
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidEmployee {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn encode(employee: &Employee) -> EngineResult<Value> {
    serde_json::to_value(employee).map_err(|e| EngineError::StorageWrite {
        key: employee.id.clone(),
        message: e.to_string(),
    })
}

fn upsert(raw: &mut Vec<Value>, id: &str, value: Value) -> bool {
    match raw.iter_mut().find(|existing| record_id(existing) == Some(id)) {
        Some(existing) => {
            *existing = value;
            false
        }
        None => {
            raw.push(value);
            true
        }
    }
}
