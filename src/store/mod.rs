//! Persistence for rosters and saved payslips.
//!
//! Everything is stored as JSON documents in a [`KeyValueStore`]: one array
//! per roster and one object holding every saved payslip. The
//! [`EmployeeStore`] layers roster editing, bulk import and payslip lookup on
//! top of any store implementation.
//!
//! # Example
//!
//! ```
//! use payroll_engine::config::EngineConfig;
//! use payroll_engine::models::RosterKind;
//! use payroll_engine::store::{EmployeeStore, MemoryStore};
//!
//! let store = EmployeeStore::new(MemoryStore::new(), EngineConfig::builtin());
//! assert!(store.roster(RosterKind::Teaching).is_empty());
//! ```

mod employees;
mod import;
mod kv;
mod payslips;

pub use employees::EmployeeStore;
pub use import::{ImportBatch, ImportSummary, REQUIRED_HEADERS, parse_import_rows};
pub use kv::{JsonFileStore, KeyValueStore, MemoryStore};
pub use payslips::{PAYSLIPS_KEY, PayslipStore};
