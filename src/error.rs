//! Error types for the Payroll Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while managing rosters and
//! computing payroll figures.
//!
//! Record-level problems that must not abort a batch (a malformed roster
//! entry, a skipped import row) are reported as [`Diagnostic`](crate::models::Diagnostic)
//! values instead of errors.

use thiserror::Error;

/// The main error type for the Payroll Engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::EmployeeNotFound {
///     id: "EMP042".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found: EMP042");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A value could not be read from the key-value store.
    #[error("Failed to read '{key}' from storage: {message}")]
    StorageRead {
        /// The storage key that was being read.
        key: String,
        /// A description of the failure.
        message: String,
    },

    /// A value could not be written to the key-value store.
    #[error("Failed to write '{key}' to storage: {message}")]
    StorageWrite {
        /// The storage key that was being written.
        key: String,
        /// A description of the failure.
        message: String,
    },

    /// No employee with the given id exists in the roster.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The id that was looked up.
        id: String,
    },

    /// No saved payslip exists for the given employee id.
    #[error("Payslip not found for employee: {id}")]
    PayslipNotFound {
        /// The employee id that was looked up.
        id: String,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A payslip override contained an invalid value.
    #[error("Invalid payslip field '{field}': {message}")]
    InvalidPayslip {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A filter value could not be interpreted.
    #[error("Invalid filter '{field}': {message}")]
    InvalidFilter {
        /// The filter that was invalid.
        field: String,
        /// A description of what made the filter invalid.
        message: String,
    },

    /// A bulk import could not be processed at all.
    #[error("Invalid import: {message}")]
    InvalidImport {
        /// A description of why the import was rejected.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
