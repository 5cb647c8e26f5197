//! Payroll Engine for school staff rosters
//!
//! This crate computes payroll figures for the teaching and non-teaching
//! rosters of an educational institution: filtered payroll line items with a
//! flat deduction, per-role salary summaries, a five-month salary trend,
//! itemized payslips, and dashboard totals. Rosters and saved payslips are
//! persisted as JSON documents in a key-value store.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod store;
