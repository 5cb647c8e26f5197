//! Configuration loading and management for the Payroll Engine.
//!
//! This module provides functionality to load payroll configurations from
//! YAML files, including organisation settings, per-roster role mappings and
//! the payslip template.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/school").unwrap();
//! println!("Loaded organisation: {}", config.organisation().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DEFAULT_PROFILE_PIC, EngineConfig, OrganisationConfig, PayslipTemplate, RoleOption,
    RosterConfig,
};
