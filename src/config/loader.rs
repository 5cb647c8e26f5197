//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::RosterKind;

use super::types::{EngineConfig, OrganisationConfig, PayslipTemplate, RosterConfig};

/// Loads and provides access to engine configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory and
/// provides typed access to organisation, roster and payslip settings.
///
/// # Directory Structure
///
/// ```text
/// config/school/
/// ├── organisation.yaml    # Name, id prefix, deduction rate, defaults
/// ├── payslip.yaml         # Payslip template fractions and defaults
/// └── rosters/
///     ├── teaching.yaml     # Storage key, role mapping, buckets
///     └── non_teaching.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::RosterKind;
///
/// let loader = ConfigLoader::load("./config/school").unwrap();
/// let teaching = loader.roster(RosterKind::Teaching);
/// println!("Teaching roster stored under {}", teaching.storage_key);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or a required field is missing
    ///   (`ConfigParseError`)
    /// - A roster file declares the wrong roster kind (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let organisation = Self::load_yaml::<OrganisationConfig>(&path.join("organisation.yaml"))?;
        let payslip = Self::load_yaml::<PayslipTemplate>(&path.join("payslip.yaml"))?;

        let rosters_dir = path.join("rosters");
        let teaching = Self::load_roster(&rosters_dir, RosterKind::Teaching)?;
        let non_teaching = Self::load_roster(&rosters_dir, RosterKind::NonTeaching)?;

        info!(
            organisation = %organisation.name,
            path = %path.display(),
            "Loaded payroll configuration"
        );

        Ok(Self {
            config: EngineConfig::new(organisation, teaching, non_teaching, payslip),
        })
    }

    /// Wraps the built-in configuration.
    pub fn builtin() -> Self {
        Self {
            config: EngineConfig::builtin(),
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads one roster file and checks it configures the expected roster.
    fn load_roster(rosters_dir: &Path, kind: RosterKind) -> EngineResult<RosterConfig> {
        let file_name = match kind {
            RosterKind::Teaching => "teaching.yaml",
            RosterKind::NonTeaching => "non_teaching.yaml",
        };
        let path = rosters_dir.join(file_name);
        let roster = Self::load_yaml::<RosterConfig>(&path)?;

        if roster.kind != kind {
            return Err(EngineError::ConfigParseError {
                path: path.display().to_string(),
                message: format!("expected kind '{}', found '{}'", kind, roster.kind),
            });
        }

        Ok(roster)
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the organisation settings.
    pub fn organisation(&self) -> &OrganisationConfig {
        self.config.organisation()
    }

    /// Returns the settings for a roster.
    pub fn roster(&self, kind: RosterKind) -> &RosterConfig {
        self.config.roster(kind)
    }

    /// Returns the payslip template.
    pub fn payslip_template(&self) -> &PayslipTemplate {
        self.config.payslip()
    }
}
